use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::Utc;
use tokio::sync::{Mutex, Notify};
use url::Url;

use crate::{
    config::{self, ConfigError},
    server,
    types::{AccessToken, EmptyToken, Token},
    utils, warning,
};

/// Parameters of one hosted-login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub state: String,
}

impl AuthorizationRequest {
    /// Builds a request from the configured client ID, redirect URI and
    /// scopes, with a freshly generated `state`.
    pub fn from_config() -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: config::spotify_client_id()?,
            redirect_uri: config::spotify_redirect_uri(),
            scopes: config::spotify_scopes(),
            state: utils::generate_state(),
        })
    }

    /// Returns the hosted login URL for the implicit grant (`response_type=token`).
    ///
    /// Scopes are joined by a single space before encoding.
    pub fn authorize_url(&self, auth_url: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(auth_url)?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "token")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.scopes.join(" "))
            .append_pair("state", &self.state);
        Ok(url)
    }
}

/// What the hosted login handed back to the redirect URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationResponse {
    Token { access_token: String, expires_in: u64 },
    Error(String),
    /// Neither a token nor an error, e.g. the user reloaded the callback page.
    Empty,
}

impl AuthorizationResponse {
    /// Interprets the parameters of a redirect.
    ///
    /// An explicit `error` wins. A token whose `state` does not match the
    /// pending request is rejected as an error.
    pub fn from_params(params: &HashMap<String, String>, expected_state: &str) -> Self {
        if let Some(reason) = params.get("error") {
            return Self::Error(reason.clone());
        }

        let access_token = match params.get("access_token") {
            Some(token) if !token.trim().is_empty() => token.clone(),
            _ => return Self::Empty,
        };

        if params.get("state").map(String::as_str) != Some(expected_state) {
            return Self::Error("state mismatch".to_string());
        }

        let expires_in = params
            .get("expires_in")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(3600);

        Self::Token {
            access_token,
            expires_in,
        }
    }
}

/// State shared between the waiting auth flow and the callback handlers.
#[derive(Debug, Clone)]
pub struct PendingAuth {
    pub state: String,
    pub response: Option<AuthorizationResponse>,
}

impl PendingAuth {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            response: None,
        }
    }

    /// Stores the first outcome; later redirects are ignored.
    pub fn record(&mut self, response: AuthorizationResponse) -> bool {
        if self.response.is_some() {
            return false;
        }
        self.response = Some(response);
        true
    }
}

pub type SharedAuth = Arc<Mutex<Option<PendingAuth>>>;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid authorization URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("cannot start callback server: {0}")]
    Server(#[from] std::io::Error),
    #[error("authorization was denied: {0}")]
    Denied(String),
    #[error("no authorization response received within {0:?}")]
    NoResponse(Duration),
    #[error(transparent)]
    EmptyToken(#[from] EmptyToken),
}

/// Runs the hosted login once and returns the granted token.
///
/// This function orchestrates the whole implicit grant:
/// 1. Building the authorization request from configuration
/// 2. Starting the local callback server
/// 3. Opening the authorization URL in the user's browser
/// 4. Waiting for the callback, at most `TEMPO_AUTH_TIMEOUT_SECS`
/// 5. Stopping the callback server
///
/// # Arguments
///
/// * `shared_state` - Shared between this flow and the callback handlers;
///   holds the expected `state` and, once the browser comes back, the outcome
///
/// # Outcomes
///
/// - `Token` is converted into a [`Token`] ready to be cached
/// - `Error(reason)` becomes [`AuthError::Denied`]
/// - `Empty` or no redirect at all becomes [`AuthError::NoResponse`]
///
/// There is no retry. Running `tempo auth` again starts a new attempt.
pub async fn authorize(shared_state: SharedAuth) -> Result<Token, AuthError> {
    let request = AuthorizationRequest::from_config()?;
    let auth_url = request.authorize_url(&config::spotify_apiauth_url())?;
    let max_wait = config::auth_timeout()?;

    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PendingAuth::new(request.state.clone()));
    }

    let listener = server::bind(&config::server_addr()).await?;
    let shutdown = Arc::new(Notify::new());
    let server_state = Arc::clone(&shared_state);
    let server_shutdown = Arc::clone(&shutdown);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::serve(listener, server_state, server_shutdown).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let response = wait_for_response(Arc::clone(&shared_state), max_wait).await;

    shutdown.notify_one();
    let _ = server_handle.await;

    outcome(response, &request.scopes, max_wait)
}

/// Turns the recorded redirect outcome, if any, into a token or an error.
fn outcome(
    response: Option<AuthorizationResponse>,
    scopes: &[String],
    max_wait: Duration,
) -> Result<Token, AuthError> {
    match response {
        Some(AuthorizationResponse::Token {
            access_token,
            expires_in,
        }) => {
            let access_token = AccessToken::new(access_token)?;
            Ok(Token {
                access_token: access_token.as_str().to_string(),
                token_type: "Bearer".to_string(),
                scope: scopes.join(" "),
                expires_in,
                obtained_at: Utc::now().timestamp() as u64,
            })
        }
        Some(AuthorizationResponse::Error(reason)) => Err(AuthError::Denied(reason)),
        Some(AuthorizationResponse::Empty) | None => Err(AuthError::NoResponse(max_wait)),
    }
}

/// Polls the shared state until a callback recorded an outcome or `max_wait` elapses.
///
/// # Timeout Behavior
///
/// - Polling interval: 500 milliseconds
/// - Non-blocking: Uses async sleep to avoid CPU spinning
async fn wait_for_response(
    shared_state: SharedAuth,
    max_wait: Duration,
) -> Option<AuthorizationResponse> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pending) = lock.as_ref() {
            if let Some(response) = &pending.response {
                return Some(response.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_returns_recorded_outcome() {
        let shared: SharedAuth = Arc::new(Mutex::new(Some(PendingAuth::new("abc"))));
        {
            let mut lock = shared.lock().await;
            lock.as_mut()
                .unwrap()
                .record(AuthorizationResponse::Error("access_denied".into()));
        }

        let response = wait_for_response(shared, Duration::from_secs(2)).await;
        assert_eq!(
            response,
            Some(AuthorizationResponse::Error("access_denied".into()))
        );
    }

    #[tokio::test]
    async fn wait_times_out_without_callback() {
        let shared: SharedAuth = Arc::new(Mutex::new(Some(PendingAuth::new("abc"))));
        let response = wait_for_response(shared, Duration::from_millis(10)).await;
        assert_eq!(response, None);
    }

    fn scopes() -> Vec<String> {
        vec!["user-top-read".to_string(), "user-read-playback-state".to_string()]
    }

    #[test]
    fn outcome_with_token_builds_bearer_token() {
        let token = outcome(
            Some(AuthorizationResponse::Token {
                access_token: "abc".into(),
                expires_in: 1800,
            }),
            &scopes(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(token.access_token, "abc");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.scope, "user-top-read user-read-playback-state");
        assert_eq!(token.expires_in, 1800);
        assert!(token.obtained_at > 0);
    }

    #[test]
    fn outcome_with_blank_token_is_rejected() {
        let result = outcome(
            Some(AuthorizationResponse::Token {
                access_token: "  ".into(),
                expires_in: 3600,
            }),
            &scopes(),
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(AuthError::EmptyToken(_))));
    }

    #[test]
    fn outcome_with_error_is_denied() {
        let result = outcome(
            Some(AuthorizationResponse::Error("access_denied".into())),
            &scopes(),
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(AuthError::Denied(reason)) if reason == "access_denied"));
    }

    #[test]
    fn outcome_without_token_is_no_response() {
        let max_wait = Duration::from_secs(5);

        let result = outcome(Some(AuthorizationResponse::Empty), &scopes(), max_wait);
        assert!(matches!(result, Err(AuthError::NoResponse(d)) if d == max_wait));

        let result = outcome(None, &scopes(), max_wait);
        assert!(matches!(result, Err(AuthError::NoResponse(d)) if d == max_wait));
    }
}
