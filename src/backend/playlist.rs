use std::time::Duration;

use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use url::Url;

use crate::{
    config::{self, ConfigError},
    types::{AccessToken, PlaylistRequest, PlaylistResponse},
};

const PLAYLIST_PATH: &str = "tempo/playlist/";
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid backend URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("cannot build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("cannot encode playlist request: {0}")]
    Encode(serde_json::Error),
    #[error("no response from backend: {0}")]
    Transport(reqwest::Error),
    #[error("backend answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("cannot decode playlist response: {0}")]
    Decode(serde_json::Error),
}

/// Client for the Tempo backend's playlist generator.
pub struct PlaylistClient {
    http: Client,
    endpoint: Url,
}

impl PlaylistClient {
    pub fn new(base_url: &str) -> Result<Self, PlaylistError> {
        Self::with_timeout(base_url, None)
    }

    /// `timeout` bounds the whole request. `None` keeps reqwest's defaults.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, PlaylistError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(PlaylistError::Client)?;

        Ok(Self {
            http,
            endpoint: playlist_endpoint(base_url)?,
        })
    }

    pub fn from_config() -> Result<Self, PlaylistError> {
        Self::with_timeout(&config::tempo_api_url(), config::request_timeout()?)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Asks the backend for a playlist filling `request`.
    ///
    /// Sends exactly one `POST {base}tempo/playlist/` with the duration as
    /// JSON body and the token as bearer credential. There is no retry.
    ///
    /// # Errors
    ///
    /// - [`PlaylistError::Transport`] when no response was received
    /// - [`PlaylistError::Status`] for any non-2xx answer
    /// - [`PlaylistError::Decode`] when a 2xx body is not a playlist
    pub async fn request_playlist(
        &self,
        request: &PlaylistRequest,
        token: &AccessToken,
    ) -> Result<PlaylistResponse, PlaylistError> {
        let body = serde_json::to_vec(request).map_err(PlaylistError::Encode)?;

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(token.as_str())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(PlaylistError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlaylistError::Status { status, body });
        }

        let bytes = response.bytes().await.map_err(PlaylistError::Transport)?;
        serde_json::from_slice::<PlaylistResponse>(&bytes).map_err(PlaylistError::Decode)
    }
}

/// Resolves the playlist path against `base_url`, with or without a trailing slash.
fn playlist_endpoint(base_url: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(PLAYLIST_PATH)
}
