use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{
    spotify::auth::{AuthorizationResponse, SharedAuth},
    warning,
};

/// The implicit grant puts the token into the URL fragment, which browsers
/// never send to the server. This page forwards it to `/token` as a query.
const FORWARD_FRAGMENT_PAGE: &str = r#"<!doctype html>
<html>
  <body>
    <h4>Completing login...</h4>
    <script>
      var fragment = window.location.hash ? window.location.hash.substring(1) : "";
      window.location.replace("/token?" + fragment);
    </script>
  </body>
</html>"#;

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<SharedAuth>,
) -> Html<&'static str> {
    if !params.contains_key("error") {
        return Html(FORWARD_FRAGMENT_PAGE);
    }

    record(&params, &shared_state).await
}

pub async fn token(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<SharedAuth>,
) -> Html<&'static str> {
    record(&params, &shared_state).await
}

async fn record(params: &HashMap<String, String>, shared_state: &SharedAuth) -> Html<&'static str> {
    let mut state = shared_state.lock().await;
    let Some(pending) = state.as_mut() else {
        return Html("<h4>No login in progress.</h4>");
    };

    let response = AuthorizationResponse::from_params(params, &pending.state);
    let page = match &response {
        AuthorizationResponse::Token { .. } => {
            "<h2>Authentication successful.</h2><p>Close browser window.</p>"
        }
        AuthorizationResponse::Error(reason) => {
            warning!("Spotify login returned an error: {}", reason);
            "<h4>Login failed.</h4><p>Return to the terminal for details.</p>"
        }
        AuthorizationResponse::Empty => "<h4>Missing access token.</h4>",
    };

    if !pending.record(response) {
        return Html("<h4>Login already completed.</h4>");
    }
    Html(page)
}
