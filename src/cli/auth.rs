use crate::{
    Res, error,
    management::TokenManager,
    spotify::{self, auth::SharedAuth},
    success,
    types::AccessToken,
    warning,
};

pub async fn auth(shared_state: SharedAuth) {
    match login(shared_state).await {
        Ok(_) => success!("Authentication successful!"),
        Err(e) => error!("Authentication failed. {}", e),
    }
}

/// Runs the hosted login and caches the token.
///
/// A token that cannot be cached is still returned; the interactive flow
/// can continue with it.
pub(crate) async fn login(shared_state: SharedAuth) -> Res<AccessToken> {
    let token = spotify::auth::authorize(shared_state).await?;

    let token_manager = TokenManager::new(token);
    if let Err(e) = token_manager.persist().await {
        warning!("Failed to save token to cache: {}", e);
    }

    Ok(token_manager.get_valid_token()?)
}
