use std::{io, path::PathBuf};

use chrono::Utc;

use crate::{
    config,
    types::{AccessToken, EmptyToken, Token},
};

/// Seconds before the real expiry at which a token is treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("no cached token, run `tempo auth` first ({0})")]
    Missing(io::Error),
    #[error("cached token is unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("cached token has expired, run `tempo auth` again")]
    Expired,
    #[error(transparent)]
    Empty(#[from] EmptyToken),
    #[error("cannot write token cache: {0}")]
    Io(io::Error),
}

/// Caches the bearer token obtained by the login flow.
///
/// Tokens from the implicit grant cannot be refreshed, so an expired token
/// is reported instead of being renewed.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager {
            token,
            path: Self::token_path(),
        }
    }

    pub fn with_path(token: Token, path: impl Into<PathBuf>) -> Self {
        TokenManager {
            token,
            path: path.into(),
        }
    }

    pub async fn load() -> Result<Self, TokenError> {
        Self::load_from(Self::token_path()).await
    }

    pub async fn load_from(path: impl Into<PathBuf>) -> Result<Self, TokenError> {
        let path = path.into();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(TokenError::Missing)?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token, path })
    }

    pub async fn persist(&self) -> Result<(), TokenError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(TokenError::Io)?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&self.path, json)
            .await
            .map_err(TokenError::Io)
    }

    pub fn get_valid_token(&self) -> Result<AccessToken, TokenError> {
        if self.is_expired() {
            return Err(TokenError::Expired);
        }

        Ok(AccessToken::new(self.token.access_token.clone())?)
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        let valid_until = (self.token.obtained_at + self.token.expires_in)
            .saturating_sub(EXPIRY_MARGIN_SECS);
        now >= valid_until
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
