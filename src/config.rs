//! Configuration management for the Tempo CLI.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including the Tempo backend location, Spotify login parameters
//! and the local callback server address.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)
//!
//! Unlike a missing optional value, a missing required value is reported as a
//! [`ConfigError`] so the command can tell the user what to set.

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_TEMPO_API_URL: &str = "http://34.130.140.246/";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_SCOPES: [&str; 3] = [
    "user-read-recently-played",
    "user-top-read",
    "user-read-playback-state",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set (environment or {1})")]
    Missing(&'static str, String),
    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Returns the application's directory inside the local data directory.
///
/// - Linux: `~/.local/share/tempo`
/// - macOS: `~/Library/Application Support/tempo`
/// - Windows: `%LOCALAPPDATA%/tempo`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tempo");
    path
}

fn env_file() -> PathBuf {
    data_dir().join(".env")
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory if it doesn't exist. A missing `.env` file is not an
/// error: every value has either a default or is checked when it is needed.
/// Variables already present in the process environment win over the file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the `.env` file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_file();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or_else(|| ConfigError::Missing(key, env_file().display().to_string()))
}

fn parse_secs(key: &'static str) -> Result<Option<Duration>, ConfigError> {
    match optional(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

/// Base URL of the Tempo backend (`TEMPO_API_URL`).
///
/// The playlist endpoint `tempo/playlist/` is resolved against it.
pub fn tempo_api_url() -> String {
    optional("TEMPO_API_URL").unwrap_or_else(|| DEFAULT_TEMPO_API_URL.to_string())
}

/// Optional overall timeout for backend requests (`TEMPO_REQUEST_TIMEOUT_SECS`).
///
/// `None` leaves reqwest's defaults in place.
pub fn request_timeout() -> Result<Option<Duration>, ConfigError> {
    parse_secs("TEMPO_REQUEST_TIMEOUT_SECS")
}

/// How long the auth flow waits for the browser to come back (`TEMPO_AUTH_TIMEOUT_SECS`).
pub fn auth_timeout() -> Result<Duration, ConfigError> {
    Ok(parse_secs("TEMPO_AUTH_TIMEOUT_SECS")?
        .unwrap_or(Duration::from_secs(DEFAULT_AUTH_TIMEOUT_SECS)))
}

/// Address the local OAuth callback server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    optional("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Spotify client ID of the registered application (`SPOTIFY_API_AUTH_CLIENT_ID`).
///
/// # Errors
///
/// Returns [`ConfigError::Missing`] when the variable is not set.
pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Redirect URI registered for the application (`SPOTIFY_API_REDIRECT_URI`).
///
/// Must point at the `/callback` route of the local server.
pub fn spotify_redirect_uri() -> String {
    optional("SPOTIFY_API_REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string())
}

/// Requested scopes (`SPOTIFY_API_AUTH_SCOPE`, space separated).
pub fn spotify_scopes() -> Vec<String> {
    match optional("SPOTIFY_API_AUTH_SCOPE") {
        Some(scope) => scope.split_whitespace().map(str::to_string).collect(),
        None => DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
    }
}

/// Spotify hosted login URL (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    optional("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_AUTH_URL.to_string())
}
