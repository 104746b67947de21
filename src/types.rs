use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Opaque bearer credential handed from the login stage to every request.
///
/// Never empty. `Debug` does not print the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("access token is missing or empty")]
pub struct EmptyToken;

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Result<Self, EmptyToken> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(EmptyToken);
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumImage {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<AlbumImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub href: String,
    #[serde(default)]
    pub album: Album,
}

impl Track {
    /// Artist names joined with `", "`.
    pub fn artist_label(&self) -> String {
        utils::join_artist_names(&self.artists)
    }

    pub fn duration_label(&self) -> String {
        utils::format_duration_ms(self.duration_ms)
    }

    /// URL of the first album image, `None` when the album has no art.
    pub fn artwork(&self) -> Option<&str> {
        self.album.images.first().map(|image| image.url.as_str())
    }
}

/// Requested total listening time, sent as the request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRequest {
    pub hours: u32,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("invalid {field}: {value:?} is not a non-negative whole number")]
    Invalid { field: &'static str, value: String },
}

impl PlaylistRequest {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    /// Parses the raw text of the duration entry fields. Blank fields count as 0.
    pub fn from_inputs(hours: &str, minutes: &str) -> Result<Self, DurationError> {
        Ok(Self {
            hours: parse_field("hours", hours)?,
            minutes: parse_field("minutes", minutes)?,
        })
    }

    pub fn label(&self) -> String {
        utils::format_length_label(u64::from(self.hours) * 60 + u64::from(self.minutes))
    }
}

fn parse_field(field: &'static str, value: &str) -> Result<u32, DurationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value.parse::<u32>().map_err(|_| DurationError::Invalid {
        field,
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub tracks: Vec<Track>,
}

/// Opaque reference to a locally bundled cover image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverRef(String);

impl CoverRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CoverRef {
    fn default() -> Self {
        Self::new("music-note")
    }
}

impl fmt::Display for CoverRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlaylist {
    pub title: String,
    pub length_label: String,
    pub cover: CoverRef,
    pub tracks: Vec<Track>,
    pub saved_at: DateTime<Utc>,
}
