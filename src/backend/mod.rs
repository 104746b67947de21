//! # Tempo Backend
//!
//! HTTP client for the Tempo backend, which picks tracks from the user's
//! Spotify listening history until a requested duration is filled.
//!
//! ## Endpoint
//!
//! ```text
//! POST {TEMPO_API_URL}tempo/playlist/
//! Authorization: Bearer <spotify access token>
//! Content-Type: application/json; charset=utf-8
//!
//! {"hours": 1, "minutes": 20}
//! ```
//!
//! The answer is `{"tracks": [{name, duration_ms, artists, href, album}, ...]}`.
//!
//! [`PlaylistClient`] performs a single request. Ownership of in-flight
//! requests, regeneration and result buffering live in [`crate::session`].

pub mod playlist;

pub use playlist::PlaylistClient;
pub use playlist::PlaylistError;
