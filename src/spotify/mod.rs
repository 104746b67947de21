//! # Spotify Login
//!
//! Obtains a bearer token from Spotify's hosted login using the implicit
//! grant (`response_type=token`). The token is opaque to this crate: it is
//! cached by [`crate::management::TokenManager`] and forwarded unchanged to
//! the Tempo backend, which talks to the Spotify Web API on the user's behalf.
//!
//! ## Flow
//!
//! ```text
//! tempo auth
//!     ↓
//! AuthorizationRequest (client id, redirect uri, scopes, state)
//!     ↓
//! Browser → accounts.spotify.com/authorize
//!     ↓
//! Redirect → local callback server (/callback → /token)
//!     ↓
//! AuthorizationResponse::{Token, Error, Empty}
//! ```
//!
//! The default scopes are `user-read-recently-played`, `user-top-read` and
//! `user-read-playback-state`; the backend uses them to pick tracks the user
//! already listens to.

pub mod auth;
