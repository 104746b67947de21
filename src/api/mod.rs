//! # API Module
//!
//! HTTP endpoints of the short-lived local server that receives the redirect
//! from Spotify's hosted login.
//!
//! ## Endpoints
//!
//! - [`callback`] - Redirect target registered with Spotify. The implicit grant
//!   delivers the token in the URL fragment, so this endpoint serves a page that
//!   forwards the fragment to [`token`]. Errors arrive as query parameters and
//!   are recorded directly.
//! - [`token`] - Receives the forwarded fragment and records the outcome in the
//!   shared login state.
//! - [`health`] - Returns status and version information.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use tempo::api::{callback, health, token};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/token", get(token))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use callback::token;
pub use health::health;
