//! # CLI Module
//!
//! This module provides the command-line interface layer for Tempo. It
//! implements the user-facing commands and coordinates the Spotify login,
//! the Tempo backend client, the favorites store and terminal output.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the Spotify hosted login and caches the token
//! - [`generate`] - Requests a playlist for a duration, prints it and
//!   optionally saves it to the favorites
//! - [`list_favorites`], [`show_favorite`], [`play_favorite_track`] - Work
//!   with the saved favorites
//! - [`run`] - Interactive flow through all stages in one process
//!
//! ## Stages of the interactive flow
//!
//! ```text
//! Login → Duration entry → Results ⇄ Favorites → Favorite detail
//! ```
//!
//! Stages hand each other a [`crate::navigation::Route`]. The results stage
//! owns a [`crate::session::PlaylistSession`]; leaving the stage drops the
//! session and aborts a request that is still running.
//!
//! ## Error presentation
//!
//! - Missing configuration or an unusable token stops the command with a
//!   message telling the user what to do
//! - Failed playlist requests are printed as warnings and keep the tracks
//!   that were shown before
//! - Invalid positions and links are printed as warnings

mod auth;
mod common;
mod favorites;
mod generate;
mod run;

pub use auth::auth;
pub use favorites::list_favorites;
pub use favorites::play_favorite_track;
pub use favorites::show_favorite;
pub use generate::GenerateArgs;
pub use generate::generate;
pub use run::run;
