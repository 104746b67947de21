//! Tempo Playlist CLI Library
//!
//! This library provides the building blocks of the `tempo` command-line
//! client: authenticating against Spotify's hosted login, asking the Tempo
//! backend for a playlist that fills a requested listening duration, showing
//! the generated tracks and keeping a collection of favorite playlists.
//!
//! # Modules
//!
//! - `adapter` - List adapters that bind tracks and saved playlists to table rows
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `backend` - Tempo backend client (playlist generation)
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Token cache and favorites store
//! - `navigation` - Typed routes between the CLI stages
//! - `server` - Local HTTP server for OAuth callbacks
//! - `session` - Results stage owning the in-flight playlist request
//! - `spotify` - Spotify hosted login (implicit grant)
//! - `types` - Data structures and type definitions
//! - `utils` - Formatting and small helpers
//!
//! # Example
//!
//! ```
//! use tempo::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> tempo::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod api;
pub mod backend;
pub mod cli;
pub mod config;
pub mod management;
pub mod navigation;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the command glue where several module errors meet. Library
/// modules return their own error enums instead.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Requesting playlist for {}", label);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// success!("Saved playlist with {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used at the top of command handlers for failures the user has to
/// fix before trying again (missing configuration, no cached token).
/// Everything below the command layer returns errors instead.
///
/// # Example
///
/// ```
/// error!("Failed to load token. Please run tempo auth");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues: failed playlist requests, a browser that
/// could not be opened, a favorites file that could not be written.
///
/// # Example
///
/// ```
/// warning!("Playlist request failed: {}", err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
