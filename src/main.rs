use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tempo::{
    cli, config, error,
    spotify::auth::SharedAuth,
    types::PlaylistRequest,
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in with Spotify
    Auth,

    /// Generate a playlist for a listening duration
    Generate(GenerateOptions),

    /// Handle saved favorites
    Favorites(FavoritesOptions),

    /// Walk through login, generation and favorites interactively
    Run(RunOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateOptions {
    /// Hours of music
    #[clap(long, default_value_t = 0)]
    pub hours: u32,

    /// Minutes of music
    #[clap(long, default_value_t = 0)]
    pub minutes: u32,

    /// Request a new playlist this many times after the first one
    #[clap(long, default_value_t = 0)]
    pub regenerate: u32,

    /// Keep the tracks of every request instead of only the latest
    #[clap(long)]
    pub accumulate: bool,

    /// Save the result to favorites under this title
    #[clap(long)]
    pub save: Option<String>,

    /// Cover image reference for the saved playlist
    #[clap(long, requires = "save")]
    pub cover: Option<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle saved favorites",
    args_conflicts_with_subcommands = true
)]
pub struct FavoritesOptions {
    /// Subcommands under `favorites` (e.g., `show`)
    #[command(subcommand)]
    pub command: Option<FavoritesSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FavoritesSubcommand {
    /// Show the tracks of a saved playlist
    Show {
        /// Position in the favorites list (starting at 1)
        position: String,
    },
    /// Open a track of a saved playlist
    Play {
        /// Position in the favorites list (starting at 1)
        position: String,
        /// Position of the track in the playlist (starting at 1)
        track: String,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct RunOptions {
    /// Load and write the favorites file instead of keeping favorites in memory
    #[clap(long)]
    persist: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let auth_state: SharedAuth = Arc::new(Mutex::new(None));
            cli::auth(auth_state).await;
        }
        Command::Generate(opt) => {
            cli::generate(cli::GenerateArgs {
                request: PlaylistRequest::new(opt.hours, opt.minutes),
                regenerate: opt.regenerate,
                accumulate: opt.accumulate,
                save: opt.save,
                cover: opt.cover,
            })
            .await
        }
        Command::Favorites(opt) => match opt.command {
            Some(FavoritesSubcommand::Show { position }) => cli::show_favorite(position).await,
            Some(FavoritesSubcommand::Play { position, track }) => {
                cli::play_favorite_track(position, track).await
            }
            None => cli::list_favorites().await,
        },
        Command::Run(opt) => {
            let auth_state: SharedAuth = Arc::new(Mutex::new(None));
            cli::run(auth_state, opt.persist).await;
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
