use std::{io::Write, sync::Arc};

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::{
    adapter::{ListAdapter, SavedPlaylistAdapter, TrackListAdapter},
    backend::PlaylistClient,
    info,
    management::FavoritesStore,
    navigation::Route,
    session::{BufferPolicy, PlaylistSession, PlaylistUpdate},
    spotify::auth::SharedAuth,
    success,
    types::{AccessToken, CoverRef, PlaylistRequest, Track},
    utils, warning,
};

use super::{auth, common};

const RESULTS_HELP: &str = "r = regenerate, s [title] = save, o N = track details, \
                            p N = play, f = favorites, d = new duration, q = quit";
const TRACK_HELP: &str = "p = play, b = back to results, q = quit";
const FAVORITES_HELP: &str = "o N = open, n = new playlist, q = quit";
const DETAIL_HELP: &str = "p N = play, b = back, q = quit";

struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Returns `None` on end of input.
    async fn ask(&mut self, label: &str) -> Option<String> {
        print!("{} > ", label);
        let _ = std::io::stdout().flush();
        match self.lines.next_line().await {
            Ok(Some(line)) => Some(line.trim().to_string()),
            Ok(None) => None,
            Err(e) => {
                warning!("Cannot read input: {}", e);
                None
            }
        }
    }
}

/// Splits `"o 3"` into `('o', Some("3"))`.
fn command(line: &str) -> (Option<char>, Option<&str>) {
    let mut parts = line.splitn(2, char::is_whitespace);
    let cmd = parts.next().and_then(|c| c.chars().next());
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());
    (cmd, arg)
}

/// Interactive flow: login, duration entry, results, favorites.
///
/// Favorites live in memory for the duration of the run unless `persist`
/// is set, in which case the favorites file is loaded first and written
/// after every save.
///
/// The playlist session outlives a single visit to the results stage so that
/// a track's details can be shown and left again without a new request. It is
/// dropped, aborting a request still in flight, as soon as the flow moves on
/// to anything else.
pub async fn run(shared_state: SharedAuth, persist: bool) {
    let mut store = if persist {
        common::favorites_store().await
    } else {
        FavoritesStore::in_memory()
    };
    let client = common::playlist_client();
    let mut prompt = Prompt::stdin();
    let mut token: Option<AccessToken> = None;
    let mut session: Option<PlaylistSession> = None;
    let mut route = Route::Login;

    loop {
        route = match route {
            Route::Login => match auth::login(Arc::clone(&shared_state)).await {
                Ok(t) => {
                    success!("Logged in.");
                    token = Some(t.clone());
                    Route::DurationEntry { token: t }
                }
                Err(e) => {
                    warning!("Login failed. {}", e);
                    Route::Exit
                }
            },
            Route::DurationEntry { token } => duration_stage(&mut prompt, token).await,
            Route::GeneratedPlaylist { token, request } => {
                let current = session.insert(PlaylistSession::new(
                    Arc::clone(&client),
                    token,
                    request,
                    BufferPolicy::Reset,
                ));
                current.generate();
                show_update(current).await;
                Route::Results
            }
            Route::Results => match session.as_mut() {
                Some(current) => results_stage(&mut prompt, current, &mut store).await,
                None => back_to_start(token.as_ref()),
            },
            Route::Favorites => favorites_stage(&mut prompt, &store, token.clone()).await,
            Route::FavoriteDetail { position } => detail_stage(&mut prompt, &store, position).await,
            Route::TrackDetail { position, track } => {
                track_stage(&mut prompt, position, &track).await
            }
            Route::Exit => break,
        };

        if !keeps_session(&route) {
            session = None;
        }
    }

    info!("Bye.");
}

/// Routes that still show the current generated playlist.
fn keeps_session(route: &Route) -> bool {
    matches!(route, Route::Results | Route::TrackDetail { .. })
}

fn back_to_start(token: Option<&AccessToken>) -> Route {
    match token {
        Some(token) => Route::DurationEntry {
            token: token.clone(),
        },
        None => Route::Login,
    }
}

async fn duration_stage(prompt: &mut Prompt, token: AccessToken) -> Route {
    loop {
        let Some(hours) = prompt.ask("Hours").await else {
            return Route::Exit;
        };
        let Some(minutes) = prompt.ask("Minutes").await else {
            return Route::Exit;
        };

        match PlaylistRequest::from_inputs(&hours, &minutes) {
            Ok(request) => return Route::GeneratedPlaylist { token, request },
            Err(e) => warning!("{}", e),
        }
    }
}

async fn results_stage(
    prompt: &mut Prompt,
    session: &mut PlaylistSession,
    store: &mut FavoritesStore,
) -> Route {
    common::print_tracks(session.tracks());
    info!("{}", RESULTS_HELP);

    loop {
        let Some(line) = prompt.ask("Playlist").await else {
            return Route::Exit;
        };

        match command(&line) {
            (Some('r'), _) => {
                session.generate();
                show_update(session).await;
                common::print_tracks(session.tracks());
            }
            (Some('s'), title) => {
                let title = title
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Tempo {}", session.request().label()));
                match session.save(store, title, CoverRef::default()) {
                    Ok(saved) => success!("Saved {} ({})", saved.title, saved.length_label),
                    Err(e) => {
                        warning!("Cannot save playlist: {}", e);
                        continue;
                    }
                }
                if let Err(e) = store.persist().await {
                    warning!("Failed to write favorites. Err: {}", e);
                }
                return Route::Favorites;
            }
            (Some('o'), Some(arg)) => match utils::parse_position(arg) {
                Some(index) => match TrackListAdapter::new(session.tracks()).click(index) {
                    Ok(route) => return route,
                    Err(e) => warning!("{}", e),
                },
                None => warning!("{:?} is not a track position", arg),
            },
            (Some('p'), Some(arg)) => match utils::parse_position(arg) {
                Some(index) => {
                    if let Err(e) = TrackListAdapter::new(session.tracks()).secondary(index) {
                        warning!("{}", e);
                    }
                }
                None => warning!("{:?} is not a track position", arg),
            },
            (Some('f'), _) => return Route::Favorites,
            (Some('d'), _) => {
                return Route::DurationEntry {
                    token: session.token().clone(),
                };
            }
            (Some('q'), _) => return Route::Exit,
            _ => info!("{}", RESULTS_HELP),
        }
    }
}

/// Shows one generated track. `b` returns to the same results without a new request.
async fn track_stage(prompt: &mut Prompt, position: usize, track: &Track) -> Route {
    common::print_track_detail(position, track);
    info!("{}", TRACK_HELP);

    loop {
        let Some(line) = prompt.ask(&track.name).await else {
            return Route::Exit;
        };

        match command(&line) {
            (Some('p'), _) => {
                let tracks = std::slice::from_ref(track);
                if let Err(e) = TrackListAdapter::new(tracks).secondary(0) {
                    warning!("{}", e);
                }
            }
            (Some('b'), _) => return Route::Results,
            (Some('q'), _) => return Route::Exit,
            _ => info!("{}", TRACK_HELP),
        }
    }
}

async fn show_update(session: &mut PlaylistSession) {
    match common::await_update(session).await {
        Some(PlaylistUpdate::Loaded { added, .. }) => {
            success!("Received {} tracks", added);
        }
        Some(PlaylistUpdate::Failed { .. }) => {
            warning!("Showing the previous tracks. Press r to try again.");
        }
        None => {}
    }
}

async fn favorites_stage(
    prompt: &mut Prompt,
    store: &FavoritesStore,
    token: Option<AccessToken>,
) -> Route {
    common::print_favorites(store.all());
    info!("{}", FAVORITES_HELP);

    loop {
        let Some(line) = prompt.ask("Favorites").await else {
            return Route::Exit;
        };

        match command(&line) {
            (Some('o'), Some(arg)) => match utils::parse_position(arg) {
                Some(index) => match SavedPlaylistAdapter::new(store.all()).click(index) {
                    Ok(route) => return route,
                    Err(e) => warning!("{}", e),
                },
                None => warning!("{:?} is not a favorites position", arg),
            },
            (Some('n'), _) => match token.clone() {
                Some(token) => return Route::DurationEntry { token },
                None => return Route::Login,
            },
            (Some('q'), _) => return Route::Exit,
            _ => info!("{}", FAVORITES_HELP),
        }
    }
}

async fn detail_stage(prompt: &mut Prompt, store: &FavoritesStore, position: usize) -> Route {
    let Some(playlist) = store.get(position) else {
        warning!("No favorite {}", position + 1);
        return Route::Favorites;
    };

    common::print_favorite_detail(position, playlist);
    info!("{}", DETAIL_HELP);

    loop {
        let Some(line) = prompt.ask(&playlist.title).await else {
            return Route::Exit;
        };

        match command(&line) {
            (Some('p'), Some(arg)) => match utils::parse_position(arg) {
                Some(index) => {
                    if let Err(e) = TrackListAdapter::new(&playlist.tracks).secondary(index) {
                        warning!("{}", e);
                    }
                }
                None => warning!("{:?} is not a track position", arg),
            },
            (Some('b'), _) => return Route::Favorites,
            (Some('q'), _) => return Route::Exit,
            _ => info!("{}", DETAIL_HELP),
        }
    }
}
