use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    adapter::{ListAdapter, SavedPlaylistAdapter, TrackListAdapter},
    backend::PlaylistClient,
    error, info,
    management::{FavoritesStore, TokenManager},
    session::{PlaylistSession, PlaylistUpdate},
    types::{AccessToken, SavedPlaylist, Track},
    warning,
};

pub(crate) async fn cached_token() -> AccessToken {
    let token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => error!("Failed to load token. {}", e),
    };

    match token_mgr.get_valid_token() {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    }
}

pub(crate) fn playlist_client() -> Arc<PlaylistClient> {
    match PlaylistClient::from_config() {
        Ok(client) => Arc::new(client),
        Err(e) => error!("Cannot set up backend client. Err: {}", e),
    }
}

pub(crate) async fn favorites_store() -> FavoritesStore {
    match FavoritesStore::open_default().await {
        Ok(store) => store,
        Err(e) => error!("Failed to load favorites. Err: {}", e),
    }
}

pub(crate) fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Waits for the session's current request behind a spinner.
pub(crate) async fn await_update(session: &mut PlaylistSession) -> Option<PlaylistUpdate> {
    let pb = spinner(format!("Generating {} playlist...", session.request().label()));
    let update = session.next_update().await;
    pb.finish_and_clear();
    update
}

pub(crate) fn print_tracks(tracks: &[Track]) {
    if tracks.is_empty() {
        info!("No tracks to show.");
        return;
    }

    match TrackListAdapter::new(tracks).render() {
        Ok(table) => println!("{}", table),
        Err(e) => warning!("Cannot show tracks. Err: {}", e),
    }
}

pub(crate) fn print_track_detail(position: usize, track: &Track) {
    info!("Track {}: {}", position + 1, track.name);
    info!("Artists: {}", track.artist_label());
    info!("Length: {}", track.duration_label());
    info!("Cover: {}", track.artwork().unwrap_or("none"));
    info!("Link: {}", track.href);
}

pub(crate) fn print_favorites(playlists: &[SavedPlaylist]) {
    if playlists.is_empty() {
        info!("No favorites saved yet.");
        return;
    }

    match SavedPlaylistAdapter::new(playlists).render() {
        Ok(table) => println!("{}", table),
        Err(e) => warning!("Cannot show favorites. Err: {}", e),
    }
}

pub(crate) fn print_favorite_detail(position: usize, playlist: &SavedPlaylist) {
    info!(
        "Favorite {}: {} ({}, saved {})",
        position + 1,
        playlist.title,
        playlist.length_label,
        playlist.saved_at.format("%Y-%m-%d %H:%M")
    );
    print_tracks(&playlist.tracks);
}
