use crate::{
    adapter::{ListAdapter, SavedPlaylistAdapter, TrackListAdapter},
    navigation::Route,
    success, utils, warning,
};

use super::common;

pub async fn list_favorites() {
    let store = common::favorites_store().await;
    common::print_favorites(store.all());
}

/// Shows one saved playlist. `position` is 1-based as printed in the list.
pub async fn show_favorite(position: String) {
    let store = common::favorites_store().await;
    let Some(index) = utils::parse_position(&position) else {
        warning!("{:?} is not a favorites position", position);
        return;
    };

    let mut adapter = SavedPlaylistAdapter::new(store.all());
    match adapter.click(index) {
        Ok(Route::FavoriteDetail { position }) => match store.get(position) {
            Some(playlist) => common::print_favorite_detail(position, playlist),
            None => warning!("Favorite {} disappeared", position + 1),
        },
        Ok(_) => {}
        Err(e) => warning!("{}", e),
    }
}

/// Opens one track of a saved playlist. Both positions are 1-based.
pub async fn play_favorite_track(position: String, track: String) {
    let store = common::favorites_store().await;
    let (Some(index), Some(track_index)) = (
        utils::parse_position(&position),
        utils::parse_position(&track),
    ) else {
        warning!("Positions start at 1");
        return;
    };

    let Some(playlist) = store.get(index) else {
        warning!("No favorite {} (you have {})", index + 1, store.len());
        return;
    };

    match TrackListAdapter::new(&playlist.tracks).secondary(track_index) {
        Ok(()) => success!("Opened {}", playlist.tracks[track_index].name),
        Err(e) => warning!("{}", e),
    }
}
