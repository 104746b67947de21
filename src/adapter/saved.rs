use crate::{navigation::Route, types::SavedPlaylist};

use super::{AdapterError, Artwork, ItemClickListener, ListAdapter, RowView};

/// Default row action for favorites: open the playlist's detail stage.
pub struct OpenFavoriteDetail;

impl ItemClickListener<SavedPlaylist> for OpenFavoriteDetail {
    fn on_click(&mut self, position: usize, _item: &SavedPlaylist) -> Route {
        Route::FavoriteDetail { position }
    }
}

pub struct SavedPlaylistAdapter<'a> {
    playlists: &'a [SavedPlaylist],
    listener: Box<dyn ItemClickListener<SavedPlaylist> + 'a>,
}

impl<'a> SavedPlaylistAdapter<'a> {
    pub fn new(playlists: &'a [SavedPlaylist]) -> Self {
        Self::with_listener(playlists, OpenFavoriteDetail)
    }

    pub fn with_listener(
        playlists: &'a [SavedPlaylist],
        listener: impl ItemClickListener<SavedPlaylist> + 'a,
    ) -> Self {
        Self {
            playlists,
            listener: Box::new(listener),
        }
    }
}

impl ListAdapter for SavedPlaylistAdapter<'_> {
    type Item = SavedPlaylist;

    fn items(&self) -> &[SavedPlaylist] {
        self.playlists
    }

    fn bind(&self, position: usize, holder: &mut RowView) -> Result<(), AdapterError> {
        let playlist = self.item(position)?;
        holder.number = position + 1;
        holder.title = playlist.title.clone();
        holder.length = playlist.length_label.clone();
        holder.subtitle = String::new();
        holder.artwork = Artwork::Local(playlist.cover.clone());
        Ok(())
    }

    fn click(&mut self, position: usize) -> Result<Route, AdapterError> {
        let playlists = self.playlists;
        let playlist = playlists.get(position).ok_or(AdapterError::OutOfRange {
            position,
            count: playlists.len(),
        })?;
        Ok(self.listener.on_click(position, playlist))
    }

    fn secondary(&mut self, _position: usize) -> Result<(), AdapterError> {
        Err(AdapterError::Unsupported("play"))
    }
}
