use crate::{navigation::Route, types::Track};

use super::{
    AdapterError, Artwork, BrowserOpener, ItemClickListener, ListAdapter, RowView, UrlOpener,
};

/// Default row action for tracks: show the track's details.
pub struct ShowTrackDetail;

impl ItemClickListener<Track> for ShowTrackDetail {
    fn on_click(&mut self, position: usize, item: &Track) -> Route {
        Route::TrackDetail {
            position,
            track: item.clone(),
        }
    }
}

pub struct TrackListAdapter<'a> {
    tracks: &'a [Track],
    listener: Box<dyn ItemClickListener<Track> + 'a>,
    opener: Box<dyn UrlOpener + 'a>,
}

impl<'a> TrackListAdapter<'a> {
    pub fn new(tracks: &'a [Track]) -> Self {
        Self::with_listener(tracks, ShowTrackDetail)
    }

    pub fn with_listener(
        tracks: &'a [Track],
        listener: impl ItemClickListener<Track> + 'a,
    ) -> Self {
        Self {
            tracks,
            listener: Box::new(listener),
            opener: Box::new(BrowserOpener),
        }
    }

    pub fn opener(mut self, opener: impl UrlOpener + 'a) -> Self {
        self.opener = Box::new(opener);
        self
    }
}

impl ListAdapter for TrackListAdapter<'_> {
    type Item = Track;

    fn items(&self) -> &[Track] {
        self.tracks
    }

    fn bind(&self, position: usize, holder: &mut RowView) -> Result<(), AdapterError> {
        let track = self.item(position)?;
        holder.number = position + 1;
        holder.title = track.name.clone();
        holder.length = track.duration_label();
        holder.subtitle = track.artist_label();
        holder.artwork = match track.artwork() {
            Some(url) => Artwork::Remote(url.to_string()),
            None => Artwork::Placeholder,
        };
        Ok(())
    }

    fn click(&mut self, position: usize) -> Result<Route, AdapterError> {
        let tracks = self.tracks;
        let track = tracks.get(position).ok_or(AdapterError::OutOfRange {
            position,
            count: tracks.len(),
        })?;
        Ok(self.listener.on_click(position, track))
    }

    /// Opens the track's `href`.
    fn secondary(&mut self, position: usize) -> Result<(), AdapterError> {
        let track = self.item(position)?;
        if track.href.trim().is_empty() {
            return Err(AdapterError::MissingLink { position });
        }
        self.opener.open(&track.href)
    }
}
