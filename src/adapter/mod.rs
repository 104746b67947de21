//! # List Adapters
//!
//! Bind domain records to table rows and forward row actions to the stage
//! that owns the list.
//!
//! ## Overview
//!
//! A [`ListAdapter`] exposes the same small capability set for every list:
//!
//! - `item_count` - number of rows, always the length of the backing slice
//! - `bind` - fill a [`RowView`] for one position
//! - `click` - the row was selected; the owning stage's [`ItemClickListener`]
//!   decides where to navigate
//! - `secondary` - the row's extra action (e.g. "play")
//!
//! Two adapters exist:
//!
//! - [`TrackListAdapter`] - generated or saved tracks; secondary opens the
//!   track in the user's browser or Spotify app
//! - [`SavedPlaylistAdapter`] - favorites; no secondary action
//!
//! Positions outside the backing slice are reported as
//! [`AdapterError::OutOfRange`].

mod saved;
mod track;

use std::{fmt, io};

use tabled::{Table, Tabled};

use crate::{navigation::Route, types::CoverRef};

pub use saved::OpenFavoriteDetail;
pub use saved::SavedPlaylistAdapter;
pub use track::ShowTrackDetail;
pub use track::TrackListAdapter;

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("no row {} (list has {count})", .position + 1)]
    OutOfRange { position: usize, count: usize },
    #[error("row {} has no link to open", .position + 1)]
    MissingLink { position: usize },
    #[error("cannot open {url}: {source}")]
    Open { url: String, source: io::Error },
    #[error("{0} is not available for this list")]
    Unsupported(&'static str),
}

/// Cover art shown next to a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Artwork {
    Remote(String),
    Local(CoverRef),
    #[default]
    Placeholder,
}

impl fmt::Display for Artwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artwork::Remote(url) => f.write_str(url),
            Artwork::Local(cover) => write!(f, "[{}]", cover),
            Artwork::Placeholder => f.write_str("-"),
        }
    }
}

/// One bound row, ready to be printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Tabled)]
pub struct RowView {
    #[tabled(rename = "#")]
    pub number: usize,
    pub title: String,
    pub length: String,
    #[tabled(rename = "by")]
    pub subtitle: String,
    #[tabled(rename = "cover")]
    pub artwork: Artwork,
}

/// Receives row selections. Implemented by the stage that owns the list.
pub trait ItemClickListener<T> {
    fn on_click(&mut self, position: usize, item: &T) -> Route;
}

impl<T, F> ItemClickListener<T> for F
where
    F: FnMut(usize, &T) -> Route,
{
    fn on_click(&mut self, position: usize, item: &T) -> Route {
        self(position, item)
    }
}

/// Opens external links such as a track's `href`.
pub trait UrlOpener {
    fn open(&self, url: &str) -> Result<(), AdapterError>;
}

/// Opens links with the platform's default handler.
pub struct BrowserOpener;

impl UrlOpener for BrowserOpener {
    fn open(&self, url: &str) -> Result<(), AdapterError> {
        webbrowser::open(url).map_err(|source| AdapterError::Open {
            url: url.to_string(),
            source,
        })
    }
}

pub trait ListAdapter {
    type Item;

    fn items(&self) -> &[Self::Item];

    fn bind(&self, position: usize, holder: &mut RowView) -> Result<(), AdapterError>;

    fn click(&mut self, position: usize) -> Result<Route, AdapterError>;

    fn secondary(&mut self, position: usize) -> Result<(), AdapterError>;

    fn item_count(&self) -> usize {
        self.items().len()
    }

    fn item(&self, position: usize) -> Result<&Self::Item, AdapterError> {
        self.items()
            .get(position)
            .ok_or(AdapterError::OutOfRange {
                position,
                count: self.item_count(),
            })
    }

    fn rows(&self) -> Result<Vec<RowView>, AdapterError> {
        (0..self.item_count())
            .map(|position| {
                let mut row = RowView::default();
                self.bind(position, &mut row)?;
                Ok(row)
            })
            .collect()
    }

    fn render(&self) -> Result<Table, AdapterError> {
        Ok(Table::new(self.rows()?))
    }
}
