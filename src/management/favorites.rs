use std::{io, path::PathBuf};

use chrono::Utc;

use crate::{
    config,
    types::{CoverRef, SavedPlaylist, Track},
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot access favorites file: {0}")]
    Io(#[from] io::Error),
    #[error("favorites file is corrupt: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Ordered collection of saved playlists.
///
/// Entries are only ever appended, in save order. An in-memory store lives as
/// long as its owner; a store opened from a path can be written back with
/// [`FavoritesStore::persist`].
#[derive(Debug, Default)]
pub struct FavoritesStore {
    playlists: Vec<SavedPlaylist>,
    path: Option<PathBuf>,
}

impl FavoritesStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the store at `path`. A file that does not exist yet is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let playlists = match async_fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self {
            playlists,
            path: Some(path),
        })
    }

    pub async fn open_default() -> Result<Self, StoreError> {
        Self::open(Self::default_path()).await
    }

    pub fn default_path() -> PathBuf {
        config::data_dir().join("cache/favorites.json")
    }

    /// Appends one playlist and returns it. Titles need not be unique.
    pub fn save(
        &mut self,
        title: impl Into<String>,
        length_label: impl Into<String>,
        cover: CoverRef,
        tracks: Vec<Track>,
    ) -> &SavedPlaylist {
        self.playlists.push(SavedPlaylist {
            title: title.into(),
            length_label: length_label.into(),
            cover,
            tracks,
            saved_at: Utc::now(),
        });
        &self.playlists[self.playlists.len() - 1]
    }

    pub fn all(&self) -> &[SavedPlaylist] {
        &self.playlists
    }

    pub fn get(&self, position: usize) -> Option<&SavedPlaylist> {
        self.playlists.get(position)
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    /// Writes the store back to its file. Does nothing for in-memory stores.
    pub async fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.playlists)?;
        async_fs::write(path, json).await?;
        Ok(())
    }
}
