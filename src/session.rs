//! Results stage: owns the playlist request in flight and the tracks shown.
//!
//! Requests run on their own task and report back over a channel. Only the
//! session owner applies results, in [`PlaylistSession::next_update`], so the
//! track buffer is never touched from the request task. Regenerating aborts
//! the previous request, and dropping the session aborts whatever is still
//! running.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    backend::{PlaylistClient, PlaylistError},
    management::FavoritesStore,
    types::{AccessToken, CoverRef, PlaylistRequest, PlaylistResponse, SavedPlaylist, Track},
    utils, warning,
};

/// What happens to the shown tracks when a new result arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BufferPolicy {
    /// Replace the shown tracks with the latest result.
    #[default]
    Reset,
    /// Append every result to the shown tracks, in request order.
    Accumulate,
}

#[derive(Debug)]
pub enum PlaylistUpdate {
    Loaded { generation: u64, added: usize },
    Failed { generation: u64, error: PlaylistError },
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("no playlist has been generated yet")]
    NothingGenerated,
}

struct Completion {
    generation: u64,
    result: Result<PlaylistResponse, PlaylistError>,
}

pub struct PlaylistSession {
    client: Arc<PlaylistClient>,
    token: AccessToken,
    request: PlaylistRequest,
    policy: BufferPolicy,
    tracks: Vec<Track>,
    generation: u64,
    has_result: bool,
    in_flight: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl PlaylistSession {
    pub fn new(
        client: Arc<PlaylistClient>,
        token: AccessToken,
        request: PlaylistRequest,
        policy: BufferPolicy,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            token,
            request,
            policy,
            tracks: Vec::new(),
            generation: 0,
            has_result: false,
            in_flight: None,
            tx,
            rx,
        }
    }

    /// Starts a request and returns its generation number.
    ///
    /// A request still in flight is aborted; its result will never be applied.
    pub fn generate(&mut self) -> u64 {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }

        self.generation += 1;
        let generation = self.generation;
        let client = Arc::clone(&self.client);
        let token = self.token.clone();
        let request = self.request;
        let tx = self.tx.clone();

        self.in_flight = Some(tokio::spawn(async move {
            let result = client.request_playlist(&request, &token).await;
            let _ = tx.send(Completion { generation, result });
        }));

        generation
    }

    /// Waits for the current request and applies its result.
    ///
    /// Returns `None` when nothing is in flight. Results of superseded
    /// requests are discarded. A failed request is logged and leaves the
    /// shown tracks untouched.
    pub async fn next_update(&mut self) -> Option<PlaylistUpdate> {
        loop {
            self.in_flight.as_ref()?;

            let completion = self.rx.recv().await?;
            if completion.generation != self.generation {
                continue;
            }
            self.in_flight = None;

            return Some(self.apply(completion));
        }
    }

    /// Starts a request and waits for it.
    pub async fn load(&mut self) -> Option<PlaylistUpdate> {
        self.generate();
        self.next_update().await
    }

    fn apply(&mut self, completion: Completion) -> PlaylistUpdate {
        let generation = completion.generation;
        match completion.result {
            Ok(response) => {
                if self.policy == BufferPolicy::Reset {
                    self.tracks.clear();
                }
                let added = response.tracks.len();
                self.tracks.extend(response.tracks);
                self.has_result = true;
                PlaylistUpdate::Loaded { generation, added }
            }
            Err(error) => {
                warning!("Playlist request failed: {}", error);
                PlaylistUpdate::Failed { generation, error }
            }
        }
    }

    /// Appends the shown tracks to `store` as a new favorite.
    ///
    /// The length label is computed from the track durations.
    pub fn save<'s>(
        &self,
        store: &'s mut FavoritesStore,
        title: impl Into<String>,
        cover: CoverRef,
    ) -> Result<&'s SavedPlaylist, SaveError> {
        if !self.has_result {
            return Err(SaveError::NothingGenerated);
        }

        let length_label = utils::tracks_length_label(&self.tracks);
        Ok(store.save(title, length_label, cover, self.tracks.clone()))
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn request(&self) -> PlaylistRequest {
        self.request
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    pub fn has_result(&self) -> bool {
        self.has_result
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }
}

impl Drop for PlaylistSession {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
