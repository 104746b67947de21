//! Typed routes between the stages of the interactive flow.
//!
//! Every route carries exactly the values its stage needs. A stage that
//! needs a token cannot be reached without one.

use crate::types::{AccessToken, PlaylistRequest, Track};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    DurationEntry {
        token: AccessToken,
    },
    GeneratedPlaylist {
        token: AccessToken,
        request: PlaylistRequest,
    },
    /// Back to the playlist already generated, without a new request.
    Results,
    Favorites,
    /// Zero-based position in the favorites store.
    FavoriteDetail {
        position: usize,
    },
    TrackDetail {
        position: usize,
        track: Track,
    },
    Exit,
}
