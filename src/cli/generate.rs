use crate::{
    info,
    session::{BufferPolicy, PlaylistSession, PlaylistUpdate},
    success,
    types::{CoverRef, PlaylistRequest},
    warning,
};

use super::common;

/// Options of `tempo generate`.
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub request: PlaylistRequest,
    pub regenerate: u32,
    pub accumulate: bool,
    pub save: Option<String>,
    pub cover: Option<String>,
}

/// Requests a playlist, prints it and optionally saves it to the favorites.
///
/// With `regenerate`, the request is repeated that many times after the
/// first one. Each result replaces the shown tracks unless `accumulate` is
/// set, in which case all results are appended in request order.
///
/// Failed requests are reported as warnings and leave the shown tracks as
/// they were. Saving requires at least one successful request.
pub async fn generate(args: GenerateArgs) {
    let token = common::cached_token().await;
    let client = common::playlist_client();
    let policy = if args.accumulate {
        BufferPolicy::Accumulate
    } else {
        BufferPolicy::Reset
    };

    let mut session = PlaylistSession::new(client, token, args.request, policy);

    for round in 0..=args.regenerate {
        if round > 0 {
            info!("Regenerating playlist ({}/{})", round, args.regenerate);
        }

        session.generate();
        if let Some(PlaylistUpdate::Loaded { added, .. }) = common::await_update(&mut session).await
        {
            success!("Received {} tracks", added);
        }
    }

    common::print_tracks(session.tracks());

    let Some(title) = args.save else {
        return;
    };

    let mut store = common::favorites_store().await;
    let cover = args.cover.map(CoverRef::new).unwrap_or_default();
    match session.save(&mut store, title, cover) {
        Ok(saved) => {
            success!(
                "Saved {} ({}, {} tracks) to favorites",
                saved.title,
                saved.length_label,
                saved.tracks.len()
            );
        }
        Err(e) => {
            warning!("Cannot save playlist: {}", e);
            return;
        }
    }

    if let Err(e) = store.persist().await {
        warning!("Failed to write favorites. Err: {}", e);
    }
}
