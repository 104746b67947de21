mod common;

use std::{sync::Arc, time::Duration};

use axum::http::StatusCode;
use common::{MockBackend, Reply, closed_address, tracks_json};
use tempo::backend::PlaylistClient;
use tempo::management::FavoritesStore;
use tempo::session::{BufferPolicy, PlaylistSession, PlaylistUpdate, SaveError};
use tempo::types::{AccessToken, CoverRef, PlaylistRequest, Track};

fn session_for(base_url: &str, policy: BufferPolicy) -> PlaylistSession {
    let client = Arc::new(PlaylistClient::new(base_url).unwrap());
    PlaylistSession::new(
        client,
        AccessToken::new("token").unwrap(),
        PlaylistRequest::new(1, 20),
        policy,
    )
}

fn names(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.name.as_str()).collect()
}

#[tokio::test]
async fn test_accumulate_keeps_all_results_in_call_order() {
    let backend = MockBackend::start(vec![
        Reply::ok(tracks_json(&["a1", "a2"])),
        Reply::ok(tracks_json(&["b1"])),
    ])
    .await;
    let mut session = session_for(&backend.base_url(), BufferPolicy::Accumulate);

    session.load().await;
    session.load().await;

    assert_eq!(names(session.tracks()), vec!["a1", "a2", "b1"]);
    assert_eq!(backend.requests().len(), 2);
}

#[tokio::test]
async fn test_reset_shows_only_latest_result() {
    let backend = MockBackend::start(vec![
        Reply::ok(tracks_json(&["a1", "a2"])),
        Reply::ok(tracks_json(&["b1"])),
    ])
    .await;
    let mut session = session_for(&backend.base_url(), BufferPolicy::Reset);

    session.load().await;
    assert_eq!(names(session.tracks()), vec!["a1", "a2"]);

    session.load().await;
    assert_eq!(names(session.tracks()), vec!["b1"]);
}

#[tokio::test]
async fn test_server_error_leaves_tracks_unchanged() {
    let backend = MockBackend::start(vec![
        Reply::ok(tracks_json(&["a1"])),
        Reply::status(StatusCode::INTERNAL_SERVER_ERROR),
    ])
    .await;
    let mut session = session_for(&backend.base_url(), BufferPolicy::Reset);

    session.load().await;
    let update = session.load().await;

    assert!(matches!(update, Some(PlaylistUpdate::Failed { .. })));
    assert_eq!(names(session.tracks()), vec!["a1"]);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_transport_failure_is_reported_not_raised() {
    let mut session = session_for(&closed_address().await, BufferPolicy::Reset);

    let update = session.load().await;

    assert!(matches!(update, Some(PlaylistUpdate::Failed { .. })));
    assert!(session.tracks().is_empty());
    assert!(!session.has_result());
}

#[tokio::test]
async fn test_regenerate_supersedes_request_in_flight() {
    let backend = MockBackend::start(vec![
        Reply::ok(tracks_json(&["x"])).delayed(Duration::from_millis(200)),
    ])
    .await;
    let mut session = session_for(&backend.base_url(), BufferPolicy::Accumulate);

    let first = session.generate();
    let second = session.generate();
    assert!(second > first);

    match session.next_update().await {
        Some(PlaylistUpdate::Loaded { generation, added }) => {
            assert_eq!(generation, second);
            assert_eq!(added, 1);
        }
        other => panic!("unexpected update: {other:?}"),
    }

    // Only the latest request was applied, and nothing is left to wait for
    assert_eq!(session.tracks().len(), 1);
    assert!(session.next_update().await.is_none());
}

#[tokio::test]
async fn test_next_update_without_request_returns_none() {
    let backend = MockBackend::start(vec![Reply::ok(tracks_json(&["x"]))]).await;
    let mut session = session_for(&backend.base_url(), BufferPolicy::Reset);

    assert!(session.next_update().await.is_none());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_drop_aborts_request_in_flight() {
    let backend = MockBackend::start(vec![
        Reply::ok(tracks_json(&["x"])).delayed(Duration::from_millis(500)),
    ])
    .await;
    let client = Arc::new(PlaylistClient::new(&backend.base_url()).unwrap());
    let client_ref = Arc::downgrade(&client);
    let mut session = PlaylistSession::new(
        client,
        AccessToken::new("token").unwrap(),
        PlaylistRequest::new(1, 20),
        BufferPolicy::Reset,
    );
    session.generate();
    assert!(session.is_loading());
    tokio::time::sleep(Duration::from_millis(50)).await;

    drop(session);
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The aborted task released its handle on the client
    assert!(client_ref.upgrade().is_none());
}

#[tokio::test]
async fn test_save_appends_one_playlist() {
    let backend = MockBackend::start(vec![Reply::ok(tracks_json(&["a", "b", "c"]))]).await;
    let mut session = session_for(&backend.base_url(), BufferPolicy::Reset);
    let mut store = FavoritesStore::in_memory();
    store.save("Earlier", "10 min", CoverRef::default(), Vec::new());

    session.load().await;
    let saved = session
        .save(&mut store, "Run", CoverRef::new("running"))
        .unwrap();
    assert_eq!(saved.tracks.len(), 3);
    assert_eq!(saved.length_label, "10 min");

    assert_eq!(store.len(), 2);
    assert_eq!(store.all()[0].title, "Earlier");
    assert!(store.all()[0].tracks.is_empty());
    assert_eq!(store.all()[1].title, "Run");
    assert_eq!(store.all()[1].cover, CoverRef::new("running"));
}

#[tokio::test]
async fn test_save_requires_successful_result() {
    let backend = MockBackend::start(vec![Reply::status(StatusCode::BAD_GATEWAY)]).await;
    let mut session = session_for(&backend.base_url(), BufferPolicy::Reset);
    let mut store = FavoritesStore::in_memory();

    assert!(matches!(
        session.save(&mut store, "Too early", CoverRef::default()),
        Err(SaveError::NothingGenerated)
    ));

    session.load().await;
    assert!(matches!(
        session.save(&mut store, "Failed", CoverRef::default()),
        Err(SaveError::NothingGenerated)
    ));
    assert!(store.is_empty());
}
