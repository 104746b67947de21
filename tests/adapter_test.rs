use std::sync::{Arc, Mutex};

use chrono::Utc;
use tempo::adapter::{
    AdapterError, Artwork, ListAdapter, RowView, SavedPlaylistAdapter, TrackListAdapter, UrlOpener,
};
use tempo::navigation::Route;
use tempo::types::{Album, AlbumImage, Artist, CoverRef, SavedPlaylist, Track};

fn track(name: &str, images: &[&str]) -> Track {
    Track {
        name: name.to_string(),
        duration_ms: 185_000,
        artists: vec![
            Artist {
                name: "X".to_string(),
            },
            Artist {
                name: "Y".to_string(),
            },
        ],
        href: format!("https://open.spotify.com/track/{}", name),
        album: Album {
            images: images
                .iter()
                .map(|url| AlbumImage {
                    url: url.to_string(),
                })
                .collect(),
        },
    }
}

fn saved(title: &str) -> SavedPlaylist {
    SavedPlaylist {
        title: title.to_string(),
        length_label: "1 h 20 min".to_string(),
        cover: CoverRef::default(),
        tracks: vec![track("a", &["img"])],
        saved_at: Utc::now(),
    }
}

#[derive(Clone, Default)]
struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), AdapterError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[test]
fn test_item_count_matches_backing_length() {
    for n in [0usize, 1, 5] {
        let tracks: Vec<Track> = (0..n).map(|i| track(&format!("t{i}"), &["img"])).collect();
        assert_eq!(TrackListAdapter::new(&tracks).item_count(), n);

        let playlists: Vec<SavedPlaylist> = (0..n).map(|i| saved(&format!("p{i}"))).collect();
        assert_eq!(SavedPlaylistAdapter::new(&playlists).item_count(), n);
    }
}

#[test]
fn test_track_binding() {
    let tracks = vec![track("Song", &["img1", "img2"])];
    let adapter = TrackListAdapter::new(&tracks);

    let mut row = RowView::default();
    adapter.bind(0, &mut row).unwrap();

    assert_eq!(row.number, 1);
    assert_eq!(row.title, "Song");
    assert_eq!(row.length, "3:05");
    assert_eq!(row.subtitle, "X, Y");
    assert_eq!(row.artwork, Artwork::Remote("img1".to_string()));
}

#[test]
fn test_track_without_art_binds_placeholder() {
    let tracks = vec![track("Bare", &[])];
    let adapter = TrackListAdapter::new(&tracks);

    let rows = adapter.rows().unwrap();
    assert_eq!(rows[0].artwork, Artwork::Placeholder);
    assert!(adapter.render().is_ok());
}

#[test]
fn test_track_click_shows_detail() {
    let tracks = vec![track("a", &[]), track("b", &[])];
    let mut adapter = TrackListAdapter::new(&tracks);

    match adapter.click(1).unwrap() {
        Route::TrackDetail { position, track } => {
            assert_eq!(position, 1);
            assert_eq!(track.name, "b");
        }
        other => panic!("unexpected route: {other:?}"),
    }
}

#[test]
fn test_track_click_uses_owner_listener() {
    let tracks = vec![track("a", &[])];
    let mut clicked = Vec::new();
    {
        let mut adapter = TrackListAdapter::with_listener(&tracks, |position: usize, item: &Track| {
            clicked.push((position, item.name.clone()));
            Route::Favorites
        });
        assert_eq!(adapter.click(0).unwrap(), Route::Favorites);
    }
    assert_eq!(clicked, vec![(0, "a".to_string())]);
}

#[test]
fn test_track_secondary_opens_href() {
    let tracks = vec![track("a", &[]), track("b", &[])];
    let opener = RecordingOpener::default();
    let mut adapter = TrackListAdapter::new(&tracks).opener(opener.clone());

    adapter.secondary(1).unwrap();

    assert_eq!(
        *opener.opened.lock().unwrap(),
        vec!["https://open.spotify.com/track/b".to_string()]
    );
}

#[test]
fn test_track_secondary_without_href() {
    let mut bare = track("a", &[]);
    bare.href = String::new();
    let tracks = vec![bare];
    let opener = RecordingOpener::default();
    let mut adapter = TrackListAdapter::new(&tracks).opener(opener.clone());

    assert!(matches!(
        adapter.secondary(0),
        Err(AdapterError::MissingLink { position: 0 })
    ));
    assert!(opener.opened.lock().unwrap().is_empty());
}

#[test]
fn test_out_of_range_positions() {
    let tracks = vec![track("a", &[])];
    let mut adapter = TrackListAdapter::new(&tracks).opener(RecordingOpener::default());
    let mut row = RowView::default();

    assert!(matches!(
        adapter.bind(1, &mut row),
        Err(AdapterError::OutOfRange {
            position: 1,
            count: 1
        })
    ));
    assert!(matches!(
        adapter.click(3),
        Err(AdapterError::OutOfRange { .. })
    ));
    assert!(matches!(
        adapter.secondary(3),
        Err(AdapterError::OutOfRange { .. })
    ));
}

#[test]
fn test_saved_playlist_binding_and_click() {
    let playlists = vec![saved("Morning"), saved("Evening")];
    let mut adapter = SavedPlaylistAdapter::new(&playlists);

    let mut row = RowView::default();
    adapter.bind(1, &mut row).unwrap();
    assert_eq!(row.number, 2);
    assert_eq!(row.title, "Evening");
    assert_eq!(row.length, "1 h 20 min");
    assert_eq!(row.subtitle, "");
    assert_eq!(row.artwork, Artwork::Local(CoverRef::default()));

    assert_eq!(
        adapter.click(1).unwrap(),
        Route::FavoriteDetail { position: 1 }
    );
    assert!(matches!(
        adapter.secondary(0),
        Err(AdapterError::Unsupported(_))
    ));
}
