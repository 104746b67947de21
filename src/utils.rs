use rand::{Rng, distr::Alphanumeric};

use crate::types::{Artist, Track};

/// Random value echoed back by the hosted login, used to match the
/// callback to the request that opened it.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

pub fn join_artist_names(artists: &[Artist]) -> String {
    artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats a track duration as `m:ss`, rounding down to whole seconds.
pub fn format_duration_ms(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Formats a playlist length given in minutes, e.g. `1 h 20 min` or `45 min`.
pub fn format_length_label(total_minutes: u64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    match (hours, minutes) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{} h", h),
        (h, m) => format!("{} h {} min", h, m),
    }
}

/// Length label for a list of tracks. Partial minutes are rounded to the nearest.
pub fn tracks_length_label(tracks: &[Track]) -> String {
    let total_ms: u64 = tracks.iter().map(|track| track.duration_ms).sum();
    format_length_label((total_ms + 30_000) / 60_000)
}

/// Parses the 1-based position typed by the user into a list index.
pub fn parse_position(input: &str) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n - 1),
    }
}
