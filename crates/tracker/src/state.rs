//! Refresh state.
//!
//! Holds the most recently loaded [`CurrentState`] and replaces it wholesale
//! on each successful refresh. A failed refresh records the error and leaves
//! the previous snapshot in place.

use std::time::Instant;

use almanac::{transform, CurrentState, RawSnapshot, TransformError};
use thiserror::Error;
use tracing::{error, info};

use crate::config::TrackerConfig;
use crate::fetch::{fetch_snapshot, FetchError};

/// Error for one refresh cycle.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// The tracker's view of the world between refreshes.
#[derive(Debug, Default)]
pub struct TrackerState {
    /// The most recently loaded snapshot, if any refresh has succeeded.
    pub current: Option<CurrentState>,
    /// When the state was last replaced.
    pub last_update: Option<Instant>,
    /// Error from the last refresh attempt, cleared on success.
    pub last_error: Option<String>,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once at least one refresh has succeeded.
    pub fn has_state(&self) -> bool {
        self.current.is_some()
    }

    /// Fetches and transforms a fresh snapshot.
    ///
    /// On success the whole state is replaced and `true` is returned. On
    /// failure the previous state stays untouched, the error is recorded,
    /// and `false` is returned.
    pub fn refresh(&mut self, config: &TrackerConfig) -> bool {
        match load_state(config) {
            Ok(state) => {
                info!(
                    date = %state.date,
                    entries = state.timeline.len(),
                    "refreshed tracker state"
                );
                self.current = Some(state);
                self.last_update = Some(Instant::now());
                self.last_error = None;
                true
            }
            Err(e) => {
                error!(error = %e, "refresh failed, keeping previous state");
                self.last_error = Some(e.to_string());
                false
            }
        }
    }
}

/// One fetch-and-transform cycle.
fn load_state(config: &TrackerConfig) -> Result<CurrentState, RefreshError> {
    let body = fetch_snapshot(config)?;
    let raw = RawSnapshot::from_json(&body)?;
    Ok(transform(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_snapshot(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", body).unwrap();
        path
    }

    fn config_for(path: PathBuf) -> TrackerConfig {
        TrackerConfig {
            source_url: None,
            fallback_path: path,
            ..TrackerConfig::default()
        }
    }

    const MINIMAL: &str = r#"{
        "currentDate": {"year": 327, "era": "AD", "month": "Sep", "day": 13},
        "currentTime": {"bell": 3, "knot": 2},
        "timeline": []
    }"#;

    #[test]
    fn test_refresh_success_replaces_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(&dir, "snap.json", MINIMAL);
        let mut state = TrackerState::new();

        assert!(state.refresh(&config_for(path)));
        assert!(state.has_state());
        assert!(state.last_error.is_none());
        assert!(state.last_update.is_some());
    }

    #[test]
    fn test_refresh_failure_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(&dir, "snap.json", MINIMAL);
        let mut state = TrackerState::new();
        assert!(state.refresh(&config_for(path)));

        // Point at a missing file: refresh fails but the old snapshot stays.
        assert!(!state.refresh(&config_for(dir.path().join("missing.json"))));
        assert!(state.has_state());
        assert!(state.last_error.is_some());
    }

    #[test]
    fn test_refresh_malformed_snapshot_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(&dir, "bad.json", r#"{"currentTime": {}}"#);
        let mut state = TrackerState::new();

        assert!(!state.refresh(&config_for(path)));
        assert!(!state.has_state());
        assert!(state.last_error.is_some());
    }
}
