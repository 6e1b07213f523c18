//! Snapshot retrieval with remote-then-local fallback.
//!
//! The remote source is tried first; any failure there (transport error or
//! non-success status) falls back to the local snapshot file. Only when both
//! fail does the fetch surface an error, carrying both causes. No retries
//! happen here; the caller keeps its previous state on failure.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::TrackerConfig;

/// Timeout for the remote request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors surfaced by [`fetch_snapshot`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read local snapshot {path:?}: {source}")]
    Local {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("both sources failed; remote: {remote}; local fallback: {local}")]
    BothSourcesFailed { remote: String, local: String },
}

/// Fetches the raw snapshot document as JSON text.
///
/// With a remote source configured, tries it first and falls back to the
/// local file on any failure. With no remote source, reads the local file
/// directly.
pub fn fetch_snapshot(config: &TrackerConfig) -> Result<String, FetchError> {
    let Some(url) = &config.source_url else {
        return fetch_local(config);
    };

    match fetch_remote(url) {
        Ok(body) => {
            info!(%url, "loaded snapshot from remote source");
            Ok(body)
        }
        Err(remote) => {
            warn!(%url, error = %remote, "remote fetch failed, falling back to local snapshot");
            fetch_local(config).map_err(|local| FetchError::BothSourcesFailed {
                remote,
                local: local.to_string(),
            })
        }
    }
}

fn fetch_remote(url: &str) -> Result<String, String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| e.to_string())?;
    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(|e| e.to_string())
}

fn fetch_local(config: &TrackerConfig) -> Result<String, FetchError> {
    match std::fs::read_to_string(&config.fallback_path) {
        Ok(body) => {
            debug!(path = %config.fallback_path.display(), "loaded snapshot from local fallback");
            Ok(body)
        }
        Err(source) => Err(FetchError::Local {
            path: config.fallback_path.clone(),
            source,
        }),
    }
}
