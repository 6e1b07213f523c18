//! Party tracker around the almanac core: configuration, snapshot retrieval
//! with remote-then-local fallback, refresh state, and plain-text rendering.

pub mod config;
pub mod fetch;
pub mod render;
pub mod state;

pub use config::TrackerConfig;
pub use fetch::{fetch_snapshot, FetchError};
pub use state::{RefreshError, TrackerState};
