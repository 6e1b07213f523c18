//! Sample data fixtures for testing.
//!
//! Ready-made snapshot documents for other crates to test against. Enable
//! the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // almanac = { path = "../almanac", features = ["test-fixtures"] }
//!
//! use almanac::fixtures;
//!
//! let state = fixtures::sample_state();
//! assert!(!state.timeline.is_empty());
//! ```

use crate::snapshot::{transform, CurrentState, RawSnapshot};

/// Raw JSON of a current-schema snapshot: one important event and one
/// session, current date Sep 13 of year 327 AD at bell 3:2.
pub fn sample_snapshot_json() -> &'static str {
    include_str!("../tests/fixtures/sample_snapshot.json")
}

/// Raw JSON of a legacy-schema snapshot with split `events` and
/// `adventureLog` arrays and the old "Veil" month spelling.
pub fn sample_legacy_snapshot_json() -> &'static str {
    include_str!("../tests/fixtures/sample_snapshot_legacy.json")
}

/// Parses the current-schema sample.
pub fn sample_snapshot() -> RawSnapshot {
    RawSnapshot::from_json(sample_snapshot_json())
        .unwrap_or_else(|e| panic!("sample snapshot fixture is invalid: {}", e))
}

/// The current-schema sample transformed to application state.
pub fn sample_state() -> CurrentState {
    transform(sample_snapshot())
        .unwrap_or_else(|e| panic!("sample snapshot fixture failed transform: {}", e))
}
