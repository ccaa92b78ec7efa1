//! Time-windowed deduplication of notifications.

use std::time::Duration;

use jiff::Timestamp;
use rustc_hash::FxHashMap;

use crate::{clock::duration_millis, notifications::Severity};

/// Identity of a notification for deduplication purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    title: String,
    description: Option<String>,
    severity: Severity,
}

impl DedupKey {
    /// Builds a key from the three identifying fields.
    pub fn new(title: &str, description: Option<&str>, severity: Severity) -> Self {
        Self {
            title: title.to_string(),
            description: description.map(str::to_string),
            severity,
        }
    }
}

/// Keys seen recently, each with the instant (unix millis) it stops suppressing.
#[derive(Debug, Default)]
pub struct SuppressionWindow {
    expiries: FxHashMap<DedupKey, i64>,
}

impl SuppressionWindow {
    /// Creates an empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits `key` unless it is still suppressed at `now`.
    ///
    /// An admitted key suppresses duplicates until `now + window`. Expired keys are pruned
    /// on every call.
    pub fn admit(&mut self, key: DedupKey, now: Timestamp, window: Duration) -> bool {
        let now = now.as_millisecond();

        self.prune(now);

        if self.expiries.contains_key(&key) {
            return false;
        }

        self.expiries
            .insert(key, now.saturating_add(duration_millis(window)));

        true
    }

    /// Number of keys currently suppressing duplicates.
    pub fn len(&self) -> usize {
        self.expiries.len()
    }

    /// Check if nothing is being suppressed.
    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.expiries.clear();
    }

    fn prune(&mut self, now: i64) {
        self.expiries.retain(|_, expires_at| *expires_at > now);
    }
}
