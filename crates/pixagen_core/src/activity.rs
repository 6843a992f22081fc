//! Bounded in-memory activity log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Capacity used when none is configured.
pub const DEFAULT_ACTIVITY_CAPACITY: usize = 200;

/// One recorded action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    /// When the entry was recorded
    pub time: DateTime<Utc>,
    /// Action tag such as `IMAGE_REQUEST`
    pub action: String,
    /// Structured payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Error message, for failed actions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Newest-first log that evicts the oldest entry once full.
#[derive(Debug)]
pub struct ActivityLog {
    capacity: usize,
    entries: Mutex<VecDeque<ActivityEntry>>,
}

impl ActivityLog {
    /// Creates a log holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records a successful action.
    pub fn record(&self, action: impl Into<String>, data: Option<serde_json::Value>) {
        self.push(ActivityEntry {
            time: Utc::now(),
            action: action.into(),
            data,
            error: None,
        });
    }

    /// Records a failed action.
    pub fn record_error(&self, action: impl Into<String>, error: impl Into<String>) {
        self.push(ActivityEntry {
            time: Utc::now(),
            action: action.into(),
            data: None,
            error: Some(error.into()),
        });
    }

    /// Snapshot of all entries, newest first.
    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.lock().iter().cloned().collect()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn push(&self, entry: ActivityEntry) {
        let mut entries = self.lock();
        if entries.len() == self.capacity {
            entries.pop_back();
        }
        entries.push_front(entry);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<ActivityEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVITY_CAPACITY)
    }
}
