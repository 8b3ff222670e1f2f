//! Usage accounting for generation calls.
//!
//! A bounded in-memory ring buffer owned by one generation client. Pure
//! bookkeeping: it has no failure modes, and append is the only mutation, so
//! it is safe to call from any concurrent attempt.

use std::collections::VecDeque;
use std::sync::Mutex;

use notable_core::defaults::USAGE_LOG_CAPACITY;
use notable_core::{UsageLogEntry, UsageStats};

/// Bounded ring buffer of generation attempts.
pub struct UsageLog {
    entries: Mutex<VecDeque<UsageLogEntry>>,
    capacity: usize,
}

impl Default for UsageLog {
    fn default() -> Self {
        Self::new(USAGE_LOG_CAPACITY)
    }
}

impl UsageLog {
    /// Create a log retaining at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity.min(USAGE_LOG_CAPACITY))),
            capacity: capacity.max(1),
        }
    }

    /// Append an entry, evicting the oldest when over capacity.
    pub fn record(&self, entry: UsageLogEntry) {
        let mut entries = self.entries.lock().expect("usage log poisoned");
        entries.push_back(entry);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// Aggregate statistics over the full retained buffer. All figures are
    /// zero when the buffer is empty; there is no division by zero.
    pub fn stats(&self) -> UsageStats {
        let entries = self.entries.lock().expect("usage log poisoned");
        if entries.is_empty() {
            return UsageStats::default();
        }

        let total = entries.len();
        let failed = entries.iter().filter(|e| !e.success).count();
        let total_latency: u64 = entries.iter().map(|e| e.latency_ms).sum();
        let total_tokens: usize = entries
            .iter()
            .map(|e| e.input_tokens + e.output_tokens)
            .sum();

        UsageStats {
            total_requests: total,
            successful_requests: total - failed,
            failed_requests: failed,
            error_rate_percent: failed as f64 / total as f64 * 100.0,
            average_latency_ms: total_latency as f64 / total as f64,
            total_tokens,
        }
    }

    /// Most recent `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<UsageLogEntry> {
        let entries = self.entries.lock().expect("usage log poisoned");
        entries.iter().rev().take(n).rev().cloned().collect()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("usage log poisoned").len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empty the buffer.
    pub fn clear(&self) {
        self.entries.lock().expect("usage log poisoned").clear();
    }
}
