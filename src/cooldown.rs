//! Per-user lookup rate limiting.
//!
//! One in-memory map from user ID to the instant of their last allowed
//! lookup. State is process-lifetime only and lost on restart. The gate is
//! constructed once at startup and injected into handlers; there is no
//! ambient global.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Outcome of a cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquire {
    /// Lookup may proceed; the user's timestamp was updated.
    Allowed,
    /// Lookup rejected; the user must wait.
    Rejected {
        /// Whole seconds until the window reopens, truncated toward zero.
        /// Strictly less than the window and at least zero.
        remaining_secs: u64,
    },
}

/// Per-user anti-spam gate.
///
/// Check and timestamp update happen under a single lock, so two racing
/// requests from the same user serialize and the later one is rejected.
#[derive(Debug)]
pub struct CooldownGate {
    window: Duration,
    last_allowed: Mutex<HashMap<String, Instant>>,
}

impl CooldownGate {
    /// Create a gate with the given minimum interval between lookups.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_allowed: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether `user_id` may look up now.
    pub async fn try_acquire(&self, user_id: &str) -> Acquire {
        self.try_acquire_at(user_id, Instant::now()).await
    }

    /// Check against an explicit clock reading.
    ///
    /// The timestamp is recorded only when the request is allowed, so a
    /// rejected request does not extend the wait.
    pub async fn try_acquire_at(&self, user_id: &str, now: Instant) -> Acquire {
        let mut last_allowed = self.last_allowed.lock().await;

        if let Some(last) = last_allowed.get(user_id) {
            let elapsed = now.saturating_duration_since(*last);
            if elapsed < self.window {
                let remaining_secs = self.window.saturating_sub(elapsed).as_secs();
                return Acquire::Rejected { remaining_secs };
            }
        }

        last_allowed.insert(user_id.to_owned(), now);
        Acquire::Allowed
    }
}
