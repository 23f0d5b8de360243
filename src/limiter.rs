// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window rate limiter keyed by client identity.
//!
//! Memory is bounded: at most `max_tracked_keys` entries are held, with the
//! least-recently-seen key evicted to make room. An evicted or expired key
//! cold-starts on its next request — an accepted trade-off under load from
//! many distinct identities, not a bug. Eviction is the only lifecycle
//! event; there is no background cleanup task.

use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Outcome of a rate limit check. Never an error — always a decision.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Requests left in the current window
    pub remaining: u32,
    /// Time until this key's window resets
    pub reset_in: Duration,
}

#[derive(Debug)]
struct WindowEntry {
    count: u32,
    window_start: Instant,
    last_seen: Instant,
}

/// Thread-safe fixed-window rate limiter with LRU-bounded key tracking.
pub struct RateLimiter {
    config: RateLimitConfig,
    entries: Arc<RwLock<HashMap<String, WindowEntry>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Atomically check-and-increment the counter for `key`.
    ///
    /// The counter increments even when the request is rejected, so
    /// hammering a limited key never resets its window early. A window
    /// that has fully elapsed is treated as first-seen.
    pub async fn check(&self, key: &str) -> RateLimitDecision {
        let now = Instant::now();
        let window = self.config.window_duration();
        let mut entries = self.entries.write().await;

        if entries.len() >= self.config.max_tracked_keys && !entries.contains_key(key) {
            evict_lru(&mut entries);
        }

        let entry = entries.entry(key.to_string()).or_insert_with(|| WindowEntry {
            count: 0,
            window_start: now,
            last_seen: now,
        });
        if now.duration_since(entry.window_start) >= window {
            entry.count = 0;
            entry.window_start = now;
        }
        entry.count += 1;
        entry.last_seen = now;

        let allowed = entry.count <= self.config.max_requests;
        let remaining = self.config.max_requests.saturating_sub(entry.count);
        let reset_in = window.saturating_sub(now.duration_since(entry.window_start));

        if !allowed {
            debug!(key, count = entry.count, ?reset_in, "Rate limit exceeded");
        }

        RateLimitDecision {
            allowed,
            remaining,
            reset_in,
        }
    }

    /// Number of identities currently tracked.
    pub async fn tracked_keys(&self) -> usize {
        self.entries.read().await.len()
    }
}

fn evict_lru(entries: &mut HashMap<String, WindowEntry>) {
    if let Some(victim) = entries
        .iter()
        .min_by_key(|(_, e)| e.last_seen)
        .map(|(k, _)| k.clone())
    {
        debug!(key = %victim, "Evicting least-recently-seen rate limit entry");
        entries.remove(&victim);
    }
}
