//! Sliding-window admission shared by every rate limiter backend.
//!
//! A window is the list of admitted event times (Unix milliseconds) for
//! one key. Entries older than the window are stale: they never count,
//! whether or not they have been pruned yet.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::ports::{RateLimitDenied, RateLimitStatus};

use super::config::RateLimitConfig;

/// Admitted event times for one key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlidingWindow {
    timestamps: Vec<i64>,
}

impl SlidingWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a stored window. Unreadable data is an empty window.
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(window) => window,
            Err(e) => {
                tracing::warn!("Discarding unreadable rate limit window: {}", e);
                Self::default()
            }
        }
    }

    /// Serializes the window for storage.
    pub fn encode(&self) -> String {
        serde_json::to_string(&self.timestamps).unwrap_or_else(|_| "[]".to_string())
    }

    /// Number of stored entries, stale ones included.
    pub fn stored_len(&self) -> usize {
        self.timestamps.len()
    }

    fn live(&self, now: Timestamp, config: &RateLimitConfig) -> impl Iterator<Item = i64> + '_ {
        let cutoff = now.as_unix_millis() - config.window_millis();
        self.timestamps.iter().copied().filter(move |ts| *ts > cutoff)
    }

    /// Admitted events still inside the window at `now`.
    pub fn live_count(&self, now: Timestamp, config: &RateLimitConfig) -> u32 {
        self.live(now, config).count() as u32
    }

    /// Current quota without recording anything.
    pub fn status(&self, now: Timestamp, config: &RateLimitConfig) -> RateLimitStatus {
        let count = self.live_count(now, config);
        let reset_at = self
            .live(now, config)
            .min()
            .map(|oldest| Timestamp::from_unix_millis(oldest + config.window_millis()))
            .unwrap_or(now);

        RateLimitStatus {
            limit: config.max_events,
            remaining: config.max_events.saturating_sub(count),
            reset_at,
            window_secs: config.window_secs,
        }
    }

    /// Decides admission at `now`.
    ///
    /// On success returns the window to store: stale entries pruned and
    /// `now` appended. On denial `self` is left exactly as it was, so the
    /// caller has nothing to write.
    pub fn admit(
        &self,
        now: Timestamp,
        config: &RateLimitConfig,
    ) -> Result<SlidingWindow, RateLimitDenied> {
        let live: Vec<i64> = self.live(now, config).collect();

        if live.len() as u32 >= config.max_events {
            let oldest = live.iter().copied().min().unwrap_or(now.as_unix_millis());
            let retry_after_ms =
                (oldest + config.window_millis() - now.as_unix_millis()).max(1) as u64;
            return Err(RateLimitDenied {
                limit: config.max_events,
                retry_after_ms,
                message: format!(
                    "Rate limit exceeded: {} events per {}s. Retry after {}ms.",
                    config.max_events, config.window_secs, retry_after_ms
                ),
            });
        }

        let mut timestamps = live;
        timestamps.push(now.as_unix_millis());
        Ok(SlidingWindow { timestamps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(millis: i64) -> Timestamp {
        Timestamp::from_unix_millis(millis)
    }

    fn config() -> RateLimitConfig {
        RateLimitConfig::default()
    }

    fn fill(count: usize, start: i64, step: i64) -> SlidingWindow {
        let mut window = SlidingWindow::new();
        for i in 0..count {
            window = window.admit(at(start + i as i64 * step), &config()).unwrap();
        }
        window
    }

    #[test]
    fn admits_up_to_the_limit() {
        let window = fill(5, 1_000_000, 100);
        assert_eq!(window.live_count(at(1_000_500), &config()), 5);
        assert!(window.admit(at(1_000_500), &config()).is_err());
    }

    #[test]
    fn denial_reports_time_until_oldest_expires() {
        let window = fill(5, 1_000_000, 100);
        let denied = window.admit(at(1_002_000), &config()).unwrap_err();
        assert_eq!(denied.limit, 5);
        assert_eq!(denied.retry_after_ms, 8_000);
    }

    #[test]
    fn stale_entries_do_not_count() {
        let window = fill(5, 1_000_000, 0);
        let later = at(1_000_000 + 10_000);
        assert_eq!(window.live_count(later, &config()), 0);

        let admitted = window.admit(later, &config()).unwrap();
        assert_eq!(admitted.stored_len(), 1);
    }

    #[test]
    fn corrupt_data_decodes_as_empty() {
        assert_eq!(SlidingWindow::decode("not json"), SlidingWindow::new());
        assert_eq!(SlidingWindow::decode("{\"a\":1}"), SlidingWindow::new());
    }

    #[test]
    fn encode_decode_keeps_timestamps() {
        let window = fill(3, 5_000_000, 10);
        assert_eq!(SlidingWindow::decode(&window.encode()), window);
    }

    #[test]
    fn status_reports_remaining_and_reset() {
        let window = fill(2, 1_000_000, 1_000);
        let status = window.status(at(1_001_500), &config());
        assert_eq!(status.remaining, 3);
        assert_eq!(status.reset_at.as_unix_millis(), 1_010_000);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            failure_persistence: None,
            .. ProptestConfig::default()
        })]

        #[test]
        fn never_admits_more_than_limit_in_any_window(
            gaps in prop::collection::vec(0i64..4_000, 1..60)
        ) {
            let config = config();
            let mut window = SlidingWindow::new();
            let mut now = 1_000_000i64;
            let mut admitted: Vec<i64> = Vec::new();

            for gap in gaps {
                now += gap;
                let before = window.clone();
                match window.admit(at(now), &config) {
                    Ok(next) => {
                        window = next;
                        admitted.push(now);
                    }
                    Err(_) => {
                        prop_assert_eq!(&window, &before);
                    }
                }
            }

            for (i, start) in admitted.iter().enumerate() {
                let in_window = admitted[i..]
                    .iter()
                    .filter(|ts| **ts < start + config.window_millis())
                    .count();
                prop_assert!(in_window <= config.max_events as usize);
            }
        }
    }
}
