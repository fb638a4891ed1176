use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_submissions: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(60_000),
            max_submissions: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed window counter of successful deliveries.
///
/// `check` never mutates; only `record` (called after a delivery succeeds)
/// opens a window or bumps its count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RateLimiter {
    config: RateLimitConfig,
    window: Option<Window>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            window: None,
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Returns true if another submission may proceed at `now`.
    pub fn check(&self, now: Instant) -> bool {
        self.active_count(now) < self.config.max_submissions
    }

    /// Counts one successful delivery at `now`.
    pub fn record(&mut self, now: Instant) {
        let expired = self
            .window
            .map_or(true, |window| self.is_expired(&window, now));
        if expired {
            self.window = Some(Window {
                started: now,
                count: 1,
            });
        } else if let Some(window) = self.window.as_mut() {
            window.count += 1;
        }
    }

    /// Deliveries counted in the window active at `now`.
    pub fn active_count(&self, now: Instant) -> u32 {
        match &self.window {
            Some(window) if !self.is_expired(window, now) => window.count,
            _ => 0,
        }
    }

    /// Raw counter as last recorded, regardless of expiry.
    pub fn submission_count(&self) -> u32 {
        self.window.map_or(0, |window| window.count)
    }

    pub fn window_started(&self) -> Option<Instant> {
        self.window.map(|window| window.started)
    }

    fn is_expired(&self, window: &Window, now: Instant) -> bool {
        now.saturating_duration_since(window.started) > self.config.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_limiter_allows() {
        let limiter = RateLimiter::default();
        assert!(limiter.check(Instant::now()));
        assert_eq!(limiter.submission_count(), 0);
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let start = Instant::now();
        let mut limiter = RateLimiter::default();
        for _ in 0..3 {
            limiter.record(start);
        }
        assert!(!limiter.check(start + Duration::from_millis(60_000)));
        assert!(limiter.check(start + Duration::from_millis(60_001)));
    }

    #[test]
    fn check_does_not_reset_expired_window() {
        let start = Instant::now();
        let mut limiter = RateLimiter::default();
        limiter.record(start);
        limiter.record(start);

        let later = start + Duration::from_secs(120);
        assert!(limiter.check(later));
        assert_eq!(limiter.submission_count(), 2);

        limiter.record(later);
        assert_eq!(limiter.submission_count(), 1);
        assert_eq!(limiter.window_started(), Some(later));
    }

    #[test]
    fn window_start_stays_at_first_delivery() {
        let start = Instant::now();
        let mut limiter = RateLimiter::default();
        limiter.record(start);
        limiter.record(start + Duration::from_secs(30));
        assert_eq!(limiter.window_started(), Some(start));
        assert_eq!(limiter.active_count(start + Duration::from_secs(59)), 2);
    }
}
