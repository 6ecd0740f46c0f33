use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Per-email login brute force limiter using a fixed window.
pub struct LoginRateLimiter {
    /// email -> (failed_count, window_start)
    entries: DashMap<String, (u32, Instant)>,
    max_failures: u32,
    window: Duration,
}

impl Default for LoginRateLimiter {
    /// Five failures per fifteen minutes.
    fn default() -> Self {
        Self::new(5, Duration::from_secs(15 * 60))
    }
}

impl LoginRateLimiter {
    pub fn new(max_failures: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_failures,
            window,
        }
    }

    /// Check if a login attempt is allowed. Returns Err with retry-after seconds.
    /// Does NOT increment the counter; call `record_failure()` on a bad password.
    pub fn check(&self, email: &str) -> Result<(), u64> {
        let now = Instant::now();

        let Some(entry) = self.entries.get(&email.to_lowercase()) else {
            return Ok(());
        };
        let (count, start) = *entry.value();

        let elapsed = now.duration_since(start);
        if elapsed > self.window || count < self.max_failures {
            return Ok(());
        }

        Err(self.window.as_secs().saturating_sub(elapsed.as_secs()))
    }

    pub fn record_failure(&self, email: &str) {
        let now = Instant::now();

        let mut entry = self.entries.entry(email.to_lowercase()).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > self.window {
            *count = 1;
            *start = now;
        } else {
            *count += 1;
        }
    }

    /// Forget failures after a successful login.
    pub fn reset(&self, email: &str) {
        self.entries.remove(&email.to_lowercase());
    }

    pub fn cleanup(&self) {
        let now = Instant::now();
        self.entries
            .retain(|_, (_, start)| now.duration_since(*start) <= self.window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_after_max_failures() {
        let limiter = LoginRateLimiter::new(3, Duration::from_secs(60));
        for _ in 0..3 {
            assert!(limiter.check("a@b.io").is_ok());
            limiter.record_failure("a@b.io");
        }
        let retry_after = limiter.check("A@B.io").unwrap_err();
        assert!(retry_after <= 60);

        assert!(limiter.check("other@b.io").is_ok());
    }

    #[test]
    fn reset_clears_failures() {
        let limiter = LoginRateLimiter::new(1, Duration::from_secs(60));
        limiter.record_failure("a@b.io");
        assert!(limiter.check("a@b.io").is_err());
        limiter.reset("a@b.io");
        assert!(limiter.check("a@b.io").is_ok());
    }

    #[test]
    fn window_expiry_allows_again() {
        let limiter = LoginRateLimiter::new(1, Duration::ZERO);
        limiter.record_failure("a@b.io");
        std::thread::sleep(Duration::from_millis(5));
        assert!(limiter.check("a@b.io").is_ok());

        limiter.cleanup();
        assert!(limiter.entries.is_empty());
    }
}
