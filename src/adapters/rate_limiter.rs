//! Token-bucket rate limiter shared by the HTTP clients.
//!
//! GitHub allows 5 000 authenticated requests per hour and Todoist 450
//! per 15 minutes. Each client owns one bucket behind a mutex, so clones
//! of a client draw from the same budget.

use std::time::{Duration, Instant};

/// Token-bucket rate limiter.
///
/// Allows up to `capacity` requests per `window`. When the bucket is
/// exhausted, [`acquire`](RateLimiter::acquire) sleeps until the window
/// resets.
#[derive(Debug)]
pub struct RateLimiter {
    /// Label used in log lines.
    service: &'static str,
    capacity: u32,
    tokens: u32,
    window: Duration,
    window_start: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter with the given capacity and window.
    pub fn new(service: &'static str, capacity: u32, window: Duration) -> Self {
        Self {
            service,
            capacity,
            tokens: capacity,
            window,
            window_start: Instant::now(),
        }
    }

    /// GitHub REST budget for authenticated requests.
    pub fn github() -> Self {
        Self::new("GitHub", 5_000, Duration::from_secs(3_600))
    }

    /// Todoist REST budget.
    pub fn todoist() -> Self {
        Self::new("Todoist", 450, Duration::from_secs(15 * 60))
    }

    /// Tokens left in the current window.
    pub const fn available(&self) -> u32 {
        self.tokens
    }

    /// Acquire a single token, sleeping if necessary.
    pub async fn acquire(&mut self) {
        let elapsed = self.window_start.elapsed();
        if elapsed >= self.window {
            self.tokens = self.capacity;
            self.window_start = Instant::now();
        }

        if self.tokens > 0 {
            self.tokens -= 1;
        } else {
            let remaining = self.window.saturating_sub(elapsed);
            tracing::warn!(
                service = self.service,
                sleep_ms = remaining.as_millis() as u64,
                "rate limit reached, sleeping"
            );
            tokio::time::sleep(remaining).await;
            self.tokens = self.capacity.saturating_sub(1);
            self.window_start = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(RateLimiter::github().available(), 5_000);
        assert_eq!(RateLimiter::todoist().available(), 450);
    }

    #[tokio::test]
    async fn test_acquire_decrements_tokens() {
        let mut rl = RateLimiter::new("test", 5, Duration::from_secs(60));
        rl.acquire().await;
        assert_eq!(rl.available(), 4);
        rl.acquire().await;
        assert_eq!(rl.available(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_bucket_waits_for_window() {
        let mut rl = RateLimiter::new("test", 1, Duration::from_millis(30));
        rl.acquire().await;
        assert_eq!(rl.available(), 0);

        let started = Instant::now();
        rl.acquire().await;
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(rl.available(), 0);
    }

    #[tokio::test]
    async fn test_window_elapsed_refills() {
        let mut rl = RateLimiter::new("test", 3, Duration::from_millis(10));
        rl.acquire().await;
        rl.acquire().await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        rl.acquire().await;
        assert_eq!(rl.available(), 2);
    }
}
