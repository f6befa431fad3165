//! Rate-limit pacing for upstream providers
//!
//! Only HTTP 429 responses are retried. Any other failure is handed back to
//! the caller, whose fallback chain decides what happens next.

use rand::Rng;
use std::time::Duration;

/// Configuration for 429 retry behavior
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after a 429
    pub max_retries: u32,
    /// Base delay between retries (will be adjusted based on headers)
    pub base_delay: Duration,
    /// Maximum delay to wait (prevents excessive waits)
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Upper bound of the random jitter added to computed delays
    pub max_jitter: Duration,
}

impl RetryPolicy {
    /// TMDB allows roughly 40-50 req/s; 429s are rare and short-lived
    pub fn tmdb() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            max_jitter: Duration::from_millis(250),
        }
    }

    /// AniList (90 req/min, 30 req/min when degraded)
    pub fn anilist() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(700), // 700ms base
            max_delay: Duration::from_secs(60),     // Max 1 minute
            backoff_multiplier: 1.5,
            max_jitter: Duration::from_millis(300),
        }
    }

    /// No retries at all; used by tests and callers that pace themselves
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            max_jitter: Duration::ZERO,
        }
    }

    /// Calculate delay for next retry attempt
    pub fn calculate_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        // If server provided Retry-After header, respect it
        if let Some(server_delay) = retry_after {
            return server_delay.min(self.max_delay);
        }

        let multiplier = self.backoff_multiplier.powi(attempt as i32);
        let delay = Duration::from_millis((self.base_delay.as_millis() as f64 * multiplier) as u64);

        (delay + self.jitter()).min(self.max_delay)
    }

    fn jitter(&self) -> Duration {
        let max = self.max_jitter.as_millis() as u64;
        if max == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=max))
    }
}

/// Information extracted from HTTP 429 responses
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// How long to wait before next request (from Retry-After header)
    pub retry_after: Option<Duration>,
    /// When the rate limit resets (from X-RateLimit-Reset header)
    pub reset_time: Option<Duration>,
    /// Number of requests remaining (from X-RateLimit-Remaining header)
    pub remaining: Option<u32>,
    /// Total rate limit (from X-RateLimit-Limit header)
    pub limit: Option<u32>,
}

impl RateLimitInfo {
    /// Parse rate limit information from HTTP response headers
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let header_u64 = |name: &str| {
            headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
        };

        let retry_after = header_u64("retry-after").map(Duration::from_secs);

        let reset_time = header_u64("x-ratelimit-reset").map(|timestamp| {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs();
            Duration::from_secs(timestamp.saturating_sub(now))
        });

        Self {
            retry_after,
            reset_time,
            remaining: header_u64("x-ratelimit-remaining").map(|v| v as u32),
            limit: header_u64("x-ratelimit-limit").map(|v| v as u32),
        }
    }

    /// Get the best delay recommendation from available information
    pub fn recommended_delay(&self) -> Option<Duration> {
        // Prioritize Retry-After header
        self.retry_after.or(self.reset_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anilist_policy() {
        let policy = RetryPolicy::anilist();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(700));
    }

    #[test]
    fn test_calculate_delay_with_retry_after() {
        let policy = RetryPolicy::tmdb();
        let delay = policy.calculate_delay(1, Some(Duration::from_secs(3)));
        assert_eq!(delay, Duration::from_secs(3));

        // Server hints are still capped
        let capped = policy.calculate_delay(1, Some(Duration::from_secs(600)));
        assert_eq!(capped, policy.max_delay);
    }

    #[test]
    fn test_calculate_delay_exponential_backoff() {
        let policy = RetryPolicy {
            max_jitter: Duration::ZERO,
            ..RetryPolicy::tmdb()
        };
        let delay1 = policy.calculate_delay(1, None);
        let delay2 = policy.calculate_delay(2, None);
        assert_eq!(delay1, Duration::from_millis(1000));
        assert!(delay2 > delay1);
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let policy = RetryPolicy::tmdb();
        for _ in 0..50 {
            let delay = policy.calculate_delay(0, None);
            assert!(delay >= policy.base_delay);
            assert!(delay <= policy.base_delay + policy.max_jitter);
        }
    }

    #[test]
    fn test_rate_limit_info_parsing() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("retry-after", "30".parse().unwrap());
        headers.insert("x-ratelimit-remaining", "0".parse().unwrap());
        headers.insert("x-ratelimit-limit", "90".parse().unwrap());

        let info = RateLimitInfo::from_headers(&headers);
        assert_eq!(info.retry_after, Some(Duration::from_secs(30)));
        assert_eq!(info.remaining, Some(0));
        assert_eq!(info.limit, Some(90));
        assert_eq!(info.recommended_delay(), Some(Duration::from_secs(30)));
    }
}
