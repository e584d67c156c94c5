use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub stale_after: Duration,
    pub evict_after: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
    pub max_retry_delay: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_after: wireloft_config::CACHE_STALE_AFTER,
            evict_after: wireloft_config::CACHE_EVICT_AFTER,
            retries: wireloft_config::CACHE_FETCH_RETRIES,
            retry_delay: wireloft_config::CACHE_RETRY_DELAY,
            max_retry_delay: wireloft_config::CACHE_MAX_RETRY_DELAY,
        }
    }
}

impl CachePolicy {
    /// Delay before retry number `attempt` (0-based), doubling up to the cap.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.retry_delay
            .checked_mul(factor)
            .unwrap_or(self.max_retry_delay)
            .min(self.max_retry_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        let p = CachePolicy::default();
        assert_eq!(p.backoff(0), Duration::from_secs(1));
        assert_eq!(p.backoff(1), Duration::from_secs(2));
        assert_eq!(p.backoff(4), Duration::from_secs(16));
        assert_eq!(p.backoff(5), Duration::from_secs(30));
        assert_eq!(p.backoff(40), Duration::from_secs(30));
    }
}
