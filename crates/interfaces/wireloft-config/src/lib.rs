//! Central configuration constants for runtime limits and defaults.

use std::time::Duration;

/// Default base URL of the WireLoft REST API.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Environment variable that overrides [`DEFAULT_API_BASE`] in the CLI.
pub const API_BASE_ENV: &str = "WIRELOFT_API_BASE";

/// Timeout applied to every API request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetched query data is considered fresh for this long.
pub const CACHE_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

/// Cache entries nobody has read for this long are evicted.
pub const CACHE_EVICT_AFTER: Duration = Duration::from_secs(30 * 60);

/// How often the running client sweeps the cache for unused entries.
pub const CACHE_GC_INTERVAL: Duration = Duration::from_secs(60);

/// Automatic retries of a failed fetch before the error is surfaced.
pub const CACHE_FETCH_RETRIES: u32 = 1;

/// Delay before the first automatic retry. Doubles per attempt.
pub const CACHE_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Upper bound for the retry delay.
pub const CACHE_MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Namespace of the query mirror in local storage.
pub const STORAGE_PREFIX: &str = "wl_rq_v1:";

/// Local storage key of the in-progress Add-Show wizard draft.
pub const WIZARD_STORAGE_KEY: &str = "addShowWizardV1";

/// File name of the durable local store inside the data directory.
pub const LOCAL_STORE_FILENAME: &str = "wireloft.redb";

/// Product defaults for a new show's download policy.
pub const DEFAULT_DOWNLOAD_DAYS: &str = "180";
pub const DEFAULT_DOWNLOAD_DELAY_MINUTES: &str = "90";
pub const DEFAULT_REDOWNLOAD_AFTER_MINUTES: &str = "180";

/// Assumed local publish time of a new episode (hour, minute).
pub const ASSUMED_PUBLISH_TIME: (u32, u32) = (18, 0);

/// Episodes per page on the show page.
pub const EPISODES_PAGE_SIZE: usize = 25;

/// Build the mirror key for a query name, e.g. `wl_rq_v1:shows`.
pub fn storage_key(name: &str) -> String {
    format!("{STORAGE_PREFIX}{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_share_the_prefix() {
        assert_eq!(storage_key("shows"), "wl_rq_v1:shows");
        assert!(storage_key("mediaProfiles").starts_with(STORAGE_PREFIX));
    }

    #[test]
    fn eviction_outlives_freshness() {
        assert!(CACHE_EVICT_AFTER > CACHE_STALE_AFTER);
        assert!(CACHE_GC_INTERVAL < CACHE_EVICT_AFTER);
    }
}
