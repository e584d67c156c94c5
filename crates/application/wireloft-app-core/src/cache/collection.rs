use chrono::{DateTime, Utc};
use wireloft_core::{MediaProfile, Show};

use super::QueryKey;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Shows(Vec<Show>),
    MediaProfiles(Vec<MediaProfile>),
    Show(Show),
}

impl QueryData {
    pub fn fits(&self, key: &QueryKey) -> bool {
        match (self, key) {
            (QueryData::Shows(_), QueryKey::Shows) => true,
            (QueryData::MediaProfiles(_), QueryKey::MediaProfiles) => true,
            (QueryData::Show(show), QueryKey::Show(id)) => &show.id == id,
            _ => false,
        }
    }

    pub fn into_shows(self) -> Option<Vec<Show>> {
        match self {
            QueryData::Shows(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_media_profiles(self) -> Option<Vec<MediaProfile>> {
        match self {
            QueryData::MediaProfiles(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_show(self) -> Option<Show> {
        match self {
            QueryData::Show(v) => Some(v),
            _ => None,
        }
    }
}

/// Snapshot of one cache entry as a view sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedCollection<T> {
    pub data: Option<T>,
    /// Wall-clock time of the last successful fetch.
    pub updated_at: Option<DateTime<Utc>>,
    /// No data yet and a fetch is running.
    pub is_loading: bool,
    /// A fetch is running, with or without data on screen.
    pub is_fetching: bool,
    pub error: Option<String>,
}

impl<T> Default for CachedCollection<T> {
    fn default() -> Self {
        Self {
            data: None,
            updated_at: None,
            is_loading: false,
            is_fetching: false,
            error: None,
        }
    }
}

impl<T> CachedCollection<T> {
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_fetching
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> Option<U>) -> CachedCollection<U> {
        CachedCollection {
            data: self.data.and_then(f),
            updated_at: self.updated_at,
            is_loading: self.is_loading,
            is_fetching: self.is_fetching,
            error: self.error,
        }
    }
}
