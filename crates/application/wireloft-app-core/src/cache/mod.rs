//! Stale-while-revalidate query cache in front of the WireLoft API.
//!
//! Reads never block: [`QueryCache::get`] returns whatever is cached and starts a
//! background fetch when the entry is missing or stale. Every fetch carries an id
//! and a cancellation token; a result whose id is no longer the entry's current
//! fetch is dropped, so the newest request for a key always wins.

mod collection;
mod key;
mod mirror;
mod observer;
mod policy;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;
use wireloft_core::{MediaProfile, Show};
use wireloft_infra::{ApiError, WireloftApi};
use wireloft_persistence::LocalStore;

pub use collection::{CachedCollection, QueryData};
pub use key::QueryKey;
pub use observer::QueryObserver;
pub use policy::CachePolicy;

pub type FetchId = Uuid;

struct InFlight {
    id: FetchId,
    token: CancellationToken,
}

struct Entry {
    data: Option<QueryData>,
    updated_at: Option<DateTime<Utc>>,
    fetched_at: Option<Instant>,
    failed_at: Option<Instant>,
    error: Option<String>,
    invalidated: bool,
    last_access: Instant,
    observers: usize,
    in_flight: Option<InFlight>,
    tx: watch::Sender<CachedCollection<QueryData>>,
}

impl Entry {
    fn new(now: Instant) -> Self {
        let (tx, _) = watch::channel(CachedCollection::default());
        Self {
            data: None,
            updated_at: None,
            fetched_at: None,
            failed_at: None,
            error: None,
            invalidated: false,
            last_access: now,
            observers: 0,
            in_flight: None,
            tx,
        }
    }

    fn snapshot(&self) -> CachedCollection<QueryData> {
        let fetching = self.in_flight.is_some();
        CachedCollection {
            data: self.data.clone(),
            updated_at: self.updated_at,
            is_loading: fetching && self.data.is_none(),
            is_fetching: fetching,
            error: self.error.clone(),
        }
    }

    fn publish(&self) {
        self.tx.send_replace(self.snapshot());
    }

    fn is_stale(&self, now: Instant, policy: &CachePolicy) -> bool {
        self.invalidated
            || self
                .fetched_at
                .is_none_or(|t| now.duration_since(t) >= policy.stale_after)
    }

    /// A failed fetch is not repeated on plain reads until the stale window passes.
    fn recently_failed(&self, now: Instant, policy: &CachePolicy) -> bool {
        self.failed_at
            .is_some_and(|t| now.duration_since(t) < policy.stale_after)
    }

    fn cancel_in_flight(&mut self) -> bool {
        match self.in_flight.take() {
            Some(f) => {
                f.token.cancel();
                true
            }
            None => false,
        }
    }
}

struct Inner {
    api: Arc<dyn WireloftApi>,
    mirror: Option<Arc<dyn LocalStore>>,
    policy: CachePolicy,
    entries: Mutex<HashMap<QueryKey, Entry>>,
}

impl Inner {
    fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Cheap to clone; clones share the same entries.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Inner>,
}

impl QueryCache {
    pub fn new(api: Arc<dyn WireloftApi>) -> Self {
        Self::with_policy(api, CachePolicy::default())
    }

    pub fn with_policy(api: Arc<dyn WireloftApi>, policy: CachePolicy) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                mirror: None,
                policy,
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Mirror successful collection fetches into `store`. Call before the cache is cloned.
    pub fn with_mirror(mut self, store: Arc<dyn LocalStore>) -> Self {
        match Arc::get_mut(&mut self.inner) {
            Some(inner) => inner.mirror = Some(store),
            None => warn!("cache already shared; mirror not attached"),
        }
        self
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.inner.policy
    }

    /// Current snapshot for `key`, starting a background fetch when needed.
    pub fn get(&self, key: QueryKey) -> CachedCollection<QueryData> {
        let mut entries = self.inner.entries();
        self.touch(&mut entries, &key, false)
    }

    pub fn shows(&self) -> CachedCollection<Vec<Show>> {
        self.get(QueryKey::Shows).map(QueryData::into_shows)
    }

    pub fn media_profiles(&self) -> CachedCollection<Vec<MediaProfile>> {
        self.get(QueryKey::MediaProfiles)
            .map(QueryData::into_media_profiles)
    }

    pub fn show(&self, id: &str) -> CachedCollection<Show> {
        self.get(QueryKey::Show(id.to_string()))
            .map(QueryData::into_show)
    }

    /// Snapshot without recording access or fetching.
    pub fn peek(&self, key: &QueryKey) -> Option<CachedCollection<QueryData>> {
        self.inner.entries().get(key).map(Entry::snapshot)
    }

    /// Like [`get`](Self::get), then wait until no fetch is running for `key`.
    pub async fn fetch(&self, key: QueryKey) -> CachedCollection<QueryData> {
        let mut rx = self.subscribe(key.clone());
        self.get(key.clone());
        loop {
            {
                let current = rx.borrow_and_update();
                if !current.is_busy() {
                    return current.clone();
                }
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
        // Entry was evicted while waiting.
        self.peek(&key).unwrap_or_default()
    }

    /// Warm `keys` in the background.
    pub fn prefetch(&self, keys: impl IntoIterator<Item = QueryKey>) {
        let mut entries = self.inner.entries();
        for key in keys {
            self.touch(&mut entries, &key, false);
        }
    }

    /// Seed `key` synchronously. Seeded data counts as stale so the next read revalidates.
    pub fn set_initial(&self, key: QueryKey, data: QueryData) {
        if !data.fits(&key) {
            warn!("ignoring initial data that does not match {key}");
            return;
        }
        let now = Instant::now();
        let mut entries = self.inner.entries();
        let entry = ensure_entry(&mut entries, &key, now);
        entry.data = Some(data);
        entry.fetched_at = None;
        entry.error = None;
        entry.last_access = now;
        entry.publish();
    }

    /// Mark `key` stale. Observed keys refetch right away, superseding any running fetch.
    pub fn invalidate(&self, key: &QueryKey) {
        let mut entries = self.inner.entries();
        let Some(entry) = entries.get_mut(key) else {
            return;
        };
        entry.invalidated = true;
        entry.failed_at = None;
        if entry.observers > 0 {
            self.start_fetch(key, entry);
        }
        entry.publish();
    }

    pub fn subscribe(&self, key: QueryKey) -> watch::Receiver<CachedCollection<QueryData>> {
        let now = Instant::now();
        let mut entries = self.inner.entries();
        ensure_entry(&mut entries, &key, now).tx.subscribe()
    }

    /// View-scoped handle on `key`. Dropping it releases the key.
    pub fn observe(&self, key: QueryKey) -> QueryObserver {
        QueryObserver::new(self.clone(), key)
    }

    /// Evict entries nobody observes and nobody read within the eviction window.
    pub fn collect_garbage(&self) -> usize {
        let now = Instant::now();
        let evict_after = self.inner.policy.evict_after;
        let mut entries = self.inner.entries();
        let before = entries.len();
        entries.retain(|key, entry| {
            let keep = entry.observers > 0
                || entry.in_flight.is_some()
                || now.duration_since(entry.last_access) < evict_after;
            if !keep {
                debug!("evicting unused cache entry {key}");
            }
            keep
        });
        before - entries.len()
    }

    /// Run [`collect_garbage`](Self::collect_garbage) every `every` until the cache is dropped.
    pub fn spawn_gc(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                QueryCache { inner }.collect_garbage();
            }
        })
    }

    pub(crate) fn attach(&self, key: &QueryKey) -> watch::Receiver<CachedCollection<QueryData>> {
        let mut entries = self.inner.entries();
        self.touch(&mut entries, key, true);
        match entries.get(key) {
            Some(entry) => entry.tx.subscribe(),
            None => watch::channel(CachedCollection::default()).1,
        }
    }

    pub(crate) fn detach(&self, key: &QueryKey) {
        let mut entries = self.inner.entries();
        let Some(entry) = entries.get_mut(key) else {
            return;
        };
        entry.observers = entry.observers.saturating_sub(1);
        entry.last_access = Instant::now();
        if entry.observers == 0 && entry.cancel_in_flight() {
            debug!("cancelled fetch of {key}: no observers left");
            entry.publish();
        }
    }

    /// Record access to `key` and start a fetch if it is missing or stale.
    ///
    /// `mount` marks a new observer; it also retries a recently failed fetch.
    fn touch(
        &self,
        entries: &mut HashMap<QueryKey, Entry>,
        key: &QueryKey,
        mount: bool,
    ) -> CachedCollection<QueryData> {
        let now = Instant::now();
        let policy = self.inner.policy;

        let entry = ensure_entry(entries, key, now);
        entry.last_access = now;
        if mount {
            entry.observers += 1;
            entry.failed_at = None;
        }

        let wants_fetch = entry.in_flight.is_none()
            && entry.is_stale(now, &policy)
            && !entry.recently_failed(now, &policy);
        if wants_fetch {
            self.start_fetch(key, entry);
            entry.publish();
        }
        entry.snapshot()
    }

    fn start_fetch(&self, key: &QueryKey, entry: &mut Entry) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                debug!("no async runtime; not fetching {key}");
                return;
            }
        };

        if entry.cancel_in_flight() {
            debug!("superseding running fetch of {key}");
        }
        let id: FetchId = Uuid::new_v4();
        let token = CancellationToken::new();
        entry.in_flight = Some(InFlight {
            id,
            token: token.clone(),
        });

        debug!(%id, "fetching {key}");
        let inner = self.inner.clone();
        let key = key.clone();
        handle.spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => return,
                r = load_with_retry(&inner, &key) => r,
            };
            complete(&inner, &key, id, result);
        });
    }
}

fn ensure_entry<'a>(
    entries: &'a mut HashMap<QueryKey, Entry>,
    key: &QueryKey,
    now: Instant,
) -> &'a mut Entry {
    if !entries.contains_key(key) {
        let mut entry = Entry::new(now);
        if let QueryKey::Show(id) = key {
            seed_from_list(entries, id, &mut entry);
        }
        entry.publish();
        entries.insert(key.clone(), entry);
    }
    entries.entry(key.clone()).or_insert_with(|| Entry::new(now))
}

/// Seed a missing detail entry from the list entry with the same id.
fn seed_from_list(entries: &HashMap<QueryKey, Entry>, id: &str, entry: &mut Entry) {
    let Some(list) = entries.get(&QueryKey::Shows) else {
        return;
    };
    let Some(QueryData::Shows(shows)) = &list.data else {
        return;
    };
    if let Some(show) = shows.iter().find(|s| s.id == id) {
        entry.data = Some(QueryData::Show(show.clone()));
        entry.updated_at = list.updated_at;
        entry.fetched_at = list.fetched_at;
    }
}

async fn load(api: &dyn WireloftApi, key: &QueryKey) -> Result<QueryData, ApiError> {
    Ok(match key {
        QueryKey::Shows => QueryData::Shows(api.list_shows().await?),
        QueryKey::MediaProfiles => QueryData::MediaProfiles(api.list_media_profiles().await?),
        QueryKey::Show(id) => QueryData::Show(api.get_show(id).await?),
    })
}

async fn load_with_retry(inner: &Inner, key: &QueryKey) -> Result<QueryData, ApiError> {
    let mut attempt = 0;
    loop {
        match load(inner.api.as_ref(), key).await {
            Ok(data) => return Ok(data),
            Err(e) if attempt < inner.policy.retries => {
                let delay = inner.policy.backoff(attempt);
                warn!("fetch of {key} failed ({e}); retrying in {delay:?}");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn complete(inner: &Inner, key: &QueryKey, id: FetchId, result: Result<QueryData, ApiError>) {
    let mirrored = {
        let mut entries = inner.entries();
        let Some(entry) = entries.get_mut(key) else {
            debug!("dropping result for evicted entry {key}");
            return;
        };
        if entry.in_flight.as_ref().map(|f| f.id) != Some(id) {
            debug!(%id, "dropping superseded result for {key}");
            return;
        }
        entry.in_flight = None;

        let now = Instant::now();
        let mirrored = match result {
            Ok(data) => {
                entry.data = Some(data.clone());
                entry.updated_at = Some(Utc::now());
                entry.fetched_at = Some(now);
                entry.failed_at = None;
                entry.error = None;
                entry.invalidated = false;
                Some(data)
            }
            Err(e) => {
                warn!("fetch of {key} failed: {e}");
                entry.failed_at = Some(now);
                entry.error = Some(e.user_message());
                None
            }
        };
        entry.publish();
        mirrored
    };

    if let (Some(store), Some(data)) = (&inner.mirror, mirrored) {
        mirror::write(store.as_ref(), key, &data);
    }
}
