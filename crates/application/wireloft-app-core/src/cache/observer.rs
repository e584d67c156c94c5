use tokio::sync::watch;

use super::{CachedCollection, QueryCache, QueryData, QueryKey};

/// A view's interest in one key.
///
/// Switching keys or dropping the observer cancels the old key's running fetch
/// unless another observer still needs it.
pub struct QueryObserver {
    cache: QueryCache,
    key: QueryKey,
    rx: watch::Receiver<CachedCollection<QueryData>>,
}

impl QueryObserver {
    pub(super) fn new(cache: QueryCache, key: QueryKey) -> Self {
        let rx = cache.attach(&key);
        Self { cache, key, rx }
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Latest published snapshot of the observed key.
    pub fn current(&self) -> CachedCollection<QueryData> {
        self.rx.borrow().clone()
    }

    pub fn set_key(&mut self, key: QueryKey) {
        if key == self.key {
            return;
        }
        let rx = self.cache.attach(&key);
        let previous = std::mem::replace(&mut self.key, key);
        self.rx = rx;
        self.cache.detach(&previous);
    }

    /// Wait for the next change. `None` once the entry is gone.
    pub async fn changed(&mut self) -> Option<CachedCollection<QueryData>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Wait until no fetch is running and return that snapshot.
    pub async fn settled(&mut self) -> CachedCollection<QueryData> {
        loop {
            {
                let current = self.rx.borrow_and_update();
                if !current.is_busy() {
                    return current.clone();
                }
            }
            if self.rx.changed().await.is_err() {
                return self.current();
            }
        }
    }
}

impl Drop for QueryObserver {
    fn drop(&mut self) {
        self.cache.detach(&self.key);
    }
}
