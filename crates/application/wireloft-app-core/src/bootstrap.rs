use std::sync::Arc;

use anyhow::Context;
use camino::Utf8PathBuf;
use tokio::task::JoinHandle;
use wireloft_infra::{default_http_client, HttpApiClient, WireloftApi};
use wireloft_persistence::{LocalStore, MemoryLocalStore, RedbLocalStore};

use crate::cache::{QueryCache, QueryKey};
use crate::notify::NotificationBus;
use crate::wizard::AddShowWizard;

/// One-time wiring of the client: storage, HTTP, cache.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    pub api_base: String,
    /// Directory of the durable store. `None` uses the platform data directory.
    pub data_dir: Option<Utf8PathBuf>,
    /// Warm shows and media profiles in the background after startup.
    pub prefetch: bool,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self {
            api_base: wireloft_config::DEFAULT_API_BASE.to_string(),
            data_dir: None,
            prefetch: true,
        }
    }
}

impl Bootstrap {
    pub fn init(self) -> anyhow::Result<WireloftApplication> {
        let store = open_store(self.data_dir.as_deref());

        let client = default_http_client().context("Failed to build HTTP client")?;
        let api = HttpApiClient::new(client, &self.api_base)
            .with_context(|| format!("Invalid API base URL {}", self.api_base))?;
        tracing::debug!("using API at {}", api.base());

        let app = WireloftApplication::from_parts(Arc::new(api), store);
        let restored = app.cache.restore_mirror(app.store.as_ref());
        tracing::debug!(?restored, "mirror restored");
        if tokio::runtime::Handle::try_current().is_ok() {
            app.start_background();
        } else {
            tracing::debug!("no async runtime; cache eviction not scheduled");
        }
        if self.prefetch {
            app.cache
                .prefetch([QueryKey::Shows, QueryKey::MediaProfiles]);
        }
        Ok(app)
    }
}

fn open_store(data_dir: Option<&camino::Utf8Path>) -> Arc<dyn LocalStore> {
    let opened = match data_dir {
        Some(dir) => RedbLocalStore::open_in_dir(dir),
        None => RedbLocalStore::open_default(),
    };
    match opened {
        Ok(store) => {
            tracing::debug!("local store at {}", store.path());
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!("local store unavailable ({e}); using memory only");
            Arc::new(MemoryLocalStore::new())
        }
    }
}

/// Wired services shared by every view.
#[derive(Clone)]
pub struct WireloftApplication {
    pub api: Arc<dyn WireloftApi>,
    pub store: Arc<dyn LocalStore>,
    pub cache: QueryCache,
    pub notifications: NotificationBus,
}

impl WireloftApplication {
    pub fn from_parts(api: Arc<dyn WireloftApi>, store: Arc<dyn LocalStore>) -> Self {
        let cache = QueryCache::new(api.clone()).with_mirror(store.clone());
        Self {
            api,
            store,
            cache,
            notifications: NotificationBus::default(),
        }
    }

    /// Start periodic eviction of unused cache entries. Must run inside a tokio runtime.
    ///
    /// The task ends on its own once every clone of the cache is dropped.
    pub fn start_background(&self) -> JoinHandle<()> {
        self.cache.spawn_gc(wireloft_config::CACHE_GC_INTERVAL)
    }

    pub fn wizard(&self) -> AddShowWizard {
        AddShowWizard::mount(self.store.clone(), self.notifications.clone())
    }
}
