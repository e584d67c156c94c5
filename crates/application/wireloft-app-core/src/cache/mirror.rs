use wireloft_core::{MediaProfile, Show};
use wireloft_persistence::{LocalStore, LocalStoreExt};

use super::{QueryCache, QueryData, QueryKey};

pub(super) fn write(store: &dyn LocalStore, key: &QueryKey, data: &QueryData) {
    let Some(mirror_key) = key.mirror_key() else {
        return;
    };
    match data {
        QueryData::Shows(shows) => store.save_json(&mirror_key, shows),
        QueryData::MediaProfiles(profiles) => store.save_json(&mirror_key, profiles),
        QueryData::Show(_) => {}
    }
}

impl QueryCache {
    /// Seed the mirrored collections from `store` so a fresh process can show them at once.
    ///
    /// Returns the keys that were restored.
    pub fn restore_mirror(&self, store: &dyn LocalStore) -> Vec<QueryKey> {
        let mut restored = Vec::new();

        if let Some(shows) = QueryKey::Shows
            .mirror_key()
            .and_then(|k| store.load_json::<Vec<Show>>(&k))
        {
            self.set_initial(QueryKey::Shows, QueryData::Shows(shows));
            restored.push(QueryKey::Shows);
        }
        if let Some(profiles) = QueryKey::MediaProfiles
            .mirror_key()
            .and_then(|k| store.load_json::<Vec<MediaProfile>>(&k))
        {
            self.set_initial(
                QueryKey::MediaProfiles,
                QueryData::MediaProfiles(profiles),
            );
            restored.push(QueryKey::MediaProfiles);
        }

        tracing::debug!("restored {} mirrored queries", restored.len());
        restored
    }
}
