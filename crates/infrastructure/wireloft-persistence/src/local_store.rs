use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::StorageError;

/// Durable string key/value storage local to this client.
///
/// Values are overwritten wholesale on every write.
pub trait LocalStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Best-effort JSON access. Failures are logged and swallowed, corrupt values read as absent.
pub trait LocalStoreExt {
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T>;
    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T);
    fn forget(&self, key: &str);
}

impl<S: LocalStore + ?Sized> LocalStoreExt for S {
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!("local store read of {key} failed: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("dropping corrupt local store value at {key}: {e}");
                None
            }
        }
    }

    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::debug!("could not serialize {key} for local store: {e}");
                return;
            }
        };
        if let Err(e) = self.set(key, &json) {
            tracing::debug!("local store write of {key} failed: {e}");
        }
    }

    fn forget(&self, key: &str) {
        if let Err(e) = self.remove(key) {
            tracing::debug!("local store remove of {key} failed: {e}");
        }
    }
}
