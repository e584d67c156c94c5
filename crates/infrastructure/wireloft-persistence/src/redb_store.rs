use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use directories::ProjectDirs;
use redb::{Database, ReadableTable, TableDefinition};

use crate::{LocalStore, StorageError};

const META: TableDefinition<&str, &str> = TableDefinition::new("meta");
const ENTRIES: TableDefinition<&str, &str> = TableDefinition::new("local_storage");

const META_FORMAT_KEY: &str = "format";
const META_FORMAT_VALUE: &str = "wireloft-local-store";
const META_SCHEMA_VERSION: &str = "schema_version";
const META_CREATED_AT: &str = "created_at";

pub const CURRENT_SCHEMA: u32 = 1;

const QUALIFIER: &str = "com";
const ORG: &str = "wireloft";
const APP: &str = "client";

/// Local store backed by a single redb file.
#[derive(Clone)]
pub struct RedbLocalStore {
    path: Utf8PathBuf,
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbLocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbLocalStore")
            .field("path", &self.path)
            .finish()
    }
}

impl RedbLocalStore {
    fn is_corrupt_open_error(err: &redb::DatabaseError) -> bool {
        match err {
            redb::DatabaseError::Storage(storage) => match storage {
                redb::StorageError::Corrupted(_) => true,
                redb::StorageError::Io(ioe) => matches!(
                    ioe.kind(),
                    std::io::ErrorKind::InvalidData | std::io::ErrorKind::UnexpectedEof
                ),
                _ => false,
            },
            _ => false,
        }
    }

    /// Platform data directory for this client.
    pub fn default_dir() -> Result<Utf8PathBuf, StorageError> {
        let dirs = ProjectDirs::from(QUALIFIER, ORG, APP).ok_or(StorageError::NoDataDir)?;
        Utf8PathBuf::from_path_buf(dirs.data_dir().to_path_buf())
            .map_err(|_| StorageError::NoDataDir)
    }

    pub fn open_default() -> Result<Self, StorageError> {
        Self::open_in_dir(&Self::default_dir()?)
    }

    pub fn open_in_dir(dir: &Utf8Path) -> Result<Self, StorageError> {
        Self::open(&dir.join(wireloft_config::LOCAL_STORE_FILENAME))
    }

    /// Open or create the store at `path`. A corrupt file is quarantined and replaced.
    pub fn open(path: &Utf8Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = match Self::open_checked(path) {
            Err(StorageError::Corrupt) => {
                let moved_to = quarantine(path)?;
                tracing::warn!("local store at {path} is corrupt; moved it to {moved_to}");
                Self::open_checked(path)?
            }
            other => other?,
        };

        Ok(Self {
            path: path.to_path_buf(),
            db: Arc::new(db),
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn open_checked(path: &Utf8Path) -> Result<Database, StorageError> {
        let db = if path.exists() {
            match Database::open(path.as_std_path()) {
                Ok(db) => db,
                Err(e) if Self::is_corrupt_open_error(&e) => return Err(StorageError::Corrupt),
                Err(e) => return Err(e.into()),
            }
        } else {
            Database::create(path.as_std_path())?
        };
        Self::ensure_schema(&db)?;
        Ok(db)
    }

    fn ensure_schema(db: &Database) -> Result<(), StorageError> {
        // Create tables and required meta keys on first open.
        let write_tx = db.begin_write()?;
        {
            let mut meta = write_tx.open_table(META)?;
            let format: Option<String> = meta.get(META_FORMAT_KEY)?.map(|g| g.value().to_string());
            if format.is_none() {
                let schema_version = CURRENT_SCHEMA.to_string();
                let created_at = Utc::now().to_rfc3339();
                meta.insert(META_FORMAT_KEY, META_FORMAT_VALUE)?;
                meta.insert(META_SCHEMA_VERSION, schema_version.as_str())?;
                meta.insert(META_CREATED_AT, created_at.as_str())?;
            } else if format.as_deref() != Some(META_FORMAT_VALUE) {
                return Err(StorageError::Corrupt);
            }
        }
        let _ = write_tx.open_table(ENTRIES)?;
        write_tx.commit()?;

        let read_tx = db.begin_read()?;
        let meta = read_tx.open_table(META)?;
        let schema_version = meta
            .get(META_SCHEMA_VERSION)?
            .and_then(|g| g.value().parse::<u32>().ok())
            .unwrap_or(0);
        if schema_version == 0 {
            return Err(StorageError::Corrupt);
        }
        if schema_version > CURRENT_SCHEMA {
            return Err(StorageError::NewerSchema {
                found: schema_version,
                supported: CURRENT_SCHEMA,
            });
        }
        Ok(())
    }
}

/// Move a corrupt store aside under a unique `<name>.corrupt.<stamp>` name.
fn quarantine(path: &Utf8Path) -> std::io::Result<Utf8PathBuf> {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let name = path
        .file_name()
        .unwrap_or(wireloft_config::LOCAL_STORE_FILENAME);
    let stamp = format!(
        "{}-{}-{}",
        Utc::now().format("%Y%m%d%H%M%S%3f"),
        std::process::id(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    );
    let target = path.with_file_name(format!("{name}.corrupt.{stamp}"));
    std::fs::rename(path, &target)?;
    Ok(target)
}

impl LocalStore for RedbLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let read_tx = self.db.begin_read()?;
        let table = read_tx.open_table(ENTRIES)?;
        let value = table.get(key)?.map(|g| g.value().to_string());
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_tx = self.db.begin_write()?;
        {
            let mut table = write_tx.open_table(ENTRIES)?;
            table.insert(key, value)?;
        }
        write_tx.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let write_tx = self.db.begin_write()?;
        {
            let mut table = write_tx.open_table(ENTRIES)?;
            table.remove(key)?;
        }
        write_tx.commit()?;
        Ok(())
    }
}
