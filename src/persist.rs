//! Task collection ↔ durable storage.
//!
//! The collection is always read and written whole. A store only knows how
//! to load it, replace it, and tell "never written" apart from "empty".
//! Seeding and every other rule live in the repository.

use crate::{
    settings::{StoreKind, StoreSettings},
    task::Task,
};
use redb::{Database, TableDefinition};
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};
#[cfg(feature = "profile")]
use std::time::Instant;
use thiserror::Error;

const BOARD: TableDefinition<&str, &[u8]> = TableDefinition::new("board");
const TASKS_KEY: &str = "tasks";

/// Whole-collection persistence contract.
pub trait Store: Send + Sync {
    /// Load the persisted collection. `None` means nothing was ever saved.
    fn load(&self) -> Result<Option<Vec<Task>>, StoreError>;

    /// Replace the persisted collection in one atomic write.
    fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn load(&self) -> Result<Option<Vec<Task>>, StoreError> {
        (**self).load()
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        (**self).save(tasks)
    }
}

/// Open the store selected in settings.
pub fn open_store(settings: &StoreSettings) -> Result<Box<dyn Store>, StoreError> {
    let store: Box<dyn Store> = match settings.kind {
        StoreKind::Redb => Box::new(RedbStore::open(&settings.path)?),
        StoreKind::Json => Box::new(JsonFileStore::new(&settings.path)),
        StoreKind::Memory => Box::new(MemoryStore::new()),
    };
    tracing::info!(kind = ?settings.kind, path = %settings.path.display(), "opened task store");
    Ok(store)
}

fn ensure_parent_dir(path: &Path) -> Result<(), StoreError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}

// ── redb ───────────────────────────────────────────────────────

/// redb save file holding the collection as one postcard record.
/// Cloneable (Arc inside).
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open (or create) the save file. Creates the table if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;
        let db = Database::create(path)?;

        let txn = db.begin_write()?;
        {
            let _ = txn.open_table(BOARD)?;
        }
        txn.commit()?;

        Ok(RedbStore { db: Arc::new(db) })
    }
}

impl Store for RedbStore {
    fn load(&self) -> Result<Option<Vec<Task>>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(BOARD)?;
        let Some(record) = table.get(TASKS_KEY)? else {
            return Ok(None);
        };
        let tasks = postcard::from_bytes(record.value())
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(Some(tasks))
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        #[cfg(feature = "profile")]
        let total_start = Instant::now();
        let bytes = postcard::to_allocvec(tasks).map_err(|e| StoreError::Encode(e.to_string()))?;

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(BOARD)?;
            table.insert(TASKS_KEY, bytes.as_slice())?;
        }
        #[cfg(feature = "profile")]
        let commit_start = Instant::now();
        txn.commit()?;
        #[cfg(feature = "profile")]
        tracing::debug!(
            tasks = tasks.len(),
            bytes = bytes.len(),
            commit_us = commit_start.elapsed().as_micros() as u64,
            total_us = total_start.elapsed().as_micros() as u64,
            "redb save committed"
        );
        Ok(())
    }
}

// ── JSON file ──────────────────────────────────────────────────

/// Pretty-printed JSON array on disk. Writes land in a sibling temp file
/// first and are renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Task>>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let tasks = serde_json::from_str(&content).map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(Some(tasks))
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        #[cfg(feature = "profile")]
        let total_start = Instant::now();
        ensure_parent_dir(&self.path)?;
        let content = serde_json::to_string_pretty(tasks).map_err(|e| StoreError::Encode(e.to_string()))?;
        let temp = self.temp_path();
        fs::write(&temp, content)?;
        fs::rename(&temp, &self.path)?;
        #[cfg(feature = "profile")]
        tracing::debug!(
            tasks = tasks.len(),
            total_us = total_start.elapsed().as_micros() as u64,
            "json save renamed into place"
        );
        Ok(())
    }
}

// ── Memory ─────────────────────────────────────────────────────

/// Process-local store. Starts out "never written".
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tasks: Arc<RwLock<Option<Vec<Task>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `tasks`, skipping the first-run seed.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(Some(tasks))),
        }
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Task>>, StoreError> {
        let tasks = self.tasks.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tasks.clone())
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let mut slot = self.tasks.write().map_err(|_| StoreError::Poisoned)?;
        *slot = Some(tasks.to_vec());
        Ok(())
    }
}

// ── Errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("redb: {0}")]
    Redb(String),
    #[error("decode: {0}")]
    Decode(String),
    #[error("encode: {0}")]
    Encode(String),
    #[error("store lock poisoned")]
    Poisoned,
}

// redb 2.x has many error types. Blanket them all into StoreError::Redb.
macro_rules! from_redb {
    ($($t:ty),*) => {
        $(impl From<$t> for StoreError {
            fn from(e: $t) -> Self { StoreError::Redb(e.to_string()) }
        })*
    };
}

from_redb!(
    redb::Error,
    redb::DatabaseError,
    redb::TableError,
    redb::TransactionError,
    redb::StorageError,
    redb::CommitError
);

// ── Tests ──────────────────────────────────────────────────────
