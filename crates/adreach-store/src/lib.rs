//! Local storage layer for the Adreach marketplace core.
//!
//! This crate provides SQLite persistence for the marketplace state the
//! pricing engine and the payment confirmation protocol operate on:
//!
//! - **Tasks** (SQLite): promotion campaign rows and their lifecycle status
//! - **Targets** (SQLite): per-platform view targets, one per (task, platform)
//! - **Costs** (SQLite): exactly one cost row per task, upsert semantics
//! - **Promises** (SQLite): influencer committed reach per application
//!
//! # Storage Layout
//!
//! ```text
//! ~/.adreach/
//! └── adreach.db               # SQLite: tasks, targets, costs, promises
//! ```
//!
//! # Trait-Based Design
//!
//! All storage components are defined as traits, allowing for alternative
//! implementations (e.g., in-memory stores for testing). The default
//! implementations use SQLite over a shared connection.
//!
//! # Example
//!
//! ```no_run
//! use adreach_store::{MarketStore, MarketStoreConfig, TaskStore};
//! use std::path::PathBuf;
//!
//! let config = MarketStoreConfig::new(PathBuf::from("~/.adreach"));
//! let mut store = MarketStore::open(config).expect("failed to open store");
//!
//! let task = store
//!     .tasks
//!     .create("buyer-1", "Launch", "Promote our launch", chrono::Utc::now())
//!     .expect("failed to create task");
//! assert!(task.id > 0);
//! ```

pub mod cost;
pub mod error;
pub mod promise;
pub mod schema;
pub mod target;
pub mod task;
pub mod traits;

// Re-export error types
pub use error::{Result, StoreError};

// Re-export traits
pub use traits::{CostStore, PromiseStore, TargetStore, TaskStore};

// Re-export implementations
pub use cost::SqliteCostStore;
pub use promise::SqlitePromiseStore;
pub use target::SqliteTargetStore;
pub use task::SqliteTaskStore;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

/// Get the default data directory for Adreach state.
///
/// Priority:
/// 1. `ADREACH_DATA_DIR` environment variable (if set)
/// 2. Platform-specific data directory
/// 3. Fallback to `$HOME/.adreach`
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ADREACH_DATA_DIR") {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("io", "adreach", "adreach")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".adreach")
        })
}

/// Configuration for MarketStore.
#[derive(Debug, Clone)]
pub struct MarketStoreConfig {
    /// Base directory for all marketplace data.
    pub base_dir: PathBuf,
    /// Database file path (default: base_dir/adreach.db).
    pub database_path: Option<PathBuf>,
}

impl MarketStoreConfig {
    /// Create a new configuration with the given base directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            database_path: None,
        }
    }

    /// Set the database path.
    pub fn with_database_path(mut self, path: impl AsRef<Path>) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Get the database path.
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| self.base_dir.join("adreach.db"))
    }
}

/// Complete marketplace state with all storage components.
///
/// Composes the storage components over a single shared connection and
/// provides one entry point for opening the store.
pub struct MarketStore {
    /// Task storage.
    pub tasks: SqliteTaskStore,
    /// Target storage.
    pub targets: SqliteTargetStore,
    /// Cost storage.
    pub costs: SqliteCostStore,
    /// Promise storage.
    pub promises: SqlitePromiseStore,
    /// Shared database connection.
    conn: Arc<Mutex<Connection>>,
    /// Configuration used to open this store.
    config: MarketStoreConfig,
}

impl MarketStore {
    /// Open the marketplace store with the given configuration.
    ///
    /// Creates the base directory and initializes the database schema.
    pub fn open(config: MarketStoreConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.base_dir)?;

        let db_path = config.database_path();
        tracing::info!(db_path = %db_path.display(), "Opening marketplace database");
        let conn = Connection::open(&db_path)?;

        schema::initialize_schema(&conn)?;

        let conn = Arc::new(Mutex::new(conn));
        Ok(Self::from_connection(conn, config))
    }

    /// Open the marketplace store in memory (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize_schema(&conn)?;
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self::from_connection(conn, MarketStoreConfig::new(":memory:")))
    }

    fn from_connection(conn: Arc<Mutex<Connection>>, config: MarketStoreConfig) -> Self {
        let tasks = SqliteTaskStore::new(Arc::clone(&conn));
        let targets = SqliteTargetStore::new(Arc::clone(&conn));
        let costs = SqliteCostStore::new(Arc::clone(&conn));
        let promises = SqlitePromiseStore::new(Arc::clone(&conn));

        Self {
            tasks,
            targets,
            costs,
            promises,
            conn,
            config,
        }
    }

    /// Get the configuration used to open this store.
    pub fn config(&self) -> &MarketStoreConfig {
        &self.config
    }

    /// Get a reference to the shared database connection.
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }
}
