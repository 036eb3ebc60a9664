//! # Connection Management
//!
//! Opens the single SQLite connection every repository shares.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Single Shared Connection                           │
//! │                                                                         │
//! │  Caller startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure connection settings                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Open connection + create tables         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │   Arc<Mutex<SqliteConnection>>          │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                       │                                         │
//! │       ▼                       ▼                                         │
//! │  DepartmentRepository    SellerRepository                              │
//! │  (each call holds the lock until it returns)                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no pool: callers needing real concurrency open one `Database`
//! per concurrent caller.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::department::DepartmentRepository;
use crate::repository::seller::SellerRepository;
use crate::schema;

/// The connection handle injected into every repository.
pub type SharedConnection = Arc<Mutex<SqliteConnection>>;

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./sellers.db")
///     .busy_timeout(Duration::from_secs(2))
///     .run_schema(false);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub database_path: PathBuf,

    /// How long a statement waits on a locked database file.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Whether to create the tables on connect.
    /// Default: true
    pub run_schema: bool,
}

impl DbConfig {
    /// Creates a configuration for the given database file.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            busy_timeout: Duration::from_secs(5),
            run_schema: true,
        }
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// Every `Database` opened from this config gets its own empty store.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            busy_timeout: Duration::from_secs(1),
            run_schema: true,
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// | Variable                     | Default          |
    /// |------------------------------|------------------|
    /// | `SELLERDB_DB_PATH`           | `./sellerdb.db`  |
    /// | `SELLERDB_BUSY_TIMEOUT_SECS` | `5`              |
    pub fn from_env() -> DbResult<Self> {
        let path = env::var("SELLERDB_DB_PATH").unwrap_or_else(|_| "./sellerdb.db".to_string());

        let busy_timeout = parse_busy_timeout(env::var("SELLERDB_BUSY_TIMEOUT_SECS").ok())?;

        Ok(DbConfig::new(path).busy_timeout(busy_timeout))
    }

    /// Sets the busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether to create the tables on connect.
    pub fn run_schema(mut self, run: bool) -> Self {
        self.run_schema = run;
        self
    }

    /// Returns true for the `:memory:` configuration.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        };

        // SQLite leaves foreign keys off unless asked; deletes blocked by a
        // seller depend on it.
        Ok(options
            .foreign_keys(true)
            .busy_timeout(self.busy_timeout))
    }
}

/// Parses `SELLERDB_BUSY_TIMEOUT_SECS`, defaulting to 5 seconds when unset.
fn parse_busy_timeout(raw: Option<String>) -> DbResult<Duration> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(5));
    };

    raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
        DbError::ConnectionFailed(format!(
            "Invalid value for SELLERDB_BUSY_TIMEOUT_SECS: {}",
            raw
        ))
    })
}

// =============================================================================
// Database
// =============================================================================

/// Connection provider and repository factory.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::in_memory()).await?;
///
/// let mut books = Department::new(None, "Books");
/// db.departments().insert(&mut books).await?;
///
/// let sellers = db.sellers().find_by_department(&books).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    conn: SharedConnection,
}

impl Database {
    /// Opens the connection and, if enabled, creates the tables.
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use handle
    /// * `Err(DbError::ConnectionFailed)` - The file could not be opened
    /// * `Err(DbError::SchemaFailed)` - Table creation failed
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening database connection"
        );

        let mut conn = config
            .connect_options()?
            .connect()
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!("Connection established");

        if config.run_schema {
            schema::apply(&mut conn).await?;
        }

        Ok(Database::from_connection(conn))
    }

    /// Wraps a connection opened elsewhere.
    ///
    /// The caller is responsible for foreign keys being enabled on it.
    pub fn from_connection(conn: SqliteConnection) -> Self {
        Database {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Returns the shared connection handle.
    ///
    /// For statements not covered by the repositories.
    pub fn connection(&self) -> &SharedConnection {
        &self.conn
    }

    /// Returns a department repository bound to this connection.
    pub fn departments(&self) -> DepartmentRepository {
        DepartmentRepository::new(self.conn.clone())
    }

    /// Returns a seller repository bound to this connection.
    pub fn sellers(&self) -> SellerRepository {
        SellerRepository::new(self.conn.clone())
    }

    /// Checks if the database answers a trivial query.
    pub async fn health_check(&self) -> bool {
        let mut conn = self.conn.lock().await;
        sqlx::query("SELECT 1").execute(&mut *conn).await.is_ok()
    }

    /// Closes the connection.
    ///
    /// If repositories still hold the handle, the connection is closed when
    /// the last of them is dropped instead.
    pub async fn close(self) -> DbResult<()> {
        match Arc::try_unwrap(self.conn) {
            Ok(conn) => {
                info!("Closing database connection");
                conn.into_inner().close().await?;
            }
            Err(_) => {
                warn!("Connection still shared by repositories, deferring close");
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
