use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};

use crate::store::kv::KeyValueStore;

const CURRENT_SCHEMA_VERSION: i32 = 1;

fn run_migrations(conn: &mut Connection) -> Result<()> {
    let mut version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")?;

    if version > CURRENT_SCHEMA_VERSION {
        bail!(
            "database version ({}) is newer than supported schema ({})",
            version,
            CURRENT_SCHEMA_VERSION
        );
    }

    if version == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;

    while version < CURRENT_SCHEMA_VERSION {
        let next_version = version + 1;
        match next_version {
            1 => tx
                .execute_batch(include_str!("schema_v1.sql"))
                .context("failed to execute schema_v1.sql")?,
            _ => bail!("unknown migration target version: {next_version}"),
        }
        version = next_version;
    }

    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)
        .context("failed to update user_version pragma")?;
    tx.commit().context("failed to commit migrations")?;

    Ok(())
}

/// Durable key-value backing on a local sqlite file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let mut conn = Connection::open(&db_path)
            .with_context(|| format!("failed to open sqlite store at {}", db_path.display()))?;

        if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
            error!("Failed to enable WAL mode: {err}");
        }

        run_migrations(&mut conn).context("failed to run store migrations")?;

        info!("Preference store opened at {}", db_path.display());

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    fn with_conn<T>(&self, task: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        task(&guard)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("failed to read key '{key}'"))
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("failed to write key '{key}'"))?;
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
                .with_context(|| format!("failed to remove key '{key}'"))?;
            Ok(())
        })
    }

    fn clear(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv", [])
                .context("failed to clear store")?;
            Ok(())
        })
    }
}
