//! SQLite-backed repository
//!
//! One table per record kind. Each row stores the record as a JSON payload
//! with its list position, so `load` returns records in the order they were
//! saved.

use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, params};

use crate::error::{Result, RoutineError};
use crate::records::Record;
use crate::repository::Repository;

/// Handle for database connections - either owned or shared
enum ConnectionHandle {
    Owned(Connection),
    Shared(Arc<Mutex<Connection>>),
}

impl ConnectionHandle {
    fn with_conn<T, F: FnOnce(&Connection) -> Result<T>>(&self, f: F) -> Result<T> {
        match self {
            ConnectionHandle::Owned(conn) => f(conn),
            ConnectionHandle::Shared(arc) => {
                let guard = arc
                    .lock()
                    .map_err(|e| RoutineError::LockPoisoned(e.to_string()))?;
                f(&guard)
            }
        }
    }
}

/// Repository storing records of kind `T` in a SQLite database
pub struct SqliteRepository<T> {
    db_path: PathBuf,
    /// Holds the connection for in-memory databases (where each open creates a new db)
    memory_conn: Option<Arc<Mutex<Connection>>>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> SqliteRepository<T> {
    /// Open or create storage at the given path
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let repository = Self {
            db_path,
            memory_conn: None,
            _record: PhantomData,
        };
        repository.initialize_schema()?;
        Ok(repository)
    }

    /// Create an in-memory repository for testing
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repository = Self {
            db_path: PathBuf::from(":memory:"),
            memory_conn: Some(Arc::new(Mutex::new(conn))),
            _record: PhantomData,
        };
        repository.initialize_schema()?;
        Ok(repository)
    }

    fn connect(&self) -> Result<ConnectionHandle> {
        if let Some(ref conn) = self.memory_conn {
            Ok(ConnectionHandle::Shared(conn.clone()))
        } else {
            let conn = Connection::open(&self.db_path)?;
            Ok(ConnectionHandle::Owned(conn))
        }
    }

    fn initialize_schema(&self) -> Result<()> {
        let handle = self.connect()?;
        handle.with_conn(|conn| {
            conn.execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {} (
                        id TEXT PRIMARY KEY,
                        position INTEGER NOT NULL,
                        payload TEXT NOT NULL,
                        saved_at TEXT NOT NULL
                    )",
                    T::KIND
                ),
                [],
            )?;
            Ok(())
        })
    }
}

impl<T: Record> Repository<T> for SqliteRepository<T> {
    fn load(&self) -> Result<Vec<T>> {
        let handle = self.connect()?;
        handle.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT id, payload FROM {} ORDER BY position ASC",
                T::KIND
            ))?;
            let rows = stmt.query_map([], |row| {
                let id: String = row.get(0)?;
                let payload: String = row.get(1)?;
                Ok((id, payload))
            })?;

            let mut records = Vec::new();
            for row in rows {
                let (id, payload) = row?;
                match serde_json::from_str::<T>(&payload) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        tracing::warn!(kind = T::KIND, %id, error = %e, "skipping malformed record");
                    }
                }
            }
            Ok(records)
        })
    }

    fn save(&self, records: &[T]) -> Result<()> {
        let handle = self.connect()?;
        let now = chrono::Utc::now().to_rfc3339();
        let payloads = records
            .iter()
            .map(|record| Ok((record.id().to_string(), serde_json::to_string(record)?)))
            .collect::<Result<Vec<_>>>()?;

        handle.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            tx.execute(&format!("DELETE FROM {}", T::KIND), [])?;
            {
                let mut insert = tx.prepare(&format!(
                    "INSERT OR REPLACE INTO {} (id, position, payload, saved_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    T::KIND
                ))?;
                for (position, (id, payload)) in payloads.iter().enumerate() {
                    insert.execute(params![id, position as i64, payload, now])?;
                }
            }
            tx.commit()?;
            tracing::debug!(kind = T::KIND, count = payloads.len(), "saved records");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Routine, Scope};
    use pretty_assertions::assert_eq;
    use tierview_core::{SortEntry, TabularFilter, ViewState};

    #[test]
    fn test_save_and_load_in_order() {
        let repository = SqliteRepository::<Routine>::in_memory().unwrap();
        let a = Routine::new("Zeta", "inventory", ViewState::default());
        let b = Routine::new(
            "Alpha",
            "inventory",
            ViewState::new(vec![SortEntry::desc("price")], Vec::new()),
        );

        repository.save(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(repository.load().unwrap(), vec![a, b]);
    }

    #[test]
    fn test_save_replaces_previous_contents() {
        let repository = SqliteRepository::<Scope>::in_memory().unwrap();
        let a = Scope::global("Active", vec![TabularFilter::one_of("status", ["active"])]);
        let b = Scope::new("North", "inventory", Vec::new());

        repository.save(&[a, b.clone()]).unwrap();
        repository.save(&[b.clone()]).unwrap();
        assert_eq!(repository.load().unwrap(), vec![b]);

        repository.save(&[]).unwrap();
        assert!(repository.load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_payload_is_skipped() {
        let repository = SqliteRepository::<Scope>::in_memory().unwrap();
        let scope = Scope::global("Active", Vec::new());
        repository.save(&[scope.clone()]).unwrap();

        let handle = repository.connect().unwrap();
        handle
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO scopes (id, position, payload, saved_at) VALUES ('bad', 5, '{', '')",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        assert_eq!(repository.load().unwrap(), vec![scope]);
    }
}
