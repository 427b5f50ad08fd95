//! Record repositories
//!
//! The engine never touches storage. Whatever needs persistence is handed a
//! [`Repository`], which loads and saves the whole record list of one kind.

use std::sync::Mutex;

use crate::error::{Result, RoutineError};
use crate::records::Record;

/// Load/save port for one record kind
pub trait Repository<T: Record> {
    fn load(&self) -> Result<Vec<T>>;

    /// Replace every stored record with `records`, keeping their order
    fn save(&self, records: &[T]) -> Result<()>;
}

/// Repository held in memory, for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct InMemoryRepository<T> {
    records: Mutex<Vec<T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn load(&self) -> Result<Vec<T>> {
        let guard = self
            .records
            .lock()
            .map_err(|e| RoutineError::LockPoisoned(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, records: &[T]) -> Result<()> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| RoutineError::LockPoisoned(e.to_string()))?;
        *guard = records.to_vec();
        Ok(())
    }
}

impl<T: Record, R: Repository<T>> Repository<T> for &R {
    fn load(&self) -> Result<Vec<T>> {
        (**self).load()
    }

    fn save(&self, records: &[T]) -> Result<()> {
        (**self).save(records)
    }
}
