//! Tierview Routines - saved configurations and view sessions
//!
//! - [`Routine`] - a named, saved sort/filter configuration of a view
//! - [`Scope`] - read-only filters an administrator injects into views
//! - [`Repository`] - load/save port with in-memory and SQLite adapters
//! - [`RoutineManager`] - CRUD and default handling for routines
//! - [`ViewSession`] - one view's tiers, draft editor and active routine

mod error;
mod manager;
mod records;
mod repository;
mod scopes;
pub mod session;
mod sqlite;

pub use error::{Result, RoutineError};
pub use manager::RoutineManager;
pub use records::{Record, Routine, Scope};
pub use repository::{InMemoryRepository, Repository};
pub use scopes::scope_filters_for;
pub use session::{RoutineSink, ViewSession};
pub use sqlite::SqliteRepository;
