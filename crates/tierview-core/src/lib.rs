//! Tierview Core - shared value model for the filter & sort configuration engine
//!
//! This crate defines the types every other tierview crate depends on:
//!
//! - `Scalar`, `FilterValue`, `FilterCondition` - the tabular filter value model
//! - `SortEntry`, `TabularFilter`, `ViewState` - the committed (wire) representation
//! - `DraftSortEntry`, `DraftFilterEntry`, `DraftView` - the editable representation
//! - `FilterCatalog` - static filter definitions used for display and validation
//! - `column_id_for` - the filter definition to table column identity mapping
//! - `EngineSettings`, `logging` - configuration and tracing setup

pub mod column_map;
mod condition;
pub mod definitions;
mod error;
pub mod logging;
mod settings;
pub mod settings_file;
mod value;
mod view;

pub use column_map::{column_id_for, filter_id_for, mapped_pairs};
pub use condition::FilterCondition;
pub use definitions::{
    FilterCatalog, FilterCategory, FilterDefinition, FilterOption, FilterValueType,
};
pub use error::*;
pub use settings::{EngineSettings, LogSettings, NullPosition, RowSettings};
pub use value::{FilterValue, Scalar};
pub use view::*;
