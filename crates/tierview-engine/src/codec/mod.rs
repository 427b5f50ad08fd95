//! Conversion between the tabular and draft representations
//!
//! Both directions are deterministic: decoding the same input twice yields
//! identical ids, which the synchronizer relies on when it re-decodes
//! committed state after every external change.

mod filters;
mod sorting;

pub use filters::{decode_filter_value, decode_filters, encode_filter_value, encode_filters};
pub use sorting::{decode_sorting, encode_sorting};
