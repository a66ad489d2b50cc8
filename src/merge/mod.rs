//! # Merge Module
//!
//! Pure, allocation-only merge helpers used when composing configuration:
//!
//! - [`merge_object_array`] concatenates two single-or-many values, preserving order
//! - [`merge_deep`] recursively merges JSON records, replacing non-record values
//!
//! Both take their inputs by shared reference and return a freshly built value,
//! so a global template can be merged against any number of per-route values
//! without being changed.

mod array;
mod deep;

pub use array::{concat_slices, merge_object_array, OneOrMany};
pub use deep::{clone, merge_deep, Shape};
