//! References report helpers.
//!
//! Querysets and rows built from an installed registry.

pub use reinhardt_references_core::report::{ReferenceCell, ReferenceQuery, ReferenceRow};
