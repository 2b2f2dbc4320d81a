//! # Reinhardt References
//!
//! Reference tracking for Reinhardt CMS content.
//!
//! Installed applications declare which fields of their models point at
//! other models' content, and may attach extra columns to the references
//! report. The registry collects both once at startup:
//!
//! - **Reference fields**: `related model → owning model → field names`,
//!   kept separately for content plugins and ordinary models
//! - **Extra columns**: `(accessor, label)` pairs in display order, plus one
//!   queryset modifier per column group
//!
//! ## Architecture
//!
//! ```text
//! reinhardt-references-core
//! ├── models     - Model identities, reference field declarations
//! ├── content    - Content objects and their versions
//! ├── queryset   - Query description handed to modifiers
//! ├── columns    - Extra columns and column groups
//! ├── apps       - Per-application configuration trait
//! ├── extension  - The registry itself
//! ├── settings   - TOML settings and declarative apps
//! ├── setup      - Startup driver
//! ├── report     - Reading the registry back for the report
//! └── versioning - Versioning-aware columns (feature `versioning`)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use reinhardt_references_core::prelude::*;
//! use std::sync::Arc;
//!
//! struct BlogConfig;
//!
//! impl CmsAppConfig for BlogConfig {
//!     fn label(&self) -> &str {
//!         "blog"
//!     }
//!
//!     fn references_enabled(&self) -> bool {
//!         true
//!     }
//!
//!     fn reference_fields(&self) -> Option<ReferenceFields> {
//!         Some(ReferenceFields::from([ReferenceField::new(
//!             ModelDescriptor::model("blog", "Article"),
//!             "author",
//!             ModelRef::new("people", "Author"),
//!         )]))
//!     }
//! }
//!
//! let extension = ReferencesSetup::new()
//!     .app(Arc::new(BlogConfig))
//!     .build()
//!     .unwrap();
//! assert!(extension.is_referenced(&ModelRef::new("people", "Author")));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod apps;
pub mod columns;
pub mod content;
pub mod error;
pub mod extension;
pub mod models;
pub mod queryset;
pub mod report;
pub mod settings;
pub mod setup;
#[cfg(feature = "versioning")]
pub mod versioning;

pub use error::{ReferencesError, ReferencesResult};
pub use extension::{ReferencesExtension, references_extension};

pub mod prelude {
	//! Convenient re-exports of commonly used items

	pub use crate::apps::CmsAppConfig;
	pub use crate::columns::{Accessor, ColumnValue, ExtraColumn, ExtraColumnGroup};
	pub use crate::content::{Content, Version, VersionState};
	pub use crate::error::{ReferencesError, ReferencesResult};
	pub use crate::extension::{ReferenceMap, ReferencesExtension, references_extension};
	pub use crate::models::{
		ModelDescriptor, ModelKind, ModelRef, ModelRegistry, ReferenceField, ReferenceFields,
	};
	pub use crate::queryset::{QuerySet, QuerySetModifier};
	pub use crate::report::{ReferenceQuery, ReferenceRow};
	pub use crate::settings::ReferencesSettings;
	pub use crate::setup::ReferencesSetup;

	#[cfg(feature = "versioning")]
	pub use crate::apps::ReferencesAppConfig;
	#[cfg(feature = "versioning")]
	pub use crate::versioning::{
		VersionableLookup, VersioningRegistry, version_attr, version_queryset_modifier,
	};
}
