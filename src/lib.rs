//! # Reinhardt References
//!
//! Reference tracking for Reinhardt CMS content.
//!
//! Installed applications declare which of their model fields point at other
//! models' content. The references registry groups those declarations by the
//! referenced model so the admin can answer "what uses this object?", and
//! collects extra columns (with queryset modifiers) for the references report.
//!
//! ## Feature Flags
//!
//! - `versioning` (default) - Status, Author and Modified date columns for
//!   versioned content
//! - `full` - All features enabled
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_references::prelude::*;
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
//!             ModelDescriptor::plugin("blog", "TeaserPlugin"),
//!             "article",
//!             ModelRef::new("blog", "Article"),
//!         )]))
//!     }
//! }
//!
//! let extension = ReferencesSetup::new()
//!     .app(Arc::new(BlogConfig))
//!     .build()
//!     .unwrap();
//! let article = ModelRef::new("blog", "Article");
//! assert!(extension.plugins_referencing(&article).is_some());
//! assert!(extension.models_referencing(&article).is_none());
//! ```

// Module re-exports following the core crate's structure
pub mod apps;
pub mod report;
#[cfg(feature = "versioning")]
pub mod versioning;

pub use reinhardt_references_core::{
	ReferencesError, ReferencesExtension, ReferencesResult, references_extension,
};
pub use reinhardt_references_core::{columns, content, models, queryset, settings, setup};

// Re-export registry types
pub use reinhardt_references_core::extension::{OwnerFields, ReferenceMap};

pub mod prelude {
	//! Convenient re-exports of commonly used items
	pub use reinhardt_references_core::prelude::*;
}
