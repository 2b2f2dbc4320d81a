//! Versioning integration for the references report.

pub use reinhardt_references_core::versioning::{
	VERSION_PREFETCH, Versionable, VersionableLookup, VersioningRegistry, version_attr,
	version_queryset_modifier,
};
