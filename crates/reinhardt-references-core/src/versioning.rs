//! Versioning-aware columns and queryset modifier
//!
//! Bridges the references report to the content versioning subsystem.
//! Whether a model is versioned is answered by a [`VersionableLookup`];
//! versioned objects expose their versions most recent first.

use crate::columns::{Accessor, ColumnValue};
use crate::content::{Content, Version};
use crate::models::ModelRef;
use crate::queryset::{QuerySet, QuerySetModifier};
use std::collections::HashMap;
use std::sync::Arc;

/// Relation paths prefetched for versioned querysets
pub const VERSION_PREFETCH: [&str; 2] = ["versions", "versions__created_by"];

/// Versioning registration of one content model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versionable {
	/// The versioned content model
	pub content_model: ModelRef,
}

impl Versionable {
	/// Create a versionable registration
	pub fn new(content_model: ModelRef) -> Self {
		Self { content_model }
	}
}

/// Answers whether a content model participates in versioning
pub trait VersionableLookup: Send + Sync {
	/// Versionable registration for a model, if it is versioned
	fn versionable_for(&self, model: &ModelRef) -> Option<&Versionable>;
}

/// In-memory [`VersionableLookup`] populated at startup
#[derive(Debug, Clone, Default)]
pub struct VersioningRegistry {
	versionables: HashMap<ModelRef, Versionable>,
}

impl VersioningRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a versioned content model
	pub fn register(&mut self, versionable: Versionable) -> &mut Self {
		tracing::debug!(model = %versionable.content_model, "registered versionable content");
		self.versionables
			.insert(versionable.content_model.clone(), versionable);
		self
	}
}

impl VersionableLookup for VersioningRegistry {
	fn versionable_for(&self, model: &ModelRef) -> Option<&Versionable> {
		self.versionables.get(model)
	}
}

/// Modifier that prefetches versions and their creators for versioned models
///
/// Querysets of unversioned models pass through unchanged.
pub fn version_queryset_modifier(lookup: Arc<dyn VersionableLookup>) -> QuerySetModifier {
	Arc::new(move |queryset: QuerySet| {
		if lookup.versionable_for(queryset.model()).is_some() {
			queryset.prefetch_related(&VERSION_PREFETCH)
		} else {
			queryset
		}
	})
}

/// Wrap a version accessor so it reads the object's most recent version
///
/// The wrapped accessor yields `None` for objects of unversioned models and
/// for versioned objects that have no versions yet.
///
/// # Examples
///
/// ```rust
/// use reinhardt_references_core::versioning::{version_attr, VersioningRegistry};
/// use std::sync::Arc;
///
/// let lookup = Arc::new(VersioningRegistry::new());
/// let author = version_attr(lookup, |v| Some(v.created_by.clone().into()));
/// ```
pub fn version_attr<F>(lookup: Arc<dyn VersionableLookup>, func: F) -> Accessor
where
	F: Fn(&Version) -> Option<ColumnValue> + Send + Sync + 'static,
{
	Arc::new(move |obj: &dyn Content| {
		lookup.versionable_for(obj.content_model())?;
		obj.versions().first().and_then(&func)
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::content::VersionState;
	use chrono::{TimeZone, Utc};
	use rstest::{fixture, rstest};

	struct Page {
		model: ModelRef,
		versions: Vec<Version>,
	}

	impl Content for Page {
		fn content_model(&self) -> &ModelRef {
			&self.model
		}

		fn pk(&self) -> String {
			"3".to_string()
		}

		fn versions(&self) -> &[Version] {
			&self.versions
		}
	}

	#[fixture]
	fn lookup() -> Arc<dyn VersionableLookup> {
		let mut registry = VersioningRegistry::new();
		registry.register(Versionable::new(ModelRef::new("cms", "PageContent")));
		Arc::new(registry)
	}

	fn page(app_label: &str, versions: Vec<Version>) -> Page {
		Page {
			model: ModelRef::new(app_label, "PageContent"),
			versions,
		}
	}

	#[rstest]
	fn test_version_attr_reads_latest_version(lookup: Arc<dyn VersionableLookup>) {
		// Arrange
		let modified = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
		let obj = page(
			"cms",
			vec![
				Version::new(VersionState::Draft, "alice", modified),
				Version::new(
					VersionState::Published,
					"bob",
					Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap(),
				),
			],
		);
		let accessor = version_attr(lookup, |v| Some(v.modified.into()));

		// Act
		let value = accessor(&obj);

		// Assert
		assert_eq!(value, Some(ColumnValue::DateTime(modified)));
	}

	#[rstest]
	fn test_version_attr_unversioned_model(lookup: Arc<dyn VersionableLookup>) {
		// Arrange
		let obj = page(
			"blog",
			vec![Version::new(VersionState::Draft, "alice", Utc::now())],
		);
		let accessor = version_attr(lookup, |v| Some(v.created_by.clone().into()));

		// Act & Assert
		assert_eq!(accessor(&obj), None);
	}

	#[rstest]
	fn test_version_attr_without_versions(lookup: Arc<dyn VersionableLookup>) {
		let accessor = version_attr(lookup, |v| Some(v.state.display().into()));

		assert_eq!(accessor(&page("cms", Vec::new())), None);
	}

	#[rstest]
	fn test_queryset_modifier_prefetches_for_versioned(lookup: Arc<dyn VersionableLookup>) {
		// Arrange
		let modifier = version_queryset_modifier(lookup);

		// Act
		let qs = modifier(QuerySet::new(ModelRef::new("cms", "PageContent")));

		// Assert
		assert_eq!(qs.prefetch_related_fields(), ["versions", "versions__created_by"]);
	}

	#[rstest]
	fn test_queryset_modifier_leaves_unversioned(lookup: Arc<dyn VersionableLookup>) {
		// Arrange
		let modifier = version_queryset_modifier(lookup);
		let qs = QuerySet::new(ModelRef::new("blog", "Article")).filter("author", "1");

		// Act
		let modified = modifier(qs.clone());

		// Assert
		assert_eq!(modified, qs);
	}
}
