//! Lazy query description handed to queryset modifiers
//!
//! The references report never executes queries. It builds a [`QuerySet`]
//! per owning model and lets each registered [`QuerySetModifier`] add
//! eager-loading hints before the ORM runs it.

use crate::models::ModelRef;
use serde::Serialize;
use std::sync::Arc;

/// Callable that adjusts a queryset before it is evaluated
pub type QuerySetModifier = Arc<dyn Fn(QuerySet) -> QuerySet + Send + Sync>;

/// Exact-match condition on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
	/// Field name
	pub field: String,

	/// Value the field must equal
	pub value: String,
}

impl Filter {
	/// Create an exact-match condition
	pub fn exact(field: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			value: value.into(),
		}
	}
}

/// Query description for one model
///
/// Conditions inside a group are OR-ed; groups are AND-ed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySet {
	model: ModelRef,
	filters: Vec<Vec<Filter>>,
	prefetch_related_fields: Vec<String>,
}

impl QuerySet {
	/// Create an unfiltered queryset for a model
	pub fn new(model: ModelRef) -> Self {
		Self {
			model,
			filters: Vec::new(),
			prefetch_related_fields: Vec::new(),
		}
	}

	/// Model this queryset selects from
	pub fn model(&self) -> &ModelRef {
		&self.model
	}

	/// Add a single exact-match condition
	pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
		self.filters.push(vec![Filter::exact(field, value)]);
		self
	}

	/// Add a group of conditions of which at least one must match
	///
	/// An empty group is ignored.
	pub fn filter_any(mut self, conditions: impl IntoIterator<Item = Filter>) -> Self {
		let group: Vec<Filter> = conditions.into_iter().collect();
		if !group.is_empty() {
			self.filters.push(group);
		}
		self
	}

	/// Eager-load related objects
	///
	/// Relation paths use `__` to traverse (e.g., `versions__created_by`).
	/// Paths already requested are not added twice.
	///
	/// # Examples
	///
	/// ```rust
	/// use reinhardt_references_core::models::ModelRef;
	/// use reinhardt_references_core::queryset::QuerySet;
	///
	/// let qs = QuerySet::new(ModelRef::new("blog", "Article"))
	///     .prefetch_related(&["versions", "versions__created_by"]);
	/// assert_eq!(qs.prefetch_related_fields(), ["versions", "versions__created_by"]);
	/// ```
	pub fn prefetch_related(mut self, fields: &[&str]) -> Self {
		for field in fields {
			if !self.prefetch_related_fields.iter().any(|f| f == field) {
				self.prefetch_related_fields.push((*field).to_string());
			}
		}
		self
	}

	/// Filter groups, in the order they were added
	pub fn filters(&self) -> &[Vec<Filter>] {
		&self.filters
	}

	/// Relation paths requested for eager loading
	pub fn prefetch_related_fields(&self) -> &[String] {
		&self.prefetch_related_fields
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_prefetch_related_skips_duplicates() {
		// Arrange
		let qs = QuerySet::new(ModelRef::new("blog", "Article")).prefetch_related(&["versions"]);

		// Act
		let qs = qs.prefetch_related(&["versions", "tags"]);

		// Assert
		assert_eq!(qs.prefetch_related_fields(), ["versions", "tags"]);
	}

	#[rstest]
	fn test_filter_groups() {
		// Arrange & Act
		let qs = QuerySet::new(ModelRef::new("blog", "Article"))
			.filter("site", "1")
			.filter_any([Filter::exact("author", "7"), Filter::exact("editor", "7")])
			.filter_any(Vec::new());

		// Assert
		assert_eq!(qs.filters().len(), 2);
		assert_eq!(qs.filters()[0], vec![Filter::exact("site", "1")]);
		assert_eq!(qs.filters()[1].len(), 2);
	}
}
