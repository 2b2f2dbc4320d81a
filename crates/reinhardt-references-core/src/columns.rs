//! Extra columns for the references report
//!
//! Applications attach columns in groups. Each group carries one queryset
//! modifier so the data its columns read can be loaded up front.

use crate::content::Content;
use crate::queryset::{QuerySet, QuerySetModifier};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Value rendered in an extra column cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColumnValue {
	/// Free text
	Text(String),
	/// Integer value
	Integer(i64),
	/// Boolean flag
	Bool(bool),
	/// Timestamp
	DateTime(DateTime<Utc>),
}

impl fmt::Display for ColumnValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(text) => f.write_str(text),
			Self::Integer(value) => write!(f, "{}", value),
			Self::Bool(value) => write!(f, "{}", value),
			Self::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M")),
		}
	}
}

impl From<String> for ColumnValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<&str> for ColumnValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<i64> for ColumnValue {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<bool> for ColumnValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<DateTime<Utc>> for ColumnValue {
	fn from(value: DateTime<Utc>) -> Self {
		Self::DateTime(value)
	}
}

/// Reads a column value from a content object
///
/// `None` renders as an empty cell.
pub type Accessor = Arc<dyn Fn(&dyn Content) -> Option<ColumnValue> + Send + Sync>;

/// A labelled column shown next to each referencing object
#[derive(Clone)]
pub struct ExtraColumn {
	accessor: Accessor,
	label: String,
}

impl ExtraColumn {
	/// Create a column from an accessor and a display label
	pub fn new(accessor: Accessor, label: impl Into<String>) -> Self {
		Self {
			accessor,
			label: label.into(),
		}
	}

	/// Display label
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Accessor reading this column's value
	pub fn accessor(&self) -> &Accessor {
		&self.accessor
	}

	/// Evaluate the column for one object
	pub fn value_for(&self, obj: &dyn Content) -> Option<ColumnValue> {
		(self.accessor)(obj)
	}
}

impl fmt::Debug for ExtraColumn {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ExtraColumn")
			.field("label", &self.label)
			.finish_non_exhaustive()
	}
}

/// Columns registered together with the modifier that preloads their data
#[derive(Clone)]
pub struct ExtraColumnGroup {
	columns: Vec<(Accessor, String)>,
	modifier: QuerySetModifier,
}

impl ExtraColumnGroup {
	/// Create an empty group with a queryset modifier
	pub fn new<M>(modifier: M) -> Self
	where
		M: Fn(QuerySet) -> QuerySet + Send + Sync + 'static,
	{
		Self::with_modifier(Arc::new(modifier))
	}

	/// Create an empty group from an already shared modifier
	pub fn with_modifier(modifier: QuerySetModifier) -> Self {
		Self {
			columns: Vec::new(),
			modifier,
		}
	}

	/// Append a column built from a closure
	pub fn column<F>(self, accessor: F, label: impl Into<String>) -> Self
	where
		F: Fn(&dyn Content) -> Option<ColumnValue> + Send + Sync + 'static,
	{
		self.accessor_column(Arc::new(accessor), label)
	}

	/// Append a column from an already shared accessor
	pub fn accessor_column(mut self, accessor: Accessor, label: impl Into<String>) -> Self {
		self.columns.push((accessor, label.into()));
		self
	}

	/// Column specs in declaration order
	pub fn columns(&self) -> &[(Accessor, String)] {
		&self.columns
	}

	/// Queryset modifier of this group
	pub fn modifier(&self) -> &QuerySetModifier {
		&self.modifier
	}

	pub(crate) fn into_parts(self) -> (Vec<(Accessor, String)>, QuerySetModifier) {
		(self.columns, self.modifier)
	}
}

impl Default for ExtraColumnGroup {
	/// Empty group whose modifier leaves querysets unchanged
	fn default() -> Self {
		Self::new(|qs| qs)
	}
}

impl fmt::Debug for ExtraColumnGroup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let labels: Vec<&str> = self.columns.iter().map(|(_, label)| label.as_str()).collect();
		f.debug_struct("ExtraColumnGroup")
			.field("columns", &labels)
			.finish_non_exhaustive()
	}
}
