//! Reading the registry back for the references report
//!
//! For a referenced object, the report needs one queryset per model that
//! points at it, and one row of extra column values per referencing object.

use crate::columns::{ColumnValue, ExtraColumn};
use crate::content::Content;
use crate::extension::{OwnerFields, ReferencesExtension};
use crate::models::{ModelKind, ModelRef};
use crate::queryset::{Filter, QuerySet};
use serde::Serialize;

/// Queryset selecting the objects of one owning model that reference a target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceQuery {
	/// Whether the owning model is a plugin
	pub kind: ModelKind,

	/// Queryset with reference filters and every registered modifier applied
	pub queryset: QuerySet,
}

impl ReferencesExtension {
	/// Build the querysets finding everything that references one object
	///
	/// Each owning model gets one queryset matching any of its reference
	/// fields against `pk`. Ordinary models come first, then plugins, each
	/// in model order. Every extra column modifier is applied in
	/// registration order.
	pub fn reference_querysets(&self, related: &ModelRef, pk: &str) -> Vec<ReferenceQuery> {
		let models = self
			.models_referencing(related)
			.map(|owners| (ModelKind::Model, owners));
		let plugins = self
			.plugins_referencing(related)
			.map(|owners| (ModelKind::Plugin, owners));

		models
			.into_iter()
			.chain(plugins)
			.flat_map(move |(kind, owners): (ModelKind, &OwnerFields)| {
				owners.iter().map(move |(owner, fields)| {
					let queryset = QuerySet::new(owner.clone())
						.filter_any(fields.iter().map(|field| Filter::exact(field, pk)));
					ReferenceQuery {
						kind,
						queryset: self.apply_modifiers(queryset),
					}
				})
			})
			.collect()
	}

	/// Run a queryset through every extra column modifier
	pub fn apply_modifiers(&self, queryset: QuerySet) -> QuerySet {
		self.extra_column_modifiers()
			.iter()
			.fold(queryset, |qs, modifier| modifier(qs))
	}
}

/// One cell of a report row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceCell {
	/// Column label
	pub label: String,

	/// Column value; `None` renders empty
	pub value: Option<ColumnValue>,
}

/// Extra column values of one referencing object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceRow {
	/// Model of the referencing object
	pub model: ModelRef,

	/// Primary key of the referencing object
	pub pk: String,

	/// Cells in column display order
	pub cells: Vec<ReferenceCell>,
}

impl ReferenceRow {
	/// Evaluate every column for one object
	pub fn build(columns: &[ExtraColumn], obj: &dyn Content) -> Self {
		Self {
			model: obj.content_model().clone(),
			pk: obj.pk(),
			cells: columns
				.iter()
				.map(|column| ReferenceCell {
					label: column.label().to_string(),
					value: column.value_for(obj),
				})
				.collect(),
		}
	}

	/// Serialize the row for the admin UI
	pub fn to_json(&self) -> serde_json::Value {
		serde_json::json!({
			"model": self.model.qualified_name(),
			"pk": self.pk,
			"cells": self
				.cells
				.iter()
				.map(|cell| serde_json::json!({
					"label": cell.label,
					"value": cell.value.as_ref().map(ToString::to_string),
				}))
				.collect::<Vec<_>>(),
		})
	}
}
