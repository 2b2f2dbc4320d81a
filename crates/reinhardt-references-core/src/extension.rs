//! The references registry
//!
//! [`ReferencesExtension`] accumulates, across every opted-in application:
//!
//! - which fields of which models reference which other models, split into
//!   plugin owners and ordinary owners
//! - extra report columns, plus one queryset modifier per column group
//!
//! It is filled once during startup and read-only afterward. Call
//! [`ReferencesExtension::install`] to publish it process-wide.

use crate::apps::CmsAppConfig;
use crate::columns::{ExtraColumn, ExtraColumnGroup};
use crate::error::{ReferencesError, ReferencesResult};
use crate::models::{ModelRef, ReferenceFields};
use crate::queryset::QuerySetModifier;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::OnceLock;

/// Field names of each owning model that point at one related model
pub type OwnerFields = BTreeMap<ModelRef, BTreeSet<String>>;

/// `related model → owning model → field names`
pub type ReferenceMap = BTreeMap<ModelRef, OwnerFields>;

static INSTALLED: OnceLock<ReferencesExtension> = OnceLock::new();

/// Registry of reference fields and extra report columns
#[derive(Clone, Default)]
pub struct ReferencesExtension {
	reference_models: ReferenceMap,
	reference_plugins: ReferenceMap,
	extra_columns: Vec<ExtraColumn>,
	extra_column_modifiers: Vec<QuerySetModifier>,
}

impl ReferencesExtension {
	/// Create an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Register reference field declarations
	///
	/// Fields owned by plugin models go to [`Self::reference_plugins`], all
	/// others to [`Self::reference_models`]. Names accumulate; registering a
	/// field twice has no further effect.
	///
	/// # Examples
	///
	/// ```rust
	/// use reinhardt_references_core::extension::ReferencesExtension;
	/// use reinhardt_references_core::models::{ModelDescriptor, ModelRef, ReferenceField};
	/// use std::collections::HashSet;
	///
	/// let mut extension = ReferencesExtension::new();
	/// let fields = HashSet::from([ReferenceField::new(
	///     ModelDescriptor::model("blog", "Article"),
	///     "author",
	///     ModelRef::new("people", "Author"),
	/// )]);
	/// extension.register_fields(&fields);
	///
	/// let owners = extension.models_referencing(&ModelRef::new("people", "Author")).unwrap();
	/// assert!(owners[&ModelRef::new("blog", "Article")].contains("author"));
	/// ```
	pub fn register_fields(&mut self, fields: &ReferenceFields) {
		for field in fields {
			let store = if field.model.is_plugin() {
				&mut self.reference_plugins
			} else {
				&mut self.reference_models
			};
			let inserted = store
				.entry(field.related_model.clone())
				.or_default()
				.entry(field.model.model.clone())
				.or_default()
				.insert(field.name.clone());

			if inserted {
				tracing::debug!(
					owner = %field.model.model,
					field = %field.name,
					related = %field.related_model,
					plugin = field.model.is_plugin(),
					"registered reference field"
				);
			}
		}
	}

	/// Register extra column groups
	///
	/// Each group contributes its modifier once and its columns in order.
	/// Duplicate labels are kept alongside the earlier ones.
	pub fn configure_extra_columns<I>(&mut self, groups: I)
	where
		I: IntoIterator<Item = ExtraColumnGroup>,
	{
		for group in groups {
			let (columns, modifier) = group.into_parts();
			self.extra_column_modifiers.push(modifier);
			for (accessor, label) in columns {
				if self.extra_columns.iter().any(|c| c.label() == label) {
					tracing::warn!(label = %label, "extra column label registered more than once");
				}
				self.extra_columns.push(ExtraColumn::new(accessor, label));
			}
		}
	}

	/// Apply one application's references configuration
	///
	/// Registers the application's reference fields when it declares any, then
	/// its extra columns.
	pub fn configure_app(&mut self, app: &dyn CmsAppConfig) {
		match app.reference_fields() {
			Some(fields) => {
				tracing::debug!(app = app.label(), count = fields.len(), "configuring reference fields");
				self.register_fields(&fields);
			}
			None => tracing::debug!(app = app.label(), "no reference fields declared"),
		}
		self.configure_extra_columns(app.reference_extra_columns());
	}

	/// References from ordinary models, keyed by related model
	pub fn reference_models(&self) -> &ReferenceMap {
		&self.reference_models
	}

	/// References from plugin models, keyed by related model
	pub fn reference_plugins(&self) -> &ReferenceMap {
		&self.reference_plugins
	}

	/// Extra columns in display order
	pub fn extra_columns(&self) -> &[ExtraColumn] {
		&self.extra_columns
	}

	/// Queryset modifiers in registration order
	pub fn extra_column_modifiers(&self) -> &[QuerySetModifier] {
		&self.extra_column_modifiers
	}

	/// Ordinary models that reference `related`, with their field names
	pub fn models_referencing(&self, related: &ModelRef) -> Option<&OwnerFields> {
		self.reference_models.get(related)
	}

	/// Plugin models that reference `related`, with their field names
	pub fn plugins_referencing(&self, related: &ModelRef) -> Option<&OwnerFields> {
		self.reference_plugins.get(related)
	}

	/// Whether any registered field points at `model`
	pub fn is_referenced(&self, model: &ModelRef) -> bool {
		self.reference_models.contains_key(model) || self.reference_plugins.contains_key(model)
	}

	/// Every model some registered field points at
	pub fn referenced_models(&self) -> BTreeSet<&ModelRef> {
		self.reference_models
			.keys()
			.chain(self.reference_plugins.keys())
			.collect()
	}

	/// Publish this registry process-wide
	///
	/// # Errors
	///
	/// Returns [`ReferencesError::AlreadyInstalled`] if a registry was
	/// installed before.
	pub fn install(self) -> ReferencesResult<&'static ReferencesExtension> {
		let mut installed = false;
		let extension = INSTALLED.get_or_init(|| {
			installed = true;
			self
		});
		if !installed {
			return Err(ReferencesError::AlreadyInstalled);
		}
		tracing::info!(
			models = extension.reference_models.len(),
			plugins = extension.reference_plugins.len(),
			columns = extension.extra_columns.len(),
			"references registry installed"
		);
		Ok(extension)
	}
}

/// The process-wide registry, once installed
pub fn references_extension() -> Option<&'static ReferencesExtension> {
	INSTALLED.get()
}

impl fmt::Debug for ReferencesExtension {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ReferencesExtension")
			.field("reference_models", &self.reference_models)
			.field("reference_plugins", &self.reference_plugins)
			.field("extra_columns", &self.extra_columns)
			.field("extra_column_modifiers", &self.extra_column_modifiers.len())
			.finish()
	}
}
