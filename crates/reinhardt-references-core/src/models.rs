//! Model identities and reference field declarations
//!
//! Models are identified by `app_label` and model name, the same way the
//! application registry qualifies them (`blog.Article`). A [`ReferenceField`]
//! is a relation field on an owning model that points at another model's
//! content and has been declared interesting for the references report.
//!
//! The [`ModelRegistry`] holds host-described models and their relation
//! fields so that declarative application manifests can name fields by path.

use crate::error::{ReferencesError, ReferencesResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Identity of a model: application label plus model name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModelRef {
	/// Label of the application owning the model (e.g., "blog")
	pub app_label: String,

	/// Name of the model (e.g., "Article")
	pub model_name: String,
}

impl ModelRef {
	/// Create a new model reference
	///
	/// # Examples
	///
	/// ```rust
	/// use reinhardt_references_core::models::ModelRef;
	///
	/// let model = ModelRef::new("blog", "Article");
	/// assert_eq!(model.qualified_name(), "blog.Article");
	/// ```
	pub fn new(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
		Self {
			app_label: app_label.into(),
			model_name: model_name.into(),
		}
	}

	/// Get the fully qualified model name (app_label.model_name)
	pub fn qualified_name(&self) -> String {
		format!("{}.{}", self.app_label, self.model_name)
	}

	/// Parse a qualified name of the form `app_label.ModelName`
	///
	/// Returns `None` unless the name has exactly two non-empty parts.
	pub fn parse(qualified_name: &str) -> Option<Self> {
		let (app_label, model_name) = qualified_name.split_once('.')?;
		if app_label.is_empty() || model_name.is_empty() || model_name.contains('.') {
			return None;
		}
		Some(Self::new(app_label, model_name))
	}
}

impl fmt::Display for ModelRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.app_label, self.model_name)
	}
}

/// Whether a model is a plain model or a registered content plugin
///
/// A model is [`ModelKind::Plugin`] only when it is a CMS plugin model and
/// is registered with the plugin pool. The host decides this when it
/// describes the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
	/// Ordinary model
	#[default]
	Model,
	/// Content plugin model registered with the plugin pool
	Plugin,
}

/// A model identity tagged with its kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelDescriptor {
	/// Model identity
	pub model: ModelRef,

	/// Model kind
	pub kind: ModelKind,
}

impl ModelDescriptor {
	/// Describe an ordinary model
	pub fn model(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
		Self {
			model: ModelRef::new(app_label, model_name),
			kind: ModelKind::Model,
		}
	}

	/// Describe a registered plugin model
	pub fn plugin(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
		Self {
			model: ModelRef::new(app_label, model_name),
			kind: ModelKind::Plugin,
		}
	}

	/// Whether this model is a registered plugin
	pub fn is_plugin(&self) -> bool {
		self.kind == ModelKind::Plugin
	}
}

/// A relation field declared as a reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceField {
	/// Model owning the field
	pub model: ModelDescriptor,

	/// Model the field points to
	pub related_model: ModelRef,

	/// Field name on the owning model
	pub name: String,
}

impl ReferenceField {
	/// Create a new reference field declaration
	///
	/// # Examples
	///
	/// ```rust
	/// use reinhardt_references_core::models::{ModelDescriptor, ModelRef, ReferenceField};
	///
	/// let field = ReferenceField::new(
	///     ModelDescriptor::model("blog", "Article"),
	///     "author",
	///     ModelRef::new("people", "Author"),
	/// );
	/// assert_eq!(field.name, "author");
	/// ```
	pub fn new(model: ModelDescriptor, name: impl Into<String>, related_model: ModelRef) -> Self {
		Self {
			model,
			related_model,
			name: name.into(),
		}
	}
}

/// Set of reference field declarations supplied by one application
pub type ReferenceFields = HashSet<ReferenceField>;

#[derive(Debug, Clone)]
struct RegisteredModel {
	descriptor: ModelDescriptor,
	relations: BTreeMap<String, ModelRef>,
}

/// Registry of host-described models and their relation fields
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
	models: HashMap<ModelRef, RegisteredModel>,
}

impl ModelRegistry {
	/// Create an empty model registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a model
	///
	/// Registering the same model again replaces its kind and keeps its relations.
	pub fn register_model(&mut self, descriptor: ModelDescriptor) -> &mut Self {
		match self.models.get_mut(&descriptor.model) {
			Some(existing) => existing.descriptor = descriptor,
			None => {
				self.models.insert(
					descriptor.model.clone(),
					RegisteredModel {
						descriptor,
						relations: BTreeMap::new(),
					},
				);
			}
		}
		self
	}

	/// Register a relation field on an already registered model
	///
	/// # Errors
	///
	/// Returns [`ReferencesError::UnknownModel`] if `owner` was never registered.
	pub fn register_relation(
		&mut self,
		owner: &ModelRef,
		field: impl Into<String>,
		related_model: ModelRef,
	) -> ReferencesResult<&mut Self> {
		let entry = self
			.models
			.get_mut(owner)
			.ok_or_else(|| ReferencesError::UnknownModel(owner.qualified_name()))?;
		entry.relations.insert(field.into(), related_model);
		Ok(self)
	}

	/// Get the descriptor of a registered model
	pub fn descriptor(&self, model: &ModelRef) -> Option<&ModelDescriptor> {
		self.models.get(model).map(|m| &m.descriptor)
	}

	/// Number of registered models
	pub fn len(&self) -> usize {
		self.models.len()
	}

	/// Whether no models are registered
	pub fn is_empty(&self) -> bool {
		self.models.is_empty()
	}

	/// Resolve a field path of the form `app_label.Model.field`
	///
	/// # Errors
	///
	/// - [`ReferencesError::ImproperlyConfigured`] if the path is malformed
	/// - [`ReferencesError::UnknownModel`] if the owning model is not registered
	/// - [`ReferencesError::UnknownField`] if the model has no such relation field
	pub fn resolve_field(&self, path: &str) -> ReferencesResult<ReferenceField> {
		let invalid = || {
			ReferencesError::ImproperlyConfigured(format!(
				"Invalid reference field path '{}': expected 'app_label.Model.field'",
				path
			))
		};
		let (model, field) = path.rsplit_once('.').ok_or_else(invalid)?;
		let owner = ModelRef::parse(model).ok_or_else(invalid)?;
		if field.is_empty() {
			return Err(invalid());
		}

		let registered = self
			.models
			.get(&owner)
			.ok_or_else(|| ReferencesError::UnknownModel(owner.qualified_name()))?;
		let related_model = registered
			.relations
			.get(field)
			.ok_or_else(|| ReferencesError::UnknownField {
				model: owner.qualified_name(),
				field: field.to_string(),
			})?;

		Ok(ReferenceField::new(
			registered.descriptor.clone(),
			field,
			related_model.clone(),
		))
	}
}
