//! References settings loaded from TOML
//!
//! Settings live under a `[references]` table:
//!
//! ```toml
//! [references]
//! versioning_columns = true
//!
//! [[references.apps]]
//! label = "blog"
//! enabled = true
//! reference_fields = ["blog.Article.author"]
//! ```
//!
//! Each `[[references.apps]]` entry is a declarative [`CmsAppConfig`] for
//! applications that do not configure references in code. Field paths are
//! resolved against a [`ModelRegistry`].

use crate::apps::{CmsAppConfig, validate_label};
use crate::error::{ReferencesError, ReferencesResult};
use crate::models::{ModelRegistry, ReferenceFields};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings of the references extension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencesSettings {
	/// Add the built-in Status, Author and Modified date columns
	#[serde(default = "default_versioning_columns")]
	pub versioning_columns: bool,

	/// Declarative application configurations
	#[serde(default)]
	pub apps: Vec<AppManifest>,
}

fn default_versioning_columns() -> bool {
	true
}

impl Default for ReferencesSettings {
	fn default() -> Self {
		Self {
			versioning_columns: default_versioning_columns(),
			apps: Vec::new(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
	#[serde(default)]
	references: ReferencesSettings,
}

impl ReferencesSettings {
	/// Parse settings from a TOML document
	///
	/// A document without a `[references]` table yields the defaults.
	///
	/// # Examples
	///
	/// ```rust
	/// use reinhardt_references_core::settings::ReferencesSettings;
	///
	/// let settings = ReferencesSettings::from_toml_str("[references]\nversioning_columns = false\n").unwrap();
	/// assert!(!settings.versioning_columns);
	/// ```
	pub fn from_toml_str(content: &str) -> ReferencesResult<Self> {
		let file: SettingsFile = toml::from_str(content)?;
		Ok(file.references)
	}

	/// Read settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> ReferencesResult<Self> {
		let path = path.as_ref();
		let content = fs::read_to_string(path)?;
		tracing::debug!(path = %path.display(), "loading references settings");
		Self::from_toml_str(&content)
	}

	/// Resolve every opted-in application against the model registry
	///
	/// Entries without `enabled = true` are skipped unvalidated.
	///
	/// # Errors
	///
	/// Fails on the first enabled application whose manifest is invalid.
	pub fn app_configs(&self, models: &ModelRegistry) -> ReferencesResult<Vec<ManifestAppConfig>> {
		self.apps
			.iter()
			.filter(|manifest| {
				if !manifest.enabled && manifest.reference_fields.is_some() {
					tracing::warn!(
						app = %manifest.label,
						"app declares references configuration but is not enabled; skipping"
					);
				}
				manifest.enabled
			})
			.map(|manifest| manifest.to_app_config(models))
			.collect()
	}
}

/// Declarative references configuration of one application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppManifest {
	/// Application label
	pub label: String,

	/// References opt-in flag
	#[serde(default)]
	pub enabled: bool,

	/// Field paths (`app_label.Model.field`); must be an array of strings
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reference_fields: Option<toml::Value>,
}

impl AppManifest {
	/// Validate the manifest and resolve its field paths
	///
	/// # Errors
	///
	/// - [`ReferencesError::InvalidLabel`] for a malformed label
	/// - [`ReferencesError::ImproperlyConfigured`] when `reference_fields` is
	///   not an array of strings
	/// - [`ReferencesError::UnknownModel`] / [`ReferencesError::UnknownField`]
	///   for paths the registry cannot resolve
	pub fn to_app_config(&self, models: &ModelRegistry) -> ReferencesResult<ManifestAppConfig> {
		validate_label(&self.label)?;

		let reference_fields = match &self.reference_fields {
			None => None,
			Some(toml::Value::Array(items)) => {
				let mut fields = ReferenceFields::with_capacity(items.len());
				for item in items {
					let path = item.as_str().ok_or_else(ReferencesError::not_a_set)?;
					fields.insert(models.resolve_field(path)?);
				}
				Some(fields)
			}
			Some(_) => return Err(ReferencesError::not_a_set()),
		};

		Ok(ManifestAppConfig {
			label: self.label.clone(),
			enabled: self.enabled,
			reference_fields,
		})
	}
}

/// Application configuration built from an [`AppManifest`]
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestAppConfig {
	label: String,
	enabled: bool,
	reference_fields: Option<ReferenceFields>,
}

impl CmsAppConfig for ManifestAppConfig {
	fn label(&self) -> &str {
		&self.label
	}

	fn references_enabled(&self) -> bool {
		self.enabled
	}

	fn reference_fields(&self) -> Option<ReferenceFields> {
		self.reference_fields.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::{ModelDescriptor, ModelRef};
	use rstest::{fixture, rstest};
	use std::io::Write;

	#[fixture]
	fn models() -> ModelRegistry {
		let mut registry = ModelRegistry::new();
		registry
			.register_model(ModelDescriptor::model("people", "Author"))
			.register_model(ModelDescriptor::model("blog", "Article"));
		registry
			.register_relation(
				&ModelRef::new("blog", "Article"),
				"author",
				ModelRef::new("people", "Author"),
			)
			.unwrap();
		registry
	}

	#[rstest]
	fn test_defaults_without_table() {
		let settings = ReferencesSettings::from_toml_str("debug = true\n").unwrap();

		assert_eq!(settings, ReferencesSettings::default());
		assert!(settings.versioning_columns);
	}

	#[rstest]
	fn test_parse_apps(models: ModelRegistry) {
		// Arrange
		let content = r#"
[references]
versioning_columns = false

[[references.apps]]
label = "blog"
enabled = true
reference_fields = ["blog.Article.author", "blog.Article.author"]

[[references.apps]]
label = "shop"
"#;

		// Act
		let settings = ReferencesSettings::from_toml_str(content).unwrap();
		let configs = settings.app_configs(&models).unwrap();

		// Assert
		assert!(!settings.versioning_columns);
		assert_eq!(settings.apps.len(), 2);
		assert_eq!(configs.len(), 1);
		assert_eq!(configs[0].label(), "blog");
		assert!(configs[0].references_enabled());
		assert_eq!(configs[0].reference_fields().unwrap().len(), 1);
	}

	#[rstest]
	#[case(r#"reference_fields = "blog.Article.author""#)]
	#[case(r#"reference_fields = ["gone.Model.field"]"#)]
	#[case("")]
	fn test_disabled_app_is_not_validated(models: ModelRegistry, #[case] line: &str) {
		// Arrange
		let content = format!("[[references.apps]]\nlabel = \"legacy-app\"\nenabled = false\n{}\n", line);
		let settings = ReferencesSettings::from_toml_str(&content).unwrap();

		// Act
		let configs = settings.app_configs(&models).unwrap();

		// Assert
		assert!(configs.is_empty());
	}

	#[rstest]
	#[case(r#"reference_fields = "blog.Article.author""#)]
	#[case(r#"reference_fields = { author = "blog.Article.author" }"#)]
	#[case(r#"reference_fields = [1, 2]"#)]
	fn test_reference_fields_must_be_a_set(models: ModelRegistry, #[case] line: &str) {
		// Arrange
		let content = format!("[[references.apps]]\nlabel = \"blog\"\nenabled = true\n{}\n", line);
		let settings = ReferencesSettings::from_toml_str(&content).unwrap();

		// Act
		let result = settings.app_configs(&models);

		// Assert
		match result {
			Err(ReferencesError::ImproperlyConfigured(message)) => {
				assert_eq!(message, "Reference model configuration must be a set instance");
			}
			other => panic!("expected ImproperlyConfigured, got {:?}", other),
		}
	}

	#[rstest]
	fn test_invalid_label(models: ModelRegistry) {
		let settings =
			ReferencesSettings::from_toml_str("[[references.apps]]\nlabel = \"my-app\"\nenabled = true\n")
				.unwrap();

		assert!(matches!(
			settings.app_configs(&models),
			Err(ReferencesError::InvalidLabel(_))
		));
	}

	#[rstest]
	fn test_invalid_toml() {
		let result = ReferencesSettings::from_toml_str("[references\n");

		assert!(matches!(result, Err(ReferencesError::Toml(_))));
	}

	#[rstest]
	fn test_from_file() {
		// Arrange
		let temp_dir = tempfile::TempDir::new().unwrap();
		let path = temp_dir.path().join("settings.toml");
		let mut file = fs::File::create(&path).unwrap();
		writeln!(file, "[references]\nversioning_columns = false").unwrap();

		// Act
		let settings = ReferencesSettings::from_file(&path).unwrap();

		// Assert
		assert!(!settings.versioning_columns);
	}

	#[rstest]
	fn test_from_missing_file() {
		let result = ReferencesSettings::from_file("/nonexistent/references.toml");

		assert!(matches!(result, Err(ReferencesError::Io(_))));
	}
}
