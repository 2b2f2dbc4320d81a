//! Startup driver for the references registry
//!
//! Mirrors the host's extension loading: every installed application is
//! offered to the registry, and those that opted in are configured in the
//! order they were given. Apps declared in settings follow the apps added
//! in code. Nothing beyond that order is guaranteed.

use crate::apps::CmsAppConfig;
use crate::error::ReferencesResult;
use crate::extension::ReferencesExtension;
use crate::models::ModelRegistry;
use crate::settings::ReferencesSettings;
use std::sync::Arc;

#[cfg(feature = "versioning")]
use crate::apps::ReferencesAppConfig;
#[cfg(feature = "versioning")]
use crate::versioning::VersionableLookup;

/// Builder that populates a [`ReferencesExtension`] from installed apps
///
/// # Examples
///
/// ```rust
/// use reinhardt_references_core::setup::ReferencesSetup;
///
/// let extension = ReferencesSetup::new().build().unwrap();
/// assert!(extension.reference_models().is_empty());
/// ```
#[derive(Default)]
pub struct ReferencesSetup {
	apps: Vec<Arc<dyn CmsAppConfig>>,
	settings: ReferencesSettings,
	models: ModelRegistry,
	#[cfg(feature = "versioning")]
	versioning: Option<Arc<dyn VersionableLookup>>,
}

impl ReferencesSetup {
	/// Create a setup with default settings and no apps
	pub fn new() -> Self {
		Self::default()
	}

	/// Use these settings
	pub fn settings(mut self, settings: ReferencesSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Resolve declarative field paths against this model registry
	pub fn models(mut self, models: ModelRegistry) -> Self {
		self.models = models;
		self
	}

	/// Offer one installed application
	pub fn app(mut self, app: Arc<dyn CmsAppConfig>) -> Self {
		self.apps.push(app);
		self
	}

	/// Offer several installed applications, in order
	pub fn apps<I>(mut self, apps: I) -> Self
	where
		I: IntoIterator<Item = Arc<dyn CmsAppConfig>>,
	{
		self.apps.extend(apps);
		self
	}

	/// Enable the built-in versioning columns on top of this lookup
	///
	/// The columns are added only while `versioning_columns` is set in the
	/// settings (the default).
	#[cfg(feature = "versioning")]
	pub fn versioning(mut self, lookup: Arc<dyn VersionableLookup>) -> Self {
		self.versioning = Some(lookup);
		self
	}

	/// Populate a registry from every opted-in application
	///
	/// Opted-in declarative apps are validated before any app is configured,
	/// so a bad manifest leaves nothing half-registered. Opted-out manifests
	/// are never validated.
	///
	/// # Errors
	///
	/// Returns the first manifest error from the settings.
	pub fn build(self) -> ReferencesResult<ReferencesExtension> {
		let mut apps = self.builtin_apps();
		apps.extend(self.apps.iter().cloned());
		for config in self.settings.app_configs(&self.models)? {
			apps.push(Arc::new(config));
		}

		let mut extension = ReferencesExtension::new();
		let mut configured = 0usize;
		for app in &apps {
			if !app.references_enabled() {
				if app.reference_fields().is_some() || !app.reference_extra_columns().is_empty() {
					tracing::warn!(
						app = app.label(),
						"app declares references configuration but is not enabled; skipping"
					);
				}
				continue;
			}
			extension.configure_app(&**app);
			configured += 1;
		}

		tracing::info!(
			apps = configured,
			referenced = extension.referenced_models().len(),
			columns = extension.extra_columns().len(),
			"references registry configured"
		);
		Ok(extension)
	}

	/// Build the registry and publish it process-wide
	pub fn install(self) -> ReferencesResult<&'static ReferencesExtension> {
		self.build()?.install()
	}

	#[cfg(feature = "versioning")]
	fn builtin_apps(&self) -> Vec<Arc<dyn CmsAppConfig>> {
		match (&self.versioning, self.settings.versioning_columns) {
			(Some(lookup), true) => {
				let builtin: Arc<dyn CmsAppConfig> = Arc::new(ReferencesAppConfig::new(lookup.clone()));
				vec![builtin]
			}
			_ => Vec::new(),
		}
	}

	#[cfg(not(feature = "versioning"))]
	fn builtin_apps(&self) -> Vec<Arc<dyn CmsAppConfig>> {
		Vec::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::{ModelDescriptor, ModelRef, ReferenceField, ReferenceFields};
	use rstest::rstest;

	struct BlogApp {
		enabled: bool,
	}

	impl CmsAppConfig for BlogApp {
		fn label(&self) -> &str {
			"blog"
		}

		fn references_enabled(&self) -> bool {
			self.enabled
		}

		fn reference_fields(&self) -> Option<ReferenceFields> {
			Some(ReferenceFields::from([ReferenceField::new(
				ModelDescriptor::model("blog", "Article"),
				"author",
				ModelRef::new("people", "Author"),
			)]))
		}
	}

	#[rstest]
	#[case(true, 1)]
	#[case(false, 0)]
	fn test_only_enabled_apps_are_configured(#[case] enabled: bool, #[case] expected: usize) {
		// Arrange
		let setup = ReferencesSetup::new().app(Arc::new(BlogApp { enabled }));

		// Act
		let extension = setup.build().unwrap();

		// Assert
		assert_eq!(extension.reference_models().len(), expected);
	}

	#[cfg(feature = "versioning")]
	#[rstest]
	#[case(true, 3)]
	#[case(false, 0)]
	fn test_builtin_versioning_columns(#[case] versioning_columns: bool, #[case] expected: usize) {
		use crate::versioning::VersioningRegistry;

		// Arrange
		let settings = ReferencesSettings {
			versioning_columns,
			..ReferencesSettings::default()
		};
		let setup = ReferencesSetup::new()
			.settings(settings)
			.versioning(Arc::new(VersioningRegistry::new()));

		// Act
		let extension = setup.build().unwrap();

		// Assert
		assert_eq!(extension.extra_columns().len(), expected);
	}

	#[cfg(feature = "versioning")]
	#[rstest]
	fn test_builtin_columns_need_lookup() {
		let extension = ReferencesSetup::new().build().unwrap();

		assert!(extension.extra_columns().is_empty());
		assert!(extension.extra_column_modifiers().is_empty());
	}
}
