//! Application-side references configuration
//!
//! Every installed application that wants to take part in the references
//! report implements [`CmsAppConfig`] and returns `true` from
//! [`CmsAppConfig::references_enabled`]. The setup driver then hands it to
//! [`ReferencesExtension::configure_app`](crate::extension::ReferencesExtension::configure_app).

use crate::columns::ExtraColumnGroup;
use crate::error::{ReferencesError, ReferencesResult};
use crate::models::ReferenceFields;

/// References configuration exposed by an installed application
pub trait CmsAppConfig: Send + Sync {
	/// Application label (e.g., "blog")
	fn label(&self) -> &str;

	/// Whether the application opted in to the references extension
	fn references_enabled(&self) -> bool {
		false
	}

	/// Fields of this application's models that reference other content
	///
	/// `None` means the application declares no reference fields.
	fn reference_fields(&self) -> Option<ReferenceFields> {
		None
	}

	/// Extra report columns, grouped with their queryset modifiers
	fn reference_extra_columns(&self) -> Vec<ExtraColumnGroup> {
		Vec::new()
	}
}

/// Check that an application label can name an app in settings
///
/// A label is an ASCII identifier: a letter or `_`, then letters, digits or
/// `_`. This is what `app_label.Model.field` paths can address.
pub fn validate_label(label: &str) -> ReferencesResult<()> {
	let mut chars = label.chars();
	let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
	let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

	if valid_start && valid_rest {
		Ok(())
	} else {
		Err(ReferencesError::InvalidLabel(format!(
			"'{}' is not a valid app label",
			label
		)))
	}
}

#[cfg(feature = "versioning")]
pub use builtin::ReferencesAppConfig;

#[cfg(feature = "versioning")]
mod builtin {
	use super::CmsAppConfig;
	use crate::columns::{ColumnValue, ExtraColumnGroup};
	use crate::versioning::{VersionableLookup, version_attr, version_queryset_modifier};
	use std::sync::Arc;

	/// The references application's own configuration
	///
	/// Contributes the default Status, Author and Modified date columns for
	/// versioned content.
	#[derive(Clone)]
	pub struct ReferencesAppConfig {
		versioning: Arc<dyn VersionableLookup>,
	}

	impl ReferencesAppConfig {
		/// Application label of the built-in configuration
		pub const LABEL: &'static str = "references";

		/// Create the built-in configuration on top of a versioning lookup
		pub fn new(versioning: Arc<dyn VersionableLookup>) -> Self {
			Self { versioning }
		}
	}

	impl CmsAppConfig for ReferencesAppConfig {
		fn label(&self) -> &str {
			Self::LABEL
		}

		fn references_enabled(&self) -> bool {
			true
		}

		fn reference_extra_columns(&self) -> Vec<ExtraColumnGroup> {
			let lookup = &self.versioning;
			vec![
				ExtraColumnGroup::with_modifier(version_queryset_modifier(lookup.clone()))
					.accessor_column(
						version_attr(lookup.clone(), |v| {
							Some(ColumnValue::from(v.state.display()))
						}),
						"Status",
					)
					.accessor_column(
						version_attr(lookup.clone(), |v| {
							Some(ColumnValue::from(v.created_by.as_str()))
						}),
						"Author",
					)
					.accessor_column(
						version_attr(lookup.clone(), |v| Some(ColumnValue::from(v.modified))),
						"Modified date",
					),
			]
		}
	}
}
