//! Error types for the references registry

use thiserror::Error;

/// Message raised when an application declares `reference_fields` with the wrong shape.
pub const REFERENCE_FIELDS_NOT_A_SET: &str = "Reference model configuration must be a set instance";

/// Errors raised while configuring the references registry
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReferencesError {
	/// Application configuration has the wrong shape
	#[error("{0}")]
	ImproperlyConfigured(String),

	/// Application label is not a valid identifier
	#[error("Invalid application label: {0}")]
	InvalidLabel(String),

	/// Model is not known to the model registry
	#[error("Unknown model: {0}")]
	UnknownModel(String),

	/// Model exists but has no relation field with this name
	#[error("Model '{model}' has no relation field '{field}'")]
	UnknownField {
		/// Qualified model name
		model: String,
		/// Requested field name
		field: String,
	},

	/// The process-wide registry was already installed
	#[error("References registry is already installed")]
	AlreadyInstalled,

	/// Settings file could not be read
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// Settings file is not valid TOML
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),
}

impl ReferencesError {
	/// Error for `reference_fields` supplied as anything other than a set of field paths
	pub fn not_a_set() -> Self {
		Self::ImproperlyConfigured(REFERENCE_FIELDS_NOT_A_SET.to_string())
	}
}

/// Result type for references operations
pub type ReferencesResult<T> = Result<T, ReferencesError>;
