//! Content objects as seen by the references report
//!
//! The ORM owns the real objects. The report only needs to know which model
//! an object belongs to, its primary key, and (for versionable content) its
//! version history, most recent first.

use crate::models::ModelRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication state of a content version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionState {
	/// Work in progress
	Draft,
	/// Live version
	Published,
	/// Previously published, taken offline
	Unpublished,
	/// Kept for history only
	Archived,
}

impl VersionState {
	/// Human-readable label of the state
	pub fn display(&self) -> &'static str {
		match self {
			Self::Draft => "Draft",
			Self::Published => "Published",
			Self::Unpublished => "Unpublished",
			Self::Archived => "Archived",
		}
	}
}

/// One version of a piece of versionable content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
	/// Publication state
	pub state: VersionState,

	/// Username of the version's creator
	pub created_by: String,

	/// Last modification time
	pub modified: DateTime<Utc>,
}

impl Version {
	/// Create a new version record
	pub fn new(state: VersionState, created_by: impl Into<String>, modified: DateTime<Utc>) -> Self {
		Self {
			state,
			created_by: created_by.into(),
			modified,
		}
	}
}

/// A content object rendered in the references report
pub trait Content: Send + Sync {
	/// Model this object is an instance of
	fn content_model(&self) -> &ModelRef;

	/// Primary key, rendered as a string
	fn pk(&self) -> String;

	/// Versions of this object, most recent first
	///
	/// Objects of models without versioning return an empty slice.
	fn versions(&self) -> &[Version] {
		&[]
	}
}
