//! Tests for publishing the registry process-wide
//!
//! Kept in its own test binary: the registry can only be installed once per
//! process.

use reinhardt_references_core::prelude::*;
use rstest::rstest;
use serial_test::serial;

#[rstest]
#[serial]
fn test_install_once() {
	// Arrange
	assert!(references_extension().is_none());
	let mut extension = ReferencesExtension::new();
	extension.register_fields(&ReferenceFields::from([ReferenceField::new(
		ModelDescriptor::model("blog", "Article"),
		"author",
		ModelRef::new("people", "Author"),
	)]));

	// Act
	let installed = extension.install().unwrap();
	let second = ReferencesExtension::new().install();

	// Assert
	assert!(installed.is_referenced(&ModelRef::new("people", "Author")));
	assert!(matches!(second, Err(ReferencesError::AlreadyInstalled)));
	let global = references_extension().unwrap();
	assert!(std::ptr::eq(global, installed));
}
