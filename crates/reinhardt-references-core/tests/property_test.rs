//! Property-based tests for reference field routing

use proptest::prelude::*;
use reinhardt_references_core::prelude::*;

fn reference_field() -> impl Strategy<Value = ReferenceField> {
	(
		"[a-z]{1,6}",
		"[A-Z][a-z]{1,8}",
		any::<bool>(),
		"[a-z_]{1,10}",
		"[A-Z][a-z]{1,8}",
	)
		.prop_map(|(app_label, model_name, plugin, name, related)| {
			let owner = if plugin {
				ModelDescriptor::plugin(app_label, model_name)
			} else {
				ModelDescriptor::model(app_label, model_name)
			};
			ReferenceField::new(owner, name, ModelRef::new("target", related))
		})
}

fn fields_strategy() -> impl Strategy<Value = ReferenceFields> {
	proptest::collection::hash_set(reference_field(), 0..24)
}

fn contains(map: &ReferenceMap, field: &ReferenceField) -> bool {
	map.get(&field.related_model)
		.and_then(|owners| owners.get(&field.model.model))
		.is_some_and(|names| names.contains(&field.name))
}

proptest! {
	#[test]
	fn prop_every_field_lands_in_exactly_one_partition(fields in fields_strategy()) {
		// Arrange
		let mut extension = ReferencesExtension::new();

		// Act
		extension.register_fields(&fields);

		// Assert
		for field in &fields {
			let in_models = contains(extension.reference_models(), field);
			let in_plugins = contains(extension.reference_plugins(), field);
			prop_assert!(in_models != in_plugins);
			prop_assert_eq!(in_plugins, field.model.is_plugin());
		}
	}

	#[test]
	fn prop_register_fields_is_idempotent(
		first in fields_strategy(),
		second in fields_strategy(),
	) {
		// Arrange
		let mut once = ReferencesExtension::new();
		once.register_fields(&first);
		once.register_fields(&second);

		// Act
		let mut twice = once.clone();
		twice.register_fields(&first);
		twice.register_fields(&second);

		// Assert
		prop_assert_eq!(once.reference_models(), twice.reference_models());
		prop_assert_eq!(once.reference_plugins(), twice.reference_plugins());
	}
}
