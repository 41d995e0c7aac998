mod input_value_definition_tests;
mod type_registry_tests;
