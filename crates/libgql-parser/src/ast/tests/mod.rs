mod input_value_tests;
mod type_ref_tests;
