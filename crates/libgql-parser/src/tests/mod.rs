mod parser_position_tests;
mod parser_schema_tests;
mod parser_value_tests;
mod utils;
