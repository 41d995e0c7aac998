//! Input coercion: turning literals and JSON variables into typed
//! [`Value`](crate::Value)s.
//!
//! The same rules serve schema default values (no variables in scope),
//! request variables (JSON input), field and directive arguments (literals
//! that may reference variables), and the literal checks performed during
//! validation.

mod coercion_error;
mod input_coercer;

pub use coercion_error::CoercionError;
pub use coercion_error::CoercionErrorKind;
pub use input_coercer::InputSource;
pub use input_coercer::Variables;
pub use input_coercer::coerce_argument_values;
pub use input_coercer::coerce_input_value;
pub use input_coercer::coerce_json_value;
pub use input_coercer::coerce_variable_values;
pub(crate) use input_coercer::check_literal;
pub(crate) use input_coercer::check_variable_default;

#[cfg(test)]
mod tests;
