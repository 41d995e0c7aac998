//! Static checks of operation documents against a [`Schema`].
//!
//! [`Schema`]: crate::schema::Schema

mod fields_can_merge;
mod operation_validator;
mod validation_error;
mod validator;

pub use validation_error::ValidationError;
pub use validation_error::ValidationErrorKind;
pub use validator::validate;

#[cfg(test)]
mod tests;
