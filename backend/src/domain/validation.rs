//! Translate value-object validation failures into `InvalidRequest` errors.
//!
//! Every mapping attaches `{ "field", "code" }` details so clients can point
//! at the offending input without parsing the message.

use serde_json::json;

use super::{Error, ExpenseValidationError, PasswordValidationError, UserValidationError};

fn invalid_field(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

pub(crate) fn username_error(err: &UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyUsername => "empty_username",
        UserValidationError::UsernameTooShort { .. } => "username_too_short",
        UserValidationError::UsernameTooLong { .. } => "username_too_long",
        UserValidationError::UsernameInvalidCharacters => "username_invalid_characters",
        UserValidationError::EmptyId
        | UserValidationError::InvalidId
        | UserValidationError::EmptyPasswordHash => "invalid_user",
    };
    invalid_field("username", code, err.to_string())
}

pub(crate) fn password_error(err: &PasswordValidationError) -> Error {
    let code = match err {
        PasswordValidationError::Empty => "empty_password",
        PasswordValidationError::TooLong { .. } => "password_too_long",
    };
    invalid_field("password", code, err.to_string())
}

pub(crate) fn expense_error(err: &ExpenseValidationError) -> Error {
    let (field, code) = match err {
        ExpenseValidationError::EmptyDescription => ("description", "empty_description"),
        ExpenseValidationError::DescriptionTooLong { .. } => {
            ("description", "description_too_long")
        }
        ExpenseValidationError::NonPositiveAmount => ("amountCents", "non_positive_amount"),
        ExpenseValidationError::InvalidId => ("expenseId", "invalid_expense_id"),
    };
    invalid_field(field, code, err.to_string())
}
