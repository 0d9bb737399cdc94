//! Domain primitives, aggregates and use cases.
//!
//! Purpose: define strongly typed entities shared by the transports and the
//! persistence adapters, and the use cases that operate on them. Types are
//! immutable once constructed; invariants are documented on each type.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload with a closed
//!   code set.
//! - User, UserId, Username, PasswordHash: account identity.
//! - Password, RegisterUserCommand, LoginQuery, AccessToken, AuthResult:
//!   authentication inputs and outputs.
//! - Expense and friends: per-user expense records.
//! - RegistrationService, LoginService, ExpenseService: use cases exposed
//!   through [`ports::Handler`].

pub mod auth;
pub mod error;
pub mod expense;
pub mod ports;
pub mod trace_id;
pub mod user;

mod expense_service;
mod login_service;
mod registration_service;
mod validation;

pub use self::auth::{
    AccessToken, AuthResult, LoginQuery, PASSWORD_MAX, Password, PasswordValidationError,
    RegisterUserCommand,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::expense::{
    AddExpenseCommand, Amount, DESCRIPTION_MAX, Description, Expense, ExpenseId,
    ExpenseValidationError, GetExpenseQuery,
};
pub use self::expense_service::ExpenseService;
pub use self::login_service::LoginService;
pub use self::registration_service::RegistrationService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    PasswordHash, USERNAME_MAX, USERNAME_MIN, User, UserId, UserValidationError, Username,
};
