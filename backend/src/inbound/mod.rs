//! Inbound adapters translating external requests into use-case calls.
//!
//! Both transports hold the same [`UseCases`] bundle, so REST and GraphQL
//! invoke identical handlers and see identical errors. Transports never
//! reach the stores, the hasher or the token issuer directly.

use std::sync::Arc;

use crate::domain::ports::{
    ExpenseRepository, Handler, PasswordHasher, TokenIssuer, TokenVerifier, UserRepository,
};
use crate::domain::{
    AddExpenseCommand, AuthResult, Expense, ExpenseService, GetExpenseQuery, LoginQuery,
    LoginService, RegisterUserCommand, RegistrationService,
};

pub mod graphql;
pub mod http;

/// Handler set shared by every transport.
#[derive(Clone)]
pub struct UseCases {
    pub register: Arc<dyn Handler<RegisterUserCommand, AuthResult>>,
    pub login: Arc<dyn Handler<LoginQuery, AuthResult>>,
    pub add_expense: Arc<dyn Handler<AddExpenseCommand, Expense>>,
    pub get_expense: Arc<dyn Handler<GetExpenseQuery, Expense>>,
    /// Bearer-token verification for protected operations.
    pub tokens: Arc<dyn TokenVerifier>,
}

impl UseCases {
    /// Wire the use cases over one set of driven adapters.
    ///
    /// `tokens` both issues tokens for the auth use cases and verifies them
    /// for the transports.
    pub fn new<U, E, H, T>(users: Arc<U>, expenses: Arc<E>, hasher: Arc<H>, tokens: Arc<T>) -> Self
    where
        U: UserRepository + 'static,
        E: ExpenseRepository + 'static,
        H: PasswordHasher + 'static,
        T: TokenIssuer + TokenVerifier + 'static,
    {
        let expense_service = Arc::new(ExpenseService::new(Arc::clone(&users), expenses));
        Self {
            register: Arc::new(RegistrationService::new(
                Arc::clone(&users),
                Arc::clone(&hasher),
                Arc::clone(&tokens),
            )),
            login: Arc::new(LoginService::new(users, hasher, Arc::clone(&tokens))),
            add_expense: expense_service.clone(),
            get_expense: expense_service,
            tokens,
        }
    }
}
