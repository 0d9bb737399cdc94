//! Query and mutation roots.

use async_graphql::{Context, ErrorExtensions, InputObject, Object, Result, SimpleObject};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::error;
use uuid::Uuid;

use super::BearerToken;
use crate::domain::{
    AddExpenseCommand, AuthResult, Error, Expense, ExpenseId, GetExpenseQuery, LoginQuery,
    RegisterUserCommand, UserId,
};
use crate::inbound::UseCases;
use crate::inbound::http::auth::token_rejection;

/// Result of `register` and `login`.
#[derive(SimpleObject)]
pub struct AuthPayload {
    id: Uuid,
    username: String,
    token: String,
    expires_at: DateTime<Utc>,
}

impl From<AuthResult> for AuthPayload {
    fn from(result: AuthResult) -> Self {
        Self {
            id: *result.user_id().as_uuid(),
            username: result.username().as_str().to_owned(),
            token: result.token().as_str().to_owned(),
            expires_at: result.token().expires_at(),
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "Expense")]
pub struct ExpenseObject {
    id: Uuid,
    user_id: Uuid,
    description: String,
    amount_cents: i64,
    date: NaiveDate,
}

impl From<Expense> for ExpenseObject {
    fn from(expense: Expense) -> Self {
        Self {
            id: *expense.id().as_uuid(),
            user_id: *expense.user_id().as_uuid(),
            description: expense.description().as_str().to_owned(),
            amount_cents: expense.amount().cents(),
            date: expense.date(),
        }
    }
}

#[derive(InputObject)]
pub struct CredentialsInput {
    username: String,
    password: String,
}

#[derive(InputObject)]
pub struct NewExpenseInput {
    description: String,
    amount_cents: i64,
    date: NaiveDate,
}

fn use_cases<'a>(ctx: &Context<'a>) -> Result<&'a UseCases> {
    ctx.data::<UseCases>().map_err(|err| {
        error!(error = ?err, "use cases missing from schema data");
        Error::internal("graphql schema is not configured").extend()
    })
}

/// Verify the request's bearer token and require it to belong to `owner`.
fn authorise(ctx: &Context<'_>, owner: &UserId) -> Result<()> {
    let Some(BearerToken(token)) = ctx.data_opt::<BearerToken>() else {
        return Err(Error::unauthorized("missing bearer token").extend());
    };
    let caller = use_cases(ctx)?
        .tokens
        .verify(token)
        .map_err(|err| token_rejection(&err).extend())?;
    if &caller == owner {
        Ok(())
    } else {
        Err(Error::forbidden("token does not grant access to this user").extend())
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// One of the caller's expenses.
    async fn expense(&self, ctx: &Context<'_>, user_id: Uuid, id: Uuid) -> Result<ExpenseObject> {
        let user_id = UserId::from_uuid(user_id);
        authorise(ctx, &user_id)?;
        use_cases(ctx)?
            .get_expense
            .handle(GetExpenseQuery {
                user_id,
                expense_id: ExpenseId::from_uuid(id),
            })
            .await
            .map(ExpenseObject::from)
            .map_err(|err| err.extend())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create an account and return a token for it.
    async fn register(
        &self,
        ctx: &Context<'_>,
        input: CredentialsInput,
    ) -> Result<AuthPayload> {
        let CredentialsInput { username, password } = input;
        use_cases(ctx)?
            .register
            .handle(RegisterUserCommand::new(username, password))
            .await
            .map(AuthPayload::from)
            .map_err(|err| err.extend())
    }

    /// Exchange credentials for a token.
    async fn login(
        &self,
        ctx: &Context<'_>,
        input: CredentialsInput,
    ) -> Result<AuthPayload> {
        let CredentialsInput { username, password } = input;
        use_cases(ctx)?
            .login
            .handle(LoginQuery::new(username, password))
            .await
            .map(AuthPayload::from)
            .map_err(|err| err.extend())
    }

    /// Record an expense for the caller.
    async fn create_expense(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        data: NewExpenseInput,
    ) -> Result<ExpenseObject> {
        let user_id = UserId::from_uuid(user_id);
        authorise(ctx, &user_id)?;
        let NewExpenseInput {
            description,
            amount_cents,
            date,
        } = data;
        use_cases(ctx)?
            .add_expense
            .handle(AddExpenseCommand {
                user_id,
                description,
                amount_cents,
                date,
            })
            .await
            .map(ExpenseObject::from)
            .map_err(|err| err.extend())
    }
}
