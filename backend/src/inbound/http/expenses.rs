//! Per-user expense endpoints. Both require a bearer token for the user
//! named in the path.
//!
//! ```text
//! POST /api/v1/users/{userId}/expenses              {"description":"Rent","amountCents":120000,"date":"2024-06-01"}
//! GET  /api/v1/users/{userId}/expenses/{expenseId}
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get, post, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{AddExpenseCommand, Error, Expense, ExpenseId, GetExpenseQuery, UserId};
use crate::inbound::UseCases;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;

#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewExpenseRequest {
    #[schema(example = "Groceries")]
    pub description: String,
    /// Positive amount in minor units.
    #[schema(example = 4250)]
    pub amount_cents: i64,
    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub amount_cents: i64,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
}

impl From<Expense> for ExpenseResponse {
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

/// Record an expense for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/users/{userId}/expenses",
    params(("userId" = Uuid, Path, description = "Owner of the expense")),
    request_body = NewExpenseRequest,
    responses(
        (status = 201, description = "Expense recorded", body = ExpenseResponse,
            headers(("Location" = String, description = "URL of the new expense"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Token belongs to another user", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["expenses"],
    operation_id = "createExpense",
    security(("bearerAuth" = []))
)]
#[post("/users/{user_id}/expenses")]
pub async fn create_expense(
    state: web::Data<UseCases>,
    caller: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<NewExpenseRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = UserId::from_uuid(path.into_inner());
    caller.require_owner(&user_id)?;

    let NewExpenseRequest {
        description,
        amount_cents,
        date,
    } = payload.into_inner();
    let expense = state
        .add_expense
        .handle(AddExpenseCommand {
            user_id,
            description,
            amount_cents,
            date,
        })
        .await?;

    let location = format!("/api/v1/users/{user_id}/expenses/{}", expense.id());
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, location))
        .json(ExpenseResponse::from(expense)))
}

/// Fetch one of the authenticated user's expenses.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/expenses/{expenseId}",
    params(
        ("userId" = Uuid, Path, description = "Owner of the expense"),
        ("expenseId" = Uuid, Path, description = "Expense identifier")
    ),
    responses(
        (status = 200, description = "Expense", body = ExpenseResponse),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Token belongs to another user", body = Error),
        (status = 404, description = "Expense not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["expenses"],
    operation_id = "getExpense",
    security(("bearerAuth" = []))
)]
#[get("/users/{user_id}/expenses/{expense_id}")]
pub async fn get_expense(
    state: web::Data<UseCases>,
    caller: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
) -> ApiResult<web::Json<ExpenseResponse>> {
    let (user_id, expense_id) = path.into_inner();
    let user_id = UserId::from_uuid(user_id);
    caller.require_owner(&user_id)?;

    let expense = state
        .get_expense
        .handle(GetExpenseQuery {
            user_id,
            expense_id: ExpenseId::from_uuid(expense_id),
        })
        .await?;
    Ok(web::Json(expense.into()))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::configure_api;
    use crate::test_support::{TestHarness, harness};

    struct Session {
        user_id: String,
        token: String,
    }

    macro_rules! app {
        ($harness:expr) => {
            test::init_service(
                App::new()
                    .app_data($harness.use_cases())
                    .configure(configure_api),
            )
            .await
        };
    }

    async fn register(harness: &TestHarness, username: &str) -> Session {
        let app = app!(harness);
        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({ "username": username, "password": "pw-secret" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        Session {
            user_id: body["id"].as_str().expect("id").to_owned(),
            token: body["token"].as_str().expect("token").to_owned(),
        }
    }

    fn expense_body() -> Value {
        json!({ "description": "Groceries", "amountCents": 4250, "date": "2024-06-01" })
    }

    #[rstest]
    #[actix_web::test]
    async fn create_then_fetch_expense(harness: TestHarness) {
        let alice = register(&harness, "alice").await;
        let app = app!(harness);

        let create = test::TestRequest::post()
            .uri(&format!("/api/v1/users/{}/expenses", alice.user_id))
            .insert_header(("Authorization", format!("Bearer {}", alice.token)))
            .set_json(expense_body())
            .to_request();
        let response = test::call_service(&app, create).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let location = response
            .headers()
            .get("location")
            .and_then(|value| value.to_str().ok())
            .expect("location header")
            .to_owned();
        let created: Value = test::read_body_json(response).await;
        assert!(location.ends_with(created["id"].as_str().expect("id")));

        let fetch = test::TestRequest::get()
            .uri(&location)
            .insert_header(("Authorization", format!("Bearer {}", alice.token)))
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, fetch).await;
        assert_eq!(fetched, created);
        assert_eq!(fetched["amountCents"], 4250);
    }

    #[rstest]
    #[actix_web::test]
    async fn another_users_token_is_forbidden(harness: TestHarness) {
        let alice = register(&harness, "alice").await;
        let mallory = register(&harness, "mallory").await;
        let app = app!(harness);

        let request = test::TestRequest::post()
            .uri(&format!("/api/v1/users/{}/expenses", alice.user_id))
            .insert_header(("Authorization", format!("Bearer {}", mallory.token)))
            .set_json(expense_body())
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_token_is_unauthorised(harness: TestHarness) {
        let alice = register(&harness, "alice").await;
        let app = app!(harness);

        let request = test::TestRequest::post()
            .uri(&format!("/api/v1/users/{}/expenses", alice.user_id))
            .set_json(expense_body())
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_expense_is_not_found(harness: TestHarness) {
        let alice = register(&harness, "alice").await;
        let app = app!(harness);

        let request = test::TestRequest::get()
            .uri(&format!(
                "/api/v1/users/{}/expenses/{}",
                alice.user_id,
                uuid::Uuid::new_v4()
            ))
            .insert_header(("Authorization", format!("Bearer {}", alice.token)))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_path_id_is_an_invalid_request(harness: TestHarness) {
        let alice = register(&harness, "alice").await;
        let app = app!(harness);

        let request = test::TestRequest::get()
            .uri(&format!("/api/v1/users/{}/expenses/not-a-uuid", alice.user_id))
            .insert_header(("Authorization", format!("Bearer {}", alice.token)))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
    }

    #[rstest]
    #[case(json!({ "description": "", "amountCents": 100, "date": "2024-06-01" }))]
    #[case(json!({ "description": "Refund", "amountCents": -100, "date": "2024-06-01" }))]
    #[case(json!({ "description": "Bad date", "amountCents": 100, "date": "June" }))]
    #[actix_web::test]
    async fn invalid_expense_bodies_are_rejected(harness: TestHarness, #[case] body: Value) {
        let alice = register(&harness, "alice").await;
        let app = app!(harness);

        let request = test::TestRequest::post()
            .uri(&format!("/api/v1/users/{}/expenses", alice.user_id))
            .insert_header(("Authorization", format!("Bearer {}", alice.token)))
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
