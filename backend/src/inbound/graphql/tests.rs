//! Tests for the GraphQL adapter.

use actix_web::{App, test};
use async_graphql::Request;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::test_support::{TestHarness, harness};

fn schema_for(harness: &TestHarness) -> FinanceSchema {
    build_schema(harness.use_cases().get_ref().clone())
}

async fn run(schema: &FinanceSchema, request: Request) -> Value {
    let response = schema.execute(request).await;
    serde_json::to_value(&response).expect("serialisable response")
}

const REGISTER: &str = r#"mutation {
    register(input: { username: "alice", password: "pw-alice" }) { id username token }
}"#;

#[rstest]
#[actix_web::test]
async fn register_then_login_return_the_same_user(harness: TestHarness) {
    let schema = schema_for(&harness);
    let registered = run(&schema, Request::new(REGISTER)).await;
    let logged_in = run(
        &schema,
        Request::new(r#"mutation { login(input: { username: "alice", password: "pw-alice" }) { id token } }"#),
    )
    .await;

    assert!(registered.get("errors").is_none());
    assert_eq!(
        registered["data"]["register"]["id"],
        logged_in["data"]["login"]["id"]
    );
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_reports_conflict_code(harness: TestHarness) {
    let schema = schema_for(&harness);
    run(&schema, Request::new(REGISTER)).await;
    let second = run(&schema, Request::new(REGISTER)).await;

    assert_eq!(
        second["errors"][0]["extensions"]["code"],
        "username_conflict"
    );
}

#[rstest]
#[actix_web::test]
async fn wrong_password_reports_invalid_credentials(harness: TestHarness) {
    let schema = schema_for(&harness);
    run(&schema, Request::new(REGISTER)).await;
    let response = run(
        &schema,
        Request::new(r#"mutation { login(input: { username: "alice", password: "nope" }) { token } }"#),
    )
    .await;

    assert_eq!(
        response["errors"][0]["extensions"]["code"],
        "invalid_credentials"
    );
}

#[rstest]
#[actix_web::test]
async fn expense_operations_require_matching_token(harness: TestHarness) {
    let schema = schema_for(&harness);
    let registered = run(&schema, Request::new(REGISTER)).await;
    let user_id = registered["data"]["register"]["id"]
        .as_str()
        .expect("id")
        .to_owned();
    let token = registered["data"]["register"]["token"]
        .as_str()
        .expect("token")
        .to_owned();
    let create = format!(
        r#"mutation {{
            createExpense(userId: "{user_id}", data: {{ description: "Coffee", amountCents: 350, date: "2024-06-01" }}) {{ id amountCents }}
        }}"#
    );

    let anonymous = run(&schema, Request::new(create.clone())).await;
    assert_eq!(anonymous["errors"][0]["extensions"]["code"], "unauthorized");

    let created = run(&schema, Request::new(create).data(BearerToken(token.clone()))).await;
    let expense_id = created["data"]["createExpense"]["id"]
        .as_str()
        .expect("expense id")
        .to_owned();
    assert_eq!(created["data"]["createExpense"]["amountCents"], 350);

    let fetched = run(
        &schema,
        Request::new(format!(
            r#"{{ expense(userId: "{user_id}", id: "{expense_id}") {{ description date }} }}"#
        ))
        .data(BearerToken(token)),
    )
    .await;
    assert_eq!(
        fetched["data"]["expense"],
        json!({ "description": "Coffee", "date": "2024-06-01" })
    );
}

#[rstest]
#[actix_web::test]
async fn http_endpoint_reads_bearer_header(harness: TestHarness) {
    let schema = schema_for(&harness);
    let registered = run(&schema, Request::new(REGISTER)).await;
    let user_id = registered["data"]["register"]["id"].as_str().expect("id");
    let token = registered["data"]["register"]["token"]
        .as_str()
        .expect("token");

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(schema.clone()))
            .configure(configure_graphql),
    )
    .await;
    let query = format!(
        r#"{{ expense(userId: "{user_id}", id: "{}") {{ id }} }}"#,
        uuid::Uuid::new_v4()
    );
    let request = test::TestRequest::post()
        .uri("/graphql")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "query": query }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["errors"][0]["extensions"]["code"], "not_found");
}
