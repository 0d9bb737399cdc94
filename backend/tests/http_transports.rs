//! REST and GraphQL mounted on one app share the same use cases.

use actix_web::{App, http::StatusCode, test, web};
use finance_backend::Trace;
use finance_backend::domain::TRACE_ID_HEADER;
use finance_backend::inbound::graphql::{build_schema, configure_graphql};
use finance_backend::inbound::http::configure_api;
use rstest::rstest;
use serde_json::{Value, json};

mod support;

use support::in_memory_use_cases;

macro_rules! app {
    () => {{
        let use_cases = in_memory_use_cases();
        let schema = build_schema(use_cases.clone());
        test::init_service(
            App::new()
                .app_data(web::Data::new(use_cases))
                .app_data(web::Data::new(schema))
                .wrap(Trace)
                .configure(configure_api)
                .configure(configure_graphql),
        )
        .await
    }};
}

#[rstest]
#[actix_web::test]
async fn expense_created_over_graphql_is_readable_over_rest() {
    let app = app!();

    let register = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "username": "alice", "password": "pw1" }))
        .to_request();
    let response = test::call_service(&app, register).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let auth: Value = test::read_body_json(response).await;
    let user_id = auth["id"].as_str().expect("user id").to_owned();

    let login = test::TestRequest::post()
        .uri("/graphql")
        .set_json(json!({
            "query": r#"mutation { login(input: { username: "alice", password: "pw1" }) { id token } }"#
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, login).await;
    assert_eq!(body["data"]["login"]["id"], user_id.as_str());
    let token = body["data"]["login"]["token"]
        .as_str()
        .expect("token")
        .to_owned();

    let create = test::TestRequest::post()
        .uri("/graphql")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "query": "mutation($userId: UUID!) { createExpense(userId: $userId, data: { description: \"Coffee\", amountCents: 350, date: \"2024-05-01\" }) { id } }",
            "variables": { "userId": user_id }
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, create).await;
    assert!(body.get("errors").is_none(), "unexpected errors: {body}");
    let expense_id = body["data"]["createExpense"]["id"]
        .as_str()
        .expect("expense id")
        .to_owned();

    let fetch = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{user_id}/expenses/{expense_id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let response = test::call_service(&app, fetch).await;
    assert_eq!(response.status(), StatusCode::OK);
    let expense: Value = test::read_body_json(response).await;
    assert_eq!(expense["description"], "Coffee");
    assert_eq!(expense["amountCents"], 350);
    assert_eq!(expense["date"], "2024-05-01");
}

#[rstest]
#[actix_web::test]
async fn both_transports_report_the_same_error_code_for_bad_credentials() {
    let app = app!();

    let rest = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "bob", "password": "x" }))
        .to_request();
    let response = test::call_service(&app, rest).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let rest_body: Value = test::read_body_json(response).await;

    let graphql = test::TestRequest::post()
        .uri("/graphql")
        .set_json(json!({
            "query": r#"mutation { login(input: { username: "bob", password: "x" }) { id } }"#
        }))
        .to_request();
    let graphql_body: Value = test::call_and_read_body_json(&app, graphql).await;

    assert_eq!(rest_body["code"], "invalid_credentials");
    assert_eq!(
        graphql_body["errors"][0]["extensions"]["code"],
        rest_body["code"]
    );
    assert_eq!(graphql_body["errors"][0]["message"], rest_body["message"]);
}
