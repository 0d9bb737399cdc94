//! GraphQL adapter served at `POST /graphql`.
//!
//! Resolvers call the same [`UseCases`] as the REST adapter. Failures are
//! reported as GraphQL errors whose `extensions.code` is the snake_case
//! domain error code; internal errors are redacted the same way REST does.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{HttpRequest, web};
use async_graphql::{EmptySubscription, ErrorExtensions, Schema};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::domain::Error;
use crate::inbound::UseCases;

mod resolvers;

pub use resolvers::{MutationRoot, QueryRoot};

/// Executable schema type.
pub type FinanceSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Raw bearer token lifted from the HTTP request, verified lazily by the
/// resolvers that need it.
#[derive(Debug, Clone)]
pub(crate) struct BearerToken(pub(crate) String);

impl ErrorExtensions for Error {
    fn extend(&self) -> async_graphql::Error {
        let safe = self.redacted();
        async_graphql::Error::new(safe.message()).extend_with(|_, ext| {
            ext.set("code", safe.code().as_str());
            if let Some(trace_id) = safe.trace_id() {
                ext.set("traceId", trace_id);
            }
            if let Some(details) = safe
                .details()
                .and_then(|details| async_graphql::Value::from_json(details.clone()).ok())
            {
                ext.set("details", details);
            }
        })
    }
}

/// Build the schema over the shared use cases.
pub fn build_schema(use_cases: UseCases) -> FinanceSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(use_cases)
        .finish()
}

fn bearer_from(req: &HttpRequest) -> Option<BearerToken> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| BearerToken(token.to_owned()))
}

/// Actix handler executing one GraphQL request.
pub async fn graphql_handler(
    schema: web::Data<FinanceSchema>,
    req: HttpRequest,
    payload: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = payload.into_inner();
    if let Some(token) = bearer_from(&req) {
        request = request.data(token);
    }
    schema.execute(request).await.into()
}

/// Mount `POST /graphql`.
pub fn configure_graphql(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/graphql").route(web::post().to(graphql_handler)));
}

#[cfg(test)]
mod tests;
