//! Finance backend library.
//!
//! The crate follows a hexagonal layout: `domain` owns entities, use cases
//! and the ports they depend on; `outbound` implements those ports against
//! Argon2, JWT, PostgreSQL and process memory; `inbound` exposes the use
//! cases over REST and GraphQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
