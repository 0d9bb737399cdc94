//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, TokenConfig};

use state_builders::build_use_cases;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use finance_backend::Trace;
#[cfg(debug_assertions)]
use finance_backend::doc::ApiDoc;
use finance_backend::inbound::UseCases;
use finance_backend::inbound::graphql::{FinanceSchema, build_schema, configure_graphql};
use finance_backend::inbound::http::configure_api;
use finance_backend::inbound::http::health::{HealthState, live, ready};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    use_cases: web::Data<UseCases>,
    schema: web::Data<FinanceSchema>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        use_cases,
        schema,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(use_cases)
        .app_data(schema)
        .wrap(Trace)
        .configure(configure_api)
        .configure(configure_graphql)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let use_cases = build_use_cases(&config);
    let schema = web::Data::new(build_schema(use_cases.clone()));
    let use_cases = web::Data::new(use_cases);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            use_cases: use_cases.clone(),
            schema: schema.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
