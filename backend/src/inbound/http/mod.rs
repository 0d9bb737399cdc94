//! REST adapter.
//!
//! [`configure_api`] mounts every `/api/v1` route together with the body and
//! path extractor settings, so malformed JSON and malformed identifiers come
//! back as `invalid_request` errors rather than Actix's plain-text defaults.

use actix_web::web;
use tracing::debug;

use crate::domain::Error;

pub mod auth;
pub mod error;
pub mod expenses;
pub mod health;
pub mod users;

pub use error::ApiResult;

fn json_error(err: actix_web::error::JsonPayloadError) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request(format!("invalid request body: {err}")).into()
}

fn path_error(err: actix_web::error::PathError) -> actix_web::Error {
    debug!(error = %err, "rejected path parameters");
    Error::invalid_request("malformed identifier in path").into()
}

/// Register the `/api/v1` scope on an app or test service.
///
/// ```
/// use actix_web::App;
/// use finance_backend::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::JsonConfig::default().error_handler(|err, _| json_error(err)))
            .app_data(web::PathConfig::default().error_handler(|err, _| path_error(err)))
            .service(users::register)
            .service(users::login)
            .service(expenses::create_expense)
            .service(expenses::get_expense),
    );
}
