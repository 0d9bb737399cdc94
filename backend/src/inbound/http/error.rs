//! REST mapping for domain errors.
//!
//! Status codes:
//!
//! | code                  | status |
//! |-----------------------|--------|
//! | `invalid_request`     | 400    |
//! | `invalid_credentials` | 401    |
//! | `unauthorized`        | 401    |
//! | `forbidden`           | 403    |
//! | `not_found`           | 404    |
//! | `username_conflict`   | 409    |
//! | `internal_error`      | 500    |
//!
//! Internal errors are redacted before serialisation.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for REST handlers.
pub type ApiResult<T> = Result<T, Error>;

pub(crate) const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidCredentials | ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::UsernameConflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(self.redacted())
    }
}
