//! API errors and their envelope rendering.

use std::fmt;

use thiserror::Error;

use crate::api::envelope::Envelope;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

pub type ApiResult<T> = Result<T, ApiError>;

/// One failed field check on a request body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// Every way a request can fail once it reached a handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(&'static str),

    /// Required fields were missing or empty. Holds every failure, not just the first.
    #[error("{}", join(.0))]
    Validation(Vec<FieldError>),

    /// A value could not be parsed into the type it must have.
    #[error("{0}")]
    Malformed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::Validation(_) => Status::UnprocessableContent,
            ApiError::Malformed(_) => Status::BadRequest,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }
}

fn join(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(%detail, "request failed");
        }
        Envelope::new(self.status()).message(self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::NotFound("x").status(), Status::NotFound);
        assert_eq!(ApiError::Validation(vec![]).status(), Status::UnprocessableContent);
        assert_eq!(ApiError::Malformed("x".into()).status(), Status::BadRequest);
        assert_eq!(ApiError::Internal("x".into()).status(), Status::InternalServerError);
    }

    #[test]
    fn validation_message_joins_every_field() {
        let err = ApiError::Validation(vec![
            FieldError { field: "name", message: "You did not enter a name." },
            FieldError { field: "episodes_seen", message: "You did not enter an episodes_seen number." },
        ]);
        assert_eq!(
            err.to_string(),
            "You did not enter a name. You did not enter an episodes_seen number."
        );
    }

    #[test]
    fn renders_as_failed_envelope() {
        let res = ApiError::NotFound("No show with this id exists").into_response();
        assert_eq!(res.status_code(), 404);
        let env: Envelope = serde_json::from_slice(res.body()).unwrap();
        assert!(!env.success);
        assert_eq!(env.message, "No show with this id exists");
        assert_eq!(env.result, None);
    }
}
