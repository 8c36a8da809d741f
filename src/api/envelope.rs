//! The JSON envelope every API response is wrapped in.
//!
//! ```json
//! {"code": 201, "success": true, "message": "", "result": {"id": 6, ...}}
//! ```
//!
//! `success` is derived from `code` and `result` is either `null` or a JSON
//! object, never a bare array or scalar.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::error::ApiError;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Envelope {
    pub code: u16,
    pub success: bool,
    pub message: String,
    pub result: Option<Map<String, Value>>,
}

impl Envelope {
    /// An envelope with no message and `result: null`.
    pub fn new(status: Status) -> Self {
        Self {
            code: status.code(),
            success: status.is_success(),
            message: String::new(),
            result: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Adds `key: value` to the result object, creating it if needed.
    pub fn entry<T: Serialize>(mut self, key: &str, value: T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(value)
            .map_err(|e| ApiError::Internal(format!("serialising `{key}`: {e}")))?;
        self.result.get_or_insert_with(Map::new).insert(key.to_owned(), value);
        Ok(self)
    }

    /// Uses `value` itself as the result object. It must serialise to a map.
    pub fn record<T: Serialize>(mut self, value: T) -> Result<Self, ApiError> {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => {
                self.result = Some(map);
                Ok(self)
            }
            Ok(other) => Err(ApiError::Internal(format!(
                "envelope result must be an object, got {}",
                kind(&other)
            ))),
            Err(e) => Err(ApiError::Internal(format!("serialising result: {e}"))),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = Status::try_from(self.code).unwrap_or(Status::InternalServerError);
        let builder = Response::builder().status(status);
        match serde_json::to_vec(&self) {
            Ok(bytes) => builder.json(bytes),
            Err(e) => {
                tracing::error!("failed to encode envelope: {e}");
                Response::status(Status::InternalServerError)
            }
        }
    }
}
