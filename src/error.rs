use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;

pub const CONFIGURATION_ERROR: i32 = 1;
pub const ROUTE_LOOKUP_FAILED: i32 = 2;
pub const UNEXPECTED_ERROR: i32 = 3;
pub const INVALID_INPUT: i32 = 100;
pub const MALFORMED_REQUEST: i32 = 101;
pub const NO_ROUTE_FOUND: i32 = 102;
pub const METHOD_NOT_ALLOWED: i32 = 200;

#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self.code {
            1..=99 => StatusCode::INTERNAL_SERVER_ERROR,
            200 => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        malformed_request_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "code": self.code,
            "error": self.message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error(message: &str) -> Error {
    Error {
        code: INVALID_INPUT,
        message: message.into(),
    }
}

pub fn malformed_request_error(err: serde_json::Error) -> Error {
    tracing::debug!(%err, "rejected request body");

    Error {
        code: MALFORMED_REQUEST,
        message: "Malformed request body".into(),
    }
}

pub fn no_route_found_error() -> Error {
    Error {
        code: NO_ROUTE_FOUND,
        message: "No route found between origin and destination".into(),
    }
}

pub fn method_not_allowed_error() -> Error {
    Error {
        code: METHOD_NOT_ALLOWED,
        message: "Method not allowed".into(),
    }
}

pub fn configuration_error(message: &str) -> Error {
    Error {
        code: CONFIGURATION_ERROR,
        message: message.into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    configuration_error("Server configuration error")
}

pub fn route_lookup_error(status: &str) -> Error {
    Error {
        code: ROUTE_LOOKUP_FAILED,
        message: format!("Route lookup failed: {}", status),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    tracing::warn!(%err, "routing provider request failed");

    if err.is_decode() {
        route_lookup_error("malformed response")
    } else {
        route_lookup_error("provider unreachable")
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: UNEXPECTED_ERROR,
        message: "unexpected error".into(),
    }
}

#[test]
fn status_classes() {
    assert_eq!(
        configuration_error("missing key").status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        route_lookup_error("OVER_QUERY_LIMIT").status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(unexpected_error().status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        invalid_input_error("Invalid vehicle type").status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(no_route_found_error().status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        method_not_allowed_error().status(),
        StatusCode::METHOD_NOT_ALLOWED
    );
}

#[test]
fn env_var_is_configuration_error() {
    let err: Error = env::VarError::NotPresent.into();

    assert_eq!(err.code, CONFIGURATION_ERROR);
}

#[test]
fn json_error_is_malformed_request() {
    let err: Error = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();

    assert_eq!(err.code, MALFORMED_REQUEST);
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}
