use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use std::env;
use std::fmt::{self, Display};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Error {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Error {
    fn new(code: i32, message: &str) -> Self {
        Error {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn status_code(&self) -> StatusCode {
        match self.code {
            1..=99 => StatusCode::INTERNAL_SERVER_ERROR,
            100 => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{} ({})", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        storage_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        storage_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match status {
            StatusCode::INTERNAL_SERVER_ERROR => Json(json!({
                "code": self.code,
                "error": self.message,
                "details": self.details.unwrap_or_default(),
            })),
            _ => Json(json!({
                "code": self.code,
                "error": self.message,
            })),
        };

        (status, body).into_response()
    }
}

pub fn invalid_state_error() -> Error {
    Error::new(100, "A route request is already in progress")
}

pub fn invalid_input_error() -> Error {
    Error::new(101, "Invalid input")
}

pub fn too_few_addresses_error() -> Error {
    Error::new(102, "At least two addresses are required")
}

pub fn missing_start_or_destination_error() -> Error {
    Error::new(
        103,
        "One address must be marked as start and one as destination",
    )
}

pub fn missing_home_error() -> Error {
    Error::new(103, "Exactly one address must be marked as home")
}

pub fn mixed_roles_error() -> Error {
    Error::new(103, "Home cannot be combined with start or destination")
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error::new(1, "Environment variable error").with_details(err.to_string())
}

pub fn missing_api_key_error() -> Error {
    Error::new(1, "Google Maps API key is not configured")
        .with_details("GOOGLE_MAPS_API_KEY is not set")
}

pub fn storage_error<T: Display>(err: T) -> Error {
    Error::new(2, "Address storage error").with_details(err.to_string())
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error::new(3, "Could not reach directions provider").with_details(err.to_string())
}

pub fn upstream_rejected_error(details: impl Into<String>) -> Error {
    Error::new(4, "Directions provider rejected the request").with_details(details)
}

pub fn no_route_error(status: impl Into<String>) -> Error {
    Error::new(5, "Could not calculate route").with_details(status)
}

pub fn unexpected_error(details: impl Into<String>) -> Error {
    Error::new(6, "Unexpected directions provider response").with_details(details)
}

#[test]
fn client_errors_are_bad_requests() {
    assert_eq!(invalid_input_error().status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(too_few_addresses_error().status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(missing_home_error().status_code(), StatusCode::BAD_REQUEST);
}

#[test]
fn upstream_errors_are_server_errors() {
    let errors = [
        missing_api_key_error(),
        upstream_rejected_error("REQUEST_DENIED"),
        no_route_error("ZERO_RESULTS"),
        unexpected_error("no legs"),
    ];

    for err in errors {
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.details.is_some());
    }
}

#[test]
fn in_flight_submission_is_a_conflict() {
    assert_eq!(invalid_state_error().status_code(), StatusCode::CONFLICT);
}
