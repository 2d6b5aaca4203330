use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Reasons a lookup can fail.
///
/// Every variant is recovered inside the lookup path and handed to the caller as a
/// display-ready message; none of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The mobile number was empty or whitespace only.
    InvalidInput,
    /// The upstream requires a paid plan or denied access.
    AccessDenied,
    /// The upstream found nothing, or nothing usable, for the number.
    NoDataFound,
    /// The upstream sent an error message instead of data. Passed through verbatim.
    UpstreamMessage(String),
    /// Network failure, unexpected HTTP status or unparsable body.
    TransportOrParseFailure,
}

impl LookupError {
    /// Stable machine-readable tag used in JSON responses.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::InvalidInput => "invalid_input",
            LookupError::AccessDenied => "access_denied",
            LookupError::NoDataFound => "no_data_found",
            LookupError::UpstreamMessage(_) => "upstream_message",
            LookupError::TransportOrParseFailure => "transport_failure",
        }
    }

    /// HTTP status the lookup endpoint answers with for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::InvalidInput => StatusCode::BAD_REQUEST,
            LookupError::AccessDenied => StatusCode::PAYMENT_REQUIRED,
            LookupError::NoDataFound => StatusCode::NOT_FOUND,
            LookupError::UpstreamMessage(_) | LookupError::TransportOrParseFailure => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::InvalidInput => write!(f, "invalid input"),
            LookupError::AccessDenied => write!(f, "paid access required"),
            LookupError::NoDataFound => write!(f, "no data found"),
            LookupError::UpstreamMessage(msg) => write!(f, "{}", msg),
            LookupError::TransportOrParseFailure => write!(f, "request failed, retry"),
        }
    }
}

impl std::error::Error for LookupError {}

/// Application-level errors outside the lookup path (configuration, counter storage).
#[derive(Debug)]
pub enum AppError {
    /// Error reading or writing the visit counter.
    CounterError(String),
    /// Internal server error.
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::CounterError(msg) => write!(f, "Counter error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each error variant to an HTTP status and a JSON body.
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::CounterError(msg) => {
                tracing::error!("Counter error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Counter unavailable".to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::CounterError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_messages() {
        assert_eq!(LookupError::InvalidInput.to_string(), "invalid input");
        assert_eq!(LookupError::AccessDenied.to_string(), "paid access required");
        assert_eq!(LookupError::NoDataFound.to_string(), "no data found");
        assert_eq!(
            LookupError::TransportOrParseFailure.to_string(),
            "request failed, retry"
        );
        assert_eq!(
            LookupError::UpstreamMessage("Invalid API key".to_string()).to_string(),
            "Invalid API key"
        );
    }

    #[test]
    fn test_lookup_error_status_codes() {
        assert_eq!(
            LookupError::InvalidInput.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LookupError::AccessDenied.status_code(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(LookupError::NoDataFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            LookupError::TransportOrParseFailure.status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_app_error_into_response() {
        let response = AppError::CounterError("disk full".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::InternalError("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
