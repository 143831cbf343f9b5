use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Bad Gateway: {message}")]
    BadGateway {
        message: String,
        upstream_status: Option<u16>,
    },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Not found")]
    NotFound,

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    downstream_status: Option<u16>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InternalError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::BadRequest(msg) => ErrorResponse {
                error: msg,
                details: None,
                downstream_status: None,
            },
            AppError::PayloadTooLarge(msg) => ErrorResponse {
                error: "Payload too large".to_string(),
                details: Some(msg),
                downstream_status: None,
            },
            AppError::InternalError(err) => ErrorResponse {
                error: "Internal server error".to_string(),
                details: Some(format!("{:#}", err)),
                downstream_status: None,
            },
            AppError::BadGateway {
                message,
                upstream_status,
            } => ErrorResponse {
                error: format!("Bad Gateway: {}", message),
                details: None,
                downstream_status: upstream_status,
            },
            AppError::ServiceUnavailable(msg) => ErrorResponse {
                error: "Service unavailable".to_string(),
                details: Some(msg),
                downstream_status: None,
            },
            AppError::NotFound => ErrorResponse {
                error: "Not found".to_string(),
                details: None,
                downstream_status: None,
            },
            AppError::ConfigError(err) => ErrorResponse {
                error: "Configuration error".to_string(),
                details: Some(err.to_string()),
                downstream_status: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
