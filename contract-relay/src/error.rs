use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use service_core::error::AppError;
use thiserror::Error;

/// Ways a single relay attempt can fail. None of them are retried.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Request has no `file` part")]
    MissingFile,

    #[error("Failed to read uploaded file: {0}")]
    UploadRead(#[from] MultipartError),

    #[error("Analysis service unavailable: {0}")]
    DownstreamUnavailable(#[source] reqwest::Error),

    #[error("Analysis service rejected the request with status {status}")]
    DownstreamRejected { status: u16, body: String },

    #[error("Analysis service returned an unexpected body: {0}")]
    DownstreamFormat(#[from] serde_json::Error),
}

impl RelayError {
    /// Label for the `contract_relay_analyses_total` counter.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::MissingFile => "missing_file",
            RelayError::UploadRead(_) => "upload_read_error",
            RelayError::DownstreamUnavailable(_) => "downstream_unavailable",
            RelayError::DownstreamRejected { .. } => "downstream_rejected",
            RelayError::DownstreamFormat(_) => "downstream_format_error",
        }
    }
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::MissingFile => AppError::BadRequest(err.to_string()),
            RelayError::UploadRead(ref source)
                if source.status() == StatusCode::PAYLOAD_TOO_LARGE =>
            {
                AppError::PayloadTooLarge(source.body_text())
            }
            RelayError::UploadRead(source) => AppError::InternalError(
                anyhow::Error::new(source).context("Failed to read uploaded file"),
            ),
            RelayError::DownstreamUnavailable(ref source) => {
                let reason = if source.is_timeout() {
                    "analysis service timed out"
                } else {
                    "analysis service unreachable"
                };
                AppError::ServiceUnavailable(reason.to_string())
            }
            RelayError::DownstreamRejected { status, .. } => AppError::BadGateway {
                message: format!("analysis service returned status {}", status),
                upstream_status: Some(status),
            },
            RelayError::DownstreamFormat(source) => AppError::BadGateway {
                message: format!("analysis service returned an unreadable body: {}", source),
                upstream_status: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_bad_request() {
        let err = AppError::from(RelayError::MissingFile);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rejected_maps_to_bad_gateway_with_status() {
        let err = AppError::from(RelayError::DownstreamRejected {
            status: 500,
            body: "boom".to_string(),
        });

        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        match err {
            AppError::BadGateway {
                upstream_status, ..
            } => assert_eq!(upstream_status, Some(500)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn format_error_maps_to_bad_gateway() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let relay = RelayError::from(source);
        assert_eq!(relay.outcome(), "downstream_format_error");
        assert_eq!(AppError::from(relay).status_code(), StatusCode::BAD_GATEWAY);
    }
}
