//! HTTP client for the contract analysis engine.
//!
//! One uploaded document becomes one `POST {base}/analyze` carrying a single
//! multipart part named `file`. The call is made exactly once; failures are
//! reported to the caller as-is.

use crate::config::FastApiSettings;
use crate::error::RelayError;
use crate::models::{AnalysisResult, UploadedDocument};
use crate::services::metrics::record_downstream_duration;
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use service_core::observability::inject_trace_headers;
use std::time::Instant;

/// Multipart field name the analysis engine reads the document from.
pub const FILE_FIELD: &str = "file";

/// Longest slice of a rejected response body kept for logging.
const MAX_LOGGED_BODY: usize = 512;

/// Shared, pooled client for the analysis engine. Cheap to clone.
#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,
    analyze_url: String,
}

impl AnalysisClient {
    pub fn new(settings: &FastApiSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .connect_timeout(settings.connect_timeout())
            .build()?;

        Ok(Self {
            client,
            analyze_url: analyze_url(&settings.url),
        })
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    /// Forward `document` to the analysis engine and decode its verdict.
    #[tracing::instrument(
        name = "analysis_client.analyze",
        skip_all,
        fields(
            filename = %document.filename,
            declared_size = document.declared_size,
            downstream_status = tracing::field::Empty,
        )
    )]
    pub async fn analyze(
        &self,
        document: UploadedDocument,
        request_id: Option<&str>,
    ) -> Result<AnalysisResult, RelayError> {
        let form = Form::new().part(FILE_FIELD, file_part(document));

        let mut headers = HeaderMap::new();
        inject_trace_headers(&mut headers, request_id);

        let started = Instant::now();
        let result = self
            .client
            .post(&self.analyze_url)
            .headers(headers)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await;
        record_downstream_duration(started.elapsed());

        let response = result.map_err(|e| {
            tracing::error!(error = %e, url = %self.analyze_url, "Analysis service call failed");
            RelayError::DownstreamUnavailable(e)
        })?;

        let status = response.status();
        tracing::Span::current().record("downstream_status", status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = truncate(body, MAX_LOGGED_BODY);
            tracing::warn!(
                status = status.as_u16(),
                body = %body,
                "Analysis service rejected the document"
            );
            return Err(RelayError::DownstreamRejected {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read analysis service response");
            RelayError::DownstreamUnavailable(e)
        })?;

        serde_json::from_slice::<AnalysisResult>(&bytes).map_err(|e| {
            tracing::error!(error = %e, "Analysis service response did not match the expected shape");
            RelayError::DownstreamFormat(e)
        })
    }
}

/// Build the single `file` part with the original filename and an explicit
/// length, so the outbound form is not sent chunked.
fn file_part(document: UploadedDocument) -> Part {
    let content_type = document.content_type_or_default().to_string();
    let UploadedDocument {
        filename,
        declared_size,
        content,
        ..
    } = document;

    let part = Part::stream_with_length(Body::from(content.clone()), declared_size)
        .file_name(filename.clone());

    match part.mime_str(&content_type) {
        Ok(part) => part,
        Err(e) => {
            tracing::warn!(
                content_type = %content_type,
                error = %e,
                "Ignoring unparseable upload content type"
            );
            Part::stream_with_length(Body::from(content), declared_size).file_name(filename)
        }
    }
}

fn analyze_url(base: &str) -> String {
    format!("{}/analyze", base.trim_end_matches('/'))
}

fn truncate(mut text: String, max: usize) -> String {
    if text.len() > max {
        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_url_joins_base() {
        assert_eq!(
            analyze_url("http://localhost:8000"),
            "http://localhost:8000/analyze"
        );
        assert_eq!(
            analyze_url("http://analysis:8000/"),
            "http://analysis:8000/analyze"
        );
        assert_eq!(
            analyze_url("http://gateway/ml"),
            "http://gateway/ml/analyze"
        );
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short".to_string(), 10), "short");
        assert_eq!(truncate("abcdef".to_string(), 3), "abc");
        // "é" is two bytes; cutting at 2 would split it.
        assert_eq!(truncate("aé".to_string(), 2), "a");
    }

    #[test]
    fn client_uses_configured_url() {
        let settings = FastApiSettings {
            url: "http://analysis:9000/".to_string(),
            ..Default::default()
        };
        let client = AnalysisClient::new(&settings).unwrap();
        assert_eq!(client.analyze_url(), "http://analysis:9000/analyze");
    }
}
