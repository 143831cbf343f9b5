use crate::error::RelayError;
use crate::models::{AnalysisResult, UploadedDocument};
use crate::services::analysis_client::FILE_FIELD;
use crate::services::metrics::record_analysis_outcome;
use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    Extension, Json,
};
use service_core::error::AppError;
use service_core::middleware::RequestId;

/// Filename used when the `file` part does not carry one.
const FALLBACK_FILENAME: &str = "upload";

/// `POST /api/contracts/analyze`
///
/// Relays the `file` part to the analysis engine and returns its verdict.
pub async fn analyze_contract(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let outcome = relay(&state, &request_id, multipart).await;

    match outcome {
        Ok(result) => {
            record_analysis_outcome("completed");
            tracing::info!(
                clauses = result.clauses.as_ref().map_or(0, Vec::len),
                "Contract analysis relayed"
            );
            Ok(Json(result))
        }
        Err(e) => {
            record_analysis_outcome(e.outcome());
            tracing::warn!(error = %e, outcome = e.outcome(), "Contract analysis failed");
            Err(e.into())
        }
    }
}

async fn relay(
    state: &AppState,
    request_id: &RequestId,
    multipart: Multipart,
) -> Result<AnalysisResult, RelayError> {
    let document = read_file_part(multipart).await?;

    tracing::info!(
        filename = %document.filename,
        declared_size = document.declared_size,
        content_type = %document.content_type_or_default(),
        "Forwarding contract to analysis service"
    );

    state
        .analysis_client
        .analyze(document, Some(request_id.as_str()))
        .await
}

/// Take the first `file` field from the form; other fields are skipped.
async fn read_file_part(mut multipart: Multipart) -> Result<UploadedDocument, RelayError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_FILENAME)
            .to_string();
        let content_type = field.content_type().map(str::to_string);
        let content = field.bytes().await?;

        return Ok(UploadedDocument::new(filename, content_type, content));
    }

    Err(RelayError::MissingFile)
}
