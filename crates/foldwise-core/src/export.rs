//! Packaging the current pattern for `/export_pattern`.

use crate::backend::PatternBackend;
use crate::error::ExportError;
use crate::model::{ExportedInstructions, PatternResult};
use crate::view_model::PatternViewModel;
use serde::Serialize;

/// Body of an export call: the stored result, forwarded as received, plus the
/// subject hint the service uses to title the instructions and name the file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRequest {
    #[serde(flatten)]
    pub result: PatternResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl ExportRequest {
    pub fn new(result: PatternResult) -> Self {
        let hint = |key: &str, value: &Option<String>| {
            if result.extra.contains_key(key) {
                None
            } else {
                value.clone()
            }
        };
        let text = hint("text", &result.statistics.text);
        let template_id = hint("template_id", &result.statistics.template_id);
        Self {
            result,
            text,
            template_id,
        }
    }
}

pub struct ExportCoordinator;

impl ExportCoordinator {
    /// Fails with [`ExportError::NoCurrentPattern`] when nothing was ingested
    /// since the last clear.
    pub fn prepare(view_model: &PatternViewModel) -> Result<ExportRequest, ExportError> {
        let result = view_model.current().ok_or(ExportError::NoCurrentPattern)?;
        Ok(ExportRequest::new(result.clone()))
    }

    /// Forward the current result to the service. Writing the returned text
    /// somewhere is left to the caller.
    pub async fn export_current(
        view_model: &PatternViewModel,
        backend: &dyn PatternBackend,
    ) -> Result<ExportedInstructions, ExportError> {
        let request = Self::prepare(view_model)?;
        let exported = backend.export(&request).await?;
        tracing::info!(filename = %exported.filename, "pattern exported");
        Ok(exported)
    }
}
