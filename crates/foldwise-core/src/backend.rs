use crate::catalog::TemplateCatalog;
use crate::error::RequestError;
use crate::export::ExportRequest;
use crate::model::{ExportedInstructions, PatternResult};
use crate::request::PlannedRequest;
use async_trait::async_trait;

/// The remote pattern service.
///
/// Every call is a single in-flight request. Implementations own the timeout
/// policy and must report an expired call as [`RequestError::Timeout`].
#[async_trait]
pub trait PatternBackend: Send + Sync {
    async fn templates(&self) -> Result<TemplateCatalog, RequestError>;

    async fn generate(&self, planned: &PlannedRequest) -> Result<PatternResult, RequestError>;

    async fn export(&self, request: &ExportRequest) -> Result<ExportedInstructions, RequestError>;
}
