//! HTTP implementation of [`PatternBackend`].

use crate::config::Config;
use crate::util::{single_line, truncate};
use anyhow::Context;
use async_trait::async_trait;
use foldwise_core::{
    Endpoint, ExportRequest, ExportedInstructions, PatternBackend, PatternResult, PlannedRequest,
    RequestError, TemplateCatalog,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use tokio::time::timeout;
use url::Url;

/// Longest server error text shown to the user.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Talks to the pattern service over JSON/HTTP. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base: Url,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new(server_url: &str, request_timeout: Duration) -> anyhow::Result<Self> {
        let base = parse_base_url(server_url)?;
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;
        Ok(Self {
            client,
            base,
            timeout: request_timeout,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(&config.server_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, RequestError> {
        self.base
            .join(endpoint.name())
            .map_err(|e| RequestError::Network(format!("Invalid endpoint URL: {}", e)))
    }

    /// One request, bounded by the configured timeout. Returns the body of a
    /// 2xx response.
    async fn send<B: Serialize + ?Sized + Sync>(
        &self,
        endpoint: Endpoint,
        body: Option<&B>,
    ) -> Result<String, RequestError> {
        let url = self.endpoint_url(endpoint)?;
        let mut request = if endpoint.is_post() {
            self.client.post(url)
        } else {
            self.client.get(url)
        };
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let exchange = async {
            let response = request.send().await.map_err(|e| map_reqwest_error(e, self.timeout))?;
            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| map_reqwest_error(e, self.timeout))?;
            Ok::<_, RequestError>((status, text))
        };
        let (status, text) = timeout(self.timeout, exchange)
            .await
            .map_err(|_| RequestError::Timeout(self.timeout))??;

        tracing::debug!(
            endpoint = endpoint.name(),
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pattern service responded"
        );

        if status.is_success() {
            Ok(text)
        } else {
            Err(server_error(status.as_u16(), &text))
        }
    }
}

#[async_trait]
impl PatternBackend for HttpBackend {
    async fn templates(&self) -> Result<TemplateCatalog, RequestError> {
        let text = self.send::<()>(Endpoint::GetTemplates, None).await?;
        let wire: Map<String, Value> =
            serde_json::from_str(&text).map_err(|e| RequestError::Decode(e.to_string()))?;
        let catalog =
            TemplateCatalog::from_wire(wire).map_err(|e| RequestError::Decode(e.to_string()))?;
        tracing::info!(templates = catalog.len(), "template catalog loaded");
        Ok(catalog)
    }

    async fn generate(&self, planned: &PlannedRequest) -> Result<PatternResult, RequestError> {
        let text = self.send(planned.endpoint, Some(&planned.request)).await?;
        PatternResult::from_json(&text)
    }

    async fn export(&self, request: &ExportRequest) -> Result<ExportedInstructions, RequestError> {
        let text = self.send(Endpoint::ExportPattern, Some(request)).await?;
        serde_json::from_str(&text).map_err(|e| RequestError::Decode(e.to_string()))
    }
}

/// Endpoints are joined relative to the base, so it must end in `/`.
fn parse_base_url(server_url: &str) -> anyhow::Result<Url> {
    let mut base = Url::parse(server_url.trim())
        .with_context(|| format!("Invalid server URL '{}'", server_url))?;
    if base.cannot_be_a_base() {
        anyhow::bail!("Server URL '{}' cannot be used as a base", server_url);
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

fn map_reqwest_error(err: reqwest::Error, limit: Duration) -> RequestError {
    if err.is_timeout() {
        RequestError::Timeout(limit)
    } else if err.is_connect() {
        RequestError::Network(
            "Could not connect to the pattern service. Check the server URL and try again."
                .to_string(),
        )
    } else {
        RequestError::Network(err.to_string())
    }
}

/// `{ "error": "..." }` bodies are surfaced verbatim (truncated); anything
/// else gets the generic message.
fn server_error(status: u16, body: &str) -> RequestError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|m| truncate(&single_line(&m), MAX_ERROR_CHARS));
    RequestError::server(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:5000/api", Duration::from_secs(5)).unwrap();
        assert_eq!(
            backend
                .endpoint_url(Endpoint::GeneratePattern)
                .unwrap()
                .as_str(),
            "http://localhost:5000/api/generate_pattern"
        );

        let backend = HttpBackend::new("http://localhost:5000", Duration::from_secs(5)).unwrap();
        assert_eq!(
            backend.endpoint_url(Endpoint::GetTemplates).unwrap().as_str(),
            "http://localhost:5000/get_templates"
        );
    }

    #[test]
    fn invalid_server_url_is_rejected() {
        assert!(HttpBackend::new("not a url", Duration::from_secs(5)).is_err());
        assert!(HttpBackend::new("mailto:folds@example.com", Duration::from_secs(5)).is_err());
    }

    #[test]
    fn server_error_uses_error_field() {
        let err = server_error(400, r#"{"error": "Book must have at least 200 pages"}"#);
        assert_eq!(
            err,
            RequestError::Server {
                status: 400,
                message: "Book must have at least 200 pages".into()
            }
        );
    }

    #[test]
    fn server_error_without_error_field_is_generic() {
        for body in ["<html>Bad Gateway</html>", "{}", r#"{"error": ""}"#] {
            let err = server_error(502, body);
            assert!(err
                .to_string()
                .starts_with(RequestError::GENERIC_SERVER_MESSAGE));
        }
    }

    #[test]
    fn long_server_error_is_truncated() {
        let body = serde_json::json!({ "error": "x".repeat(1000) }).to_string();
        let err = server_error(500, &body);
        assert_eq!(err.to_string().chars().count(), MAX_ERROR_CHARS);
    }
}
