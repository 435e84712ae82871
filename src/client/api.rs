use crate::core::FailureKind;
use crate::models::{AnalysisRequest, CompanyProfile, ErrorResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use validator::Validate;

/// Errors that can occur when calling the analysis backend
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned status {status} ({code:?})")]
    Status { status: u16, code: Option<String> },

    #[error("Malformed response body: {0}")]
    Malformed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),
}

impl ClientError {
    /// Category the state machine transitions on
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Transport(_) => FailureKind::Transport,
            ClientError::Malformed(_) => FailureKind::Malformed,
            ClientError::InvalidRequest(_) => FailureKind::Rejected,
            ClientError::Status { code, .. } if code.as_deref() == Some("analysis_timeout") => {
                FailureKind::Timeout
            }
            ClientError::Status { status: 504, .. } => FailureKind::Timeout,
            ClientError::Status { status, .. } if (400..500).contains(status) => FailureKind::Rejected,
            ClientError::Status { .. } => FailureKind::Server,
        }
    }
}

/// Network boundary of the client
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<CompanyProfile, ClientError>;
}

/// Schema-validated decode of a backend response
///
/// A 2xx body must be a JSON object matching [`CompanyProfile`]; anything else
/// is `Malformed` rather than being passed on to the view.
pub fn decode_profile(status: u16, body: &[u8]) -> Result<CompanyProfile, ClientError> {
    if !(200..300).contains(&status) {
        let code = serde_json::from_slice::<ErrorResponse>(body)
            .ok()
            .map(|e| e.code);
        return Err(ClientError::Status { status, code });
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ClientError::Malformed(format!("invalid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(ClientError::Malformed("expected a JSON object".to_string()));
    }

    serde_json::from_value(value)
        .map_err(|e| ClientError::Malformed(format!("unexpected profile shape: {}", e)))
}

/// HTTP implementation against `POST {api_url}/api/analyze-website`
///
/// No client-side timeout is applied; the server's deadline governs latency.
pub struct HttpAnalysisApi {
    api_url: String,
    client: Client,
}

impl HttpAnalysisApi {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/analyze-website", self.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl AnalysisApi for HttpAnalysisApi {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<CompanyProfile, ClientError> {
        request.validate()?;
        tracing::debug!("Submitting {} to {}", request.website_url, self.endpoint());

        let response = self.client.post(self.endpoint()).json(request).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        decode_profile(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_object() {
        let profile = decode_profile(200, b"{}").unwrap();
        assert!(profile.is_empty());
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(matches!(decode_profile(200, b"[]"), Err(ClientError::Malformed(_))));
        assert!(matches!(decode_profile(200, b"null"), Err(ClientError::Malformed(_))));
        assert!(matches!(decode_profile(200, b"<html>"), Err(ClientError::Malformed(_))));
    }

    #[test]
    fn test_decode_rejects_wrong_field_types() {
        let result = decode_profile(200, br#"{"emails": {"a": 1}}"#);
        assert_eq!(result.unwrap_err().kind(), FailureKind::Malformed);
    }

    #[test]
    fn test_decode_error_status() {
        let err = decode_profile(
            504,
            br#"{"detail":"The analysis took too long","code":"analysis_timeout"}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Timeout);

        let err = decode_profile(400, br#"{"detail":"bad","code":"invalid_url"}"#).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Rejected);

        let err = decode_profile(500, b"").unwrap_err();
        assert_eq!(err.kind(), FailureKind::Server);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let api = HttpAnalysisApi::new("http://localhost:8000/");
        assert_eq!(api.endpoint(), "http://localhost:8000/api/analyze-website");
    }

    #[tokio::test]
    async fn test_empty_request_is_rejected_before_sending() {
        // Nothing listens here; validation must fail first
        let api = HttpAnalysisApi::new("http://127.0.0.1:1");
        let err = api.analyze(&AnalysisRequest::new("")).await.unwrap_err();

        assert!(matches!(err, ClientError::InvalidRequest(_)));
        assert_eq!(err.kind(), FailureKind::Rejected);
    }
}
