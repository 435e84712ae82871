use crate::core::UrlRejection;
use crate::models::ErrorResponse;
use crate::services::AnalyzerError;
use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse};
use thiserror::Error;

/// Errors surfaced by the HTTP layer
///
/// The `Display` text is the generic, client-safe detail. Underlying causes
/// are logged where the error is created and never rendered.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Please provide a valid website URL and try again.")]
    InvalidUrl(#[source] UrlRejection),

    #[error("The request body is not valid JSON.")]
    InvalidJson,

    #[error("The query string could not be parsed.")]
    InvalidQuery,

    #[error("The website could not be reached. Please check the URL and try again.")]
    WebsiteUnreachable,

    #[error("Failed to analyze the website. Please try again later.")]
    AnalysisFailed,

    #[error("The analysis took too long to complete. Please try again later.")]
    AnalysisTimeout,
}

impl ApiError {
    /// Stable machine-readable category
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidUrl(_) => "invalid_url",
            ApiError::InvalidJson => "invalid_json",
            ApiError::InvalidQuery => "invalid_query",
            ApiError::WebsiteUnreachable => "website_unreachable",
            ApiError::AnalysisFailed => "analysis_failed",
            ApiError::AnalysisTimeout => "analysis_timeout",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            detail: self.to_string(),
            code: self.code().to_string(),
        }
    }
}

impl From<UrlRejection> for ApiError {
    fn from(value: UrlRejection) -> Self {
        ApiError::InvalidUrl(value)
    }
}

impl From<AnalyzerError> for ApiError {
    fn from(value: AnalyzerError) -> Self {
        match value {
            AnalyzerError::Fetch(_) => ApiError::WebsiteUnreachable,
            AnalyzerError::Provider(_) => ApiError::AnalysisFailed,
        }
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidUrl(_) | ApiError::InvalidJson | ApiError::InvalidQuery => {
                StatusCode::BAD_REQUEST
            }
            ApiError::WebsiteUnreachable => StatusCode::BAD_GATEWAY,
            ApiError::AnalysisFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::AnalysisTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_response())
    }
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    ApiError::InvalidQuery.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{FetchError, GeminiError};
    use actix_web::ResponseError;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::from(UrlRejection::Blank).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::AnalysisFailed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::AnalysisTimeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_analyzer_errors_map_to_generic_categories() {
        let provider = ApiError::from(AnalyzerError::Provider(GeminiError::InvalidResponse(
            "raw provider text".into(),
        )));
        assert_eq!(provider.code(), "analysis_failed");
        assert!(!provider.to_string().contains("raw provider text"));

        let fetch = ApiError::from(AnalyzerError::Fetch(FetchError::Status(503)));
        assert_eq!(fetch.code(), "website_unreachable");
    }

    #[test]
    fn test_rejection_detail_is_not_rendered() {
        let err = ApiError::from(UrlRejection::UnsupportedScheme("ftp".into()));
        assert!(!err.to_response().detail.contains("ftp"));
    }
}
