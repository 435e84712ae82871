use crate::core::{normalize_profile, validate_website_url};
use crate::error::ApiError;
use crate::models::{AnalysisBody, AnalysisQuery, HealthResponse, ServiceInfoResponse};
use crate::services::ProfileAnalyzer;
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Application state shared across all handlers
///
/// Holds no per-request data; every analysis is independent.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn ProfileAnalyzer>,
    pub analysis_timeout: Duration,
}

/// Routes mounted both at the root and under `/api`
pub fn configure_info(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(service_info))
        .route("/health", web::get().to(health_check));
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/analyze-website", web::post().to(analyze_website));
}

/// Service metadata endpoint
async fn service_info() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfoResponse {
        message: "Company Profile Generator API".to_string(),
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health check endpoint
///
/// Liveness only: never touches the analyzer or its credentials.
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Pick the URL from the query string, falling back to a JSON body
fn requested_url(query: &AnalysisQuery, body: &[u8]) -> Result<Option<String>, ApiError> {
    if query.website_url.is_some() {
        return Ok(query.website_url.clone());
    }

    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(None);
    }

    let parsed: AnalysisBody = serde_json::from_slice(body).map_err(|e| {
        tracing::info!("Invalid JSON body on analyze-website: {}", e);
        ApiError::InvalidJson
    })?;

    Ok(parsed.website_url)
}

/// Analyze website endpoint
///
/// POST /api/analyze-website?website_url={url}
///
/// or with a JSON body:
/// ```json
/// { "website_url": "https://example.com" }
/// ```
///
/// Runs the analyzer exactly once under the configured deadline and returns
/// the normalized profile.
async fn analyze_website(
    state: web::Data<AppState>,
    query: web::Query<AnalysisQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let request_id = uuid::Uuid::new_v4();

    let raw_url = requested_url(&query, &body)?;
    let url = validate_website_url(raw_url.as_deref()).map_err(|rejection| {
        tracing::info!(%request_id, "Rejected website_url {:?}: {}", raw_url, rejection);
        ApiError::from(rejection)
    })?;

    tracing::info!(%request_id, "Analyzing website: {}", url);
    let started = Instant::now();

    let outcome = tokio::time::timeout(state.analysis_timeout, state.analyzer.analyze(&url)).await;

    let raw_profile = match outcome {
        Ok(Ok(raw)) => raw,
        Ok(Err(e)) => {
            tracing::error!(%request_id, "Analysis of {} failed: {}", url, e);
            return Err(e.into());
        }
        Err(_) => {
            tracing::error!(
                %request_id,
                "Analysis of {} exceeded deadline of {}s",
                url,
                state.analysis_timeout.as_secs()
            );
            return Err(ApiError::AnalysisTimeout);
        }
    };

    let profile = normalize_profile(&raw_profile);

    tracing::info!(
        %request_id,
        "Analysis of {} completed in {}ms ({} service lines, {} emails)",
        url,
        started.elapsed().as_millis(),
        profile.service_lines.len(),
        profile.emails.len()
    );

    Ok(HttpResponse::Ok().json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_takes_precedence_over_body() {
        let query = AnalysisQuery {
            website_url: Some("https://query.com".into()),
        };
        let url = requested_url(&query, br#"{"website_url":"https://body.com"}"#).unwrap();
        assert_eq!(url.as_deref(), Some("https://query.com"));
    }

    #[test]
    fn test_body_used_when_query_missing() {
        let url = requested_url(&AnalysisQuery::default(), br#"{"website_url":"https://body.com"}"#)
            .unwrap();
        assert_eq!(url.as_deref(), Some("https://body.com"));
    }

    #[test]
    fn test_empty_body_and_query_yield_none() {
        assert_eq!(requested_url(&AnalysisQuery::default(), b"  ").unwrap(), None);
    }

    #[test]
    fn test_malformed_body_is_invalid_json() {
        let result = requested_url(&AnalysisQuery::default(), b"{not json");
        assert!(matches!(result, Err(ApiError::InvalidJson)));
    }
}
