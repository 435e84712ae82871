use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to analyze a company website
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AnalysisRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "websiteUrl", alias = "url")]
    pub website_url: String,
}

impl AnalysisRequest {
    pub fn new(website_url: impl Into<String>) -> Self {
        Self {
            website_url: website_url.into(),
        }
    }
}

/// Query-string binding for the analyze endpoint
///
/// `POST /api/analyze-website?website_url=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisQuery {
    #[serde(default, alias = "websiteUrl", alias = "url")]
    pub website_url: Option<String>,
}

/// JSON body binding for the analyze endpoint
///
/// Every field is optional so that a body without `website_url` produces
/// the same `invalid_url` error as a missing query parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisBody {
    #[serde(default, alias = "websiteUrl", alias = "url")]
    pub website_url: Option<String>,
}
