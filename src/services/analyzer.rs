use crate::core::UNKNOWN_SENTINEL;
use crate::models::RawProfile;
use crate::services::fetcher::{FetchError, WebsiteFetcher};
use crate::services::gemini::{GeminiClient, GeminiError};
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Errors from the analysis collaborator
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Failed to fetch website: {0}")]
    Fetch(#[from] FetchError),

    #[error("AI provider failure: {0}")]
    Provider(#[from] GeminiError),
}

/// Turns a website URL into a loosely-typed company profile
///
/// Implementations may take minutes; callers impose their own deadline.
#[async_trait]
pub trait ProfileAnalyzer: Send + Sync {
    async fn analyze(&self, url: &Url) -> Result<RawProfile, AnalyzerError>;
}

const HTML_TO_MARKDOWN: &str =
    "You are a HTML to Markdown converter. Convert the input HTML to markdown format.";

const COMPANY_NAME: &str = "You are a company name extractor. Extract ONLY company name from the \
     input markdown content. There should be no other text in the response.";

const SERVICE_LINES: &str = "You are a service line extractor. Extract service lines for the \
     company being described in the markdown content input. Return a list of service lines \
     separated by comma. There should be no other text in the response.";

const COMPANY_DESCRIPTION: &str = "You are a company description extractor. Extract the company \
     description from the input markdown content. There should be no other text in the response.";

const TIER1_KEYWORDS: &str = "You are a company keyword extractor. Extract keywords that this \
     company would DEFINITELY use to search for public government opportunities (e.g., 'solar' \
     would be a good keyword for a company that sells solar panels). Return a list of keywords \
     separated by comma. There should be no other text in the response.";

const EMAILS: &str = "You are an email extractor. Extract all emails from the input markdown \
     content. Return a list of emails separated by comma. There should be no other text in the \
     response. If no emails are found, return an empty list.";

const POINT_OF_CONTACT: &str = "You are a point of contact extractor. Extract the point of contact \
     from the input markdown content. There should be no other text in the response. If \
     uncertain, return 'Unknown'.";

fn tier2_keywords_instruction(tier1_keywords: &str) -> String {
    format!(
        "You are a company keyword extractor. Extract keywords that this company MIGHT use to \
         search for public government opportunities, but these keywords should be different than \
         the tier 1 keywords provided: tier 1 keywords: {}. Return a list of keywords separated \
         by comma. There should be no other text in the response.",
        tier1_keywords
    )
}

/// Profile with every field set to the unknown sentinel
pub fn unknown_profile() -> RawProfile {
    [
        "company_name",
        "company_description",
        "service_lines",
        "tier1_keywords",
        "tier2_keywords",
        "emails",
        "point_of_contact",
    ]
    .iter()
    .fold(RawProfile::new(), |profile, key| profile.with(key, UNKNOWN_SENTINEL))
}

/// Gemini-backed analyzer
///
/// # Pipeline
/// 1. Download the page HTML
/// 2. Convert HTML to Markdown
/// 3. Run one extraction prompt per profile field over the Markdown
///    (tier 2 keywords are asked for with the tier 1 answer as context)
pub struct GeminiAnalyzer {
    fetcher: WebsiteFetcher,
    gemini: GeminiClient,
}

impl GeminiAnalyzer {
    pub fn new(fetcher: WebsiteFetcher, gemini: GeminiClient) -> Self {
        Self { fetcher, gemini }
    }

    /// Ask one question; an empty answer becomes the unknown sentinel
    async fn extract(&self, instruction: &str, markdown: &str) -> Result<String, GeminiError> {
        let answer = self.gemini.generate(instruction, markdown).await?;
        let answer = answer.trim();
        if answer.is_empty() {
            Ok(UNKNOWN_SENTINEL.to_string())
        } else {
            Ok(answer.to_string())
        }
    }
}

#[async_trait]
impl ProfileAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, url: &Url) -> Result<RawProfile, AnalyzerError> {
        let html = self.fetcher.fetch(url).await?;

        let markdown = self.gemini.generate(HTML_TO_MARKDOWN, &html).await?;
        if markdown.trim().is_empty() {
            tracing::warn!("Markdown conversion returned no content for {}", url);
            return Ok(unknown_profile());
        }

        let company_name = self.extract(COMPANY_NAME, &markdown).await?;
        let service_lines = self.extract(SERVICE_LINES, &markdown).await?;
        let company_description = self.extract(COMPANY_DESCRIPTION, &markdown).await?;
        let tier1_keywords = self.extract(TIER1_KEYWORDS, &markdown).await?;
        let tier2_keywords = self
            .extract(&tier2_keywords_instruction(&tier1_keywords), &markdown)
            .await?;
        let emails = self.extract(EMAILS, &markdown).await?;
        let point_of_contact = self.extract(POINT_OF_CONTACT, &markdown).await?;

        tracing::debug!("Extracted all profile fields for {}", url);

        Ok(RawProfile::new()
            .with("company_name", company_name)
            .with("service_lines", service_lines)
            .with("company_description", company_description)
            .with("tier1_keywords", tier1_keywords)
            .with("tier2_keywords", tier2_keywords)
            .with("emails", emails)
            .with("point_of_contact", point_of_contact))
    }
}
