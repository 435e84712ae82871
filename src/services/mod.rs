// Service exports
pub mod analyzer;
pub mod fetcher;
pub mod gemini;

pub use analyzer::{unknown_profile, AnalyzerError, GeminiAnalyzer, ProfileAnalyzer};
pub use fetcher::{FetchError, WebsiteFetcher};
pub use gemini::{GeminiClient, GeminiError};
