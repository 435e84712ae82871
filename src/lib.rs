//! Company Profiler - website analysis service
//!
//! Takes a company website URL, runs it through an AI-backed analysis and
//! returns a normalized business profile (name, description, service lines,
//! keyword tiers, emails, point of contact). The crate contains both sides of
//! the exchange: the HTTP service and a client with an explicit state machine.

pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize_profile, transition, AnalysisEvent, AnalysisState, ProfileView};
pub use client::{AnalysisSession, HttpAnalysisApi};
pub use error::ApiError;
pub use models::{AnalysisRequest, CompanyProfile, RawProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let profile = normalize_profile(&RawProfile::new().with("company_name", "Acme"));
        assert_eq!(profile.company_name.as_deref(), Some("Acme"));
        assert!(AnalysisState::default().can_submit());
    }
}
