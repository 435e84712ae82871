// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{string_or_list, CompanyProfile, RawProfile};
pub use requests::{AnalysisBody, AnalysisQuery, AnalysisRequest};
pub use responses::{ErrorResponse, HealthResponse, ServiceInfoResponse};
