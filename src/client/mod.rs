// Client exports
pub mod api;
pub mod session;

pub use api::{decode_profile, AnalysisApi, ClientError, HttpAnalysisApi};
pub use session::{AnalysisSession, SubmitOutcome};
