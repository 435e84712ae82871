// Core logic exports
pub mod normalize;
pub mod render;
pub mod state;
pub mod validation;

pub use normalize::{normalize_profile, UNKNOWN_SENTINEL};
pub use render::{FieldView, ProfileView, EMPTY_LIST_PLACEHOLDER, UNKNOWN_PLACEHOLDER};
pub use state::{transition, AnalysisEvent, AnalysisState, FailureKind, Transition, GENERIC_FAILURE, TIMEOUT_FAILURE};
pub use validation::{is_plausible_url, validate_website_url, UrlRejection, URL_HINT};
