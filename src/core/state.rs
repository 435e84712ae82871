use crate::core::validation::{is_plausible_url, URL_HINT};
use crate::models::{AnalysisRequest, CompanyProfile};

/// User-facing message for any failed analysis
pub const GENERIC_FAILURE: &str = "We couldn't analyze that website. Please try again.";

/// User-facing message when the analysis deadline elapsed
pub const TIMEOUT_FAILURE: &str = "The analysis took too long to complete. Please try again.";

/// Why an in-flight analysis failed
///
/// Only `Timeout` changes what the user sees; the other kinds exist so the
/// caller can log the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rejected by the server with a 4xx
    Rejected,
    /// Server-side failure (5xx other than a timeout)
    Server,
    /// The server reported that the analysis deadline elapsed
    Timeout,
    /// Connection, DNS or other transport error
    Transport,
    /// 2xx response whose body did not match the profile schema
    Malformed,
}

impl FailureKind {
    pub fn user_message(self) -> &'static str {
        match self {
            FailureKind::Timeout => TIMEOUT_FAILURE,
            _ => GENERIC_FAILURE,
        }
    }
}

/// UI state for one analysis session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisState {
    /// Waiting for input; `hint` is set when the last submit failed the local guard
    Idle { hint: Option<String> },
    /// Exactly one request is in flight
    Submitting { website_url: String },
    Success(CompanyProfile),
    Failure { message: String },
}

impl Default for AnalysisState {
    fn default() -> Self {
        AnalysisState::Idle { hint: None }
    }
}

impl AnalysisState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, AnalysisState::Submitting { .. })
    }

    /// Submission control is enabled in every state except `Submitting`
    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
    }

    pub fn profile(&self) -> Option<&CompanyProfile> {
        match self {
            AnalysisState::Success(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            AnalysisState::Idle { hint } => hint.as_deref(),
            _ => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            AnalysisState::Failure { message } => Some(message),
            _ => None,
        }
    }
}

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisEvent {
    Submit(String),
    Succeeded(CompanyProfile),
    Failed(FailureKind),
}

/// Result of applying one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: AnalysisState,
    /// Request to issue, present only when the submit guard passed
    pub request: Option<AnalysisRequest>,
}

impl Transition {
    fn stay(state: AnalysisState) -> Self {
        Self {
            state,
            request: None,
        }
    }
}

/// Pure transition function from (state, event) to the next state
///
/// - A submit while `Submitting` is ignored (single-flight).
/// - A submit that fails the local guard yields `Idle` with a hint and no request.
/// - A valid submit from any other state clears the previous profile or error
///   immediately and yields exactly one request.
/// - A resolution that arrives when nothing is in flight is discarded.
pub fn transition(state: AnalysisState, event: AnalysisEvent) -> Transition {
    match (state, event) {
        (state @ AnalysisState::Submitting { .. }, AnalysisEvent::Submit(_)) => Transition::stay(state),

        (_, AnalysisEvent::Submit(input)) => {
            let website_url = input.trim().to_string();
            if !is_plausible_url(&website_url) {
                return Transition::stay(AnalysisState::Idle {
                    hint: Some(URL_HINT.to_string()),
                });
            }

            Transition {
                request: Some(AnalysisRequest::new(website_url.clone())),
                state: AnalysisState::Submitting { website_url },
            }
        }

        (AnalysisState::Submitting { .. }, AnalysisEvent::Succeeded(profile)) => {
            Transition::stay(AnalysisState::Success(profile))
        }

        (AnalysisState::Submitting { .. }, AnalysisEvent::Failed(kind)) => {
            Transition::stay(AnalysisState::Failure {
                message: kind.user_message().to_string(),
            })
        }

        (state, AnalysisEvent::Succeeded(_)) | (state, AnalysisEvent::Failed(_)) => {
            Transition::stay(state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitting() -> AnalysisState {
        transition(AnalysisState::default(), AnalysisEvent::Submit("https://acme.com".into())).state
    }

    #[test]
    fn test_invalid_url_issues_no_request() {
        let t = transition(AnalysisState::default(), AnalysisEvent::Submit("acme".into()));
        assert!(t.request.is_none());
        assert_eq!(t.state.hint(), Some(URL_HINT));
    }

    #[test]
    fn test_valid_url_enters_submitting() {
        let t = transition(
            AnalysisState::default(),
            AnalysisEvent::Submit(" https://acme.com ".into()),
        );
        assert_eq!(t.request, Some(AnalysisRequest::new("https://acme.com")));
        assert!(t.state.is_submitting());
        assert!(!t.state.can_submit());
    }

    #[test]
    fn test_submit_while_submitting_is_ignored() {
        let t = transition(submitting(), AnalysisEvent::Submit("https://other.com".into()));
        assert!(t.request.is_none());
        assert_eq!(
            t.state,
            AnalysisState::Submitting {
                website_url: "https://acme.com".into()
            }
        );
    }

    #[test]
    fn test_success_replaces_profile() {
        let profile = CompanyProfile {
            company_name: Some("Acme".into()),
            ..Default::default()
        };
        let t = transition(submitting(), AnalysisEvent::Succeeded(profile.clone()));
        assert_eq!(t.state.profile(), Some(&profile));
    }

    #[test]
    fn test_failure_uses_generic_message() {
        let t = transition(submitting(), AnalysisEvent::Failed(FailureKind::Transport));
        assert_eq!(t.state.failure_message(), Some(GENERIC_FAILURE));

        let t = transition(submitting(), AnalysisEvent::Failed(FailureKind::Timeout));
        assert_eq!(t.state.failure_message(), Some(TIMEOUT_FAILURE));
    }

    #[test]
    fn test_resubmit_after_success_clears_profile() {
        let done = AnalysisState::Success(CompanyProfile {
            company_name: Some("Old".into()),
            ..Default::default()
        });
        let t = transition(done, AnalysisEvent::Submit("https://new.com".into()));
        assert!(t.state.profile().is_none());
        assert!(t.request.is_some());
    }

    #[test]
    fn test_stale_resolution_is_discarded() {
        let t = transition(
            AnalysisState::default(),
            AnalysisEvent::Succeeded(CompanyProfile::default()),
        );
        assert_eq!(t.state, AnalysisState::default());
    }
}
