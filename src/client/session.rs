use crate::client::api::AnalysisApi;
use crate::core::{transition, AnalysisEvent, AnalysisState, FailureKind, Transition};
use tokio::sync::watch;

/// What happened to one call to [`AnalysisSession::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The local guard rejected the input; no request was sent
    Invalid { hint: String },
    /// Another analysis is already in flight; the submit was ignored
    Busy,
    /// The request resolved and the session reached this terminal state
    Completed(AnalysisState),
}

/// Single-owner state container for one UI session
///
/// All mutations go through [`transition`]. The check-and-enter of
/// `Submitting` happens atomically, so at most one request is in flight no
/// matter how many tasks call [`submit`](Self::submit). Views observe state
/// changes through [`subscribe`](Self::subscribe).
pub struct AnalysisSession<A> {
    api: A,
    state: watch::Sender<AnalysisState>,
}

impl<A: AnalysisApi> AnalysisSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: watch::Sender::new(AnalysisState::default()),
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> AnalysisState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AnalysisState> {
        self.state.subscribe()
    }

    fn apply(&self, event: AnalysisEvent) -> Transition {
        apply_event(&self.state, event)
    }

    /// Submit user input
    ///
    /// Clears any previous profile or error as soon as the request starts.
    /// Failures are logged with their cause; the state only carries the
    /// generic user-facing message.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let next = self.apply(AnalysisEvent::Submit(input.to_string()));
        let request = match next.request {
            Some(request) => request,
            None => {
                return match next.state.hint() {
                    Some(hint) => SubmitOutcome::Invalid {
                        hint: hint.to_string(),
                    },
                    None => SubmitOutcome::Busy,
                };
            }
        };

        let in_flight = InFlight {
            state: &self.state,
            armed: true,
        };

        let event = match self.api.analyze(&request).await {
            Ok(profile) => AnalysisEvent::Succeeded(profile),
            Err(e) => {
                tracing::warn!("Analysis request for {} failed: {}", request.website_url, e);
                AnalysisEvent::Failed(e.kind())
            }
        };

        SubmitOutcome::Completed(in_flight.resolve(event).state)
    }
}

/// Apply one event atomically and return the resulting transition
fn apply_event(sender: &watch::Sender<AnalysisState>, event: AnalysisEvent) -> Transition {
    let mut next = Transition {
        state: AnalysisState::default(),
        request: None,
    };
    sender.send_modify(|state| {
        next = transition(std::mem::take(state), event);
        *state = next.state.clone();
    });
    next
}

/// Owns the `Submitting` state of one accepted submit
///
/// If the submit future is dropped before the request resolves, the drop
/// fails the analysis so the session accepts new submits again.
struct InFlight<'a> {
    state: &'a watch::Sender<AnalysisState>,
    armed: bool,
}

impl InFlight<'_> {
    fn resolve(mut self, event: AnalysisEvent) -> Transition {
        self.armed = false;
        apply_event(self.state, event)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("Analysis request abandoned before it resolved");
            apply_event(self.state, AnalysisEvent::Failed(FailureKind::Transport));
        }
    }
}
