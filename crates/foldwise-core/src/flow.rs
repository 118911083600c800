//! Generation flow: `Idle → Validating → Requesting → Success | Failed → Idle`.
//!
//! Only `Requesting` outlives a call. Every submit is stamped with a
//! [`Ticket`]; a completion carrying any ticket other than the in-flight one
//! is discarded, so a newer submit always supersedes an older request.

use crate::error::{RequestError, ValidationError};
use crate::model::PatternResult;
use crate::request::PlannedRequest;
use crate::view_model::PatternViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    Validating,
    Requesting {
        ticket: Ticket,
    },
    Success,
    Failed,
}

impl FlowState {
    fn can_move_to(&self, next: &FlowState) -> bool {
        use FlowState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Requesting { .. }, Validating)
                | (Validating, Idle)
                | (Validating, Requesting { .. })
                | (Requesting { .. }, Success)
                | (Requesting { .. }, Failed)
                | (Requesting { .. }, Idle)
                | (Success, Idle)
                | (Failed, Idle)
        )
    }
}

/// A request cleared for sending.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub ticket: Ticket,
    pub planned: PlannedRequest,
    /// In-flight request this submission replaced; its result will be dropped.
    pub superseded: Option<Ticket>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    Applied { folds: usize },
    Failed(RequestError),
    /// The response belonged to a request that was replaced or cancelled.
    Stale,
}

#[derive(Debug, Default)]
pub struct GenerationFlow {
    state: FlowState,
    next_ticket: u64,
}

impl GenerationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn in_flight(&self) -> Option<Ticket> {
        match self.state {
            FlowState::Requesting { ticket } => Some(ticket),
            _ => None,
        }
    }

    pub fn is_requesting(&self) -> bool {
        self.in_flight().is_some()
    }

    fn transition(&mut self, next: FlowState) {
        debug_assert!(
            self.state.can_move_to(&next),
            "illegal flow transition {:?} -> {:?}",
            self.state,
            next
        );
        tracing::trace!(from = ?self.state, to = ?next, "generation flow");
        self.state = next;
    }

    /// Run validation and, if it passes, enter `Requesting` with a new ticket.
    ///
    /// A validation failure leaves an already in-flight request untouched.
    pub fn begin<F>(&mut self, validate: F) -> Result<Submission, ValidationError>
    where
        F: FnOnce() -> Result<PlannedRequest, ValidationError>,
    {
        let previous = self.in_flight();
        self.transition(FlowState::Validating);
        match validate() {
            Ok(planned) => {
                self.next_ticket += 1;
                let ticket = Ticket(self.next_ticket);
                self.transition(FlowState::Requesting { ticket });
                if let Some(old) = previous {
                    tracing::info!(old = old.id(), new = ticket.id(), "request superseded");
                }
                Ok(Submission {
                    ticket,
                    planned,
                    superseded: previous,
                })
            }
            Err(err) => {
                match previous {
                    Some(ticket) => self.state = FlowState::Requesting { ticket },
                    None => self.transition(FlowState::Idle),
                }
                tracing::debug!(error = %err, "generation rejected by validation");
                Err(err)
            }
        }
    }

    /// Settle a response. Only the in-flight ticket may touch the view model.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        response: Result<PatternResult, RequestError>,
        view_model: &mut PatternViewModel,
    ) -> FlowOutcome {
        if self.in_flight() != Some(ticket) {
            tracing::debug!(ticket = ticket.id(), "dropping stale response");
            return FlowOutcome::Stale;
        }
        let outcome = match response {
            Ok(result) => {
                self.transition(FlowState::Success);
                let folds = result.folds.len();
                view_model.ingest(result);
                FlowOutcome::Applied { folds }
            }
            Err(err) => {
                self.transition(FlowState::Failed);
                tracing::warn!(error = %err, "pattern generation failed");
                FlowOutcome::Failed(err)
            }
        };
        self.transition(FlowState::Idle);
        outcome
    }

    /// Abandon the in-flight request, if any.
    pub fn cancel(&mut self) -> Option<Ticket> {
        let ticket = self.in_flight()?;
        self.transition(FlowState::Idle);
        tracing::info!(ticket = ticket.id(), "generation cancelled");
        Some(ticket)
    }
}
