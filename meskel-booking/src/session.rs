use crate::validation::validate_step;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use meskel_core::{BookingDraft, ReceiptFile, Sensitive, Step, MAX_PARTICIPANTS, MIN_PARTICIPANTS};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    Editing,
    Submitting,
    Submitted,
}

/// The single owned state container for one booking form session: the draft
/// snapshot, the current step, the lifecycle phase and any pending
/// validation errors. All mutation goes through guarded methods so the step
/// index only ever moves by one and edits are impossible mid-submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSession {
    id: Uuid,
    draft: BookingDraft,
    current_step: Step,
    phase: SessionPhase,
    validation_errors: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BookingSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            draft: BookingDraft::default(),
            current_step: Step::FIRST,
            phase: SessionPhase::Editing,
            validation_errors: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SessionPhase::Submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == SessionPhase::Submitted
    }

    pub fn validation_errors(&self) -> &[String] {
        &self.validation_errors
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Try to move forward one step. The current step must validate clean;
    /// otherwise the failures are kept on the session and the step does not
    /// move. At the last step this is a no-op.
    pub fn advance(&mut self) -> Result<Step, SessionError> {
        self.ensure_editing()?;

        let errors = validate_step(self.current_step, &self.draft);
        if !errors.is_empty() {
            tracing::debug!(step = self.current_step.index(), "Step validation failed");
            self.validation_errors = errors.clone();
            return Err(SessionError::StepIncomplete { errors });
        }

        self.validation_errors.clear();
        if let Some(next) = self.current_step.next() {
            tracing::debug!(from = self.current_step.index(), to = next.index(), "Advancing");
            self.current_step = next;
            self.touch();
        }
        Ok(self.current_step)
    }

    /// Move back one step. Going back never requires the left step to be
    /// valid; pending errors are always cleared. At the first step this is
    /// a no-op.
    pub fn retreat(&mut self) -> Result<Step, SessionError> {
        self.ensure_editing()?;

        self.validation_errors.clear();
        if let Some(prev) = self.current_step.prev() {
            self.current_step = prev;
            self.touch();
        }
        Ok(self.current_step)
    }

    pub fn set_destination(&mut self, destination: impl Into<String>) -> Result<(), SessionError> {
        self.edit(|draft| draft.destination = destination.into())
    }

    pub fn set_start_date(&mut self, date: NaiveDate) -> Result<(), SessionError> {
        self.edit(|draft| draft.start_date = Some(date))
    }

    pub fn set_departure_time(&mut self, time: NaiveTime) -> Result<(), SessionError> {
        self.edit(|draft| draft.departure_time = Some(time))
    }

    pub fn set_full_name(&mut self, full_name: impl Into<String>) -> Result<(), SessionError> {
        self.edit(|draft| draft.full_name = full_name.into())
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), SessionError> {
        self.edit(|draft| draft.email = Sensitive::new(email.into()))
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> Result<(), SessionError> {
        self.edit(|draft| draft.phone = Sensitive::new(phone.into()))
    }

    /// Party size comes from a closed 1-10 select; out-of-range values are
    /// clamped rather than rejected.
    pub fn set_participant_count(&mut self, count: u8) -> Result<(), SessionError> {
        self.edit(|draft| draft.participant_count = count.clamp(MIN_PARTICIPANTS, MAX_PARTICIPANTS))
    }

    pub fn select_package(&mut self, package_id: impl Into<String>) -> Result<(), SessionError> {
        self.edit(|draft| draft.selected_package = Some(package_id.into()))
    }

    pub fn attach_receipt(&mut self, receipt: ReceiptFile) -> Result<(), SessionError> {
        self.edit(|draft| draft.receipt = Some(receipt))
    }

    pub fn set_receipt_info(&mut self, info: impl Into<String>) -> Result<(), SessionError> {
        self.edit(|draft| draft.receipt_info = info.into())
    }

    /// Record validation failures for display (the submit path validates
    /// outside of advance())
    pub fn record_errors(&mut self, errors: Vec<String>) {
        self.validation_errors = errors;
    }

    /// Transition: Editing -> Submitting. Rejects re-entrant submissions.
    pub fn begin_submission(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Editing => {
                tracing::info!(session = %self.id, "Submission started");
                self.phase = SessionPhase::Submitting;
                self.touch();
                Ok(())
            }
            SessionPhase::Submitting => Err(SessionError::SubmissionInFlight),
            SessionPhase::Submitted => Err(SessionError::AlreadySubmitted),
        }
    }

    /// Transition: Submitting -> Submitted (terminal)
    pub fn mark_submitted(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Submitting {
            return Err(self.invalid_transition(SessionPhase::Submitted));
        }
        tracing::info!(session = %self.id, "Booking submitted");
        self.phase = SessionPhase::Submitted;
        self.touch();
        Ok(())
    }

    /// Transition: Submitting -> Editing, after a failed delivery. The
    /// draft is left untouched so the user can retry manually.
    pub fn resume_editing(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Submitting {
            return Err(self.invalid_transition(SessionPhase::Editing));
        }
        self.phase = SessionPhase::Editing;
        self.touch();
        Ok(())
    }

    /// Start over with a fresh default draft at the first step (the "book
    /// another" path). Not allowed while a submission is in flight.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Submitting {
            return Err(SessionError::SubmissionInFlight);
        }
        tracing::info!(session = %self.id, "Session reset");
        self.draft = BookingDraft::default();
        self.current_step = Step::FIRST;
        self.phase = SessionPhase::Editing;
        self.validation_errors.clear();
        self.touch();
        Ok(())
    }

    fn ensure_editing(&self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Editing => Ok(()),
            SessionPhase::Submitting => Err(SessionError::SubmissionInFlight),
            SessionPhase::Submitted => Err(SessionError::AlreadySubmitted),
        }
    }

    fn edit(&mut self, apply: impl FnOnce(&mut BookingDraft)) -> Result<(), SessionError> {
        self.ensure_editing()?;
        apply(&mut self.draft);
        // Stale errors must not linger once the user starts correcting input
        self.validation_errors.clear();
        self.touch();
        Ok(())
    }

    fn invalid_transition(&self, to: SessionPhase) -> SessionError {
        SessionError::InvalidTransition {
            from: format!("{:?}", self.phase),
            to: format!("{:?}", to),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for BookingSession {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Step incomplete: {}", .errors.join(", "))]
    StepIncomplete { errors: Vec<String> },

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("Booking already submitted")]
    AlreadySubmitted,

    #[error("Invalid phase transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}
