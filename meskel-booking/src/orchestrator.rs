use crate::session::{BookingSession, SessionError};
use crate::validation::validate_step;
use meskel_relay::{RelayError, SubmissionClient, SubmissionReport};

/// Drives a session through its submission: validates the terminal step,
/// flips the in-flight flag, delegates to the relay client and settles the
/// session phase on every exit path.
pub struct SubmissionOrchestrator {
    client: SubmissionClient,
}

impl SubmissionOrchestrator {
    pub fn new(client: SubmissionClient) -> Self {
        Self { client }
    }

    pub async fn submit(
        &self,
        session: &mut BookingSession,
    ) -> Result<SubmissionReport, SubmitError> {
        let errors = validate_step(session.current_step(), session.draft());
        if !errors.is_empty() {
            session.record_errors(errors.clone());
            return Err(SubmitError::Incomplete { errors });
        }

        session.begin_submission()?;
        match self.client.submit(session.draft()).await {
            Ok(report) => {
                session.mark_submitted()?;
                Ok(report)
            }
            Err(err) => {
                // Draft and step survive untouched so the user can retry
                session.resume_editing()?;
                Err(SubmitError::Relay(err))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Required fields missing: {}", .errors.join(", "))]
    Incomplete { errors: Vec<String> },

    #[error("Submission blocked: {0}")]
    Session(#[from] SessionError),

    #[error("Relay delivery failed: {0}")]
    Relay(#[from] RelayError),
}
