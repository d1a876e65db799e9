pub mod client;
pub mod config;
pub mod payload;
pub mod transport;

pub use client::{is_attachment_rejection, MockRelayTransport, SubmissionClient, SubmissionReport};
pub use config::RelayConfig;
pub use payload::SubmissionPayload;
pub use transport::{HttpRelayTransport, RelayResponse, RelayTransport};

/// Errors raised while delivering a booking to the form relay
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Relay response could not be parsed: {0}")]
    InvalidResponse(String),

    #[error("Relay rejected the submission: {message}")]
    Rejected { message: String },
}
