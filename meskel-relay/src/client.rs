use crate::config::RelayConfig;
use crate::payload::SubmissionPayload;
use crate::transport::{HttpRelayTransport, RelayResponse, RelayTransport};
use crate::RelayError;
use async_trait::async_trait;
use meskel_core::BookingDraft;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Fallback shown when the relay rejects without a message
const GENERIC_FAILURE: &str = "Something went wrong";

/// The relay flags refused file uploads with this marker inside the failure
/// message. String-sniffing a remote message is fragile, so the coupling
/// lives behind this one predicate.
pub fn is_attachment_rejection(message: &str) -> bool {
    message.contains("Pro feature")
}

/// Terminal outcome of an accepted submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionReport {
    /// True when acceptance came from the attachment-dropped retry
    pub retried: bool,
    pub message: Option<String>,
}

/// Delivers a finished draft to the form relay, with a single retry when the
/// relay refuses the file attachment specifically. Callers must have
/// validated the terminal step already; no re-validation happens here.
pub struct SubmissionClient {
    config: RelayConfig,
    transport: Arc<dyn RelayTransport>,
}

impl SubmissionClient {
    pub fn new(config: RelayConfig, transport: Arc<dyn RelayTransport>) -> Self {
        Self { config, transport }
    }

    /// Client wired to the live relay endpoint
    pub fn with_http(config: RelayConfig) -> Result<Self, RelayError> {
        let transport = Arc::new(HttpRelayTransport::new()?);
        Ok(Self::new(config, transport))
    }

    pub async fn submit(&self, draft: &BookingDraft) -> Result<SubmissionReport, RelayError> {
        let payload = SubmissionPayload::build(draft, &self.config.access_key);
        let had_attachment = payload.has_attachment();

        tracing::info!(destination = %draft.destination, "Submitting booking to the relay");
        let response = self.transport.deliver(&self.config.endpoint, &payload).await?;
        if response.success {
            tracing::info!("Relay accepted the booking");
            return Ok(SubmissionReport {
                retried: false,
                message: response.message,
            });
        }

        let message = response.message.unwrap_or_else(|| GENERIC_FAILURE.to_string());
        if had_attachment && is_attachment_rejection(&message) {
            // The relay refused the file part specifically. Send once more
            // without it; a note stands in for the upload.
            tracing::warn!("Relay refused the receipt attachment, retrying without the file");
            let retry_payload = payload.without_attachment();
            let retry = self
                .transport
                .deliver(&self.config.endpoint, &retry_payload)
                .await?;
            if retry.success {
                tracing::info!("Relay accepted the booking on retry");
                return Ok(SubmissionReport {
                    retried: true,
                    message: retry.message,
                });
            }
            let message = retry.message.unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Err(RelayError::Rejected { message });
        }

        Err(RelayError::Rejected { message })
    }
}

/// Scripted transport for tests: pops a queued response per delivery and
/// records every payload it was handed.
pub struct MockRelayTransport {
    responses: Mutex<VecDeque<RelayResponse>>,
    deliveries: Mutex<Vec<SubmissionPayload>>,
}

impl MockRelayTransport {
    pub fn new(responses: Vec<RelayResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            deliveries: Mutex::new(Vec::new()),
        }
    }

    /// Payloads delivered so far, in order
    pub fn deliveries(&self) -> Vec<SubmissionPayload> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RelayTransport for MockRelayTransport {
    async fn deliver(
        &self,
        _endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<RelayResponse, RelayError> {
        self.deliveries.lock().unwrap().push(payload.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| RelayError::InvalidResponse("no scripted response left".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use meskel_core::{ReceiptFile, Sensitive};

    fn valid_draft() -> BookingDraft {
        BookingDraft {
            destination: "Lalibela".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            departure_time: NaiveTime::from_hms_opt(9, 0, 0),
            full_name: "Abebe Bikila".to_string(),
            email: Sensitive::new("abebe@example.com".to_string()),
            phone: Sensitive::new("+251911000000".to_string()),
            participant_count: 2,
            selected_package: Some("rock-churches".to_string()),
            receipt: None,
            receipt_info: "Paid via bank transfer".to_string(),
        }
    }

    fn draft_with_file() -> BookingDraft {
        let mut draft = valid_draft();
        draft.receipt = Some(ReceiptFile::new("receipt.pdf", "application/pdf", vec![1, 2, 3]));
        draft.receipt_info = String::new();
        draft
    }

    fn client_with(responses: Vec<RelayResponse>) -> (SubmissionClient, Arc<MockRelayTransport>) {
        let transport = Arc::new(MockRelayTransport::new(responses));
        let client = SubmissionClient::new(RelayConfig::default(), transport.clone());
        (client, transport)
    }

    #[test]
    fn test_attachment_rejection_marker() {
        assert!(is_attachment_rejection(
            "File upload is available in Pro feature plans only"
        ));
        assert!(!is_attachment_rejection("server error"));
        assert!(!is_attachment_rejection(""));
    }

    #[tokio::test]
    async fn test_submit_success() {
        let (client, transport) = client_with(vec![RelayResponse::accepted()]);

        let report = client.submit(&valid_draft()).await.unwrap();
        assert!(!report.retried);
        assert_eq!(transport.deliveries().len(), 1);
    }

    #[tokio::test]
    async fn test_attachment_rejection_retries_once_without_file() {
        let (client, transport) = client_with(vec![
            RelayResponse::rejected("File uploads are a Pro feature"),
            RelayResponse::accepted(),
        ]);

        let report = client.submit(&draft_with_file()).await.unwrap();
        assert!(report.retried);

        let deliveries = transport.deliveries();
        assert_eq!(deliveries.len(), 2);
        assert!(deliveries[0].has_attachment());
        assert!(!deliveries[1].has_attachment());
        assert_eq!(
            deliveries[1].field("receiptInfo"),
            Some("File upload attempted: receipt.pdf (Upload failed due to API limitations)")
        );
    }

    #[tokio::test]
    async fn test_other_failures_do_not_retry() {
        let (client, transport) =
            client_with(vec![RelayResponse::rejected("server error")]);

        let err = client.submit(&draft_with_file()).await.unwrap_err();
        match err {
            RelayError::Rejected { message } => assert_eq!(message, "server error"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.deliveries().len(), 1);
    }

    #[tokio::test]
    async fn test_rejection_without_file_does_not_retry() {
        // The marker alone is not enough; a file part must have been sent
        let (client, transport) = client_with(vec![
            RelayResponse::rejected("File uploads are a Pro feature"),
        ]);

        let err = client.submit(&valid_draft()).await.unwrap_err();
        assert!(matches!(err, RelayError::Rejected { .. }));
        assert_eq!(transport.deliveries().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_retry_reports_retry_message() {
        let (client, transport) = client_with(vec![
            RelayResponse::rejected("File uploads are a Pro feature"),
            RelayResponse::rejected("mailbox unavailable"),
        ]);

        let err = client.submit(&draft_with_file()).await.unwrap_err();
        match err {
            RelayError::Rejected { message } => assert_eq!(message, "mailbox unavailable"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.deliveries().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_failure_message_uses_generic_fallback() {
        let (client, _transport) = client_with(vec![RelayResponse {
            success: false,
            message: None,
        }]);

        let err = client.submit(&valid_draft()).await.unwrap_err();
        match err {
            RelayError::Rejected { message } => assert_eq!(message, GENERIC_FAILURE),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
