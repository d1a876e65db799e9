use crate::payload::SubmissionPayload;
use crate::RelayError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Structured reply from the form relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl RelayResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Seam between the submission client and the wire
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// Perform one POST of the payload and parse the relay's reply
    async fn deliver(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<RelayResponse, RelayError>;
}

/// Multipart POST transport against the live relay endpoint
pub struct HttpRelayTransport {
    http: reqwest::Client,
}

impl HttpRelayTransport {
    pub fn new() -> Result<Self, RelayError> {
        // Timeout is a transport-layer default; the submission flow itself
        // defines none.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl RelayTransport for HttpRelayTransport {
    async fn deliver(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<RelayResponse, RelayError> {
        let mut form = reqwest::multipart::Form::new();
        for (key, value) in payload.fields() {
            form = form.text(key.clone(), value.clone());
        }
        if let Some(receipt) = payload.attachment() {
            let part = reqwest::multipart::Part::bytes(receipt.bytes.clone())
                .file_name(receipt.file_name.clone())
                .mime_str(&receipt.content_type)?;
            form = form.part("receipt", part);
        }

        tracing::debug!(endpoint, "Posting booking to the relay");
        let response = self.http.post(endpoint).multipart(form).send().await?;
        response
            .json::<RelayResponse>()
            .await
            .map_err(|e| RelayError::InvalidResponse(e.to_string()))
    }
}
