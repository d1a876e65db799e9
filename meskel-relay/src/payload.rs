use meskel_catalog::find_package;
use meskel_core::{BookingDraft, ReceiptFile};
use std::fmt;

/// The multipart body sent to the form relay: text fields in wire order plus
/// an optional receipt file part.
#[derive(Clone)]
pub struct SubmissionPayload {
    fields: Vec<(String, String)>,
    receipt: Option<ReceiptFile>,
}

impl SubmissionPayload {
    /// Serialize a draft into the relay's wire shape. The receipt file is
    /// attached only when present with a blank text note; the relay treats
    /// the note as a full substitute for the upload.
    pub fn build(draft: &BookingDraft, access_key: &str) -> Self {
        let mut payload = Self {
            fields: Vec::new(),
            receipt: None,
        };

        payload.push("access_key", access_key);
        payload.push("destination", &draft.destination);
        payload.push(
            "startDate",
            draft
                .start_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        );
        payload.push(
            "endTime",
            draft
                .departure_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
        );
        payload.push("fullName", &draft.full_name);
        payload.push("email", draft.email.expose());
        payload.push("phone", draft.phone.expose());
        payload.push("participants", draft.participant_count.to_string());
        payload.push(
            "selectedPackage",
            draft.selected_package.clone().unwrap_or_default(),
        );
        if let Some(pkg) = draft.selected_package.as_deref().and_then(find_package) {
            payload.push("packageTitle", pkg.title);
        }
        payload.push("receiptInfo", &draft.receipt_info);

        if draft.receipt.is_some() && draft.receipt_info.trim().is_empty() {
            payload.receipt = draft.receipt.clone();
        }

        payload
    }

    /// The retry body: same text fields, file part dropped, and a note
    /// recording the attempted upload standing in for a blank receiptInfo.
    pub fn without_attachment(&self) -> Self {
        let mut fields = self.fields.clone();
        if let Some(receipt) = &self.receipt {
            for (key, value) in fields.iter_mut() {
                if key == "receiptInfo" && value.trim().is_empty() {
                    *value = format!(
                        "File upload attempted: {} (Upload failed due to API limitations)",
                        receipt.file_name
                    );
                }
            }
        }
        Self {
            fields,
            receipt: None,
        }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// First value for a wire key, if present
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attachment(&self) -> Option<&ReceiptFile> {
        self.receipt.as_ref()
    }

    pub fn has_attachment(&self) -> bool {
        self.receipt.is_some()
    }

    fn push(&mut self, key: &str, value: impl Into<String>) {
        self.fields.push((key.to_string(), value.into()));
    }
}

impl fmt::Debug for SubmissionPayload {
    // Field values carry PII; log keys and the attachment flag only
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.fields.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("SubmissionPayload")
            .field("fields", &keys)
            .field("attachment", &self.receipt.is_some())
            .finish()
    }
}
