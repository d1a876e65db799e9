use crate::pii::Sensitive;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Party size is a closed 1-10 select in the wizard; setters clamp into it
pub const MIN_PARTICIPANTS: u8 = 1;
pub const MAX_PARTICIPANTS: u8 = 10;

/// The field snapshot collected across the wizard. One draft exists per
/// session; it is mutated in place and reset wholesale, never versioned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDraft {
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub departure_time: Option<NaiveTime>,
    pub full_name: String,
    pub email: Sensitive<String>,
    pub phone: Sensitive<String>,
    pub participant_count: u8,
    pub selected_package: Option<String>,
    pub receipt: Option<ReceiptFile>,
    pub receipt_info: String,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            destination: String::new(),
            start_date: None,
            departure_time: None,
            full_name: String::new(),
            email: Sensitive::default(),
            phone: Sensitive::default(),
            participant_count: MIN_PARTICIPANTS,
            selected_package: None,
            receipt: None,
            receipt_info: String::new(),
        }
    }
}

/// An uploaded payment receipt (image or PDF)
#[derive(Clone, Serialize, Deserialize)]
pub struct ReceiptFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ReceiptFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

impl fmt::Debug for ReceiptFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiptFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}
