pub mod draft;
pub mod pii;
pub mod step;

pub use draft::{BookingDraft, ReceiptFile, MAX_PARTICIPANTS, MIN_PARTICIPANTS};
pub use pii::Sensitive;
pub use step::Step;
