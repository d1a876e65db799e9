use meskel_core::{BookingDraft, Step};
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_SHAPE: OnceLock<Regex> = OnceLock::new();

// Shape check only: non-space chars, @, non-space chars, dot, non-space
// chars, anywhere in the value.
fn email_shape() -> &'static Regex {
    EMAIL_SHAPE.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email pattern"))
}

/// Collect the failing-field messages for one step. Pure and deterministic;
/// all applicable checks run and every failing message is kept, in display
/// order. Required fields are only enforced here, when the user tries to
/// leave a step going forward or submits, never per keystroke.
pub fn validate_step(step: Step, draft: &BookingDraft) -> Vec<String> {
    let mut errors = Vec::new();

    match step {
        Step::Destination => {
            if draft.destination.trim().is_empty() {
                errors.push("Please enter your destination".to_string());
            }
        }
        Step::TravelDates => {
            if draft.start_date.is_none() {
                errors.push("Please select a departure date".to_string());
            }
            if draft.departure_time.is_none() {
                errors.push("Please select a departure time".to_string());
            }
        }
        Step::PersonalInfo => {
            if draft.full_name.trim().is_empty() {
                errors.push("Please enter your full name".to_string());
            }
            if draft.email.expose().trim().is_empty() {
                errors.push("Please enter your email address".to_string());
            } else if !email_shape().is_match(draft.email.expose()) {
                errors.push("Please enter a valid email address".to_string());
            }
            if draft.phone.expose().trim().is_empty() {
                errors.push("Please enter your phone number".to_string());
            }
        }
        Step::TourPackage => {
            if draft.selected_package.is_none() {
                errors.push("Please select a tour package".to_string());
            }
        }
        Step::Payment => {
            // Informational step, nothing to check
        }
        Step::Receipt => {
            if draft.receipt.is_none() && draft.receipt_info.trim().is_empty() {
                errors.push(
                    "Please provide either receipt details or upload a receipt file".to_string(),
                );
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use meskel_core::{ReceiptFile, Sensitive};

    #[test]
    fn test_fresh_draft_fails_destination() {
        let draft = BookingDraft::default();
        assert_eq!(
            validate_step(Step::Destination, &draft),
            vec!["Please enter your destination"]
        );
    }

    #[test]
    fn test_whitespace_destination_rejected() {
        let mut draft = BookingDraft::default();
        draft.destination = "   ".to_string();
        assert_eq!(
            validate_step(Step::Destination, &draft),
            vec!["Please enter your destination"]
        );
    }

    #[test]
    fn test_travel_dates_collect_both_messages() {
        let draft = BookingDraft::default();
        assert_eq!(
            validate_step(Step::TravelDates, &draft),
            vec![
                "Please select a departure date",
                "Please select a departure time",
            ]
        );
    }

    #[test]
    fn test_complete_travel_dates_pass() {
        let mut draft = BookingDraft::default();
        draft.destination = "Lalibela".to_string();
        draft.start_date = NaiveDate::from_ymd_opt(2025, 6, 1);
        draft.departure_time = NaiveTime::from_hms_opt(9, 0, 0);
        assert!(validate_step(Step::TravelDates, &draft).is_empty());
    }

    #[test]
    fn test_personal_info_collects_all_failures_in_order() {
        let draft = BookingDraft::default();
        assert_eq!(
            validate_step(Step::PersonalInfo, &draft),
            vec![
                "Please enter your full name",
                "Please enter your email address",
                "Please enter your phone number",
            ]
        );
    }

    #[test]
    fn test_email_shape() {
        let mut draft = BookingDraft::default();
        draft.full_name = "Abebe Bikila".to_string();
        draft.phone = Sensitive::new("+251911000000".to_string());

        // Non-empty but missing the @ still fails, with the shape message
        draft.email = Sensitive::new("abebe.example.com".to_string());
        assert_eq!(
            validate_step(Step::PersonalInfo, &draft),
            vec!["Please enter a valid email address"]
        );

        // Missing the domain dot
        draft.email = Sensitive::new("abebe@example".to_string());
        assert_eq!(
            validate_step(Step::PersonalInfo, &draft),
            vec!["Please enter a valid email address"]
        );

        draft.email = Sensitive::new("abebe@example.com".to_string());
        assert!(validate_step(Step::PersonalInfo, &draft).is_empty());
    }

    #[test]
    fn test_package_required() {
        let draft = BookingDraft::default();
        assert_eq!(
            validate_step(Step::TourPackage, &draft),
            vec!["Please select a tour package"]
        );

        let mut draft = BookingDraft::default();
        draft.selected_package = Some("erta-ale".to_string());
        assert!(validate_step(Step::TourPackage, &draft).is_empty());
    }

    #[test]
    fn test_payment_step_is_informational() {
        // Clean on a completely empty draft
        assert!(validate_step(Step::Payment, &BookingDraft::default()).is_empty());
    }

    #[test]
    fn test_receipt_accepts_file_or_note() {
        let draft = BookingDraft::default();
        assert_eq!(
            validate_step(Step::Receipt, &draft),
            vec!["Please provide either receipt details or upload a receipt file"]
        );

        let mut draft = BookingDraft::default();
        draft.receipt = Some(ReceiptFile::new("receipt.jpg", "image/jpeg", vec![0xff]));
        assert!(validate_step(Step::Receipt, &draft).is_empty());

        let mut draft = BookingDraft::default();
        draft.receipt_info = "Paid via CBE transfer #12345".to_string();
        assert!(validate_step(Step::Receipt, &draft).is_empty());

        // A whitespace-only note does not count
        let mut draft = BookingDraft::default();
        draft.receipt_info = "  ".to_string();
        assert_eq!(validate_step(Step::Receipt, &draft).len(), 1);
    }
}
