use serde::{Deserialize, Serialize};

/// The closed set of wizard steps, in visit order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    Destination,
    TravelDates,
    PersonalInfo,
    TourPackage,
    Payment,
    Receipt,
}

impl Step {
    pub const FIRST: Step = Step::Destination;
    pub const LAST: Step = Step::Receipt;

    /// All steps in visit order
    pub fn all() -> [Step; 6] {
        [
            Step::Destination,
            Step::TravelDates,
            Step::PersonalInfo,
            Step::TourPackage,
            Step::Payment,
            Step::Receipt,
        ]
    }

    /// 1-based position within the wizard
    pub fn index(self) -> u8 {
        match self {
            Step::Destination => 1,
            Step::TravelDates => 2,
            Step::PersonalInfo => 3,
            Step::TourPackage => 4,
            Step::Payment => 5,
            Step::Receipt => 6,
        }
    }

    pub fn from_index(index: u8) -> Option<Step> {
        match index {
            1 => Some(Step::Destination),
            2 => Some(Step::TravelDates),
            3 => Some(Step::PersonalInfo),
            4 => Some(Step::TourPackage),
            5 => Some(Step::Payment),
            6 => Some(Step::Receipt),
            _ => None,
        }
    }

    /// The step after this one, None at the last step
    pub fn next(self) -> Option<Step> {
        Step::from_index(self.index() + 1)
    }

    /// The step before this one, None at the first step
    pub fn prev(self) -> Option<Step> {
        Step::from_index(self.index().saturating_sub(1))
    }

    /// Human label shown in the step indicator
    pub fn title(self) -> &'static str {
        match self {
            Step::Destination => "Destination",
            Step::TravelDates => "Travel Dates",
            Step::PersonalInfo => "Personal Info",
            Step::TourPackage => "Tour Package",
            Step::Payment => "Payment",
            Step::Receipt => "Receipt",
        }
    }
}
