use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub vehicle: String,
    /// Requested date, stored exactly as the customer submitted it.
    pub date: String,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Denied,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Denied => "denied",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "accepted" => BookingStatus::Accepted,
            "denied" => BookingStatus::Denied,
            _ => BookingStatus::Pending,
        }
    }

    /// Maps an operator button action to a decision. Anything that is not an
    /// explicit accept counts as a denial.
    pub fn from_action(action: &str) -> Self {
        if action == "aceptar" {
            BookingStatus::Accepted
        } else {
            BookingStatus::Denied
        }
    }
}
