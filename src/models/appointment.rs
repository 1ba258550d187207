//! Appointment record and its status state machine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an appointment is in its lifecycle.
///
/// Forward order is `Booked -> CheckedIn -> Completed`; `Cancelled` can be
/// reached from `Booked` or `CheckedIn` only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Booked,
    CheckedIn,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Whether moving from `self` to `next` respects the lifecycle.
    /// Staying in the same status is always allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Booked, Self::Booked | Self::CheckedIn | Self::Completed | Self::Cancelled)
                | (Self::CheckedIn, Self::CheckedIn | Self::Completed | Self::Cancelled)
                | (Self::Completed, Self::Completed)
                | (Self::Cancelled, Self::Cancelled)
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Booked => "BOOKED",
            Self::CheckedIn => "CHECKED_IN",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booked consultation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique identifier, `apt-<uuid>`
    pub id: String,
    /// Free-text patient name; patients are not a normalized entity
    pub patient: String,
    /// Doctor seen (weak reference)
    pub doctor_id: String,
    /// Day of the visit
    pub date: NaiveDate,
    /// Slot label such as `"10:30 AM"`
    pub time: String,
    pub status: AppointmentStatus,
}

/// Input of `Schedule::book_appointment`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Patient name; blank names are booked as `"Unknown"`
    #[serde(default)]
    pub patient: Option<String>,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub time: String,
}
