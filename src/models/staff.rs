//! Directory records: doctors, pharmacists and the admin login.

use serde::{Deserialize, Serialize};

/// A consulting doctor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialization: String,
    /// Working days, e.g. `"Mon-Fri"`
    pub availability: String,
    /// Outpatient hours, e.g. `"09:00 AM - 01:00 PM"`
    pub opd_hours: String,
}

/// A pharmacist on the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pharmacist {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub shift: String,
    pub license_number: String,
    /// Login for the pharmacist panel. The gate is cosmetic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Pharmacist {
    /// True when both credentials are set and equal the given pair.
    #[must_use]
    pub fn accepts(&self, username: &str, password: &str) -> bool {
        self.username.as_deref() == Some(username) && self.password.as_deref() == Some(password)
    }
}

/// Credentials of the admin panel. Not a security boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    #[must_use]
    pub fn accepts(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}
