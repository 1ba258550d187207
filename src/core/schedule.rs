//! Scheduling business logic - appointments and the staff directory.
//!
//! Plain CRUD with linear scans. Appointment status changes are written as
//! given unless the strict transition policy is selected.

use crate::{
    errors::{Error, Result},
    models::{
        Appointment, AppointmentStatus, BookingRequest, Doctor, Pharmacist, UNKNOWN, new_id,
    },
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Slots offered by the booking portal, independent of the doctor's hours.
pub const DEFAULT_SLOTS: [&str; 10] = [
    "10:00 AM", "10:15 AM", "10:30 AM", "10:45 AM", "11:00 AM", "11:15 AM", "11:30 AM",
    "05:00 PM", "05:15 PM", "05:30 PM",
];

/// Whether appointment status updates are checked against the lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Write any status unconditionally
    #[default]
    Lenient,
    /// Reject moves that [`AppointmentStatus::can_transition_to`] forbids
    Strict,
}

/// Appointments, doctors and pharmacists.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schedule {
    appointments: Vec<Appointment>,
    doctors: Vec<Doctor>,
    pharmacists: Vec<Pharmacist>,
    policy: TransitionPolicy,
}

impl Schedule {
    #[must_use]
    pub const fn new(
        appointments: Vec<Appointment>,
        doctors: Vec<Doctor>,
        pharmacists: Vec<Pharmacist>,
        policy: TransitionPolicy,
    ) -> Self {
        Self {
            appointments,
            doctors,
            pharmacists,
            policy,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub const fn set_policy(&mut self, policy: TransitionPolicy) {
        self.policy = policy;
    }

    // ---------------------------------------------------------------------
    // Appointments
    // ---------------------------------------------------------------------

    /// Books an appointment in `BOOKED` status.
    pub fn book_appointment(&mut self, request: BookingRequest) -> Appointment {
        let patient = request
            .patient
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let appointment = Appointment {
            id: new_id("apt"),
            patient,
            doctor_id: request.doctor_id,
            date: request.date,
            time: request.time,
            status: AppointmentStatus::Booked,
        };
        info!(id = %appointment.id, doctor_id = %appointment.doctor_id, date = %appointment.date, "appointment booked");
        self.appointments.push(appointment.clone());
        appointment
    }

    /// Sets an appointment's status.
    ///
    /// Returns `Ok(false)` for an unknown id.
    ///
    /// # Errors
    /// Under [`TransitionPolicy::Strict`], returns `InvalidTransition` when the
    /// move goes backwards or leaves a terminal status.
    pub fn update_appointment_status(
        &mut self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<bool> {
        let Some(appointment) = self.appointments.iter_mut().find(|a| a.id == appointment_id)
        else {
            debug!(appointment_id, "status update for unknown appointment ignored");
            return Ok(false);
        };

        if self.policy == TransitionPolicy::Strict && !appointment.status.can_transition_to(status)
        {
            return Err(Error::InvalidTransition {
                from: appointment.status,
                to: status,
            });
        }

        info!(appointment_id, from = %appointment.status, to = %status, "appointment status updated");
        appointment.status = status;
        Ok(true)
    }

    #[must_use]
    pub fn appointment(&self, appointment_id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == appointment_id)
    }

    #[must_use]
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    #[must_use]
    pub fn appointments_on(&self, date: NaiveDate) -> Vec<&Appointment> {
        self.appointments.iter().filter(|a| a.date == date).collect()
    }

    #[must_use]
    pub fn appointments_with_status(&self, status: AppointmentStatus) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.status == status)
            .collect()
    }

    #[must_use]
    pub fn appointments_for_doctor(&self, doctor_id: &str) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id)
            .collect()
    }

    /// Bookable slots for a doctor. The list is static.
    #[must_use]
    pub fn available_slots(&self, _doctor: &Doctor) -> Vec<&'static str> {
        DEFAULT_SLOTS.to_vec()
    }

    // ---------------------------------------------------------------------
    // Doctors
    // ---------------------------------------------------------------------

    pub fn add_doctor(&mut self, doctor: Doctor) {
        self.doctors.push(doctor);
    }

    /// Replaces the doctor with the same id. Returns `false` if absent.
    pub fn edit_doctor(&mut self, doctor: Doctor) -> bool {
        match self.doctors.iter_mut().find(|d| d.id == doctor.id) {
            Some(slot) => {
                *slot = doctor;
                true
            }
            None => false,
        }
    }

    /// Removes a doctor; their appointments keep the dangling id.
    pub fn delete_doctor(&mut self, doctor_id: &str) -> Option<Doctor> {
        let index = self.doctors.iter().position(|d| d.id == doctor_id)?;
        Some(self.doctors.remove(index))
    }

    #[must_use]
    pub fn doctor(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == doctor_id)
    }

    #[must_use]
    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Display name for a possibly dangling doctor reference.
    #[must_use]
    pub fn doctor_name(&self, doctor_id: &str) -> &str {
        self.doctor(doctor_id).map_or(UNKNOWN, |d| d.name.as_str())
    }

    // ---------------------------------------------------------------------
    // Pharmacists
    // ---------------------------------------------------------------------

    pub fn add_pharmacist(&mut self, pharmacist: Pharmacist) {
        self.pharmacists.push(pharmacist);
    }

    pub fn edit_pharmacist(&mut self, pharmacist: Pharmacist) -> bool {
        match self.pharmacists.iter_mut().find(|p| p.id == pharmacist.id) {
            Some(slot) => {
                *slot = pharmacist;
                true
            }
            None => false,
        }
    }

    pub fn delete_pharmacist(&mut self, pharmacist_id: &str) -> Option<Pharmacist> {
        let index = self.pharmacists.iter().position(|p| p.id == pharmacist_id)?;
        Some(self.pharmacists.remove(index))
    }

    #[must_use]
    pub fn pharmacists(&self) -> &[Pharmacist] {
        &self.pharmacists
    }

    /// Finds the pharmacist whose panel login matches. Cosmetic gate only.
    #[must_use]
    pub fn pharmacist_login(&self, username: &str, password: &str) -> Option<&Pharmacist> {
        self.pharmacists
            .iter()
            .find(|p| p.accepts(username, password))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn booking(patient: Option<&str>, doctor_id: &str) -> BookingRequest {
        BookingRequest {
            patient: patient.map(str::to_string),
            doctor_id: doctor_id.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            time: "10:30 AM".to_string(),
        }
    }

    #[test]
    fn test_book_appointment() {
        let mut schedule = Schedule::default();
        let appointment = schedule.book_appointment(booking(Some("Rajesh Kumar"), "d1"));

        assert!(appointment.id.starts_with("apt-"));
        assert_eq!(appointment.status, AppointmentStatus::Booked);
        assert_eq!(appointment.patient, "Rajesh Kumar");
        assert_eq!(schedule.appointment(&appointment.id), Some(&appointment));
    }

    #[test]
    fn test_book_without_patient_name() {
        let mut schedule = Schedule::default();
        assert_eq!(schedule.book_appointment(booking(None, "d1")).patient, UNKNOWN);
        assert_eq!(
            schedule.book_appointment(booking(Some("  "), "d1")).patient,
            UNKNOWN
        );
    }

    #[test]
    fn test_lenient_policy_writes_any_status() -> Result<()> {
        let mut schedule = Schedule::default();
        let id = schedule.book_appointment(booking(Some("Anita"), "d2")).id;

        assert!(schedule.update_appointment_status(&id, AppointmentStatus::Completed)?);
        assert!(schedule.update_appointment_status(&id, AppointmentStatus::Booked)?);
        assert_eq!(
            schedule.appointment(&id).unwrap().status,
            AppointmentStatus::Booked
        );
        assert!(!schedule.update_appointment_status("apt-missing", AppointmentStatus::Booked)?);
        Ok(())
    }

    #[test]
    fn test_strict_policy_enforces_lifecycle() -> Result<()> {
        let mut schedule = Schedule::default();
        schedule.set_policy(TransitionPolicy::Strict);
        let id = schedule.book_appointment(booking(Some("Anita"), "d2")).id;

        assert!(schedule.update_appointment_status(&id, AppointmentStatus::CheckedIn)?);
        assert!(schedule.update_appointment_status(&id, AppointmentStatus::Completed)?);

        let result = schedule.update_appointment_status(&id, AppointmentStatus::Cancelled);
        assert!(matches!(
            result,
            Err(Error::InvalidTransition {
                from: AppointmentStatus::Completed,
                to: AppointmentStatus::Cancelled,
            })
        ));
        assert_eq!(
            schedule.appointment(&id).unwrap().status,
            AppointmentStatus::Completed
        );
        Ok(())
    }

    #[test]
    fn test_appointment_filters() -> Result<()> {
        let mut schedule = Schedule::default();
        let first = schedule.book_appointment(booking(Some("A"), "d1")).id;
        schedule.book_appointment(booking(Some("B"), "d2"));
        let mut later = booking(Some("C"), "d1");
        later.date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        schedule.book_appointment(later);
        schedule.update_appointment_status(&first, AppointmentStatus::CheckedIn)?;

        let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(schedule.appointments_on(day).len(), 2);
        assert_eq!(schedule.appointments_for_doctor("d1").len(), 2);
        assert_eq!(
            schedule
                .appointments_with_status(AppointmentStatus::Booked)
                .len(),
            2
        );
        Ok(())
    }

    #[test]
    fn test_doctor_crud_and_unknown_fallback() {
        let mut schedule = Schedule::default();
        schedule.add_doctor(doctor("d1", "Dr. Aarav Sharma"));

        let mut edited = doctor("d1", "Dr. Aarav Sharma");
        edited.opd_hours = "10:00 AM - 02:00 PM".to_string();
        assert!(schedule.edit_doctor(edited));
        assert_eq!(schedule.doctor("d1").unwrap().opd_hours, "10:00 AM - 02:00 PM");
        assert!(!schedule.edit_doctor(doctor("d9", "Nobody")));

        assert_eq!(schedule.doctor_name("d1"), "Dr. Aarav Sharma");
        assert!(schedule.delete_doctor("d1").is_some());
        assert!(schedule.delete_doctor("d1").is_none());
        assert_eq!(schedule.doctor_name("d1"), UNKNOWN);
    }

    #[test]
    fn test_pharmacist_crud_and_login() {
        let mut schedule = Schedule::default();
        let mut ramesh = pharmacist("ph1", "Ramesh Gupta");
        schedule.add_pharmacist(ramesh.clone());
        assert!(schedule.pharmacist_login("ramesh", "pw").is_none());

        ramesh.username = Some("ramesh".to_string());
        ramesh.password = Some("pw".to_string());
        assert!(schedule.edit_pharmacist(ramesh));
        assert_eq!(schedule.pharmacist_login("ramesh", "pw").unwrap().id, "ph1");

        assert!(!schedule.edit_pharmacist(pharmacist("ph9", "Nobody")));
        assert!(schedule.delete_pharmacist("ph1").is_some());
        assert!(schedule.pharmacists().is_empty());
    }

    #[test]
    fn test_available_slots_are_static() {
        let schedule = Schedule::default();
        let slots = schedule.available_slots(&doctor("d1", "Dr. Aarav Sharma"));
        assert_eq!(slots.len(), DEFAULT_SLOTS.len());
        assert_eq!(slots[0], "10:00 AM");
    }
}
