//! Appointment operations.
//!
//! # Invariants
//! - The overlap precondition runs at insert and at update; an update
//!   excludes the record's own id so a time shift never conflicts with
//!   itself.
//! - A merged update that lands in `cancelada` skips the check — cancelled
//!   visits are invisible to scheduling.

use crate::model::{Appointment, AppointmentPatch, NewAppointment};
use crate::schedule;

use super::{iso_now, new_id, ClinicStore, StoreResult, ValidationError};

impl ClinicStore {
    /// Inserts a new appointment after the scheduling-conflict precondition.
    pub fn add_appointment(&mut self, data: NewAppointment) -> StoreResult<Appointment> {
        if !data.status.is_cancelled()
            && schedule::has_conflict(
                &data.data,
                &data.hora_inicio,
                &data.hora_fim,
                &self.appointments,
                None,
            )
        {
            return Err(ValidationError::ScheduleConflict {
                data: data.data,
                hora_inicio: data.hora_inicio,
                hora_fim: data.hora_fim,
            });
        }

        let appointment = data.into_appointment(new_id(), iso_now());
        self.appointments.push(appointment.clone());
        Ok(appointment)
    }

    /// Merges `patch`, re-running the conflict check against the merged
    /// values. Silent no-op when the id is unknown.
    pub fn update_appointment(&mut self, id: &str, patch: &AppointmentPatch) -> StoreResult<()> {
        let Some(index) = self.appointments.iter().position(|a| a.id == id) else {
            return Ok(());
        };

        let mut candidate = self.appointments[index].clone();
        patch.apply_to(&mut candidate);

        if !candidate.status.is_cancelled()
            && schedule::has_conflict(
                &candidate.data,
                &candidate.hora_inicio,
                &candidate.hora_fim,
                &self.appointments,
                Some(id),
            )
        {
            return Err(ValidationError::ScheduleConflict {
                data: candidate.data,
                hora_inicio: candidate.hora_inicio,
                hora_fim: candidate.hora_fim,
            });
        }

        candidate.updated_at = iso_now();
        self.appointments[index] = candidate;
        Ok(())
    }

    pub fn remove_appointment(&mut self, id: &str) {
        self.appointments.retain(|a| a.id != id);
    }

    pub fn get_appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn list_appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// All appointments on `date`, ordered by start time.
    ///
    /// "HH:MM" values are zero-padded, so lexicographic order is
    /// chronological order.
    pub fn appointments_by_date(&self, date: &str) -> Vec<&Appointment> {
        let mut matches: Vec<&Appointment> = self
            .appointments
            .iter()
            .filter(|a| a.data == date)
            .collect();
        matches.sort_by(|a, b| a.hora_inicio.cmp(&b.hora_inicio));
        matches
    }

    pub fn appointments_by_patient(&self, patient_id: &str) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .collect()
    }

    /// Exposes the overlap check for slot pickers, without mutating state.
    pub fn check_appointment_conflict(
        &self,
        date: &str,
        start: &str,
        end: &str,
        exclude_id: Option<&str>,
    ) -> bool {
        schedule::has_conflict(date, start, end, &self.appointments, exclude_id)
    }
}
