//! Appointment time-overlap detection.
//!
//! # Responsibility
//! - Decide whether a candidate `[start, end)` slot collides with any
//!   existing appointment on the same date.
//!
//! # Invariants
//! - Intervals are half-open: back-to-back slots (one ending exactly when
//!   the next starts) never conflict.
//! - Cancelled appointments and the excluded id are never candidates, so a
//!   record cannot conflict with itself during a time-shift update.
//! - Times are clinic-local "HH:MM" wall-clock values; an unparsable time on
//!   either side yields "no conflict" rather than an error.

use crate::model::Appointment;

/// Converts an "HH:MM" value to minutes since midnight.
pub fn time_to_minutes(value: &str) -> Option<u32> {
    let (hours, minutes) = value.split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Returns whether `[start, end)` on `date` overlaps any non-cancelled
/// appointment other than `exclude_id`.
pub fn has_conflict(
    date: &str,
    start: &str,
    end: &str,
    appointments: &[Appointment],
    exclude_id: Option<&str>,
) -> bool {
    let (Some(candidate_start), Some(candidate_end)) = (time_to_minutes(start), time_to_minutes(end))
    else {
        return false;
    };

    appointments
        .iter()
        .filter(|a| a.data == date)
        .filter(|a| !a.status.is_cancelled())
        .filter(|a| exclude_id.map_or(true, |excluded| a.id != excluded))
        .any(|a| {
            match (time_to_minutes(&a.hora_inicio), time_to_minutes(&a.hora_fim)) {
                (Some(existing_start), Some(existing_end)) => {
                    candidate_start < existing_end && existing_start < candidate_end
                }
                _ => false,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::{has_conflict, time_to_minutes};
    use crate::model::{Appointment, AppointmentStatus, AppointmentType};

    fn appointment(id: &str, date: &str, start: &str, end: &str) -> Appointment {
        Appointment {
            id: id.to_string(),
            patient_id: "p1".to_string(),
            data: date.to_string(),
            hora_inicio: start.to_string(),
            hora_fim: end.to_string(),
            tipo: AppointmentType::Retorno,
            status: AppointmentStatus::Agendada,
            motivo: None,
            observacoes: None,
            valor: None,
            convenio: None,
            created_at: "2025-01-01T08:00:00.000Z".to_string(),
            updated_at: "2025-01-01T08:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn parses_wall_clock_times() {
        assert_eq!(time_to_minutes("00:00"), Some(0));
        assert_eq!(time_to_minutes("09:30"), Some(570));
        assert_eq!(time_to_minutes("23:59"), Some(1439));
        assert_eq!(time_to_minutes("24:00"), None);
        assert_eq!(time_to_minutes("0930"), None);
        assert_eq!(time_to_minutes("ab:cd"), None);
    }

    #[test]
    fn overlapping_slot_conflicts() {
        let existing = vec![appointment("1", "2025-01-10", "09:00", "09:30")];
        assert!(has_conflict("2025-01-10", "09:15", "09:45", &existing, None));
    }

    #[test]
    fn boundary_adjacent_slot_does_not_conflict() {
        let existing = vec![appointment("1", "2025-01-10", "09:00", "09:30")];
        assert!(!has_conflict("2025-01-10", "09:30", "10:00", &existing, None));
        assert!(!has_conflict("2025-01-10", "08:30", "09:00", &existing, None));
    }

    #[test]
    fn other_dates_never_conflict() {
        let existing = vec![appointment("1", "2025-01-10", "09:00", "09:30")];
        assert!(!has_conflict("2025-01-11", "09:00", "09:30", &existing, None));
    }

    #[test]
    fn cancelled_appointments_are_ignored() {
        let mut cancelled = appointment("1", "2025-01-10", "09:00", "09:30");
        cancelled.status = AppointmentStatus::Cancelada;
        assert!(!has_conflict("2025-01-10", "09:00", "09:30", &[cancelled], None));
    }

    #[test]
    fn excluded_id_never_conflicts_with_itself() {
        let existing = vec![appointment("1", "2025-01-10", "09:00", "09:30")];
        assert!(!has_conflict(
            "2025-01-10",
            "09:10",
            "09:40",
            &existing,
            Some("1")
        ));
        assert!(has_conflict(
            "2025-01-10",
            "09:10",
            "09:40",
            &existing,
            Some("2")
        ));
    }

    #[test]
    fn unparsable_times_never_conflict() {
        let existing = vec![appointment("1", "2025-01-10", "09:00", "09:30")];
        assert!(!has_conflict("2025-01-10", "soon", "later", &existing, None));

        let broken = vec![appointment("1", "2025-01-10", "??", "09:30")];
        assert!(!has_conflict("2025-01-10", "09:00", "09:30", &broken, None));
    }
}
