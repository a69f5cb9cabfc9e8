//! Dashboard aggregates derived from the live store snapshot.
//!
//! # Responsibility
//! - Recompute every dashboard figure from the current in-memory
//!   collections on each call.
//!
//! # Invariants
//! - Nothing is cached: there is no incremental aggregate to keep
//!   consistent, at the cost of an O(n) scan per call.
//! - "This week" starts on Sunday of the reference date; "this month" is
//!   calendar-month-to-date. Neither window has an upper bound, matching the
//!   dashboard's original behavior of counting already-booked future visits.
//! - Attendance rate is defined as 100 when no visit has been completed or
//!   missed yet.

use chrono::{Datelike, DateTime, Days, NaiveDate};
use serde::Serialize;

use crate::model::{AppointmentStatus, PaymentStatus};
use crate::store::ClinicStore;

/// Snapshot of the dashboard figures. Monetary values are BRL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub consultas_hoje: usize,
    pub consultas_semana: usize,
    pub consultas_mes: usize,
    pub pacientes_total: usize,
    pub pacientes_novos: usize,
    pub receita_mes: f64,
    pub receita_pendente: f64,
    pub taxa_comparecimento: f64,
}

/// Computes all dashboard figures relative to `today`.
pub fn dashboard_stats(store: &ClinicStore, today: NaiveDate) -> DashboardStats {
    let today_str = today.format("%Y-%m-%d").to_string();
    let start_of_week =
        today - Days::new(u64::from(today.weekday().num_days_from_sunday()));
    let start_of_month = today.with_day(1).unwrap_or(today);

    let active = |status: AppointmentStatus| !status.is_cancelled();

    let consultas_hoje = store
        .appointments()
        .iter()
        .filter(|a| a.data == today_str && active(a.status))
        .count();

    let consultas_semana = store
        .appointments()
        .iter()
        .filter(|a| active(a.status) && parse_date(&a.data).is_some_and(|d| d >= start_of_week))
        .count();

    let consultas_mes = store
        .appointments()
        .iter()
        .filter(|a| active(a.status) && parse_date(&a.data).is_some_and(|d| d >= start_of_month))
        .count();

    let pacientes_novos = store
        .patients()
        .iter()
        .filter(|p| parse_timestamp_date(&p.created_at).is_some_and(|d| d >= start_of_month))
        .count();

    let receita_mes: f64 = store
        .payments()
        .iter()
        .filter(|p| p.status == PaymentStatus::Pago)
        .filter(|p| parse_timestamp_date(&p.created_at).is_some_and(|d| d >= start_of_month))
        .map(|p| p.valor)
        .sum();

    let receita_pendente: f64 = store
        .payments()
        .iter()
        .filter(|p| p.status == PaymentStatus::Pendente)
        .map(|p| p.valor)
        .sum();

    let finalizadas = store
        .appointments()
        .iter()
        .filter(|a| a.status == AppointmentStatus::Finalizada)
        .count();
    let faltas = store
        .appointments()
        .iter()
        .filter(|a| a.status == AppointmentStatus::Faltou)
        .count();
    let taxa_comparecimento = if finalizadas + faltas > 0 {
        finalizadas as f64 / (finalizadas + faltas) as f64 * 100.0
    } else {
        100.0
    };

    DashboardStats {
        consultas_hoje,
        consultas_semana,
        consultas_mes,
        pacientes_total: store.patients().len(),
        pacientes_novos,
        receita_mes,
        receita_pendente,
        taxa_comparecimento,
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn parse_timestamp_date(value: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.date_naive())
        .ok()
}
