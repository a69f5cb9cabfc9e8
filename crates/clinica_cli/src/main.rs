//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `clinica_core` linkage.
//! - Keep output deterministic enough for quick local sanity checks.

use clinica_core::{ClinicService, MemoryKeyValueStore};

fn main() {
    println!("clinica_core version={}", clinica_core::core_version());

    let service = ClinicService::new(MemoryKeyValueStore::new());
    let stats = service.dashboard_stats();
    println!(
        "pacientes={} consultas_hoje={} receita_mes={:.2} receita_pendente={:.2}",
        stats.pacientes_total, stats.consultas_hoje, stats.receita_mes, stats.receita_pendente
    );
}
