//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `archiquote_core` linkage and open an existing store file.
//! - Print dashboard counters deterministically for quick sanity checks.
//!
//! Usage: `archiquote_cli [path/to/store.sqlite3]` (in-memory when omitted).
//! Set `ARCHIQUOTE_LOG_DIR` to an absolute path to write rolling logs there.

use archiquote_core::{
    core_version, default_log_level, init_logging, project_stats, RecordStore, SlotStorage,
    SqliteSlotStorage,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("archiquote_core version={}", core_version());

    if let Ok(log_dir) = std::env::var("ARCHIQUOTE_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let storage = match std::env::args().nth(1) {
        Some(path) => SqliteSlotStorage::open(&path),
        None => SqliteSlotStorage::open_in_memory(),
    };
    let storage = match storage {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!("failed to open store: {err}");
            return ExitCode::FAILURE;
        }
    };

    report(&RecordStore::open(storage));
    ExitCode::SUCCESS
}

fn report<S: SlotStorage>(store: &RecordStore<S>) {
    let state = store.snapshot();
    let stats = project_stats(state);
    println!("load_status={:?}", store.load_status());
    println!("company={}", state.profile.company_name);
    println!(
        "projects={} quotations={} invoices={} payments={} transmittals={}",
        state.projects.len(),
        state.quotations.len(),
        state.invoices.len(),
        state.payments.len(),
        state.transmittals.len()
    );
    println!(
        "active_projects={} open_quotations={} unpaid_invoices={} gross_settled={}",
        stats.active_count,
        stats.open_quotation_count,
        stats.unpaid_invoice_count,
        stats.gross_settled
    );
}
