//! Core business records logic for ArchiQuote.
//! This crate is the single source of truth for projects, quotations,
//! invoices, payments and transmittals, and for every derived total.

pub mod config;
pub mod db;
pub mod infra;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::StoreConfig;
pub use infra::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidIds};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::invoice::{Invoice, InvoiceItem, InvoicePatch, InvoiceStatus, NewInvoice};
pub use model::money::Amount;
pub use model::payment::{NewPayment, Payment};
pub use model::profile::UserProfile;
pub use model::project::{NewProject, Project, ProjectPatch, ProjectStatus};
pub use model::quotation::{NewQuotation, Quotation, QuotationPatch, QuotationStatus, ScopeItem};
pub use model::state::{AppState, EntityKind};
pub use model::transmittal::{
    NewTransmittal, TransmissionMode, Transmittal, TransmittalItem, TransmittalPurpose,
};
pub use model::validation::ValidationError;
pub use model::RecordId;
pub use repo::slot_repo::{MemorySlotStorage, RepoError, SlotStorage, SqliteSlotStorage};
pub use service::calculator::{
    invoice_totals, payment_ledger, project_stats, project_stats_for, quotation_total,
    InvoiceTotals, PaymentLedger, ProjectStats,
};
pub use service::numbering::DocumentKind;
pub use service::record_store::{
    LoadStatus, PersistenceError, RecordStore, Settlement, StoreError, StoreResult,
};
pub use service::words::amount_in_words;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
