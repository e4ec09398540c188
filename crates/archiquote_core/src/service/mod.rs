//! Core use-case services.
//!
//! # Responsibility
//! - Own the record store and its persistence round-trip.
//! - Compute derived values (fees, invoice totals, dashboard counters).
//! - Keep callers decoupled from storage details.

pub mod calculator;
pub mod numbering;
pub mod record_store;
pub mod snapshot;
pub mod words;
