//! Business records domain model.
//!
//! # Responsibility
//! - Define the project, quotation, invoice, payment and transmittal records
//!   and the organization profile.
//! - Define creation inputs and post-creation patches per record type.
//!
//! # Invariants
//! - Every record is identified by an opaque `RecordId` assigned once.
//! - Money is fixed-point (`money::Amount`), never floating point.
//! - Nothing is deleted; there is no delete operation.

pub mod dates;
pub mod invoice;
pub mod money;
pub mod payment;
pub mod profile;
pub mod project;
pub mod quotation;
pub mod state;
pub mod transmittal;
pub mod validation;

/// Opaque, globally unique record identifier.
pub type RecordId = String;
