//! Whole-store snapshot shape.
//!
//! # Invariants
//! - This is the persisted document: one JSON object holding every collection.
//! - `profile` may be absent in older saves and is backfilled with the default.
//! - Collections are kept newest first.

use super::invoice::Invoice;
use super::payment::Payment;
use super::profile::UserProfile;
use super::project::Project;
use super::quotation::Quotation;
use super::transmittal::Transmittal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Point-in-time view of every record collection plus the profile.
///
/// Absent or `null` fields read as empty collections / the default profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quotations: Vec<Quotation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub invoices: Vec<Invoice>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payments: Vec<Payment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transmittals: Vec<Transmittal>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile: UserProfile,
}

impl AppState {
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn quotation(&self, id: &str) -> Option<&Quotation> {
        self.quotations.iter().find(|quotation| quotation.id == id)
    }

    pub fn invoice(&self, id: &str) -> Option<&Invoice> {
        self.invoices.iter().find(|invoice| invoice.id == id)
    }

    pub fn payment(&self, id: &str) -> Option<&Payment> {
        self.payments.iter().find(|payment| payment.id == id)
    }

    pub fn transmittal(&self, id: &str) -> Option<&Transmittal> {
        self.transmittals.iter().find(|transmittal| transmittal.id == id)
    }

    pub fn has_project(&self, id: &str) -> bool {
        self.project(id).is_some()
    }

    /// Total record count across the five collections.
    pub fn record_count(&self) -> usize {
        self.projects.len()
            + self.quotations.len()
            + self.invoices.len()
            + self.payments.len()
            + self.transmittals.len()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Record collection discriminator used in errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    Quotation,
    Invoice,
    Payment,
    Transmittal,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Quotation => "quotation",
            Self::Invoice => "invoice",
            Self::Payment => "payment",
            Self::Transmittal => "transmittal",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
