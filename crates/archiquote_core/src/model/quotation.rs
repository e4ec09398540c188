//! Quotation domain model.
//!
//! # Responsibility
//! - Define the priced fee proposal tied to one project.
//! - Capture client and project details as they stood when the quotation
//!   was drafted.
//!
//! # Invariants
//! - `proposed_fees` equals the sum of `scope_items[*].charges`; the store
//!   recomputes it on every item change and on load.
//! - `client_name`, `client_address` and `project_title` are a snapshot and
//!   are not resynced when the project is edited later.

use super::dates;
use super::money::Amount;
use super::project::Project;
use super::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Suggested scope categories offered when drafting a quotation.
pub const SUGGESTED_SCOPE_CATEGORIES: &[&str] = &[
    "Architecture",
    "C&S Engineering",
    "M&E Engineering",
    "Landscape",
];

pub const DEFAULT_OBJECTIVE: &str = "To prepare, coordinate, and submit all necessary architectural documentation and application materials required to obtain approval.";

const DEFAULT_SCOPE_DESCRIPTION: &str = "Architectural Submission to Local Council";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuotationStatus {
    #[default]
    Draft,
    Sent,
    Approved,
    Rejected,
}

impl QuotationStatus {
    /// Draft and sent quotations still await a client decision.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Draft | Self::Sent)
    }
}

/// One priced line within a quotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeItem {
    /// Blank ids are filled by the store at write time.
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub charges: Amount,
}

impl ScopeItem {
    pub fn new(category: impl Into<String>, description: impl Into<String>, charges: Amount) -> Self {
        Self {
            id: RecordId::new(),
            category: category.into(),
            description: description.into(),
            charges,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub id: RecordId,
    pub project_id: RecordId,
    pub quotation_no: String,
    #[serde(with = "dates::flexible")]
    pub date: NaiveDate,
    pub client_name: String,
    pub client_address: String,
    pub project_title: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub scope_items: Vec<ScopeItem>,
    #[serde(default)]
    pub proposed_fees: Amount,
    #[serde(default)]
    pub status: QuotationStatus,
}

/// Caller-supplied fields for a new quotation.
///
/// `proposed_fees` is not an input: it is always derived from `scope_items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuotation {
    pub project_id: RecordId,
    pub quotation_no: String,
    pub date: NaiveDate,
    pub client_name: String,
    pub client_address: String,
    pub project_title: String,
    pub objective: String,
    pub scope_items: Vec<ScopeItem>,
    /// Defaults to `Draft` when absent.
    pub status: Option<QuotationStatus>,
}

impl NewQuotation {
    /// Drafts a quotation for `project`, copying its client details.
    ///
    /// Starts with the default objective and one architecture scope line
    /// charged at zero.
    pub fn for_project(project: &Project, quotation_no: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            project_id: project.id.clone(),
            quotation_no: quotation_no.into(),
            date,
            client_name: project.client_name.clone(),
            client_address: project.address.clone(),
            project_title: project.title.clone(),
            objective: DEFAULT_OBJECTIVE.to_string(),
            scope_items: vec![ScopeItem::new(
                SUGGESTED_SCOPE_CATEGORIES[0],
                DEFAULT_SCOPE_DESCRIPTION,
                Amount::ZERO,
            )],
            status: None,
        }
    }

    pub(crate) fn into_quotation(self, id: RecordId, proposed_fees: Amount) -> Quotation {
        Quotation {
            id,
            project_id: self.project_id,
            quotation_no: self.quotation_no,
            date: self.date,
            client_name: self.client_name,
            client_address: self.client_address,
            project_title: self.project_title,
            objective: self.objective,
            scope_items: self.scope_items,
            proposed_fees,
            status: self.status.unwrap_or_default(),
        }
    }
}

/// Mutable quotation fields; `None` leaves the stored value untouched.
///
/// The owning project cannot be changed after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotationPatch {
    pub quotation_no: Option<String>,
    pub date: Option<NaiveDate>,
    pub client_name: Option<String>,
    pub client_address: Option<String>,
    pub project_title: Option<String>,
    pub objective: Option<String>,
    pub scope_items: Option<Vec<ScopeItem>>,
    pub status: Option<QuotationStatus>,
}

impl QuotationPatch {
    pub fn status(status: QuotationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn scope_items(items: Vec<ScopeItem>) -> Self {
        Self {
            scope_items: Some(items),
            ..Self::default()
        }
    }

    /// Applies the patch; the caller recomputes `proposed_fees` afterwards.
    pub(crate) fn apply_to(self, quotation: &mut Quotation) {
        if let Some(quotation_no) = self.quotation_no {
            quotation.quotation_no = quotation_no;
        }
        if let Some(date) = self.date {
            quotation.date = date;
        }
        if let Some(client_name) = self.client_name {
            quotation.client_name = client_name;
        }
        if let Some(client_address) = self.client_address {
            quotation.client_address = client_address;
        }
        if let Some(project_title) = self.project_title {
            quotation.project_title = project_title;
        }
        if let Some(objective) = self.objective {
            quotation.objective = objective;
        }
        if let Some(scope_items) = self.scope_items {
            quotation.scope_items = scope_items;
        }
        if let Some(status) = self.status {
            quotation.status = status;
        }
    }
}
