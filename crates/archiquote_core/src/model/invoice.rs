//! Invoice domain model.
//!
//! # Responsibility
//! - Define the billing document tied to a project, optionally generated
//!   from a quotation.
//!
//! # Invariants
//! - No total is stored: subtotal, tax and net are always derived from
//!   `items` and `tax_rate`.
//! - `tax_rate` is a percentage (6 means 6%).

use super::dates;
use super::money::{self, Amount};
use super::project::Project;
use super::quotation::Quotation;
use super::RecordId;
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[default]
    Unpaid,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    /// Blank ids are filled by the store at write time.
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: Amount,
}

impl InvoiceItem {
    pub fn new(description: impl Into<String>, amount: Amount) -> Self {
        Self {
            id: RecordId::new(),
            description: description.into(),
            amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: RecordId,
    pub project_id: RecordId,
    #[serde(
        default,
        deserialize_with = "dates::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub quotation_id: Option<RecordId>,
    pub invoice_no: String,
    #[serde(with = "dates::flexible")]
    pub date: NaiveDate,
    #[serde(with = "dates::flexible")]
    pub due_date: NaiveDate,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    #[serde(default, with = "money::rate")]
    pub tax_rate: Decimal,
    #[serde(default)]
    pub status: InvoiceStatus,
}

/// Caller-supplied fields for a new invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub project_id: RecordId,
    pub quotation_id: Option<RecordId>,
    pub invoice_no: String,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub items: Vec<InvoiceItem>,
    pub tax_rate: Decimal,
    /// Defaults to `Unpaid` when absent.
    pub status: Option<InvoiceStatus>,
}

impl NewInvoice {
    /// Drafts an empty invoice for `project` with a single blank line.
    pub fn for_project(
        project: &Project,
        invoice_no: impl Into<String>,
        date: NaiveDate,
        tax_rate: Decimal,
        due_days: u32,
    ) -> Self {
        Self {
            project_id: project.id.clone(),
            quotation_id: None,
            invoice_no: invoice_no.into(),
            date,
            due_date: due_date_after(date, due_days),
            items: vec![InvoiceItem::new("", Amount::ZERO)],
            tax_rate,
            status: None,
        }
    }

    /// Drafts an invoice billing the full proposed fee of `quotation`.
    pub fn from_quotation(
        quotation: &Quotation,
        invoice_no: impl Into<String>,
        date: NaiveDate,
        tax_rate: Decimal,
        due_days: u32,
    ) -> Self {
        let description = format!(
            "Professional Services as per Quotation {}",
            quotation.quotation_no
        );
        Self {
            project_id: quotation.project_id.clone(),
            quotation_id: Some(quotation.id.clone()),
            invoice_no: invoice_no.into(),
            date,
            due_date: due_date_after(date, due_days),
            items: vec![InvoiceItem::new(description, quotation.proposed_fees)],
            tax_rate,
            status: None,
        }
    }

    pub(crate) fn into_invoice(self, id: RecordId) -> Invoice {
        Invoice {
            id,
            project_id: self.project_id,
            quotation_id: self.quotation_id,
            invoice_no: self.invoice_no,
            date: self.date,
            due_date: self.due_date,
            items: self.items,
            tax_rate: self.tax_rate,
            status: self.status.unwrap_or_default(),
        }
    }
}

/// Mutable invoice fields; `None` leaves the stored value untouched.
///
/// The owning project and source quotation cannot be changed after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoicePatch {
    pub invoice_no: Option<String>,
    pub date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub items: Option<Vec<InvoiceItem>>,
    pub tax_rate: Option<Decimal>,
    pub status: Option<InvoiceStatus>,
}

impl InvoicePatch {
    pub fn status(status: InvoiceStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) fn apply_to(self, invoice: &mut Invoice) {
        if let Some(invoice_no) = self.invoice_no {
            invoice.invoice_no = invoice_no;
        }
        if let Some(date) = self.date {
            invoice.date = date;
        }
        if let Some(due_date) = self.due_date {
            invoice.due_date = due_date;
        }
        if let Some(items) = self.items {
            invoice.items = items;
        }
        if let Some(tax_rate) = self.tax_rate {
            invoice.tax_rate = tax_rate;
        }
        if let Some(status) = self.status {
            invoice.status = status;
        }
    }
}

fn due_date_after(date: NaiveDate, due_days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(due_days)))
        .unwrap_or(date)
}
