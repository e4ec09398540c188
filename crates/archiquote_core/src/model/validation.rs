//! Write-boundary validation rules.
//!
//! # Invariants
//! - Every amount written to the store is non-negative.
//! - Tax rates are non-negative percentages.
//! - Documents reference a project that exists when they are created.

use super::invoice::InvoiceItem;
use super::money::Amount;
use super::quotation::ScopeItem;
use super::RecordId;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ValidationResult = Result<(), ValidationError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NegativeAmount {
        field: &'static str,
        amount: Amount,
    },
    NegativeTaxRate(Decimal),
    UnknownProject(RecordId),
    UnknownInvoice(RecordId),
    UnknownQuotation(RecordId),
    /// The invoice references a project other than the one given.
    ProjectMismatch {
        invoice_id: RecordId,
        project_id: RecordId,
    },
    InvoiceAlreadyPaid(RecordId),
    /// Settlement must pay exactly the invoice's net total.
    SettlementAmountMismatch {
        invoice_id: RecordId,
        expected: Amount,
        got: Amount,
    },
    /// Approval only applies to draft quotations.
    QuotationNotDraft(RecordId),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeAmount { field, amount } => {
                write!(f, "{field} must not be negative, got {amount}")
            }
            Self::NegativeTaxRate(rate) => {
                write!(f, "tax rate must not be negative, got {rate}")
            }
            Self::UnknownProject(id) => write!(f, "referenced project does not exist: {id}"),
            Self::UnknownInvoice(id) => write!(f, "referenced invoice does not exist: {id}"),
            Self::UnknownQuotation(id) => {
                write!(f, "referenced quotation does not exist: {id}")
            }
            Self::ProjectMismatch {
                invoice_id,
                project_id,
            } => write!(
                f,
                "invoice {invoice_id} does not belong to project {project_id}"
            ),
            Self::InvoiceAlreadyPaid(id) => write!(f, "invoice is already paid: {id}"),
            Self::SettlementAmountMismatch {
                invoice_id,
                expected,
                got,
            } => write!(
                f,
                "settlement of invoice {invoice_id} must be {expected}, got {got}"
            ),
            Self::QuotationNotDraft(id) => write!(f, "quotation is not a draft: {id}"),
        }
    }
}

impl Error for ValidationError {}

pub fn ensure_non_negative(field: &'static str, amount: Amount) -> ValidationResult {
    if amount.is_negative() {
        return Err(ValidationError::NegativeAmount { field, amount });
    }
    Ok(())
}

pub fn ensure_tax_rate(rate: Decimal) -> ValidationResult {
    if rate.is_sign_negative() && !rate.is_zero() {
        return Err(ValidationError::NegativeTaxRate(rate));
    }
    Ok(())
}

pub fn validate_scope_items(items: &[ScopeItem]) -> ValidationResult {
    items
        .iter()
        .try_for_each(|item| ensure_non_negative("scope item charges", item.charges))
}

pub fn validate_invoice_items(items: &[InvoiceItem]) -> ValidationResult {
    items
        .iter()
        .try_for_each(|item| ensure_non_negative("invoice item amount", item.amount))
}
