//! Derived business values over a store snapshot.
//!
//! # Responsibility
//! - Compute quotation fees, invoice subtotal/tax/net, dashboard counters
//!   and per-project payment ledgers.
//! - Provide per-project read views used by document screens.
//!
//! # Invariants
//! - Every function is pure: nothing is cached, stored or mutated.
//! - Empty inputs yield zero/empty results, never errors.
//! - Net total is `subtotal + tax`, with tax rounded to minor units.

use crate::model::invoice::{Invoice, InvoiceItem, InvoiceStatus};
use crate::model::money::Amount;
use crate::model::payment::Payment;
use crate::model::project::{Project, ProjectStatus};
use crate::model::quotation::{Quotation, ScopeItem};
use crate::model::state::AppState;
use crate::model::transmittal::Transmittal;
use crate::model::validation::{ensure_tax_rate, validate_invoice_items, ValidationError};
use rust_decimal::Decimal;

/// Subtotal, tax and net of one invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub subtotal: Amount,
    pub tax: Amount,
    pub net: Amount,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectStats {
    pub active_count: usize,
    /// Quotations in `Draft` or `Sent`.
    pub open_quotation_count: usize,
    pub unpaid_invoice_count: usize,
    /// Sum of pre-tax item amounts over `Paid` invoices.
    pub gross_settled: Amount,
}

/// Payments received for one project, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentLedger<'a> {
    pub payments: Vec<&'a Payment>,
    pub total: Amount,
}

/// Whether an invoice still awaits payment, with the amount due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutstandingStatus {
    pub outstanding: bool,
    pub net: Amount,
}

/// Unpaid invoice paired with its tax-inclusive amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpaidInvoice<'a> {
    pub invoice: &'a Invoice,
    pub net: Amount,
}

pub fn quotation_total(items: &[ScopeItem]) -> Amount {
    items.iter().map(|item| item.charges).sum()
}

pub fn invoice_subtotal(items: &[InvoiceItem]) -> Amount {
    items.iter().map(|item| item.amount).sum()
}

/// Computes subtotal, tax and net for invoice lines at `tax_rate` percent.
///
/// Inputs are not validated here; see [`checked_invoice_totals`].
pub fn invoice_totals(items: &[InvoiceItem], tax_rate: Decimal) -> InvoiceTotals {
    let subtotal = invoice_subtotal(items);
    let tax = subtotal.percent(tax_rate);
    InvoiceTotals {
        subtotal,
        tax,
        net: subtotal + tax,
    }
}

/// Like [`invoice_totals`] but rejects negative amounts and tax rates.
pub fn checked_invoice_totals(
    items: &[InvoiceItem],
    tax_rate: Decimal,
) -> Result<InvoiceTotals, ValidationError> {
    validate_invoice_items(items)?;
    ensure_tax_rate(tax_rate)?;
    Ok(invoice_totals(items, tax_rate))
}

pub fn invoice_net_total(invoice: &Invoice) -> Amount {
    invoice_totals(&invoice.items, invoice.tax_rate).net
}

/// Outstanding means `Unpaid` or `Overdue`.
pub fn invoice_outstanding(invoice: &Invoice) -> OutstandingStatus {
    OutstandingStatus {
        outstanding: invoice.status != InvoiceStatus::Paid,
        net: invoice_net_total(invoice),
    }
}

/// Counters over the whole store.
pub fn project_stats(state: &AppState) -> ProjectStats {
    stats_over(
        state.projects.iter(),
        state.quotations.iter(),
        state.invoices.iter(),
    )
}

/// Counters restricted to one project's records.
///
/// `active_count` is 1 when the project itself is active.
pub fn project_stats_for(state: &AppState, project_id: &str) -> ProjectStats {
    stats_over(
        state
            .projects
            .iter()
            .filter(|project| project.id == project_id),
        quotations_for_project(state, project_id).into_iter(),
        invoices_for_project(state, project_id).into_iter(),
    )
}

fn stats_over<'a>(
    projects: impl Iterator<Item = &'a Project>,
    quotations: impl Iterator<Item = &'a Quotation>,
    invoices: impl Iterator<Item = &'a Invoice>,
) -> ProjectStats {
    let mut stats = ProjectStats {
        active_count: projects
            .filter(|project| project.status == ProjectStatus::Active)
            .count(),
        open_quotation_count: quotations
            .filter(|quotation| quotation.status.is_open())
            .count(),
        ..ProjectStats::default()
    };

    for invoice in invoices {
        match invoice.status {
            InvoiceStatus::Unpaid => stats.unpaid_invoice_count += 1,
            // Pre-tax on purpose: matches the settled figure shown on the dashboard.
            InvoiceStatus::Paid => stats.gross_settled += invoice_subtotal(&invoice.items),
            InvoiceStatus::Overdue => {}
        }
    }

    stats
}

pub fn payment_ledger<'a>(state: &'a AppState, project_id: &str) -> PaymentLedger<'a> {
    let payments: Vec<&Payment> = state
        .payments
        .iter()
        .filter(|payment| payment.project_id == project_id)
        .collect();
    let total = payments.iter().map(|payment| payment.amount).sum();
    PaymentLedger { payments, total }
}

/// Unpaid invoices across all projects with their net totals, store order.
pub fn unpaid_invoices(state: &AppState) -> Vec<UnpaidInvoice<'_>> {
    state
        .invoices
        .iter()
        .filter(|invoice| invoice.status == InvoiceStatus::Unpaid)
        .map(|invoice| UnpaidInvoice {
            invoice,
            net: invoice_net_total(invoice),
        })
        .collect()
}

pub fn projects_with_status(state: &AppState, status: ProjectStatus) -> Vec<&Project> {
    state
        .projects
        .iter()
        .filter(|project| project.status == status)
        .collect()
}

pub fn quotations_for_project<'a>(state: &'a AppState, project_id: &str) -> Vec<&'a Quotation> {
    state
        .quotations
        .iter()
        .filter(|quotation| quotation.project_id == project_id)
        .collect()
}

pub fn invoices_for_project<'a>(state: &'a AppState, project_id: &str) -> Vec<&'a Invoice> {
    state
        .invoices
        .iter()
        .filter(|invoice| invoice.project_id == project_id)
        .collect()
}

pub fn transmittals_for_project<'a>(
    state: &'a AppState,
    project_id: &str,
) -> Vec<&'a Transmittal> {
    state
        .transmittals
        .iter()
        .filter(|transmittal| transmittal.project_id == project_id)
        .collect()
}
