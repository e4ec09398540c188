//! Payment domain model.
//!
//! Payments are recorded when an invoice is settled and are immutable
//! afterwards.

use super::dates;
use super::money::Amount;
use super::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: RecordId,
    pub project_id: RecordId,
    pub invoice_id: RecordId,
    #[serde(default)]
    pub amount: Amount,
    #[serde(with = "dates::flexible")]
    pub date: NaiveDate,
    #[serde(default)]
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Caller-supplied fields for a new payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub project_id: RecordId,
    pub invoice_id: RecordId,
    pub amount: Amount,
    pub date: NaiveDate,
    pub method: String,
    pub notes: Option<String>,
}

impl NewPayment {
    pub(crate) fn into_payment(self, id: RecordId) -> Payment {
        Payment {
            id,
            project_id: self.project_id,
            invoice_id: self.invoice_id,
            amount: self.amount,
            date: self.date,
            method: self.method,
            notes: self.notes,
        }
    }
}
