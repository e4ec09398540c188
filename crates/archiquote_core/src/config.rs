//! Store configuration.
//!
//! # Responsibility
//! - Hold the tunables the store and draft builders read at runtime.
//! - Parse partial JSON overrides, defaulting every missing key.

use rust_decimal::Decimal;
use serde::Deserialize;

pub const DEFAULT_SLOT_KEY: &str = "archiquote_db";
const DEFAULT_TAX_RATE_PERCENT: i64 = 6;
const DEFAULT_INVOICE_DUE_DAYS: u32 = 14;
const DEFAULT_PAYMENT_METHOD: &str = "Bank Transfer";
const DEFAULT_CORRUPT_BACKUP_SUFFIX: &str = ".corrupt";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key-value slot holding the whole snapshot.
    pub slot_key: String,
    /// Percentage applied to new invoice drafts.
    #[serde(with = "crate::model::money::rate")]
    pub default_tax_rate: Decimal,
    /// Days between invoice date and due date on new drafts.
    pub invoice_due_days: u32,
    /// Method recorded on payments created by settlement.
    pub default_payment_method: String,
    /// Appended to `slot_key` to name the backup slot for unreadable data.
    pub corrupt_backup_suffix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            default_tax_rate: Decimal::from(DEFAULT_TAX_RATE_PERCENT),
            invoice_due_days: DEFAULT_INVOICE_DUE_DAYS,
            default_payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
            corrupt_backup_suffix: DEFAULT_CORRUPT_BACKUP_SUFFIX.to_string(),
        }
    }
}

impl StoreConfig {
    /// Parses a JSON object; absent keys keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Slot that receives unreadable snapshots; never equal to `slot_key`.
    pub fn backup_slot_key(&self) -> String {
        let suffix = if self.corrupt_backup_suffix.is_empty() {
            DEFAULT_CORRUPT_BACKUP_SUFFIX
        } else {
            self.corrupt_backup_suffix.as_str()
        };
        format!("{}{suffix}", self.slot_key)
    }
}
