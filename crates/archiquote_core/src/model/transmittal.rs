//! Transmittal domain model.
//!
//! # Responsibility
//! - Define the formal record of documents sent to a recipient, including
//!   the acknowledgement fields filled in on receipt.
//!
//! # Invariants
//! - Transmittals are immutable once created.
//! - `transmission_modes`, `document_types` and `purposes` behave as sets;
//!   the store drops duplicates while keeping first-seen order.
//! - An empty `signature_data` means "not signed".
//! - `date` is free text as typed on the form; drafts fill it in the long
//!   `18 October 2026` form.

use super::dates;
use super::profile::UserProfile;
use super::project::Project;
use super::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Suggested document-type tags offered on the transmittal form.
pub const SUGGESTED_DOCUMENT_TYPES: &[&str] = &[
    "Shop Drawing",
    "Drawings",
    "Documents",
    "Copy of Letter",
    "Invoice",
    "Change Orders",
];

const DEFAULT_SALUTATION: &str = "Dear Sir / Madam";
const DEFAULT_ITEM_QUANTITY: &str = "1 Copy";
const DEFAULT_ITEM_TYPE: &str = "A4 Doc";
const JOB_NO_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransmissionMode {
    Attached,
    Emails,
    Delivery,
}

/// Purpose tags printed as tick boxes on the transmittal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransmittalPurpose {
    #[serde(rename = "For Approval")]
    ForApproval,
    #[serde(rename = "Approval Document")]
    ApprovalDocument,
    #[serde(rename = "For your used")]
    ForYourUse,
    #[serde(rename = "Approved as Notes")]
    ApprovedAsNoted,
    #[serde(rename = "As Requested")]
    AsRequested,
    #[serde(rename = "Returns for Corrections")]
    ReturnedForCorrections,
    #[serde(rename = "For Review / Comment")]
    ForReviewComment,
    #[serde(rename = "Re-Submit Document")]
    ResubmitDocument,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransmittalItem {
    /// Blank ids are filled by the store at write time.
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub description: String,
    /// Free text such as `1 Copy`.
    #[serde(default)]
    pub quantity: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

impl TransmittalItem {
    pub fn new(
        description: impl Into<String>,
        quantity: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            description: description.into(),
            quantity: quantity.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transmittal {
    pub id: RecordId,
    pub project_id: RecordId,
    pub transmittal_no: String,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "from")]
    pub sent_from: String,
    #[serde(rename = "to")]
    pub sent_to: String,
    #[serde(default)]
    pub job_no: String,
    pub project_title: String,
    #[serde(default)]
    pub salutation: String,
    #[serde(default)]
    pub transmission_modes: Vec<TransmissionMode>,
    #[serde(default)]
    pub document_types: Vec<String>,
    #[serde(default)]
    pub items: Vec<TransmittalItem>,
    #[serde(default)]
    pub purposes: Vec<TransmittalPurpose>,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub sender_title: String,
    #[serde(default)]
    pub sender_company: String,
    #[serde(default)]
    pub sender_address: String,
    #[serde(default)]
    pub receiver_name: String,
    /// Free text written by the recipient on acknowledgement.
    #[serde(default)]
    pub received_date: String,
    /// Encoded signature bitmap, empty when unsigned.
    #[serde(default)]
    pub signature_data: String,
}

impl Transmittal {
    pub fn is_signed(&self) -> bool {
        !self.signature_data.is_empty()
    }

    /// Calendar date when the free-text `date` is in a recognised shape.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        dates::parse_date(&self.date)
    }
}

/// Caller-supplied fields for a new transmittal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransmittal {
    pub project_id: RecordId,
    pub transmittal_no: String,
    pub date: String,
    pub sent_from: String,
    pub sent_to: String,
    pub job_no: String,
    pub project_title: String,
    pub salutation: String,
    pub transmission_modes: Vec<TransmissionMode>,
    pub document_types: Vec<String>,
    pub items: Vec<TransmittalItem>,
    pub purposes: Vec<TransmittalPurpose>,
    pub sender_name: String,
    pub sender_title: String,
    pub sender_company: String,
    pub sender_address: String,
    pub receiver_name: String,
    pub received_date: String,
    pub signature_data: String,
}

impl NewTransmittal {
    /// Drafts a transmittal from the company in `profile` to the client of
    /// `project`.
    pub fn for_project(
        project: &Project,
        profile: &UserProfile,
        transmittal_no: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            project_id: project.id.clone(),
            transmittal_no: transmittal_no.into(),
            date: dates::long_form(date),
            sent_from: profile.company_name.clone(),
            sent_to: project.client_name.clone(),
            job_no: job_no_for(&project.id),
            project_title: project.title.clone(),
            salutation: DEFAULT_SALUTATION.to_string(),
            transmission_modes: Vec::new(),
            document_types: Vec::new(),
            items: vec![TransmittalItem::new(
                "",
                DEFAULT_ITEM_QUANTITY,
                DEFAULT_ITEM_TYPE,
            )],
            purposes: Vec::new(),
            sender_name: profile.default_sender_name.clone(),
            sender_title: profile.default_sender_title.clone(),
            sender_company: profile.company_name.clone(),
            sender_address: profile.company_address.clone(),
            receiver_name: String::new(),
            received_date: String::new(),
            signature_data: String::new(),
        }
    }

    pub(crate) fn into_transmittal(self, id: RecordId) -> Transmittal {
        Transmittal {
            id,
            project_id: self.project_id,
            transmittal_no: self.transmittal_no,
            date: self.date,
            sent_from: self.sent_from,
            sent_to: self.sent_to,
            job_no: self.job_no,
            project_title: self.project_title,
            salutation: self.salutation,
            transmission_modes: dedup_in_order(self.transmission_modes),
            document_types: dedup_in_order(self.document_types),
            items: self.items,
            purposes: dedup_in_order(self.purposes),
            sender_name: self.sender_name,
            sender_title: self.sender_title,
            sender_company: self.sender_company,
            sender_address: self.sender_address,
            receiver_name: self.receiver_name,
            received_date: self.received_date,
            signature_data: self.signature_data,
        }
    }
}

/// Job number printed on transmittals: leading project id characters, upper-cased.
pub fn job_no_for(project_id: &str) -> String {
    project_id
        .chars()
        .take(JOB_NO_LEN)
        .collect::<String>()
        .to_uppercase()
}

fn dedup_in_order<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
