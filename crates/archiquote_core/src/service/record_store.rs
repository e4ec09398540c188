//! Record store: the single owner of business records.
//!
//! # Responsibility
//! - Mediate every create/update of projects, quotations, invoices,
//!   payments and transmittals, plus the organization profile.
//! - Persist the whole snapshot to one key-value slot after every mutation.
//! - Restore the snapshot on open, failing safe to an empty state.
//!
//! # Invariants
//! - Identifiers and creation timestamps are assigned here, once.
//! - A mutation is visible only after its snapshot was written; a failed
//!   validation or write leaves the previous state untouched.
//! - Settling an invoice records a payment of exactly its net total and
//!   marks the invoice paid in one write.
//! - After an unreadable load, the slot is re-read and backed up before it
//!   is first overwritten.
//! - New records are prepended (newest first).

use crate::config::StoreConfig;
use crate::infra::{Clock, IdGenerator, SystemClock, UuidIds};
use crate::model::invoice::{Invoice, InvoicePatch, InvoiceStatus, NewInvoice};
use crate::model::money::Amount;
use crate::model::payment::{NewPayment, Payment};
use crate::model::profile::UserProfile;
use crate::model::project::{NewProject, Project, ProjectPatch};
use crate::model::quotation::{NewQuotation, Quotation, QuotationPatch, QuotationStatus};
use crate::model::state::{AppState, EntityKind};
use crate::model::transmittal::{NewTransmittal, Transmittal};
use crate::model::validation::{
    ensure_non_negative, ensure_tax_rate, validate_invoice_items, validate_scope_items,
    ValidationError,
};
use crate::model::RecordId;
use crate::repo::slot_repo::{RepoError, SlotStorage};
use crate::service::calculator::{invoice_net_total, quotation_total};
use crate::service::numbering::{next_document_number, DocumentKind};
use crate::service::snapshot::{decode_snapshot, encode_snapshot};
use chrono::{Datelike, NaiveDate};
use log::{error, info, warn};
use std::cell::Cell;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Snapshot could not be durably written.
#[derive(Debug)]
pub enum PersistenceError {
    Encode(serde_json::Error),
    Storage(RepoError),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::Storage(err) => write!(f, "failed to write snapshot: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

/// Record store operation failure.
#[derive(Debug)]
pub enum StoreError {
    NotFound { entity: EntityKind, id: RecordId },
    Validation(ValidationError),
    Persistence(PersistenceError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PersistenceError> for StoreError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

/// How the snapshot was obtained when the store was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Slot was empty; started from defaults.
    Fresh,
    /// Saved snapshot decoded successfully.
    Restored,
    /// Saved snapshot was unreadable; copied to the backup slot and
    /// started from defaults.
    RecoveredFromCorrupt,
    /// Medium could not be read; started from defaults.
    ///
    /// Writes re-read the slot first and copy whatever it holds to the
    /// backup slot; while it stays unreadable, writes are refused.
    ReadFailed,
}

/// Result of settling an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub payment: Payment,
    pub invoice: Invoice,
}

/// Owned handle over all business records.
///
/// Construct one per process and pass it to whatever needs it.
pub struct RecordStore<S: SlotStorage, C: Clock = SystemClock, G: IdGenerator = UuidIds> {
    storage: S,
    clock: C,
    ids: G,
    config: StoreConfig,
    state: AppState,
    load_status: LoadStatus,
    unread_slot: Cell<bool>,
}

impl<S: SlotStorage> RecordStore<S> {
    /// Opens the store with the system clock, UUID identifiers and default config.
    pub fn open(storage: S) -> Self {
        Self::open_with(storage, SystemClock, UuidIds, StoreConfig::default())
    }
}

impl<S: SlotStorage, C: Clock, G: IdGenerator> RecordStore<S, C, G> {
    /// Opens the store and restores the saved snapshot.
    ///
    /// Never fails: unreadable or corrupt data falls back to an empty state,
    /// reported through [`RecordStore::load_status`].
    pub fn open_with(storage: S, clock: C, ids: G, config: StoreConfig) -> Self {
        let (state, load_status) = load_state(&storage, &config);
        info!(
            "event=store_open module=store status=ok load_status={:?} records={}",
            load_status,
            state.record_count()
        );
        Self {
            storage,
            clock,
            ids,
            config,
            state,
            load_status,
            unread_slot: Cell::new(load_status == LoadStatus::ReadFailed),
        }
    }

    /// Current point-in-time view of every collection and the profile.
    pub fn snapshot(&self) -> &AppState {
        &self.state
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Rewrites the current snapshot, e.g. before shutdown.
    pub fn flush(&self) -> StoreResult<()> {
        self.persist(&self.state)?;
        info!("event=store_flush module=store status=ok");
        Ok(())
    }

    pub fn create_project(&mut self, input: NewProject) -> StoreResult<Project> {
        let project = input.into_project(self.ids.next_id(), self.clock.now());
        let mut next = self.state.clone();
        next.projects.insert(0, project.clone());
        self.commit(next, "record_create", EntityKind::Project, &project.id)?;
        Ok(project)
    }

    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> StoreResult<()> {
        let index = position(&self.state.projects, EntityKind::Project, id, |p| &p.id)?;
        let mut next = self.state.clone();
        patch.apply_to(&mut next.projects[index]);
        self.commit(next, "record_update", EntityKind::Project, id)
    }

    /// Creates a quotation; `proposed_fees` is derived from the scope items.
    pub fn create_quotation(&mut self, mut input: NewQuotation) -> StoreResult<Quotation> {
        self.ensure_project(&input.project_id)?;
        validate_scope_items(&input.scope_items)?;
        self.fill_blank_ids(input.scope_items.iter_mut().map(|item| &mut item.id));

        let fees = quotation_total(&input.scope_items);
        let quotation = input.into_quotation(self.ids.next_id(), fees);
        let mut next = self.state.clone();
        next.quotations.insert(0, quotation.clone());
        self.commit(next, "record_create", EntityKind::Quotation, &quotation.id)?;
        Ok(quotation)
    }

    pub fn update_quotation(&mut self, id: &str, mut patch: QuotationPatch) -> StoreResult<()> {
        let index = position(&self.state.quotations, EntityKind::Quotation, id, |q| &q.id)?;
        if let Some(items) = patch.scope_items.as_mut() {
            validate_scope_items(items)?;
            self.fill_blank_ids(items.iter_mut().map(|item| &mut item.id));
        }

        let mut next = self.state.clone();
        let quotation = &mut next.quotations[index];
        patch.apply_to(quotation);
        quotation.proposed_fees = quotation_total(&quotation.scope_items);
        self.commit(next, "record_update", EntityKind::Quotation, id)
    }

    /// Moves a draft quotation to `Approved`.
    pub fn approve_quotation(&mut self, id: &str) -> StoreResult<()> {
        let index = position(&self.state.quotations, EntityKind::Quotation, id, |q| &q.id)?;
        if self.state.quotations[index].status != QuotationStatus::Draft {
            return Err(ValidationError::QuotationNotDraft(id.to_string()).into());
        }
        self.update_quotation(id, QuotationPatch::status(QuotationStatus::Approved))
    }

    pub fn create_invoice(&mut self, mut input: NewInvoice) -> StoreResult<Invoice> {
        self.ensure_project(&input.project_id)?;
        if let Some(quotation_id) = &input.quotation_id {
            if self.state.quotation(quotation_id).is_none() {
                return Err(ValidationError::UnknownQuotation(quotation_id.clone()).into());
            }
        }
        validate_invoice_items(&input.items)?;
        ensure_tax_rate(input.tax_rate)?;
        self.fill_blank_ids(input.items.iter_mut().map(|item| &mut item.id));

        let invoice = input.into_invoice(self.ids.next_id());
        let mut next = self.state.clone();
        next.invoices.insert(0, invoice.clone());
        self.commit(next, "record_create", EntityKind::Invoice, &invoice.id)?;
        Ok(invoice)
    }

    pub fn update_invoice(&mut self, id: &str, mut patch: InvoicePatch) -> StoreResult<()> {
        let index = position(&self.state.invoices, EntityKind::Invoice, id, |i| &i.id)?;
        if let Some(items) = patch.items.as_mut() {
            validate_invoice_items(items)?;
            self.fill_blank_ids(items.iter_mut().map(|item| &mut item.id));
        }
        if let Some(rate) = patch.tax_rate {
            ensure_tax_rate(rate)?;
        }

        let mut next = self.state.clone();
        patch.apply_to(&mut next.invoices[index]);
        self.commit(next, "record_update", EntityKind::Invoice, id)
    }

    /// Records a payment against an invoice of the same project.
    ///
    /// Does not change the invoice status; see [`RecordStore::settle_invoice`].
    pub fn create_payment(&mut self, input: NewPayment) -> StoreResult<Payment> {
        self.validate_payment(&input)?;
        let payment = input.into_payment(self.ids.next_id());
        let mut next = self.state.clone();
        next.payments.insert(0, payment.clone());
        self.commit(next, "record_create", EntityKind::Payment, &payment.id)?;
        Ok(payment)
    }

    pub fn create_transmittal(&mut self, mut input: NewTransmittal) -> StoreResult<Transmittal> {
        self.ensure_project(&input.project_id)?;
        self.fill_blank_ids(input.items.iter_mut().map(|item| &mut item.id));

        let transmittal = input.into_transmittal(self.ids.next_id());
        let mut next = self.state.clone();
        next.transmittals.insert(0, transmittal.clone());
        self.commit(next, "record_create", EntityKind::Transmittal, &transmittal.id)?;
        Ok(transmittal)
    }

    /// Replaces the organization profile wholesale.
    pub fn update_profile(&mut self, profile: UserProfile) -> StoreResult<()> {
        let mut next = self.state.clone();
        next.profile = profile;
        self.persist(&next)?;
        self.state = next;
        info!("event=profile_update module=store status=ok");
        Ok(())
    }

    /// Records a payment of `amount` dated today and marks the invoice paid.
    ///
    /// `amount` must equal the invoice's net total. Both writes land in one
    /// snapshot; on any error neither is applied.
    pub fn settle_invoice(&mut self, invoice_id: &str, amount: Amount) -> StoreResult<Settlement> {
        let index = position(&self.state.invoices, EntityKind::Invoice, invoice_id, |i| &i.id)?;
        let current = &self.state.invoices[index];
        if current.status == InvoiceStatus::Paid {
            return Err(ValidationError::InvoiceAlreadyPaid(invoice_id.to_string()).into());
        }
        let expected = invoice_net_total(current);
        if amount != expected {
            return Err(ValidationError::SettlementAmountMismatch {
                invoice_id: invoice_id.to_string(),
                expected,
                got: amount,
            }
            .into());
        }

        let mut next = self.state.clone();
        let invoice = &mut next.invoices[index];
        invoice.status = InvoiceStatus::Paid;
        let invoice = invoice.clone();

        let payment = NewPayment {
            project_id: invoice.project_id.clone(),
            invoice_id: invoice.id.clone(),
            amount,
            date: self.clock.today(),
            method: self.config.default_payment_method.clone(),
            notes: None,
        }
        .into_payment(self.ids.next_id());
        next.payments.insert(0, payment.clone());

        self.commit(next, "invoice_settle", EntityKind::Invoice, invoice_id)?;
        Ok(Settlement { payment, invoice })
    }

    /// Settles an invoice for its computed net total.
    pub fn settle_invoice_in_full(&mut self, invoice_id: &str) -> StoreResult<Settlement> {
        let net = self
            .state
            .invoice(invoice_id)
            .map(invoice_net_total)
            .ok_or_else(|| not_found(EntityKind::Invoice, invoice_id))?;
        self.settle_invoice(invoice_id, net)
    }

    /// Next free number for `kind` in the current year.
    pub fn suggest_document_number(&self, kind: DocumentKind) -> String {
        let year = self.clock.today().year();
        let state = &self.state;
        match kind {
            DocumentKind::Quotation => next_document_number(
                kind,
                year,
                state.quotations.iter().map(|q| q.quotation_no.as_str()),
            ),
            DocumentKind::Invoice => next_document_number(
                kind,
                year,
                state.invoices.iter().map(|i| i.invoice_no.as_str()),
            ),
            DocumentKind::Transmittal => next_document_number(
                kind,
                year,
                state.transmittals.iter().map(|t| t.transmittal_no.as_str()),
            ),
        }
    }

    /// Prefilled quotation for a project, dated today.
    pub fn draft_quotation(&self, project_id: &str) -> StoreResult<NewQuotation> {
        let project = self.find_project(project_id)?;
        Ok(NewQuotation::for_project(
            project,
            self.suggest_document_number(DocumentKind::Quotation),
            self.clock.today(),
        ))
    }

    /// Prefilled blank invoice for a project, dated today.
    pub fn draft_invoice(&self, project_id: &str) -> StoreResult<NewInvoice> {
        let project = self.find_project(project_id)?;
        Ok(NewInvoice::for_project(
            project,
            self.suggest_document_number(DocumentKind::Invoice),
            self.clock.today(),
            self.config.default_tax_rate,
            self.config.invoice_due_days,
        ))
    }

    /// Prefilled invoice billing a quotation's proposed fee, dated today.
    pub fn draft_invoice_from_quotation(&self, quotation_id: &str) -> StoreResult<NewInvoice> {
        let quotation = self
            .state
            .quotation(quotation_id)
            .ok_or_else(|| not_found(EntityKind::Quotation, quotation_id))?;
        Ok(NewInvoice::from_quotation(
            quotation,
            self.suggest_document_number(DocumentKind::Invoice),
            self.clock.today(),
            self.config.default_tax_rate,
            self.config.invoice_due_days,
        ))
    }

    /// Prefilled transmittal from the profile's company to a project's client.
    pub fn draft_transmittal(&self, project_id: &str) -> StoreResult<NewTransmittal> {
        let project = self.find_project(project_id)?;
        Ok(NewTransmittal::for_project(
            project,
            &self.state.profile,
            self.suggest_document_number(DocumentKind::Transmittal),
            self.clock.today(),
        ))
    }

    fn find_project(&self, project_id: &str) -> StoreResult<&Project> {
        self.state
            .project(project_id)
            .ok_or_else(|| not_found(EntityKind::Project, project_id))
    }

    fn ensure_project(&self, project_id: &str) -> Result<(), ValidationError> {
        if self.state.has_project(project_id) {
            Ok(())
        } else {
            Err(ValidationError::UnknownProject(project_id.to_string()))
        }
    }

    fn validate_payment(&self, input: &NewPayment) -> Result<(), ValidationError> {
        self.ensure_project(&input.project_id)?;
        let invoice = self
            .state
            .invoice(&input.invoice_id)
            .ok_or_else(|| ValidationError::UnknownInvoice(input.invoice_id.clone()))?;
        if invoice.project_id != input.project_id {
            return Err(ValidationError::ProjectMismatch {
                invoice_id: input.invoice_id.clone(),
                project_id: input.project_id.clone(),
            });
        }
        ensure_non_negative("payment amount", input.amount)
    }

    fn fill_blank_ids<'a>(&self, ids: impl Iterator<Item = &'a mut RecordId>) {
        for id in ids {
            if id.trim().is_empty() {
                *id = self.ids.next_id();
            }
        }
    }

    fn commit(
        &mut self,
        next: AppState,
        event: &str,
        entity: EntityKind,
        id: &str,
    ) -> StoreResult<()> {
        if let Err(err) = self.persist(&next) {
            error!(
                "event={event} module=store status=error entity={entity} id={id} error_code=persist_failed error={err}"
            );
            return Err(err.into());
        }
        self.state = next;
        info!("event={event} module=store status=ok entity={entity} id={id}");
        Ok(())
    }

    fn persist(&self, state: &AppState) -> Result<(), PersistenceError> {
        let encoded = encode_snapshot(state).map_err(PersistenceError::Encode)?;
        if self.unread_slot.get() {
            self.preserve_unread_slot()?;
        }
        self.storage
            .set(&self.config.slot_key, &encoded)
            .map_err(PersistenceError::Storage)
    }

    fn preserve_unread_slot(&self) -> Result<(), PersistenceError> {
        let existing = self
            .storage
            .get(&self.config.slot_key)
            .map_err(PersistenceError::Storage)?;
        if let Some(raw) = existing {
            let backup_key = self.config.backup_slot_key();
            self.storage
                .set(&backup_key, &raw)
                .map_err(PersistenceError::Storage)?;
            warn!(
                "event=snapshot_backup module=store status=ok reason=unread_slot backup_slot={backup_key}"
            );
        }
        self.unread_slot.set(false);
        Ok(())
    }
}

fn load_state<S: SlotStorage>(storage: &S, config: &StoreConfig) -> (AppState, LoadStatus) {
    let raw = match storage.get(&config.slot_key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (AppState::default(), LoadStatus::Fresh),
        Err(err) => {
            error!(
                "event=snapshot_load module=store status=fallback reason=read_failed error={err}"
            );
            return (AppState::default(), LoadStatus::ReadFailed);
        }
    };

    match decode_snapshot(&raw) {
        Ok(state) => (state, LoadStatus::Restored),
        Err(err) => {
            let backup_key = config.backup_slot_key();
            warn!(
                "event=snapshot_load module=store status=fallback reason=decode_failed backup_slot={backup_key} error={err}"
            );
            if let Err(backup_err) = storage.set(&backup_key, &raw) {
                error!(
                    "event=snapshot_backup module=store status=error backup_slot={backup_key} error={backup_err}"
                );
            }
            (AppState::default(), LoadStatus::RecoveredFromCorrupt)
        }
    }
}

fn position<T>(
    records: &[T],
    entity: EntityKind,
    id: &str,
    id_of: impl Fn(&T) -> &RecordId,
) -> StoreResult<usize> {
    records
        .iter()
        .position(|record| id_of(record) == id)
        .ok_or_else(|| not_found(entity, id))
}

fn not_found(entity: EntityKind, id: &str) -> StoreError {
    StoreError::NotFound {
        entity,
        id: id.to_string(),
    }
}
