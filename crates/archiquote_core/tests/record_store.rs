use archiquote_core::{
    Amount, EntityKind, FixedClock, InvoiceItem, InvoicePatch, InvoiceStatus, MemorySlotStorage,
    NewPayment, NewProject, NewQuotation, ProjectPatch, ProjectStatus, QuotationPatch,
    QuotationStatus, RecordStore, ScopeItem, SequentialIds, StoreConfig, StoreError,
    TransmissionMode, TransmittalPurpose, UserProfile, ValidationError,
};
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

type TestStore = RecordStore<MemorySlotStorage, FixedClock, SequentialIds>;

fn new_store() -> TestStore {
    let clock = FixedClock(Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap());
    RecordStore::open_with(
        MemorySlotStorage::new(),
        clock,
        SequentialIds::new("rec"),
        StoreConfig::default(),
    )
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

#[test]
fn create_project_assigns_id_timestamp_and_default_status() {
    let mut store = new_store();

    let project = store
        .create_project(NewProject::new("Warehouse Retrofit", "Acme Sdn Bhd"))
        .unwrap();

    assert_eq!(project.id, "rec-1");
    assert_eq!(project.status, ProjectStatus::Active);
    assert_eq!(
        project.created_at,
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap()
    );
    assert_eq!(store.snapshot().projects, vec![project]);
}

#[test]
fn new_records_are_prepended() {
    let mut store = new_store();
    let first = store.create_project(NewProject::new("First", "A")).unwrap();
    let second = store.create_project(NewProject::new("Second", "B")).unwrap();

    let ids: Vec<&str> = store
        .snapshot()
        .projects
        .iter()
        .map(|project| project.id.as_str())
        .collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
}

#[test]
fn update_project_merges_only_given_fields() {
    let mut store = new_store();
    let mut input = NewProject::new("Clinic", "Dr. Lim");
    input.notes = "keep me".to_string();
    let project = store.create_project(input).unwrap();

    store
        .update_project(
            &project.id,
            ProjectPatch {
                title: Some("Clinic Extension".to_string()),
                status: Some(ProjectStatus::Completed),
                ..ProjectPatch::default()
            },
        )
        .unwrap();

    let updated = store.snapshot().project(&project.id).unwrap();
    assert_eq!(updated.title, "Clinic Extension");
    assert_eq!(updated.status, ProjectStatus::Completed);
    assert_eq!(updated.notes, "keep me");
    assert_eq!(updated.client_name, "Dr. Lim");
    assert_eq!(updated.created_at, project.created_at);
}

#[test]
fn updates_on_missing_ids_report_not_found_and_change_nothing() {
    let mut store = new_store();
    store.create_project(NewProject::new("Only", "Client")).unwrap();
    let before = store.snapshot().clone();

    let err = store
        .update_project("missing", ProjectPatch::status(ProjectStatus::Archived))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound { entity: EntityKind::Project, ref id } if id == "missing"
    ));

    let err = store
        .update_quotation("missing", QuotationPatch::status(QuotationStatus::Sent))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound {
            entity: EntityKind::Quotation,
            ..
        }
    ));

    let err = store
        .update_invoice("missing", InvoicePatch::status(InvoiceStatus::Paid))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound {
            entity: EntityKind::Invoice,
            ..
        }
    ));

    assert_eq!(store.snapshot(), &before);
}

#[test]
fn quotation_fees_follow_scope_items() {
    let mut store = new_store();
    let project = store.create_project(NewProject::new("House", "Tan")).unwrap();

    let mut input = NewQuotation::for_project(&project, "QT-2026-001", march(2));
    input.scope_items = vec![
        ScopeItem::new("Architecture", "Council submission", Amount::from_major(5000)),
        ScopeItem::new("Landscape", "", Amount::from_minor(125_050)),
    ];
    let quotation = store.create_quotation(input).unwrap();
    assert_eq!(quotation.proposed_fees, Amount::from_minor(625_050));
    assert_eq!(quotation.status, QuotationStatus::Draft);
    assert!(quotation.scope_items.iter().all(|item| !item.id.is_empty()));

    store
        .update_quotation(
            &quotation.id,
            QuotationPatch::scope_items(vec![ScopeItem::new(
                "M&E Engineering",
                "",
                Amount::from_major(700),
            )]),
        )
        .unwrap();
    let updated = store.snapshot().quotation(&quotation.id).unwrap();
    assert_eq!(updated.proposed_fees, Amount::from_major(700));
}

#[test]
fn quotation_keeps_client_snapshot_after_project_edit() {
    let mut store = new_store();
    let project = store.create_project(NewProject::new("Shoplot", "Old Name")).unwrap();
    let quotation = store
        .create_quotation(NewQuotation::for_project(&project, "QT-2026-001", march(2)))
        .unwrap();

    store
        .update_project(
            &project.id,
            ProjectPatch {
                client_name: Some("New Name".to_string()),
                ..ProjectPatch::default()
            },
        )
        .unwrap();

    let stored = store.snapshot().quotation(&quotation.id).unwrap();
    assert_eq!(stored.client_name, "Old Name");
    assert_eq!(stored.project_title, "Shoplot");
}

#[test]
fn approve_only_moves_drafts() {
    let mut store = new_store();
    let project = store.create_project(NewProject::new("Hall", "Council")).unwrap();
    let quotation = store
        .create_quotation(NewQuotation::for_project(&project, "QT-2026-001", march(2)))
        .unwrap();

    store.approve_quotation(&quotation.id).unwrap();
    assert_eq!(
        store.snapshot().quotation(&quotation.id).unwrap().status,
        QuotationStatus::Approved
    );

    let err = store.approve_quotation(&quotation.id).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::QuotationNotDraft(_))
    ));
}

#[test]
fn documents_must_reference_existing_projects() {
    let mut store = new_store();
    let project = store.create_project(NewProject::new("Real", "Client")).unwrap();
    let mut input = NewQuotation::for_project(&project, "QT-2026-001", march(2));
    input.project_id = "ghost".to_string();

    let err = store.create_quotation(input).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::UnknownProject(ref id)) if id == "ghost"
    ));

    let mut transmittal = store.draft_transmittal(&project.id).unwrap();
    transmittal.project_id = "ghost".to_string();
    assert!(store.create_transmittal(transmittal).is_err());

    assert!(store.snapshot().quotations.is_empty());
    assert!(store.snapshot().transmittals.is_empty());
}

#[test]
fn negative_amounts_and_tax_rates_are_rejected() {
    let mut store = new_store();
    let project = store.create_project(NewProject::new("Villa", "Wong")).unwrap();

    let mut quotation = NewQuotation::for_project(&project, "QT-2026-001", march(2));
    quotation.scope_items = vec![ScopeItem::new("Architecture", "", Amount::from_minor(-1))];
    assert!(matches!(
        store.create_quotation(quotation).unwrap_err(),
        StoreError::Validation(ValidationError::NegativeAmount { .. })
    ));

    let mut invoice = store.draft_invoice(&project.id).unwrap();
    invoice.tax_rate = Decimal::from(-6);
    assert!(matches!(
        store.create_invoice(invoice).unwrap_err(),
        StoreError::Validation(ValidationError::NegativeTaxRate(_))
    ));

    let invoice = store.create_invoice(store.draft_invoice(&project.id).unwrap()).unwrap();
    let err = store
        .update_invoice(
            &invoice.id,
            InvoicePatch {
                items: Some(vec![InvoiceItem::new("Credit", Amount::from_major(-10))]),
                ..InvoicePatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.snapshot().invoice(&invoice.id).unwrap(), &invoice);
}

#[test]
fn payments_must_target_an_invoice_of_the_same_project() {
    let mut store = new_store();
    let first = store.create_project(NewProject::new("One", "A")).unwrap();
    let second = store.create_project(NewProject::new("Two", "B")).unwrap();
    let invoice = store.create_invoice(store.draft_invoice(&first.id).unwrap()).unwrap();

    let payment = |project_id: &str, invoice_id: &str| NewPayment {
        project_id: project_id.to_string(),
        invoice_id: invoice_id.to_string(),
        amount: Amount::from_major(100),
        date: march(5),
        method: "Cheque".to_string(),
        notes: Some("deposit".to_string()),
    };

    assert!(matches!(
        store.create_payment(payment(&first.id, "nope")).unwrap_err(),
        StoreError::Validation(ValidationError::UnknownInvoice(_))
    ));
    assert!(matches!(
        store.create_payment(payment(&second.id, &invoice.id)).unwrap_err(),
        StoreError::Validation(ValidationError::ProjectMismatch { .. })
    ));

    let recorded = store.create_payment(payment(&first.id, &invoice.id)).unwrap();
    assert_eq!(recorded.notes.as_deref(), Some("deposit"));
    assert_eq!(store.snapshot().payments, vec![recorded]);
    // Recording a payment by hand does not settle the invoice.
    assert_eq!(
        store.snapshot().invoice(&invoice.id).unwrap().status,
        InvoiceStatus::Unpaid
    );
}

#[test]
fn transmittal_draft_uses_profile_and_project() {
    let mut store = new_store();
    store
        .update_profile(UserProfile {
            company_name: "Studio Satu".to_string(),
            company_address: "Jalan Satu".to_string(),
            default_sender_name: "Aina".to_string(),
            default_sender_title: "Principal".to_string(),
            logo_url: String::new(),
        })
        .unwrap();
    let project = store.create_project(NewProject::new("Surau", "JAKIM")).unwrap();

    let mut draft = store.draft_transmittal(&project.id).unwrap();
    assert_eq!(draft.transmittal_no, "TR-2026-001");
    assert_eq!(draft.sent_from, "Studio Satu");
    assert_eq!(draft.sent_to, "JAKIM");
    assert_eq!(draft.sender_name, "Aina");
    assert_eq!(draft.job_no, project.id.to_uppercase());
    assert_eq!(draft.date, "2 March 2026");

    draft.transmission_modes = vec![
        TransmissionMode::Emails,
        TransmissionMode::Delivery,
        TransmissionMode::Emails,
    ];
    draft.purposes = vec![TransmittalPurpose::ForApproval];
    let transmittal = store.create_transmittal(draft).unwrap();

    assert_eq!(
        transmittal.transmission_modes,
        vec![TransmissionMode::Emails, TransmissionMode::Delivery]
    );
    assert!(!transmittal.is_signed());
    assert!(transmittal.items.iter().all(|item| !item.id.is_empty()));
    assert_eq!(
        store.suggest_document_number(archiquote_core::DocumentKind::Transmittal),
        "TR-2026-002"
    );
}

#[test]
fn profile_update_replaces_whole_profile() {
    let mut store = new_store();
    assert_eq!(store.snapshot().profile, UserProfile::default());

    let replacement = UserProfile {
        company_name: "New Co".to_string(),
        company_address: String::new(),
        default_sender_name: String::new(),
        default_sender_title: String::new(),
        logo_url: "logo.png".to_string(),
    };
    store.update_profile(replacement.clone()).unwrap();
    assert_eq!(store.snapshot().profile, replacement);
}

#[test]
fn snapshot_is_stable_without_mutation() {
    let mut store = new_store();
    store.create_project(NewProject::new("Stable", "Client")).unwrap();

    let first = store.snapshot().clone();
    let second = store.snapshot().clone();
    assert_eq!(first, second);
}
