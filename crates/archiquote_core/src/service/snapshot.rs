//! Snapshot document codec.
//!
//! # Responsibility
//! - Serialize the whole store state into the single persisted JSON document.
//! - Read documents written by current and older builds.
//!
//! # Invariants
//! - A missing `profile` reads as the default profile; every collection that
//!   is present is kept unchanged.
//! - Stale `proposedFees` values are recomputed from scope items on read.

use crate::model::state::AppState;
use crate::service::calculator::quotation_total;
use log::warn;

pub fn encode_snapshot(state: &AppState) -> serde_json::Result<String> {
    serde_json::to_string(state)
}

pub fn decode_snapshot(raw: &str) -> serde_json::Result<AppState> {
    let mut state: AppState = serde_json::from_str(raw)?;
    recompute_derived_fields(&mut state);
    Ok(state)
}

fn recompute_derived_fields(state: &mut AppState) {
    for quotation in &mut state.quotations {
        let total = quotation_total(&quotation.scope_items);
        if quotation.proposed_fees != total {
            warn!(
                "event=snapshot_decode module=snapshot status=fixed entity=quotation id={} reason=stale_proposed_fees",
                quotation.id
            );
            quotation.proposed_fees = total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_snapshot, encode_snapshot};
    use crate::model::money::Amount;
    use crate::model::profile::UserProfile;
    use crate::model::state::AppState;

    #[test]
    fn empty_object_decodes_to_default_state() {
        assert_eq!(decode_snapshot("{}").unwrap(), AppState::default());
    }

    #[test]
    fn null_profile_is_backfilled() {
        let state = decode_snapshot(r#"{"projects": [], "profile": null}"#).unwrap();
        assert_eq!(state.profile, UserProfile::default());
    }

    #[test]
    fn stale_proposed_fees_are_recomputed() {
        let raw = r#"{
            "quotations": [{
                "id": "q1",
                "projectId": "p1",
                "quotationNo": "QT-2026-001",
                "date": "2026-03-02",
                "clientName": "Acme",
                "clientAddress": "",
                "projectTitle": "Hall",
                "objective": "",
                "scopeItems": [
                    {"id": "1", "category": "Architecture", "description": "", "charges": 1500},
                    {"id": "2", "category": "Landscape", "description": "", "charges": "abc"}
                ],
                "proposedFees": 99,
                "status": "Sent"
            }]
        }"#;
        let state = decode_snapshot(raw).unwrap();
        assert_eq!(state.quotations[0].proposed_fees, Amount::from_major(1500));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(decode_snapshot("not json").is_err());
        assert!(decode_snapshot(r#"{"projects": 5}"#).is_err());
    }

    #[test]
    fn encoded_default_state_lists_every_field() {
        let encoded = encode_snapshot(&AppState::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        for key in [
            "projects",
            "quotations",
            "invoices",
            "payments",
            "transmittals",
            "profile",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }
}
