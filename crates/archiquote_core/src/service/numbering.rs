//! Suggested document numbers (`QT-2026-001`, `INV-2026-014`, ...).
//!
//! Numbers are only suggestions: they stay user-editable and uniqueness is
//! not enforced. The next suggestion continues after the highest sequence
//! already used for the same prefix and year.

use once_cell::sync::Lazy;
use regex::Regex;

static DOCUMENT_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z]+)-(\d{4})-(\d+)\s*$").expect("valid document number regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Quotation,
    Invoice,
    Transmittal,
}

impl DocumentKind {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Quotation => "QT",
            Self::Invoice => "INV",
            Self::Transmittal => "TR",
        }
    }
}

/// Returns `<PREFIX>-<year>-<seq>` with `seq` zero-padded to three digits.
pub fn next_document_number<'a>(
    kind: DocumentKind,
    year: i32,
    existing: impl IntoIterator<Item = &'a str>,
) -> String {
    let highest = existing
        .into_iter()
        .filter_map(|number| parse_sequence(kind, year, number))
        .max()
        .unwrap_or(0);
    format!("{}-{year}-{:03}", kind.prefix(), highest.saturating_add(1))
}

fn parse_sequence(kind: DocumentKind, year: i32, number: &str) -> Option<u64> {
    let captures = DOCUMENT_NUMBER_RE.captures(number)?;
    if !captures[1].eq_ignore_ascii_case(kind.prefix()) {
        return None;
    }
    if captures[2].parse::<i32>().ok()? != year {
        return None;
    }
    captures[3].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{next_document_number, DocumentKind};

    #[test]
    fn starts_at_one_for_a_new_year() {
        let existing = ["QT-2025-017"];
        assert_eq!(
            next_document_number(DocumentKind::Quotation, 2026, existing),
            "QT-2026-001"
        );
    }

    #[test]
    fn continues_after_highest_matching_sequence() {
        let existing = ["INV-2026-003", "INV-2026-011", "QT-2026-040", "custom no", "inv-2026-009"];
        assert_eq!(
            next_document_number(DocumentKind::Invoice, 2026, existing),
            "INV-2026-012"
        );
    }

    #[test]
    fn widens_past_three_digits() {
        assert_eq!(
            next_document_number(DocumentKind::Transmittal, 2026, ["TR-2026-999"]),
            "TR-2026-1000"
        );
    }
}
