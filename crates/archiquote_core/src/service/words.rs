//! Amount spelled out in words for formal documents.
//!
//! The rendering works on the same minor units every other calculation
//! uses, so it never rounds independently.

use crate::model::money::Amount;

const CURRENCY_LABEL: &str = "Ringgit Malaysia";
const MINOR_LABEL: &str = "Sen";

const ONES: [&str; 20] = [
    "Zero",
    "One",
    "Two",
    "Three",
    "Four",
    "Five",
    "Six",
    "Seven",
    "Eight",
    "Nine",
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const SCALES: [&str; 7] = [
    "",
    "Thousand",
    "Million",
    "Billion",
    "Trillion",
    "Quadrillion",
    "Quintillion",
];

/// Renders `amount` as e.g. `Ringgit Malaysia Eight Thousand Two Hundred Only`.
///
/// A fractional part is appended as `and Sen Fifty`.
pub fn amount_in_words(amount: Amount) -> String {
    let minor = amount.minor_units();
    let magnitude = minor.unsigned_abs();
    let major = magnitude / 100;
    let sen = magnitude % 100;

    let mut rendered = String::from(CURRENCY_LABEL);
    if minor < 0 {
        rendered.push_str(" Minus");
    }
    rendered.push(' ');
    rendered.push_str(&integer_in_words(major));
    if sen > 0 {
        rendered.push_str(" and ");
        rendered.push_str(MINOR_LABEL);
        rendered.push(' ');
        rendered.push_str(&integer_in_words(sen));
    }
    rendered.push_str(" Only");
    rendered
}

/// Spells out a whole number, e.g. `692` -> `Six Hundred Ninety-Two`.
pub fn integer_in_words(value: u64) -> String {
    if value == 0 {
        return ONES[0].to_string();
    }

    let mut groups = Vec::new();
    let mut remaining = value;
    let mut scale = 0;
    while remaining > 0 {
        let chunk = remaining % 1000;
        if chunk > 0 {
            let mut words = chunk_in_words(chunk);
            if !SCALES[scale].is_empty() {
                words.push(' ');
                words.push_str(SCALES[scale]);
            }
            groups.push(words);
        }
        remaining /= 1000;
        scale += 1;
    }

    groups.reverse();
    groups.join(" ")
}

fn chunk_in_words(chunk: u64) -> String {
    let hundreds = (chunk / 100) as usize;
    let rest = (chunk % 100) as usize;
    let mut parts = Vec::new();

    if hundreds > 0 {
        parts.push(format!("{} Hundred", ONES[hundreds]));
    }
    if rest >= 20 {
        let (tens, ones) = (rest / 10, rest % 10);
        if ones == 0 {
            parts.push(TENS[tens].to_string());
        } else {
            parts.push(format!("{}-{}", TENS[tens], ONES[ones]));
        }
    } else if rest > 0 {
        parts.push(ONES[rest].to_string());
    }

    parts.join(" ")
}
