//! Field extraction from raw OCR text
//!
//! Runs a fixed sequence of independent pattern searches over the text of both
//! card sides. Each rule takes the first match only and never fails; a rule
//! without a match leaves its field unset.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Longest address we keep, in characters
const MAX_ADDRESS_CHARS: usize = 200;

/// 12 digits, optionally grouped 4-4-4 with single whitespace separators
static ID_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)[0-9]{4}\s?[0-9]{4}\s?[0-9]{4}(?-u:\b)").unwrap());

static LABELED_DOB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)DOB[:\s]*([0-9]{2}/[0-9]{2}/[0-9]{4})").unwrap());

// Also hits any DD/MM/YYYY-shaped run elsewhere on the card.
static ANY_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{2}/[0-9]{2}/[0-9]{4})").unwrap());

static GENDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(Male|Female)").unwrap());

/// Name sits on the first non-blank line after the "Government of India" header
static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Government of India[^\n]*\n\s*([A-Za-z\t .]{3,50})").unwrap()
});

/// Everything after the label up to the PIN code (or end of text)
static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)Address[:\s]+(.*?)(?:[0-9]{6}|$)").unwrap());

/// Fields read off an identity card. `None` means no pattern matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    pub id_number: Option<String>,
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
}

/// Extract card fields from the OCR text of both sides
pub fn extract_fields(front_text: &str, back_text: &str) -> ExtractedFields {
    let combined = format!("{} {}", front_text, back_text);

    tracing::debug!("Front text: {}...", preview(front_text, 100));
    tracing::debug!("Back text: {}...", preview(back_text, 100));

    let fields = ExtractedFields {
        id_number: id_number(&combined),
        date_of_birth: date_of_birth(&combined),
        gender: gender(&combined),
        name: name(front_text),
        address: address(back_text),
    };

    tracing::debug!(
        id_number = fields.id_number.is_some(),
        name = fields.name.is_some(),
        date_of_birth = fields.date_of_birth.is_some(),
        gender = fields.gender.is_some(),
        address = fields.address.is_some(),
        "Field extraction finished"
    );

    fields
}

fn id_number(text: &str) -> Option<String> {
    let found = ID_NUMBER_RE.find(text)?;
    let digits: String = found
        .as_str()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if digits.len() != 12 {
        return None;
    }
    tracing::debug!("Found ID number");
    Some(digits)
}

fn date_of_birth(text: &str) -> Option<String> {
    let caps = LABELED_DOB_RE
        .captures(text)
        .or_else(|| ANY_DATE_RE.captures(text))?;
    let dob = caps.get(1)?.as_str().to_string();
    tracing::debug!("Found DOB: {}", dob);
    Some(dob)
}

fn gender(text: &str) -> Option<String> {
    let found = GENDER_RE.find(text)?;
    tracing::debug!("Found gender: {}", found.as_str());
    Some(found.as_str().to_lowercase())
}

fn name(front_text: &str) -> Option<String> {
    let caps = NAME_RE.captures(front_text)?;
    let name = caps.get(1)?.as_str().trim().to_string();
    tracing::debug!("Found name: {}", name);
    Some(name)
}

fn address(back_text: &str) -> Option<String> {
    let caps = ADDRESS_RE.captures(back_text)?;
    let address: String = caps
        .get(1)?
        .as_str()
        .trim()
        .chars()
        .take(MAX_ADDRESS_CHARS)
        .collect();
    tracing::debug!("Found address: {}...", preview(&address, 50));
    Some(address)
}

fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
