//! Field extractor: best-effort name, email and phone recovery from resume text.
//!
//! Every field is searched independently through an ordered chain of pure
//! steps: explicit label, then structural pattern, then fallback inference.
//! The first step that yields a value wins. Nothing here fails; a field that
//! cannot be found is `None`.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::resume::ParsedContact;
use crate::resume::email::EmailAddress;

/// Only the first few lines are considered for an unlabelled name.
const NAME_SCAN_LINES: usize = 5;
const MAX_NAME_CHARS: usize = 100;
const MIN_PHONE_CHARS: usize = 10;

/// Header words that look like a title-cased name but are not one.
const NON_NAME_WORDS: &[&str] = &["resume", "cv", "curriculum", "vitae"];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern is valid")
});

/// Tried in order: US format with optional `+1`, then a looser 3-3-4 grouping.
static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\+?1?[-.\s]?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})",
        r"\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("phone pattern is valid"))
    .collect()
});

/// Extracts contact fields from plain document text.
pub fn extract_contact(text: &str) -> ParsedContact {
    let email = extract_email(text);
    let name = extract_name(text, email.as_ref());
    let phone = extract_phone(text);

    debug!(
        ?name,
        email = ?email.as_ref().map(EmailAddress::as_str),
        ?phone,
        "Extracted contact fields"
    );

    ParsedContact {
        name,
        email: email.map(EmailAddress::into_inner),
        phone,
        ..ParsedContact::from_text(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Email
// ────────────────────────────────────────────────────────────────────────────

pub fn extract_email(text: &str) -> Option<EmailAddress> {
    labelled_email(text).or_else(|| scanned_email(text))
}

fn labelled_email(text: &str) -> Option<EmailAddress> {
    labelled_values(text, "email:").find_map(|candidate| match EmailAddress::new(candidate) {
        Ok(email) => Some(email),
        Err(e) => {
            debug!("Labelled email {candidate:?} rejected: {e}");
            None
        }
    })
}

/// Only the first pattern match is validated. Later matches are never tried.
fn scanned_email(text: &str) -> Option<EmailAddress> {
    let first = EMAIL_RE.find(text)?.as_str();
    EmailAddress::new(first)
        .map_err(|e| debug!("Scanned email {first:?} rejected: {e}"))
        .ok()
}

// ────────────────────────────────────────────────────────────────────────────
// Name
// ────────────────────────────────────────────────────────────────────────────

pub fn extract_name(text: &str, email: Option<&EmailAddress>) -> Option<String> {
    labelled_name(text)
        .or_else(|| heading_name(text))
        .or_else(|| email.and_then(name_from_email))
}

fn labelled_name(text: &str) -> Option<String> {
    labelled_values(text, "name:")
        .find(|name| !name.is_empty() && name.chars().count() < MAX_NAME_CHARS)
        .map(String::from)
}

/// A short, title-cased line near the top of the document.
fn heading_name(text: &str) -> Option<String> {
    text.split('\n')
        .take(NAME_SCAN_LINES)
        .map(str::trim)
        .find(|line| looks_like_name(line))
        .map(String::from)
}

fn looks_like_name(line: &str) -> bool {
    let len = line.chars().count();
    if len == 0 || len >= MAX_NAME_CHARS {
        return false;
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    if !(2..=4).contains(&words.len()) {
        return false;
    }

    let capitalized = words
        .iter()
        .all(|w| w.chars().next().is_some_and(char::is_uppercase));
    let has_header_word = words
        .iter()
        .any(|w| NON_NAME_WORDS.contains(&w.to_lowercase().as_str()));

    capitalized && !has_header_word
}

/// `john.doe@…` becomes "John Doe"; `johnny@…` becomes "Johnny".
fn name_from_email(email: &EmailAddress) -> Option<String> {
    let local = email.local_part();

    if local.contains('.') {
        let parts: Vec<&str> = local.split('.').collect();
        match parts.as_slice() {
            [first, last] => Some(format!("{} {}", capitalize(first), capitalize(last))),
            _ => None,
        }
    } else if local.chars().count() > 2 {
        Some(capitalize(local))
    } else {
        None
    }
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Phone
// ────────────────────────────────────────────────────────────────────────────

pub fn extract_phone(text: &str) -> Option<String> {
    labelled_phone(text).or_else(|| scanned_phone(text))
}

fn labelled_phone(text: &str) -> Option<String> {
    labelled_values(text, "phone:")
        .filter(|raw| !raw.is_empty())
        .map(clean_phone)
        .find(|phone| phone.chars().count() >= MIN_PHONE_CHARS)
}

fn scanned_phone(text: &str) -> Option<String> {
    PHONE_PATTERNS.iter().find_map(|re| {
        let caps = re.captures(text)?;
        let matched = if re.captures_len() > 1 {
            caps.iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str())
                .collect::<String>()
        } else {
            caps[0].to_string()
        };

        let phone = clean_phone(&matched);
        if phone.chars().count() >= MIN_PHONE_CHARS {
            Some(phone)
        } else {
            debug!("Scanned phone {matched:?} too short after cleaning");
            None
        }
    })
}

/// Keeps only ASCII digits and `+`.
fn clean_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Labels
// ────────────────────────────────────────────────────────────────────────────

/// Yields the trimmed remainder of every line that starts with `label`
/// (ASCII case-insensitive, after trimming the line).
fn labelled_values<'a>(text: &'a str, label: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    text.split('\n')
        .filter_map(move |line| strip_label(line.trim(), label))
        .map(str::trim)
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    if head.eq_ignore_ascii_case(label) {
        Some(&line[label.len()..])
    } else {
        None
    }
}
