//! EmailAddress value object and the syntactic/domain checks behind it.

use std::fmt;
use thiserror::Error;

const MAX_ADDRESS_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Reserved names that never resolve on the public internet.
const SPECIAL_USE_DOMAINS: &[&str] = &["arpa", "invalid", "local", "localhost", "onion", "test"];

/// Characters allowed in a dot-atom besides alphanumerics (RFC 5322 `atext`).
const ATEXT_SYMBOLS: &str = "!#$%&'*+/=?^_`{|}~-";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("The email address is too long ({0} characters)")]
    TooLong(usize),

    #[error("The email address must contain exactly one @-sign")]
    AtSign,

    #[error("Invalid local part: {0}")]
    LocalPart(String),

    #[error("Invalid domain: {0}")]
    Domain(String),
}

/// A syntactically valid email address.
///
/// Construction runs the same checks as [`validate_email`]; holding an
/// `EmailAddress` means the address passed them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Result<Self, EmailError> {
        let email = email.into();
        validate_email(&email)?;
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// The part before the `@`.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validates an email address.
///
/// Checks performed:
/// - overall length and a single `@`
/// - local part is a dot-atom of at most 64 characters
/// - domain has at least two labels, each 1–63 alphanumeric/hyphen characters
///   that do not start or end with a hyphen
/// - top-level label is not purely numeric
/// - domain is not a special-use name such as `localhost` or `*.test`
///
/// No DNS lookup is made.
pub fn validate_email(email: &str) -> Result<(), EmailError> {
    let len = email.chars().count();
    if len > MAX_ADDRESS_LEN {
        return Err(EmailError::TooLong(len));
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(EmailError::AtSign),
    };

    validate_local_part(local)?;
    validate_domain(domain)
}

fn validate_local_part(local: &str) -> Result<(), EmailError> {
    if local.is_empty() {
        return Err(EmailError::LocalPart(
            "There must be something before the @-sign".to_string(),
        ));
    }
    if local.chars().count() > MAX_LOCAL_LEN {
        return Err(EmailError::LocalPart(format!(
            "The part before the @-sign is longer than {MAX_LOCAL_LEN} characters"
        )));
    }
    if local.starts_with('.') || local.ends_with('.') {
        return Err(EmailError::LocalPart(
            "The part before the @-sign cannot start or end with a period".to_string(),
        ));
    }
    if local.contains("..") {
        return Err(EmailError::LocalPart(
            "The part before the @-sign cannot contain two periods in a row".to_string(),
        ));
    }
    if let Some(bad) = local.chars().find(|&c| !is_atext(c) && c != '.') {
        return Err(EmailError::LocalPart(format!(
            "The part before the @-sign contains an invalid character: {bad:?}"
        )));
    }
    Ok(())
}

fn validate_domain(domain: &str) -> Result<(), EmailError> {
    if domain.is_empty() {
        return Err(EmailError::Domain(
            "There must be something after the @-sign".to_string(),
        ));
    }
    if domain.chars().count() > MAX_DOMAIN_LEN {
        return Err(EmailError::Domain(format!(
            "The domain is longer than {MAX_DOMAIN_LEN} characters"
        )));
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(EmailError::Domain(
            "The part after the @-sign is not valid. It should have a period".to_string(),
        ));
    }

    for label in &labels {
        validate_label(label)?;
    }

    let tld = labels[labels.len() - 1];
    if tld.chars().all(|c| c.is_ascii_digit()) {
        return Err(EmailError::Domain(
            "The part after the @-sign is not valid. It is not within a valid top-level domain"
                .to_string(),
        ));
    }

    let lowered = domain.to_lowercase();
    for special in SPECIAL_USE_DOMAINS {
        if lowered == *special || lowered.ends_with(&format!(".{special}")) {
            return Err(EmailError::Domain(format!(
                "The domain name {domain} is a special-use or reserved name"
            )));
        }
    }

    Ok(())
}

fn validate_label(label: &str) -> Result<(), EmailError> {
    if label.is_empty() {
        return Err(EmailError::Domain(
            "An email address cannot have two periods in a row or end with a period".to_string(),
        ));
    }
    if label.chars().count() > MAX_LABEL_LEN {
        return Err(EmailError::Domain(format!(
            "A label in the domain is longer than {MAX_LABEL_LEN} characters"
        )));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(EmailError::Domain(
            "A label in the domain cannot start or end with a hyphen".to_string(),
        ));
    }
    if let Some(bad) = label.chars().find(|&c| !(c.is_alphanumeric() || c == '-')) {
        return Err(EmailError::Domain(format!(
            "The domain contains an invalid character: {bad:?}"
        )));
    }
    Ok(())
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || ATEXT_SYMBOLS.contains(c) || (!c.is_ascii() && c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_addresses() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("john.smith@company.com").is_ok());
        assert!(validate_email("first+tag@sub.example.co.uk").is_ok());
        assert!(validate_email("o'brien@mail-server.io").is_ok());
    }

    #[test]
    fn test_rejects_missing_or_extra_at_sign() {
        assert_eq!(validate_email("jane.example.com"), Err(EmailError::AtSign));
        assert_eq!(validate_email("a@b@example.com"), Err(EmailError::AtSign));
    }

    #[test]
    fn test_rejects_bad_local_part() {
        assert!(matches!(validate_email("@example.com"), Err(EmailError::LocalPart(_))));
        assert!(matches!(validate_email(".jane@example.com"), Err(EmailError::LocalPart(_))));
        assert!(matches!(validate_email("jane.@example.com"), Err(EmailError::LocalPart(_))));
        assert!(matches!(validate_email("ja..ne@example.com"), Err(EmailError::LocalPart(_))));
        assert!(matches!(validate_email("ja ne@example.com"), Err(EmailError::LocalPart(_))));
    }

    #[test]
    fn test_rejects_overlong_local_part() {
        let local = "a".repeat(65);
        assert!(matches!(
            validate_email(&format!("{local}@example.com")),
            Err(EmailError::LocalPart(_))
        ));
    }

    #[test]
    fn test_rejects_bad_domain() {
        assert!(matches!(validate_email("jane@"), Err(EmailError::Domain(_))));
        assert!(matches!(validate_email("jane@localhost"), Err(EmailError::Domain(_))));
        assert!(matches!(validate_email("jane@example..com"), Err(EmailError::Domain(_))));
        assert!(matches!(validate_email("jane@-example.com"), Err(EmailError::Domain(_))));
        assert!(matches!(validate_email("jane@example.com."), Err(EmailError::Domain(_))));
        assert!(matches!(validate_email("jane@10.0.0.1"), Err(EmailError::Domain(_))));
        assert!(matches!(validate_email("jane@exa_mple.com"), Err(EmailError::Domain(_))));
    }

    #[test]
    fn test_rejects_special_use_domains() {
        assert!(validate_email("jane@example.test").is_err());
        assert!(validate_email("jane@printer.local").is_err());
        assert!(validate_email("jane@host.invalid").is_err());
    }

    #[test]
    fn test_rejects_too_long_address() {
        let email = format!("jane@{}.com", "a".repeat(260));
        assert!(matches!(validate_email(&email), Err(EmailError::TooLong(_))));
    }

    #[test]
    fn test_email_address_local_part() {
        let email = EmailAddress::new("john.doe@example.com").unwrap();
        assert_eq!(email.local_part(), "john.doe");
        assert_eq!(email.to_string(), "john.doe@example.com");
    }
}
