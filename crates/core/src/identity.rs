//! Customer identifiers: sign-in lookup keys and phone number rules.

use crate::error::CoreError;

/// Minimum accepted password length for new customers.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The single identifier a customer signs in with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigninIdentifier {
    Email(String),
    Phone(String),
}

impl SigninIdentifier {
    /// Pick the identifier from the optional email and phone fields.
    ///
    /// Blank values count as absent. Exactly one of the two must remain.
    pub fn resolve(email: Option<&str>, phone: Option<&str>) -> Result<Self, CoreError> {
        let email = email.map(str::trim).filter(|s| !s.is_empty());
        let phone = phone.map(str::trim).filter(|s| !s.is_empty());

        match (email, phone) {
            (Some(email), None) => Ok(Self::Email(email.to_string())),
            (None, Some(phone)) => Ok(Self::Phone(phone.to_string())),
            _ => Err(CoreError::Validation(
                "exactly one of email or phone must be provided".into(),
            )),
        }
    }
}

/// Normalize a mobile number to its local `08…` form.
///
/// Spaces, dashes, dots, and parentheses are dropped and a leading `+62`
/// country code becomes `0`. Returns `None` unless the result is 10 to 13
/// digits starting with `08`.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let compact: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();

    let local = match compact.strip_prefix("+62") {
        Some(rest) => format!("0{rest}"),
        None => compact,
    };

    let valid = local.starts_with("08")
        && (10..=13).contains(&local.len())
        && local.chars().all(|c| c.is_ascii_digit());

    valid.then_some(local)
}

/// `true` when [`normalize_phone`] accepts the number.
pub fn is_valid_phone(raw: &str) -> bool {
    normalize_phone(raw).is_some()
}
