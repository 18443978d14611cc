use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::timing::Millis;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";
pub const SUBJECT_MESSAGE: &str = "Subject must be at least 3 characters long";
pub const MESSAGE_MESSAGE: &str = "Message must be at least 10 characters long";

// Minimum lengths are in UTF-16 code units, the unit the browser uses
// for `value.length` and `minlength`.
const SUBJECT_MIN_UNITS: usize = 3;
const MESSAGE_MIN_UNITS: usize = 10;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("phone pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    TextArea,
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    pub has_error: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            value: String::new(),
            has_error: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: Option<&'static str>,
}

impl ValidationResult {
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub const fn invalid(message: &'static str) -> Self {
        Self {
            is_valid: false,
            message: Some(message),
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

/// First matching rule wins; the value is trimmed before any rule runs.
pub fn validate(field: &Field) -> ValidationResult {
    let value = field.value.trim();

    if field.required && value.is_empty() {
        return ValidationResult::invalid(REQUIRED_MESSAGE);
    }
    if let Some(message) = format_error(field.kind, value) {
        return ValidationResult::invalid(message);
    }
    match field.name.as_str() {
        "subject" if value.encode_utf16().count() < SUBJECT_MIN_UNITS => {
            ValidationResult::invalid(SUBJECT_MESSAGE)
        }
        "message" if value.encode_utf16().count() < MESSAGE_MIN_UNITS => {
            ValidationResult::invalid(MESSAGE_MESSAGE)
        }
        _ => ValidationResult::valid(),
    }
}

/// Email / phone shape check used while the user is still typing.
/// Empty values are never a format error.
pub fn format_error(kind: FieldKind, value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return None;
    }
    match kind {
        FieldKind::Email if !is_valid_email(value) => Some(EMAIL_MESSAGE),
        FieldKind::Tel if !is_valid_phone(value) => Some(PHONE_MESSAGE),
        _ => None,
    }
}

/// Keeps a field from raising the same toast on every keystroke.
/// A claim holds for `hold_ms` and then lapses on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorToastGuard {
    hold_ms: Millis,
    shown_until: HashMap<String, Millis>,
}

impl ErrorToastGuard {
    pub fn new(hold_ms: Millis) -> Self {
        Self {
            hold_ms,
            shown_until: HashMap::new(),
        }
    }

    pub fn try_claim(&mut self, field: &str, now: Millis) -> bool {
        self.shown_until.retain(|_, until| *until > now);
        if self.shown_until.contains_key(field) {
            return false;
        }
        self.shown_until.insert(field.to_string(), now + self.hold_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_required_field_is_rejected() {
        let field = Field::new("name", FieldKind::Text).required();
        assert_eq!(validate(&field), ValidationResult::invalid(REQUIRED_MESSAGE));

        let blank = Field::new("name", FieldKind::Text).required().with_value("   ");
        assert_eq!(validate(&blank), ValidationResult::invalid(REQUIRED_MESSAGE));
    }

    #[test]
    fn email_shape() {
        let ok = Field::new("email", FieldKind::Email).with_value("a@b.com");
        assert_eq!(validate(&ok), ValidationResult::valid());

        for bad in ["not-an-email", "a@b", "a b@c.com", "a@@b.com", "@b.com"] {
            let field = Field::new("email", FieldKind::Email).with_value(bad);
            assert_eq!(validate(&field), ValidationResult::invalid(EMAIL_MESSAGE), "{bad}");
        }
    }

    #[test]
    fn optional_empty_email_is_fine() {
        let field = Field::new("email", FieldKind::Email);
        assert!(validate(&field).is_valid);
    }

    #[test]
    fn phone_shape() {
        for good in ["+91 98765 43210", "(555) 123-4567", "0123456789"] {
            assert!(is_valid_phone(good), "{good}");
        }
        for bad in ["12345", "+91-98765-abcde", "++1234567890"] {
            assert!(!is_valid_phone(bad), "{bad}");
        }
        let field = Field::new("phone", FieldKind::Tel).with_value("call me");
        assert_eq!(validate(&field), ValidationResult::invalid(PHONE_MESSAGE));
    }

    #[test]
    fn subject_and_message_length_rules() {
        let short_subject = Field::new("subject", FieldKind::Text).with_value(" hi ");
        assert_eq!(validate(&short_subject), ValidationResult::invalid(SUBJECT_MESSAGE));

        let short = Field::new("message", FieldKind::TextArea).with_value("short");
        assert_eq!(validate(&short), ValidationResult::invalid(MESSAGE_MESSAGE));

        let long = Field::new("message", FieldKind::TextArea).with_value("this is long enough");
        assert_eq!(validate(&long), ValidationResult::valid());
    }

    #[test]
    fn lengths_count_utf16_units() {
        // Each emoji is one char but two UTF-16 units.
        let subject = Field::new("subject", FieldKind::Text).with_value("😀😀");
        assert_eq!(validate(&subject), ValidationResult::valid());

        let message = Field::new("message", FieldKind::TextArea).with_value("😀😀😀😀😀");
        assert_eq!(validate(&message), ValidationResult::valid());

        let accented = Field::new("message", FieldKind::TextArea).with_value("héllo wör");
        assert_eq!(validate(&accented), ValidationResult::invalid(MESSAGE_MESSAGE));
    }

    #[test]
    fn required_rule_runs_before_length_rule() {
        let field = Field::new("message", FieldKind::TextArea).required();
        assert_eq!(validate(&field).message, Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn toast_guard_lapses_after_hold() {
        let mut guard = ErrorToastGuard::new(3_000);
        assert!(guard.try_claim("email", 0));
        assert!(!guard.try_claim("email", 2_999));
        assert!(guard.try_claim("phone", 10));
        assert!(guard.try_claim("email", 3_000));
    }
}
