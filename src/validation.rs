use once_cell::sync::Lazy;
use regex::Regex;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";

const MIN_PHONE_LEN: usize = 10;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d\s+\-()]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    Other,
}

impl FieldKind {
    /// Maps an input's `type` attribute.
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type.to_ascii_lowercase().as_str() {
            "text" => FieldKind::Text,
            "email" => FieldKind::Email,
            "tel" => FieldKind::Tel,
            "date" => FieldKind::Date,
            _ => FieldKind::Other,
        }
    }
}

/// A form control's current value as seen by the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInput {
    value: String,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldInput {
    pub fn new(value: &str, required: bool, kind: FieldKind) -> Self {
        Self {
            value: value.trim().to_string(),
            required,
            kind,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(&'static str),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Validation::Valid => None,
            Validation::Invalid(message) => Some(message),
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Character-set check plus a minimum length counted in characters, not digits.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value) && value.chars().count() >= MIN_PHONE_LEN
}

pub fn validate(field: &FieldInput) -> Validation {
    let value = field.value();

    if value.is_empty() {
        return if field.required {
            Validation::Invalid(REQUIRED_MESSAGE)
        } else {
            Validation::Valid
        };
    }

    match field.kind {
        FieldKind::Email if !is_valid_email(value) => Validation::Invalid(EMAIL_MESSAGE),
        FieldKind::Tel if !is_valid_phone(value) => Validation::Invalid(PHONE_MESSAGE),
        _ => Validation::Valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_empty_fields_are_rejected_for_every_kind() {
        for kind in [FieldKind::Text, FieldKind::Email, FieldKind::Tel, FieldKind::Date, FieldKind::Other] {
            let result = validate(&FieldInput::new("   ", true, kind));
            assert_eq!(result.error_message(), Some(REQUIRED_MESSAGE));
        }
    }

    #[test]
    fn optional_empty_fields_pass() {
        assert!(validate(&FieldInput::new("", false, FieldKind::Email)).is_valid());
        assert!(validate(&FieldInput::new("", false, FieldKind::Tel)).is_valid());
    }

    #[test]
    fn email_needs_a_dot_after_the_at() {
        assert_eq!(
            validate(&FieldInput::new("a@b", true, FieldKind::Email)),
            Validation::Invalid(EMAIL_MESSAGE)
        );
        assert!(validate(&FieldInput::new("a@b.com", true, FieldKind::Email)).is_valid());
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(is_valid_email("first.last@mail.example.co.uk"));
    }

    #[test]
    fn email_value_is_trimmed_before_matching() {
        assert!(validate(&FieldInput::new("  guest@staygo.com \n", true, FieldKind::Email)).is_valid());
    }

    #[test]
    fn phone_rules() {
        assert_eq!(
            validate(&FieldInput::new("123", true, FieldKind::Tel)),
            Validation::Invalid(PHONE_MESSAGE)
        );
        assert!(validate(&FieldInput::new("+44 123 456 7890", true, FieldKind::Tel)).is_valid());
        assert!(is_valid_phone("(020) 7946-0958"));
        assert!(!is_valid_phone("0207946095x"));
        // Ten characters, only six of them digits.
        assert!(is_valid_phone("(12) 34-56"));
    }

    #[test]
    fn text_kinds_only_check_presence() {
        assert!(validate(&FieldInput::new("anything @ all", true, FieldKind::Text)).is_valid());
        assert!(validate(&FieldInput::new("2026-10-19", true, FieldKind::Date)).is_valid());
    }

    #[test]
    fn input_types_map_to_kinds() {
        assert_eq!(FieldKind::from_input_type("EMAIL"), FieldKind::Email);
        assert_eq!(FieldKind::from_input_type("tel"), FieldKind::Tel);
        assert_eq!(FieldKind::from_input_type("number"), FieldKind::Other);
    }
}
