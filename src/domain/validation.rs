// src/domain/validation.rs
//
// Field validation engine
//
// Every check of a field runs, failures are accumulated and reported together.
// Each call owns a fresh accumulator, nothing is kept on the entity.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

pub const USERNAME_MIN: usize = 4;
pub const USERNAME_MAX: usize = 24;
pub const EMAIL_MIN: usize = 12;
pub const EMAIL_MAX: usize = 28;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 128;

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("valid username regex"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+$").expect("valid email regex")
    })
}

// ============================================================================
// MESSAGES
// ============================================================================

/// Human-readable message templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTemplate {
    Required,
    MinLength,
    MaxLength,
    OnlyLatin,
    Password,
    EmailContains,
    EmailMatches,
}

impl ErrorTemplate {
    pub fn render(&self, field: &str, limit: usize) -> String {
        match self {
            ErrorTemplate::Required => format!("Field {} is required.", field),
            ErrorTemplate::MinLength => {
                format!("Field {} cannot be shorter than {} characters.", field, limit)
            }
            ErrorTemplate::MaxLength => {
                format!("Field {} cannot be longer than {} characters.", field, limit)
            }
            ErrorTemplate::OnlyLatin => format!(
                "Field {} may contain only Latin letters, digits and the _ symbol.",
                field
            ),
            ErrorTemplate::Password => format!(
                "Field {} needs at least one uppercase letter, one lowercase letter and one digit.",
                field
            ),
            ErrorTemplate::EmailContains => format!("Field {} must contain @ and a dot.", field),
            ErrorTemplate::EmailMatches => {
                format!("Field {} does not match the standard email format.", field)
            }
        }
    }
}

/// Ordered list of validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: String) {
        self.0.push(message);
    }

    /// Appends another field's failures after this one's
    pub fn merge(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

// ============================================================================
// CHECKS
// ============================================================================

/// A single predicate over a field value
#[derive(Debug, Clone)]
pub enum Check {
    NotBlank,
    MinLength(usize),
    MaxLength(usize),
    Matches(&'static Regex, ErrorTemplate),
    ContainsAll(&'static [char], ErrorTemplate),
    /// At least one ASCII lowercase letter, one uppercase letter and one digit,
    /// all on a single line
    MixedCharClasses(ErrorTemplate),
}

impl Check {
    /// Returns the failure message, or None when the value passes
    fn evaluate(&self, label: &str, value: &str) -> Option<String> {
        match self {
            Check::NotBlank => value
                .trim()
                .is_empty()
                .then(|| ErrorTemplate::Required.render(label, 0)),
            Check::MinLength(min) => (value.chars().count() < *min)
                .then(|| ErrorTemplate::MinLength.render(label, *min)),
            Check::MaxLength(max) => (value.chars().count() > *max)
                .then(|| ErrorTemplate::MaxLength.render(label, *max)),
            Check::Matches(pattern, template) => {
                (!pattern.is_match(value)).then(|| template.render(label, 0))
            }
            Check::ContainsAll(chars, template) => (!chars.iter().all(|c| value.contains(*c)))
                .then(|| template.render(label, 0)),
            Check::MixedCharClasses(template) => {
                let lower = value.chars().any(|c| c.is_ascii_lowercase());
                let upper = value.chars().any(|c| c.is_ascii_uppercase());
                let digit = value.chars().any(|c| c.is_ascii_digit());
                let single_line = !value.chars().any(is_line_terminator);
                (!(lower && upper && digit && single_line)).then(|| template.render(label, 0))
            }
        }
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Ordered checks for one named field
#[derive(Debug, Clone)]
pub struct FieldRules {
    label: &'static str,
    checks: Vec<Check>,
}

impl FieldRules {
    pub fn new(label: &'static str, checks: Vec<Check>) -> Self {
        Self { label, checks }
    }

    pub fn label(&self) -> &str {
        self.label
    }

    /// Runs every check, never stopping at the first failure
    pub fn validate(&self, value: &str) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for check in &self.checks {
            if let Some(message) = check.evaluate(self.label, value) {
                errors.push(message);
            }
        }
        errors.into_result()
    }

    pub fn username() -> Self {
        Self::new(
            "username",
            vec![
                Check::NotBlank,
                Check::MinLength(USERNAME_MIN),
                Check::MaxLength(USERNAME_MAX),
                Check::Matches(username_pattern(), ErrorTemplate::OnlyLatin),
            ],
        )
    }

    pub fn email() -> Self {
        Self::new(
            "email",
            vec![
                Check::NotBlank,
                Check::MinLength(EMAIL_MIN),
                Check::MaxLength(EMAIL_MAX),
                Check::ContainsAll(&['@', '.'], ErrorTemplate::EmailContains),
                Check::Matches(email_pattern(), ErrorTemplate::EmailMatches),
            ],
        )
    }

    pub fn password() -> Self {
        Self::new(
            "password",
            vec![
                Check::NotBlank,
                Check::MinLength(PASSWORD_MIN),
                Check::MaxLength(PASSWORD_MAX),
                Check::MixedCharClasses(ErrorTemplate::Password),
            ],
        )
    }
}

pub fn validate_username(username: &str) -> Result<(), ValidationErrors> {
    FieldRules::username().validate(username)
}

pub fn validate_email(email: &str) -> Result<(), ValidationErrors> {
    FieldRules::email().validate(email)
}

pub fn validate_password(password: &str) -> Result<(), ValidationErrors> {
    FieldRules::password().validate(password)
}

/// Validates the identity fields of an account together.
/// Messages keep field order: username, email, password.
pub fn validate_account(username: &str, email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for result in [
        validate_username(username),
        validate_email(email),
        validate_password(password),
    ] {
        if let Err(field_errors) = result {
            errors.merge(field_errors);
        }
    }
    errors.into_result()
}
