use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use super::resource::UserRequest;
use crate::error::resource::{ValidationErrorKind, ValidationFieldError};

lazy_static! {
    static ref EMAIL: Regex = Regex::new(concat!(
        r"^(?:[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]|[^\x00-\x7F])+@",
        r"[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    ))
    .expect("Expect a valid email regex");
}

const BLANK: &str = "Must not be null or empty";
const WHITESPACE: &str = "field cannot have blank spaces at the beginning or at end";
const INVALID_EMAIL: &str = "Invalid email";

/// How surrounding whitespace in a field is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhitespacePolicy {
    /// Surrounding whitespace is a violation of its own.
    #[default]
    Reject,
    /// Fields are trimmed before any other rule runs.
    Trim,
}

impl FromStr for WhitespacePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "trim" => Ok(Self::Trim),
            other => Err(format!("unknown whitespace policy {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Every field is required.
    Create,
    /// Absent fields are left out of validation.
    Update,
}

enum Shape {
    Size {
        min: usize,
        max: usize,
        message: &'static str,
    },
    Email,
}

struct FieldRule {
    name: &'static str,
    blank: &'static str,
    shape: Shape,
}

const NAME: FieldRule = FieldRule {
    name: "name",
    blank: BLANK,
    shape: Shape::Size {
        min: 3,
        max: 50,
        message: "Must be between 3 and 50 characters",
    },
};

const EMAIL_RULE: FieldRule = FieldRule {
    name: "email",
    blank: BLANK,
    shape: Shape::Email,
};

const PASSWORD: FieldRule = FieldRule {
    name: "password",
    // Kept as the deployed service reports it, although it reads like a size message.
    blank: "Must be between 3 and 50 characters",
    shape: Shape::Size {
        min: 3,
        max: 20,
        message: "Must be between 3 and 20 characters",
    },
};

impl FieldRule {
    fn check(
        &self,
        value: &mut Option<String>,
        mode: ValidationMode,
        policy: WhitespacePolicy,
        errors: &mut Vec<ValidationFieldError>,
    ) {
        let value = match value {
            Some(value) => value,
            None if mode == ValidationMode::Update => return,
            None => {
                errors.push(self.violation(ValidationErrorKind::Blank, self.blank));
                return;
            }
        };

        if policy == WhitespacePolicy::Trim && value.trim().len() != value.len() {
            *value = value.trim().to_owned();
        }

        let trimmed = value.trim();
        if trimmed.is_empty() {
            errors.push(self.violation(ValidationErrorKind::Blank, self.blank));
            return;
        }

        if trimmed.len() != value.len() {
            errors.push(self.violation(ValidationErrorKind::Whitespace, WHITESPACE));
        }

        match self.shape {
            Shape::Size { min, max, message } => {
                let len = trimmed.chars().count();
                if len < min || len > max {
                    errors.push(self.violation(ValidationErrorKind::Size { min, max }, message));
                }
            }
            Shape::Email => {
                if !EMAIL.is_match(trimmed) {
                    errors.push(self.violation(ValidationErrorKind::Email, INVALID_EMAIL));
                }
            }
        }
    }

    fn violation(&self, kind: ValidationErrorKind, message: &'static str) -> ValidationFieldError {
        ValidationFieldError::new(self.name, kind, message)
    }
}

/// Check a user payload before it reaches the mapper or the store.
///
/// On success the request is returned, trimmed when the policy asks for it.
/// Otherwise every violation is returned in field order: `name`, `email`,
/// `password`.
pub fn user_request(
    mut request: UserRequest,
    mode: ValidationMode,
    policy: WhitespacePolicy,
) -> Result<UserRequest, Vec<ValidationFieldError>> {
    let mut errors = Vec::new();

    NAME.check(&mut request.name, mode, policy, &mut errors);
    EMAIL_RULE.check(&mut request.email, mode, policy, &mut errors);
    PASSWORD.check(&mut request.password, mode, policy, &mut errors);

    if errors.is_empty() {
        Ok(request)
    } else {
        Err(errors)
    }
}
