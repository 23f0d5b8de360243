// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Submission validator.
//!
//! Pure shape/content checks on a candidate submission:
//! - Field length and character-class constraints
//! - Spam-keyword screening (subject, message)
//! - Dangerous-markup detection (message, then all fields combined)
//! - Honeypot trap for form-filling bots
//!
//! All violated constraints are collected so the caller can report every
//! problem at once; only the honeypot short-circuits.

use crate::config::ValidationConfig;
use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Allowed characters for the name field.
static NAME_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").unwrap());

/// Pragmatic email syntax check; full RFC 5322 is not the goal here.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Markup and scheme constructs that never belong in a contact message.
static DANGEROUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<script|javascript:|data:|vbscript:|on\w+=").unwrap());

/// Raw request body, before any validation.
///
/// Missing fields deserialize to empty strings and fail the length checks;
/// only a body that is not a JSON object at all is a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    /// Honeypot. Invisible in the rendered form; humans never fill it.
    #[serde(default)]
    pub website: Option<String>,
}

/// A submission that passed validation. Fields are not yet sanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionInput {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A single violated constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Why validation rejected a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationRejection {
    /// Honeypot field was non-blank. Reported without field detail so the
    /// response does not reveal which rule fired.
    Honeypot,
    /// One or more field constraints violated; all of them are listed.
    Fields(Vec<FieldError>),
}

/// Submission validator with a compiled rule set.
pub struct Validator {
    spam: Option<Regex>,
}

impl Validator {
    /// Create a validator from the given configuration.
    pub fn new(config: &ValidationConfig) -> Result<Self> {
        let spam = if config.spam_keywords.is_empty() {
            None
        } else {
            let alternation = config
                .spam_keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))?)
        };
        Ok(Self { spam })
    }

    /// Validate a raw submission.
    ///
    /// Never panics on expected bad input; every violated constraint is
    /// collected into the returned list.
    pub fn validate(&self, raw: &RawSubmission) -> std::result::Result<SubmissionInput, ValidationRejection> {
        if raw
            .website
            .as_deref()
            .is_some_and(|w| !w.trim().is_empty())
        {
            return Err(ValidationRejection::Honeypot);
        }

        let mut errors = Vec::new();

        self.check_name(&raw.name, &mut errors);
        self.check_email(&raw.email, &mut errors);
        self.check_subject(&raw.subject, &mut errors);
        self.check_message(&raw.message, &mut errors);

        // Cross-field pass: a dangerous construct anywhere fails the whole
        // submission, even if it straddles a field the per-field rules allow.
        let all_text = format!("{} {} {} {}", raw.name, raw.email, raw.subject, raw.message);
        if DANGEROUS.is_match(&all_text) {
            errors.push(FieldError::new("submission", "Prohibited content detected"));
        }

        if errors.is_empty() {
            Ok(SubmissionInput {
                name: raw.name.clone(),
                email: raw.email.clone(),
                subject: raw.subject.clone(),
                message: raw.message.clone(),
            })
        } else {
            Err(ValidationRejection::Fields(errors))
        }
    }

    fn check_name(&self, name: &str, errors: &mut Vec<FieldError>) {
        let len = name.chars().count();
        if len < 2 {
            errors.push(FieldError::new("name", "Name must be at least 2 characters"));
        }
        if len > 50 {
            errors.push(FieldError::new("name", "Name must be less than 50 characters"));
        }
        if !name.is_empty() && !NAME_CHARS.is_match(name) {
            errors.push(FieldError::new(
                "name",
                "Name can only contain letters, spaces, hyphens, and apostrophes",
            ));
        }
    }

    fn check_email(&self, email: &str, errors: &mut Vec<FieldError>) {
        if email.chars().count() > 100 {
            errors.push(FieldError::new("email", "Email must be less than 100 characters"));
        }
        if !EMAIL.is_match(email) {
            errors.push(FieldError::new("email", "Please enter a valid email address"));
        }
    }

    fn check_subject(&self, subject: &str, errors: &mut Vec<FieldError>) {
        let len = subject.chars().count();
        if len < 5 {
            errors.push(FieldError::new("subject", "Subject must be at least 5 characters"));
        }
        if len > 100 {
            errors.push(FieldError::new("subject", "Subject must be less than 100 characters"));
        }
        if self.is_spam(subject) {
            errors.push(FieldError::new("subject", "Subject contains prohibited content"));
        }
    }

    fn check_message(&self, message: &str, errors: &mut Vec<FieldError>) {
        let len = message.chars().count();
        if len < 10 {
            errors.push(FieldError::new("message", "Message must be at least 10 characters"));
        }
        if len > 1000 {
            errors.push(FieldError::new("message", "Message must be less than 1000 characters"));
        }
        if self.is_spam(message) || DANGEROUS.is_match(message) {
            errors.push(FieldError::new("message", "Message contains prohibited content"));
        }
    }

    fn is_spam(&self, text: &str) -> bool {
        self.spam.as_ref().is_some_and(|re| re.is_match(text))
    }
}
