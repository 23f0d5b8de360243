// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sanitization of validated submission fields.
//!
//! Strips HTML/script constructs rather than escaping them: stripping to a
//! fixpoint is idempotent, escaping is not (`&` would grow on every pass).
//! Runs only on fields that already passed validation; this is a second
//! line, not the gate itself.

use regex::Regex;
use std::sync::LazyLock;

/// Anything that looks like an HTML tag, including half-open fragments
/// spliced around a removed inner tag.
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Scheme triggers that survive outside of tags.
static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:javascript|vbscript|data)\s*:").unwrap());

/// Attribute-style event handler triggers (`onerror=`, `onload=`, ...).
static EVENT_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bon\w+\s*=").unwrap());

/// Strip dangerous markup from a field and trim surrounding whitespace.
///
/// Idempotent: `sanitize(sanitize(s)) == sanitize(s)`. Removal is repeated
/// until the input stops changing, so deleting one construct cannot splice
/// a new one together (`<scr<b>ipt>` does not survive).
pub fn sanitize(input: &str) -> String {
    let mut current = input.trim().to_string();
    loop {
        let stripped = strip_once(&current);
        if stripped == current {
            return current;
        }
        current = stripped;
    }
}

/// Sanitize an email field and case-fold it to lowercase.
pub fn sanitize_email(input: &str) -> String {
    sanitize(input).to_lowercase()
}

fn strip_once(input: &str) -> String {
    let out = TAG.replace_all(input, "");
    let out = SCHEME.replace_all(&out, "");
    let out = EVENT_ATTR.replace_all(&out, "");
    out.trim().to_string()
}
