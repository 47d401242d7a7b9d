// Field validators and the extra-fields collector.

use crate::error::{Rejection, SessionError};
use crate::prompt::{prompt, Validator, MAX_ATTEMPTS};
use crate::ui::Console;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Custom fields allowed per submission.
pub const MAX_EXTRA_FIELDS: usize = 5;

/// User-supplied custom key/value pairs. Re-entering a key overwrites it.
pub type ExtraInformation = BTreeMap<String, String>;

// Deliberately permissive: local@domain.tld, nothing more.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Any non-blank text.
pub struct NonEmpty {
    kind: String,
}

impl NonEmpty {
    pub fn new(kind: impl Into<String>) -> Self {
        NonEmpty { kind: kind.into() }
    }
}

impl Validator for NonEmpty {
    type Output = String;

    fn kind(&self) -> &str {
        &self.kind
    }

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        let value = input.trim();
        if value.is_empty() {
            return Err(Rejection::new(format!("{} cannot be empty.", capitalize(&self.kind))));
        }
        Ok(value.to_string())
    }
}

pub struct Email;

impl Validator for Email {
    type Output = String;

    fn kind(&self) -> &str {
        "email"
    }

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        let value = input.trim();
        if !EMAIL_RE.is_match(value) {
            return Err(Rejection::new(
                "Invalid email format. Expected something like name@example.com.",
            ));
        }
        Ok(value.to_string())
    }
}

/// Exactly `y` or `n`, case-insensitive.
pub struct YesNo {
    kind: String,
}

impl YesNo {
    pub fn new(kind: impl Into<String>) -> Self {
        YesNo { kind: kind.into() }
    }
}

impl Validator for YesNo {
    type Output = bool;

    fn kind(&self) -> &str {
        &self.kind
    }

    fn validate(&self, input: &str) -> Result<bool, Rejection> {
        match input.trim().to_lowercase().as_str() {
            "y" => Ok(true),
            "n" => Ok(false),
            _ => Err(Rejection::new("Please answer 'y' or 'n'.")),
        }
    }
}

/// Key that can be embedded in a JSON object without escaping surprises.
pub struct JsonKey;

impl Validator for JsonKey {
    type Output = String;

    fn kind(&self) -> &str {
        "field name"
    }

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        let value = input.trim();
        if value.is_empty() {
            return Err(Rejection::new("Field name cannot be empty."));
        }
        if value.chars().any(|c| c == '"' || ('\u{0}'..='\u{1f}').contains(&c)) {
            return Err(Rejection::new(
                "Field name must not contain double quotes or control characters.",
            ));
        }
        Ok(value.to_string())
    }
}

/// Offer the user up to `max_fields` custom key/value pairs.
///
/// Once the budget is spent the "add a field?" question is not asked again.
pub fn collect_extra_fields<C>(
    console: &mut C,
    max_fields: usize,
) -> Result<ExtraInformation, SessionError>
where
    C: Console + ?Sized,
{
    let mut extra = ExtraInformation::new();
    let mut budget = max_fields;
    while budget > 0 {
        let add = prompt(
            console,
            &format!("Add an extra field? ({} left) [y/n]", budget),
            &YesNo::new("add extra field"),
            MAX_ATTEMPTS,
        )?;
        if !add {
            break;
        }
        let key = prompt(console, "Field name", &JsonKey, MAX_ATTEMPTS)?;
        let value = prompt(
            console,
            &format!("Value for '{}'", key),
            &NonEmpty::new(format!("value for '{}'", key)),
            MAX_ATTEMPTS,
        )?;
        budget -= 1;
        if extra.insert(key.clone(), value).is_some() {
            tracing::debug!(%key, "extra field overwritten");
        }
    }
    Ok(extra)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
