//! Advisory field validation, run when an input loses focus.
//!
//! Results only toggle an error indicator. They never block the write to the
//! profile or the preview render.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::i18n::Labels;
use crate::models::{Profile, ProfileField};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,}$").unwrap());
static HTTP_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://.+\..+").unwrap());
static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9+\s()-]{8,}$").unwrap());

/// Fields that have a blur check.
pub const VALIDATED_FIELDS: [ProfileField; 6] = [
    ProfileField::Name,
    ProfileField::Email,
    ProfileField::Website,
    ProfileField::Linkedin,
    ProfileField::Github,
    ProfileField::Phone,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    pub field: ProfileField,
    pub message: &'static str,
}

/// Returns the localized message when `value` is invalid for `field`.
pub fn validate_field(field: ProfileField, value: &str, labels: &Labels) -> Option<&'static str> {
    match field {
        ProfileField::Name if value.trim().is_empty() => Some(labels.invalid_name),
        ProfileField::Email if !value.is_empty() && !EMAIL.is_match(value) => {
            Some(labels.invalid_email)
        }
        ProfileField::Website if !value.is_empty() && !HTTP_URL.is_match(value) => {
            Some(labels.invalid_website)
        }
        ProfileField::Linkedin if !value.is_empty() && !HTTP_URL.is_match(value) => {
            Some(labels.invalid_linkedin)
        }
        ProfileField::Github if !value.is_empty() && !HTTP_URL.is_match(value) => {
            Some(labels.invalid_github)
        }
        ProfileField::Phone if !value.is_empty() && !PHONE.is_match(value) => {
            Some(labels.invalid_phone)
        }
        _ => None,
    }
}

/// Runs every blur check against the stored profile.
pub fn validate_profile(profile: &Profile, labels: &Labels) -> Vec<FieldIssue> {
    VALIDATED_FIELDS
        .into_iter()
        .filter_map(|field| {
            validate_field(field, profile.field(field), labels)
                .map(|message| FieldIssue { field, message })
        })
        .collect()
}
