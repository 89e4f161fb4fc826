//! Submission validation

use super::keys::{ContentTypeField, SettingKey};
use super::submission::{ContentTypeSubmission, Submission};
use super::types::{
    ContentTypePagerSettings, GlobalPagerSettings, MoreLinks, PagerSettings, MAX_TEXT_LENGTH,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Why a single field was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required text is empty or only whitespace
    Required,
    TooLong { max: usize, actual: usize },
    InvalidMoreLinks { value: u32 },
    /// The submitted value has the wrong shape, e.g. text where a count was expected
    Malformed { expected: String },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Required => f.write_str("field is required"),
            ViolationKind::TooLong { max, actual } => {
                write!(f, "cannot be longer than {} characters but is {}", max, actual)
            }
            ViolationKind::InvalidMoreLinks { value } => {
                write!(f, "{} is not one of Off, 4, 6 or 10", value)
            }
            ViolationKind::Malformed { expected } => write!(f, "expected {}", expected),
        }
    }
}

/// A rejected field, named by its flat key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl FieldViolation {
    pub fn new(key: &SettingKey, kind: ViolationKind) -> Self {
        Self {
            field: key.flat(),
            kind,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// A submission was rejected; nothing was written
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{} invalid field(s): {}", .violations.len(), summary(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

fn summary(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|violation| violation.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Violations reported for the given flat key
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ViolationKind> + 'a {
        self.violations
            .iter()
            .filter(move |violation| violation.field == field)
            .map(|violation| &violation.kind)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }
}

fn check_text(
    key: SettingKey,
    value: &str,
    required: bool,
    violations: &mut Vec<FieldViolation>,
) {
    if required && value.trim().is_empty() {
        violations.push(FieldViolation::new(&key, ViolationKind::Required));
        return;
    }

    let actual = value.chars().count();
    if actual > MAX_TEXT_LENGTH {
        violations.push(FieldViolation::new(
            &key,
            ViolationKind::TooLong {
                max: MAX_TEXT_LENGTH,
                actual,
            },
        ));
    }
}

/// Check every field of `submission` and turn it into settings.
///
/// All violations are collected, not just the first one.
pub fn validate_submission(submission: &Submission) -> Result<PagerSettings, ValidationError> {
    let mut violations = Vec::new();

    check_text(
        SettingKey::GlobalPreviousText,
        &submission.global.previous_text,
        true,
        &mut violations,
    );
    check_text(
        SettingKey::GlobalNextText,
        &submission.global.next_text,
        true,
        &mut violations,
    );

    let mut settings = PagerSettings {
        global: GlobalPagerSettings::new(
            submission.global.previous_text.clone(),
            submission.global.next_text.clone(),
        ),
        ..PagerSettings::default()
    };

    for (id, content_type) in &submission.content_types {
        let ContentTypeSubmission {
            enabled,
            pager_by_author,
            previous_text,
            next_text,
            more_links,
        } = content_type;

        check_text(
            SettingKey::content_type(id, ContentTypeField::PreviousText),
            previous_text,
            false,
            &mut violations,
        );
        check_text(
            SettingKey::content_type(id, ContentTypeField::NextText),
            next_text,
            false,
            &mut violations,
        );

        let more_links = match MoreLinks::try_from(*more_links) {
            Ok(more_links) => more_links,
            Err(invalid) => {
                violations.push(FieldViolation::new(
                    &SettingKey::content_type(id, ContentTypeField::MoreLinks),
                    ViolationKind::InvalidMoreLinks { value: invalid.0 },
                ));
                MoreLinks::Off
            }
        };

        settings.content_types.insert(
            id.clone(),
            ContentTypePagerSettings {
                enabled: *enabled,
                pager_by_author: *pager_by_author,
                previous_text: previous_text.clone(),
                next_text: next_text.clone(),
                more_links,
            },
        );
    }

    if violations.is_empty() {
        Ok(settings)
    } else {
        Err(ValidationError::new(violations))
    }
}
