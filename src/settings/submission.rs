//! Submitted settings
//!
//! A [`Submission`] is the immutable value a form submit produces. It keeps
//! the more links count raw so that out-of-range values reach validation.

use super::codec::{coerce_bool, coerce_count, coerce_text};
use super::keys::{ContentTypeField, SettingKey};
use super::types::{ContentTypePagerSettings, GlobalPagerSettings, PagerSettings};
use super::validation::{FieldViolation, ValidationError, ViolationKind};
use crate::content_type::{ContentType, ContentTypeId};
use crate::store::{ConfigValue, FlatConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Raw values posted by the form host, keyed by flat key name
pub type FormValues = FlatConfig;

/// Submitted values for one content type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeSubmission {
    pub enabled: bool,
    pub pager_by_author: bool,
    pub previous_text: String,
    pub next_text: String,
    pub more_links: u32,
}

impl From<&ContentTypePagerSettings> for ContentTypeSubmission {
    fn from(settings: &ContentTypePagerSettings) -> Self {
        Self {
            enabled: settings.enabled,
            pager_by_author: settings.pager_by_author,
            previous_text: settings.previous_text.clone(),
            next_text: settings.next_text.clone(),
            more_links: settings.more_links.count(),
        }
    }
}

/// A complete settings form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub global: GlobalPagerSettings,
    pub content_types: BTreeMap<ContentTypeId, ContentTypeSubmission>,
}

impl Submission {
    pub fn new(global: GlobalPagerSettings) -> Self {
        Self {
            global,
            content_types: BTreeMap::new(),
        }
    }

    pub fn with_content_type(mut self, id: ContentTypeId, values: ContentTypeSubmission) -> Self {
        self.content_types.insert(id, values);
        self
    }

    /// Build a submission from posted form values.
    ///
    /// Only the keys of `content_types` are read; anything else the host posts
    /// (button values, build ids) is ignored. Missing per type values take
    /// their defaults and missing global texts are left empty for validation
    /// to reject. Values of the wrong shape are reported as violations.
    pub fn from_form_values(
        values: &FormValues,
        content_types: &[ContentType],
    ) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();

        let global = GlobalPagerSettings {
            previous_text: read(values, SettingKey::GlobalPreviousText, coerce_text, &mut violations)
                .unwrap_or_default(),
            next_text: read(values, SettingKey::GlobalNextText, coerce_text, &mut violations)
                .unwrap_or_default(),
        };

        let mut submission = Submission::new(global);
        for content_type in content_types {
            let id = &content_type.id;
            let key = |field| SettingKey::content_type(id, field);

            let entry = ContentTypeSubmission {
                enabled: read(values, key(ContentTypeField::Enabled), coerce_bool, &mut violations)
                    .unwrap_or_default(),
                pager_by_author: read(
                    values,
                    key(ContentTypeField::PagerByAuthor),
                    coerce_bool,
                    &mut violations,
                )
                .unwrap_or_default(),
                previous_text: read(
                    values,
                    key(ContentTypeField::PreviousText),
                    coerce_text,
                    &mut violations,
                )
                .unwrap_or_default(),
                next_text: read(values, key(ContentTypeField::NextText), coerce_text, &mut violations)
                    .unwrap_or_default(),
                more_links: read(
                    values,
                    key(ContentTypeField::MoreLinks),
                    coerce_count,
                    &mut violations,
                )
                .unwrap_or_default(),
            };
            submission.content_types.insert(id.clone(), entry);
        }

        let ignored = values
            .keys()
            .filter(|flat| SettingKey::parse(flat).is_none())
            .count();
        if ignored > 0 {
            debug!("Ignored {} form values not owned by the pager settings", ignored);
        }

        if violations.is_empty() {
            Ok(submission)
        } else {
            Err(ValidationError::new(violations))
        }
    }

    /// Flat form values equivalent to this submission
    pub fn to_form_values(&self) -> FormValues {
        let mut values = FormValues::new();
        values.insert(
            SettingKey::GlobalPreviousText.flat(),
            self.global.previous_text.as_str().into(),
        );
        values.insert(
            SettingKey::GlobalNextText.flat(),
            self.global.next_text.as_str().into(),
        );

        for (id, content_type) in &self.content_types {
            let mut insert = |field, value: ConfigValue| {
                values.insert(SettingKey::content_type(id, field).flat(), value);
            };
            insert(ContentTypeField::Enabled, content_type.enabled.into());
            insert(ContentTypeField::PagerByAuthor, content_type.pager_by_author.into());
            insert(ContentTypeField::PreviousText, content_type.previous_text.as_str().into());
            insert(ContentTypeField::NextText, content_type.next_text.as_str().into());
            insert(ContentTypeField::MoreLinks, content_type.more_links.into());
        }

        values
    }
}

/// Read and coerce one posted value, recording a violation if it has the wrong shape
fn read<T>(
    values: &FormValues,
    key: SettingKey,
    coerce: fn(&ConfigValue) -> Result<T, &'static str>,
    violations: &mut Vec<FieldViolation>,
) -> Option<T> {
    let value = values.get(&key.flat())?;
    match coerce(value) {
        Ok(value) => Some(value),
        Err(expected) => {
            violations.push(FieldViolation::new(
                &key,
                ViolationKind::Malformed {
                    expected: expected.to_string(),
                },
            ));
            None
        }
    }
}

impl From<&PagerSettings> for Submission {
    fn from(settings: &PagerSettings) -> Self {
        Self {
            global: settings.global.clone(),
            content_types: settings
                .content_types
                .iter()
                .map(|(id, content_type)| (id.clone(), ContentTypeSubmission::from(content_type)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_types() -> Vec<ContentType> {
        vec![
            ContentType::new("article", "Article").unwrap(),
            ContentType::new("page", "Basic page").unwrap(),
        ]
    }

    fn posted(entries: &[(&str, ConfigValue)]) -> FormValues {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_from_form_values_reads_known_types_only() {
        let values = posted(&[
            ("pager_for_content_type_previous_text", "Prev".into()),
            ("pager_for_content_type_next_text", "Next".into()),
            ("article_pager_for_content_type_on", ConfigValue::Integer(1)),
            ("article_pager_for_content_type_more_links", "4".into()),
            ("event_pager_for_content_type_on", ConfigValue::Integer(1)),
            ("form_build_id", "form-abc".into()),
        ]);

        let submission = Submission::from_form_values(&values, &content_types()).unwrap();
        assert_eq!(submission.global, GlobalPagerSettings::new("Prev", "Next"));
        assert_eq!(submission.content_types.len(), 2);

        let article = &submission.content_types[&ContentTypeId::new("article").unwrap()];
        assert!(article.enabled);
        assert_eq!(article.more_links, 4);

        let page = &submission.content_types[&ContentTypeId::new("page").unwrap()];
        assert_eq!(page, &ContentTypeSubmission::default());
    }

    #[test]
    fn test_from_form_values_reports_malformed_values() {
        let values = posted(&[
            ("pager_for_content_type_previous_text", ConfigValue::Integer(3)),
            ("article_pager_for_content_type_on", "maybe".into()),
            ("article_pager_for_content_type_more_links", ConfigValue::Integer(-4)),
        ]);

        let err = Submission::from_form_values(&values, &content_types()).unwrap_err();
        assert_eq!(err.violations.len(), 3);
        assert!(err.has_field("pager_for_content_type_previous_text"));
        assert!(err.has_field("article_pager_for_content_type_on"));
        assert!(err.has_field("article_pager_for_content_type_more_links"));
    }

    #[test]
    fn test_out_of_range_count_reaches_validation() {
        let values = posted(&[("page_pager_for_content_type_more_links", ConfigValue::Integer(5))]);
        let submission = Submission::from_form_values(&values, &content_types()).unwrap();
        assert_eq!(
            submission.content_types[&ContentTypeId::new("page").unwrap()].more_links,
            5
        );
    }

    #[test]
    fn test_form_values_reproduce_submission() {
        let submission = Submission::new(GlobalPagerSettings::new("« Prev", "Next »"))
            .with_content_type(
                ContentTypeId::new("article").unwrap(),
                ContentTypeSubmission {
                    enabled: true,
                    pager_by_author: true,
                    previous_text: "Older".to_string(),
                    next_text: String::new(),
                    more_links: 10,
                },
            )
            .with_content_type(
                ContentTypeId::new("page").unwrap(),
                ContentTypeSubmission::default(),
            );

        let values = submission.to_form_values();
        assert_eq!(
            Submission::from_form_values(&values, &content_types()).unwrap(),
            submission
        );
    }
}
