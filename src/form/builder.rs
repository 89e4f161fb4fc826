//! Settings form builder

use super::types::{FormDefinition, FormElement, SelectOption};
use crate::content_type::ContentType;
use crate::settings::{
    ContentTypeField, ContentTypeSubmission, MoreLinks, SettingKey, Submission, ValidationError,
    FORM_ID, MAX_TEXT_LENGTH, SETTINGS_NAMESPACE,
};
use std::collections::BTreeMap;

const TEXT_FIELD_SIZE: u16 = 30;

pub const GLOBAL_FIELDSET: &str = "pager_for_content_type_general";
pub const CONTENT_TYPE_FIELDSET: &str = "pager_for_content_type_content_type";

fn text_field(key: SettingKey, title: &str, default_value: &str, required: bool) -> FormElement {
    FormElement::TextField {
        name: key.flat(),
        title: title.to_string(),
        default_value: default_value.to_string(),
        size: TEXT_FIELD_SIZE,
        max_length: MAX_TEXT_LENGTH,
        required,
    }
}

fn more_links_options() -> Vec<SelectOption> {
    MoreLinks::ALL
        .into_iter()
        .map(|more_links| SelectOption {
            value: more_links.count(),
            label: more_links.label().to_string(),
        })
        .collect()
}

fn content_type_fieldset(content_type: &ContentType, values: &ContentTypeSubmission) -> FormElement {
    let key = |field| SettingKey::content_type(&content_type.id, field);

    FormElement::Fieldset {
        key: content_type.id.to_string(),
        title: content_type.name.clone(),
        description: None,
        markup: None,
        collapsible: true,
        collapsed: false,
        children: vec![
            FormElement::Checkbox {
                name: key(ContentTypeField::Enabled).flat(),
                title: "On".to_string(),
                default_value: values.enabled,
            },
            FormElement::Checkbox {
                name: key(ContentTypeField::PagerByAuthor).flat(),
                title: "Pager by node author".to_string(),
                default_value: values.pager_by_author,
            },
            text_field(
                key(ContentTypeField::PreviousText),
                "\"Previous\" text",
                &values.previous_text,
                false,
            ),
            text_field(
                key(ContentTypeField::NextText),
                "\"Next\" text",
                &values.next_text,
                false,
            ),
            FormElement::Select {
                name: key(ContentTypeField::MoreLinks).flat(),
                title: "Show more nodes titles after the pager".to_string(),
                description: Some("First half before pager, second half after pager".to_string()),
                default_value: values.more_links,
                options: more_links_options(),
            },
        ],
    }
}

/// Describe the settings form with `values` as field defaults.
///
/// Pass the loaded settings (converted with `Submission::from`) for a fresh
/// form, or the rejected submission to re-prompt with what was entered.
/// Content type fieldsets follow the order of `content_types`.
pub fn build_form(values: &Submission, content_types: &[ContentType]) -> FormDefinition {
    let global = FormElement::Fieldset {
        key: GLOBAL_FIELDSET.to_string(),
        title: "Global options".to_string(),
        description: None,
        markup: Some(
            "These global options are overridden by the content type options. \
             Available token: [content-type]"
                .to_string(),
        ),
        collapsible: true,
        collapsed: false,
        children: vec![
            text_field(
                SettingKey::GlobalPreviousText,
                "\"Previous\" text",
                &values.global.previous_text,
                true,
            ),
            text_field(
                SettingKey::GlobalNextText,
                "\"Next\" text",
                &values.global.next_text,
                true,
            ),
        ],
    };

    let defaults = ContentTypeSubmission::default();
    let per_type = FormElement::Fieldset {
        key: CONTENT_TYPE_FIELDSET.to_string(),
        title: "Content type options".to_string(),
        description: Some(
            "Pager will be available on checked content types (only in full view mode)".to_string(),
        ),
        markup: None,
        collapsible: true,
        collapsed: false,
        children: content_types
            .iter()
            .map(|content_type| {
                let type_values = values.content_types.get(&content_type.id).unwrap_or(&defaults);
                content_type_fieldset(content_type, type_values)
            })
            .collect(),
    };

    FormDefinition {
        form_id: FORM_ID.to_string(),
        config_name: SETTINGS_NAMESPACE.to_string(),
        elements: vec![global, per_type],
        errors: BTreeMap::new(),
    }
}

impl FormDefinition {
    /// Attach the messages of a rejected submission to their fields
    pub fn with_errors(mut self, error: &ValidationError) -> Self {
        for violation in &error.violations {
            self.errors
                .entry(violation.field.clone())
                .or_default()
                .push(violation.kind.to_string());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GlobalPagerSettings;

    fn content_types() -> Vec<ContentType> {
        vec![
            ContentType::new("page", "Basic page").unwrap(),
            ContentType::new("article", "Article").unwrap(),
        ]
    }

    #[test]
    fn test_global_fields_are_required() {
        let form = build_form(&Submission::default(), &content_types());
        match form.field("pager_for_content_type_previous_text") {
            Some(FormElement::TextField {
                required,
                max_length,
                size,
                ..
            }) => {
                assert!(*required);
                assert_eq!(*max_length, 64);
                assert_eq!(*size, 30);
            }
            other => panic!("unexpected element: {:?}", other),
        }
    }

    #[test]
    fn test_content_type_fieldsets_follow_registry_order() {
        let form = build_form(&Submission::default(), &content_types());
        let keys: Vec<_> = form
            .fieldset(CONTENT_TYPE_FIELDSET)
            .unwrap()
            .children()
            .iter()
            .map(|child| match child {
                FormElement::Fieldset { key, title, .. } => (key.as_str(), title.as_str()),
                other => panic!("unexpected element: {:?}", other),
            })
            .collect();
        assert_eq!(keys, vec![("page", "Basic page"), ("article", "Article")]);
    }

    #[test]
    fn test_more_links_select_options() {
        let form = build_form(&Submission::default(), &content_types());
        match form.field("article_pager_for_content_type_more_links") {
            Some(FormElement::Select {
                options,
                default_value,
                ..
            }) => {
                let values: Vec<_> = options.iter().map(|option| option.value).collect();
                assert_eq!(values, vec![0, 4, 6, 10]);
                assert_eq!(options[0].label, "Off");
                assert_eq!(*default_value, 0);
            }
            other => panic!("unexpected element: {:?}", other),
        }
    }

    #[test]
    fn test_errors_attach_to_fields() {
        let submission = Submission::new(GlobalPagerSettings::new("", "Next"));
        let error = crate::settings::validate_submission(&submission).unwrap_err();
        let form = build_form(&submission, &content_types()).with_errors(&error);

        assert_eq!(
            form.errors.get("pager_for_content_type_previous_text"),
            Some(&vec!["field is required".to_string()])
        );
    }
}
