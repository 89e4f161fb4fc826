//! Settings form integration tests

use pager_settings::form::{FormElement, FormState, CONTENT_TYPE_FIELDSET, GLOBAL_FIELDSET};
use pager_settings::settings::{ContentTypeSubmission, GlobalPagerSettings};
use pager_settings::{
    ContentType, ContentTypeId, MemoryStore, SettingsError, SettingsForm, SettingsService,
    StaticRegistry, Submission,
};

fn form() -> SettingsForm<StaticRegistry, MemoryStore> {
    let registry = StaticRegistry::new(vec![
        ContentType::new("article", "Article").unwrap(),
        ContentType::new("page", "Basic page").unwrap(),
    ]);
    SettingsForm::new(SettingsService::new(registry, MemoryStore::new()))
}

#[test]
fn test_form_lists_every_field_in_render_order() {
    let definition = form().definition().unwrap();

    assert_eq!(definition.form_id, "pager_for_content_type_settings");
    assert_eq!(definition.config_name, "pager_for_content_type.settings");
    assert!(definition.fieldset(GLOBAL_FIELDSET).is_some());
    assert!(definition.fieldset(CONTENT_TYPE_FIELDSET).is_some());
    assert_eq!(
        definition.field_names(),
        vec![
            "pager_for_content_type_previous_text",
            "pager_for_content_type_next_text",
            "article_pager_for_content_type_on",
            "article_pager_for_content_type_author",
            "article_pager_for_content_type_previous_text",
            "article_pager_for_content_type_next_text",
            "article_pager_for_content_type_more_links",
            "page_pager_for_content_type_on",
            "page_pager_for_content_type_author",
            "page_pager_for_content_type_previous_text",
            "page_pager_for_content_type_next_text",
            "page_pager_for_content_type_more_links",
        ]
    );
}

#[test]
fn test_form_defaults_come_from_store() {
    let mut form = form();
    let submission = Submission::new(GlobalPagerSettings::new("Prev", "Next")).with_content_type(
        ContentTypeId::new("page").unwrap(),
        ContentTypeSubmission {
            enabled: true,
            pager_by_author: true,
            previous_text: String::new(),
            next_text: "Onwards".to_string(),
            more_links: 6,
        },
    );
    form.submit(submission).unwrap();

    let definition = form.definition().unwrap();
    assert_eq!(
        definition.field("page_pager_for_content_type_author"),
        Some(&FormElement::Checkbox {
            name: "page_pager_for_content_type_author".to_string(),
            title: "Pager by node author".to_string(),
            default_value: true,
        })
    );
    match definition.field("page_pager_for_content_type_more_links") {
        Some(FormElement::Select { default_value, .. }) => assert_eq!(*default_value, 6),
        other => panic!("unexpected element: {:?}", other),
    }
    match definition.field("page_pager_for_content_type_next_text") {
        Some(FormElement::TextField {
            default_value,
            required,
            ..
        }) => {
            assert_eq!(default_value, "Onwards");
            assert!(!*required);
        }
        other => panic!("unexpected element: {:?}", other),
    }
}

#[test]
fn test_form_serializes_for_the_host() {
    let definition = form().definition().unwrap();
    let json = serde_json::to_value(&definition).unwrap();

    let global = &json["elements"][0];
    assert_eq!(global["type"], "fieldset");
    assert_eq!(global["key"], "pager_for_content_type_general");
    assert_eq!(global["children"][0]["type"], "textfield");
    assert_eq!(global["children"][0]["max_length"], 64);
    assert_eq!(global["children"][0]["required"], true);

    let article = &json["elements"][1]["children"][0];
    assert_eq!(article["title"], "Article");
    assert_eq!(article["children"][0]["type"], "checkbox");
    assert_eq!(article["children"][4]["type"], "select");
    assert_eq!(article["children"][4]["options"][2]["value"], 6);

    assert!(json.get("errors").is_none());
}

#[test]
fn test_rejected_submission_keeps_form_dirty() {
    let mut form = form();
    form.load().unwrap();

    let submission = Submission::new(GlobalPagerSettings::new("", "Next")).with_content_type(
        ContentTypeId::new("article").unwrap(),
        ContentTypeSubmission {
            more_links: 8,
            ..ContentTypeSubmission::default()
        },
    );

    match form.submit(submission.clone()) {
        Err(SettingsError::Validation(err)) => assert_eq!(err.violations.len(), 2),
        other => panic!("expected validation error, got {:?}", other),
    }

    match form.state() {
        FormState::Dirty {
            submission: pending,
            errors: Some(errors),
        } => {
            assert_eq!(pending, &submission);
            assert!(errors.has_field("article_pager_for_content_type_more_links"));
        }
        other => panic!("expected dirty state, got {:?}", other),
    }

    // Nothing was stored
    let settings = form.load().unwrap();
    assert_eq!(settings.global, GlobalPagerSettings::default());
    assert!(!form.is_dirty());
}

#[test]
fn test_duplicate_content_type_renders_one_fieldset() {
    let registry = StaticRegistry::new(vec![
        ContentType::new("article", "Article").unwrap(),
        ContentType::new("article", "News article").unwrap(),
    ]);
    let form = SettingsForm::new(SettingsService::new(registry, MemoryStore::new()));
    let definition = form.definition().unwrap();

    let names = definition.field_names();
    assert_eq!(
        names
            .iter()
            .filter(|name| **name == "article_pager_for_content_type_on")
            .count(),
        1
    );
    assert_eq!(names.len(), 2 + 5);
}
