//! Settings service integration tests

use pager_settings::settings::{
    ContentTypePagerSettings, ContentTypeSubmission, GlobalPagerSettings, MoreLinks,
    ViolationKind, SETTINGS_NAMESPACE,
};
use pager_settings::{
    ConfigStore, ContentType, ContentTypeId, MemoryStore, PagerSettings, SettingsError,
    SettingsService, StaticRegistry, Submission,
};

fn registry() -> StaticRegistry {
    StaticRegistry::new(vec![
        ContentType::new("article", "Article").unwrap(),
        ContentType::new("page", "Basic page").unwrap(),
    ])
}

fn id(name: &str) -> ContentTypeId {
    ContentTypeId::new(name).unwrap()
}

fn full_submission() -> Submission {
    Submission::new(GlobalPagerSettings::new("« Prev", "Next »"))
        .with_content_type(
            id("article"),
            ContentTypeSubmission {
                enabled: true,
                pager_by_author: false,
                previous_text: String::new(),
                next_text: String::new(),
                more_links: 4,
            },
        )
        .with_content_type(
            id("page"),
            ContentTypeSubmission {
                enabled: true,
                pager_by_author: true,
                previous_text: "Older page".to_string(),
                next_text: "Newer page".to_string(),
                more_links: 10,
            },
        )
}

fn expect_validation(result: Result<(), SettingsError>) -> Vec<(String, ViolationKind)> {
    match result {
        Err(SettingsError::Validation(err)) => err
            .violations
            .into_iter()
            .map(|violation| (violation.field, violation.kind))
            .collect(),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_empty_store_loads_defaults() {
    let service = SettingsService::new(registry(), MemoryStore::new());

    let settings = service.load_settings().unwrap();

    // Global texts are only required on save, the defaults are empty
    assert_eq!(settings.global, GlobalPagerSettings::new("", ""));
    assert_eq!(settings.content_types.len(), 2);
    for content_type in ["article", "page"] {
        assert_eq!(
            settings.content_type(&id(content_type)),
            Some(&ContentTypePagerSettings {
                enabled: false,
                pager_by_author: false,
                previous_text: String::new(),
                next_text: String::new(),
                more_links: MoreLinks::Off,
            })
        );
    }

    // Loading never writes
    assert!(service.store().read(SETTINGS_NAMESPACE).unwrap().is_empty());
}

#[test]
fn test_apply_then_load_round_trips() {
    let service = SettingsService::new(registry(), MemoryStore::new());
    let submission = full_submission();

    service.apply_settings(&submission).unwrap();

    let settings = service.load_settings().unwrap();
    assert_eq!(Submission::from(&settings), submission);
}

#[test]
fn test_article_inherits_global_text_scenario() {
    let service = SettingsService::new(registry(), MemoryStore::new());
    let submission = Submission::new(GlobalPagerSettings::new("« Prev", "Next »"))
        .with_content_type(
            id("article"),
            ContentTypeSubmission {
                enabled: true,
                more_links: 4,
                ..ContentTypeSubmission::default()
            },
        )
        .with_content_type(id("page"), ContentTypeSubmission::default());

    service.apply_settings(&submission).unwrap();

    let settings = service.load_settings().unwrap();
    assert_eq!(settings.global.previous_text, "« Prev");
    assert_eq!(settings.global.next_text, "Next »");

    let article = settings.content_type(&id("article")).unwrap();
    assert!(article.enabled);
    assert!(!article.pager_by_author);
    assert!(article.previous_text.is_empty());
    assert!(article.next_text.is_empty());
    assert_eq!(article.more_links, MoreLinks::Four);
    assert_eq!(
        settings.enabled_content_types().collect::<Vec<_>>(),
        vec![&id("article")]
    );
}

#[test]
fn test_apply_is_idempotent() {
    let once = MemoryStore::new();
    let twice = MemoryStore::new();
    let submission = full_submission();

    SettingsService::new(registry(), &once)
        .apply_settings(&submission)
        .unwrap();
    let service = SettingsService::new(registry(), &twice);
    service.apply_settings(&submission).unwrap();
    service.apply_settings(&submission).unwrap();

    assert_eq!(
        once.read(SETTINGS_NAMESPACE).unwrap(),
        twice.read(SETTINGS_NAMESPACE).unwrap()
    );
}

#[test]
fn test_rejects_empty_global_texts() {
    let service = SettingsService::new(registry(), MemoryStore::new());

    let mut submission = full_submission();
    submission.global = GlobalPagerSettings::new("", "");

    let violations = expect_validation(service.apply_settings(&submission));
    assert_eq!(
        violations,
        vec![
            (
                "pager_for_content_type_previous_text".to_string(),
                ViolationKind::Required
            ),
            (
                "pager_for_content_type_next_text".to_string(),
                ViolationKind::Required
            ),
        ]
    );
}

#[test]
fn test_rejects_texts_longer_than_64_characters() {
    let service = SettingsService::new(registry(), MemoryStore::new());
    let long = "x".repeat(65);

    let mut global_too_long = full_submission();
    global_too_long.global.next_text = long.clone();
    let violations = expect_validation(service.apply_settings(&global_too_long));
    assert_eq!(
        violations,
        vec![(
            "pager_for_content_type_next_text".to_string(),
            ViolationKind::TooLong { max: 64, actual: 65 }
        )]
    );

    let mut override_too_long = full_submission();
    override_too_long
        .content_types
        .get_mut(&id("page"))
        .unwrap()
        .previous_text = long;
    let violations = expect_validation(service.apply_settings(&override_too_long));
    assert_eq!(violations[0].0, "page_pager_for_content_type_previous_text");

    // Exactly 64 is fine
    let mut at_limit = full_submission();
    at_limit.global.previous_text = "x".repeat(64);
    service.apply_settings(&at_limit).unwrap();
}

#[test]
fn test_rejects_more_links_outside_permitted_values() {
    let service = SettingsService::new(registry(), MemoryStore::new());

    for invalid in [1, 2, 3, 5, 7, 8, 9, 11, 20] {
        let mut submission = full_submission();
        submission
            .content_types
            .get_mut(&id("article"))
            .unwrap()
            .more_links = invalid;

        let violations = expect_validation(service.apply_settings(&submission));
        assert_eq!(
            violations,
            vec![(
                "article_pager_for_content_type_more_links".to_string(),
                ViolationKind::InvalidMoreLinks { value: invalid }
            )]
        );
    }

    for valid in [0, 4, 6, 10] {
        let mut submission = full_submission();
        submission
            .content_types
            .get_mut(&id("article"))
            .unwrap()
            .more_links = valid;
        service.apply_settings(&submission).unwrap();
    }
}

#[test]
fn test_rejected_submission_writes_nothing() {
    let service = SettingsService::new(registry(), MemoryStore::new());
    service.apply_settings(&full_submission()).unwrap();
    let before = service.store().read(SETTINGS_NAMESPACE).unwrap();

    let mut submission = Submission::from(&PagerSettings::default());
    submission.global = GlobalPagerSettings::new("Back", "");
    assert!(service.apply_settings(&submission).is_err());

    assert_eq!(service.store().read(SETTINGS_NAMESPACE).unwrap(), before);
}

#[test]
fn test_new_content_type_gets_default_record() {
    let store = MemoryStore::new();
    SettingsService::new(registry(), &store)
        .apply_settings(&full_submission())
        .unwrap();

    let grown = registry().with_content_type(ContentType::new("event", "Event").unwrap());
    let settings = SettingsService::new(grown, &store).load_settings().unwrap();

    assert_eq!(settings.content_types.len(), 3);
    assert_eq!(
        settings.content_type(&id("event")),
        Some(&ContentTypePagerSettings::default())
    );
    assert!(settings.content_type(&id("page")).unwrap().pager_by_author);
}
