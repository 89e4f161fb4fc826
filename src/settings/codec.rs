//! Conversion between structured settings and flat stored values

use super::keys::{ContentTypeField, SettingKey};
use super::types::{ContentTypePagerSettings, GlobalPagerSettings, MoreLinks, PagerSettings};
use crate::content_type::{ContentType, ContentTypeId};
use crate::store::{ConfigChanges, ConfigValue, FlatConfig, StoreError};
use tracing::debug;

/// Count the legacy select stored for the "6" option
const LEGACY_SIX_MORE_LINKS: u32 = 5;

/// Checkbox values arrive as booleans, as 0/1, or as their string forms
pub(crate) fn coerce_bool(value: &ConfigValue) -> Result<bool, &'static str> {
    match value {
        ConfigValue::Bool(value) => Ok(*value),
        ConfigValue::Integer(0) => Ok(false),
        ConfigValue::Integer(1) => Ok(true),
        ConfigValue::String(value) => match value.trim() {
            "" | "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            _ => Err("a boolean"),
        },
        ConfigValue::Integer(_) => Err("a boolean"),
    }
}

pub(crate) fn coerce_text(value: &ConfigValue) -> Result<String, &'static str> {
    match value {
        ConfigValue::String(value) => Ok(value.clone()),
        _ => Err("a string"),
    }
}

/// Select values arrive as integers or numeric strings
pub(crate) fn coerce_count(value: &ConfigValue) -> Result<u32, &'static str> {
    match value {
        ConfigValue::Integer(value) => u32::try_from(*value).map_err(|_| "a non-negative integer"),
        ConfigValue::String(value) => value
            .trim()
            .parse::<u32>()
            .map_err(|_| "a non-negative integer"),
        ConfigValue::Bool(_) => Err("a non-negative integer"),
    }
}

fn corrupt(key: &SettingKey, value: &ConfigValue, expected: &str) -> StoreError {
    StoreError::Corrupt {
        key: key.flat(),
        reason: format!("expected {}, found {} {}", expected, value.type_name(), value),
    }
}

fn decode_with<T>(
    values: &FlatConfig,
    key: &SettingKey,
    coerce: impl Fn(&ConfigValue) -> Result<T, &'static str>,
) -> Result<Option<T>, StoreError> {
    values
        .get(&key.flat())
        .map(|value| coerce(value).map_err(|expected| corrupt(key, value, expected)))
        .transpose()
}

fn decode_more_links(values: &FlatConfig, key: &SettingKey) -> Result<MoreLinks, StoreError> {
    let Some(value) = values.get(&key.flat()) else {
        return Ok(MoreLinks::Off);
    };

    let count = coerce_count(value).map_err(|expected| corrupt(key, value, expected))?;
    if count == LEGACY_SIX_MORE_LINKS {
        debug!("Reading legacy more links value {} for {} as 6", count, key);
        return Ok(MoreLinks::Six);
    }

    MoreLinks::from_count(count).ok_or_else(|| corrupt(key, value, "one of 0, 4, 6 or 10"))
}

/// Decode the per content type record, falling back to defaults for absent keys
pub fn decode_content_type(
    values: &FlatConfig,
    id: &ContentTypeId,
) -> Result<ContentTypePagerSettings, StoreError> {
    let key = |field| SettingKey::content_type(id, field);

    Ok(ContentTypePagerSettings {
        enabled: decode_with(values, &key(ContentTypeField::Enabled), coerce_bool)?
            .unwrap_or_default(),
        pager_by_author: decode_with(values, &key(ContentTypeField::PagerByAuthor), coerce_bool)?
            .unwrap_or_default(),
        previous_text: decode_with(values, &key(ContentTypeField::PreviousText), coerce_text)?
            .unwrap_or_default(),
        next_text: decode_with(values, &key(ContentTypeField::NextText), coerce_text)?
            .unwrap_or_default(),
        more_links: decode_more_links(values, &key(ContentTypeField::MoreLinks))?,
    })
}

/// Decode the stored namespace for the given content types.
///
/// Content types without stored values get the zero-valued default record.
/// Stored records of types not in `content_types` are ignored.
pub fn decode(values: &FlatConfig, content_types: &[ContentType]) -> Result<PagerSettings, StoreError> {
    let global = GlobalPagerSettings {
        previous_text: decode_with(values, &SettingKey::GlobalPreviousText, coerce_text)?
            .unwrap_or_default(),
        next_text: decode_with(values, &SettingKey::GlobalNextText, coerce_text)?
            .unwrap_or_default(),
    };

    let content_types = content_types
        .iter()
        .map(|content_type| {
            decode_content_type(values, &content_type.id)
                .map(|settings| (content_type.id.clone(), settings))
        })
        .collect::<Result<_, _>>()?;

    Ok(PagerSettings {
        global,
        content_types,
    })
}

/// Every key the settings own, ready to be committed
pub fn encode(settings: &PagerSettings) -> ConfigChanges {
    let mut changes = ConfigChanges::new();
    changes.set(
        SettingKey::GlobalPreviousText.flat(),
        settings.global.previous_text.as_str(),
    );
    changes.set(
        SettingKey::GlobalNextText.flat(),
        settings.global.next_text.as_str(),
    );

    for (id, content_type) in &settings.content_types {
        for field in ContentTypeField::ALL {
            let value: ConfigValue = match field {
                ContentTypeField::Enabled => content_type.enabled.into(),
                ContentTypeField::PagerByAuthor => content_type.pager_by_author.into(),
                ContentTypeField::PreviousText => content_type.previous_text.as_str().into(),
                ContentTypeField::NextText => content_type.next_text.as_str().into(),
                ContentTypeField::MoreLinks => content_type.more_links.count().into(),
            };
            changes.set(SettingKey::content_type(id, field).flat(), value);
        }
    }

    changes
}

/// Content type ids with stored keys that are not among `content_types`
pub fn orphaned_content_types(values: &FlatConfig, content_types: &[ContentType]) -> Vec<ContentTypeId> {
    let mut orphaned: Vec<ContentTypeId> = values
        .keys()
        .filter_map(|flat| match SettingKey::parse(flat) {
            Some(SettingKey::ContentType(id, _)) => Some(id),
            _ => None,
        })
        .filter(|id| !content_types.iter().any(|content_type| &content_type.id == id))
        .collect();
    orphaned.sort();
    orphaned.dedup();
    orphaned
}
