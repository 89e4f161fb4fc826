//! Flat configuration key names
//!
//! Settings are structured in memory; these names only exist at the storage
//! and form boundary.

use crate::content_type::ContentTypeId;
use std::fmt;

/// Config name the pager settings are stored under
pub const SETTINGS_NAMESPACE: &str = "pager_for_content_type.settings";

/// Identifier of the settings form
pub const FORM_ID: &str = "pager_for_content_type_settings";

const KEY_PREFIX: &str = "pager_for_content_type";

/// One of the five per content type fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentTypeField {
    Enabled,
    PagerByAuthor,
    PreviousText,
    NextText,
    MoreLinks,
}

impl ContentTypeField {
    pub const ALL: [ContentTypeField; 5] = [
        ContentTypeField::Enabled,
        ContentTypeField::PagerByAuthor,
        ContentTypeField::PreviousText,
        ContentTypeField::NextText,
        ContentTypeField::MoreLinks,
    ];

    fn suffix(self) -> &'static str {
        match self {
            ContentTypeField::Enabled => "on",
            ContentTypeField::PagerByAuthor => "author",
            ContentTypeField::PreviousText => "previous_text",
            ContentTypeField::NextText => "next_text",
            ContentTypeField::MoreLinks => "more_links",
        }
    }
}

/// A configuration key owned by the pager feature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SettingKey {
    GlobalPreviousText,
    GlobalNextText,
    ContentType(ContentTypeId, ContentTypeField),
}

impl SettingKey {
    pub fn content_type(id: &ContentTypeId, field: ContentTypeField) -> Self {
        SettingKey::ContentType(id.clone(), field)
    }

    /// The five keys of one content type, in form order
    pub fn for_content_type(id: &ContentTypeId) -> impl Iterator<Item = SettingKey> + '_ {
        ContentTypeField::ALL
            .into_iter()
            .map(move |field| SettingKey::content_type(id, field))
    }

    /// Flat storage name, e.g. `article_pager_for_content_type_on`
    pub fn flat(&self) -> String {
        match self {
            SettingKey::GlobalPreviousText => format!("{}_previous_text", KEY_PREFIX),
            SettingKey::GlobalNextText => format!("{}_next_text", KEY_PREFIX),
            SettingKey::ContentType(id, field) => {
                format!("{}_{}_{}", id, KEY_PREFIX, field.suffix())
            }
        }
    }

    /// Map a flat name back to a key; `None` for names the feature does not own
    pub fn parse(flat: &str) -> Option<SettingKey> {
        if flat == SettingKey::GlobalPreviousText.flat() {
            return Some(SettingKey::GlobalPreviousText);
        }
        if flat == SettingKey::GlobalNextText.flat() {
            return Some(SettingKey::GlobalNextText);
        }

        ContentTypeField::ALL.into_iter().find_map(|field| {
            let suffix = format!("_{}_{}", KEY_PREFIX, field.suffix());
            let id = flat.strip_suffix(&suffix)?;
            ContentTypeId::new(id)
                .ok()
                .map(|id| SettingKey::ContentType(id, field))
        })
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flat())
    }
}
