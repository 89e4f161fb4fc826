//! Pager Settings Types

use crate::content_type::ContentTypeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Maximum length, in characters, of every pager text
pub const MAX_TEXT_LENGTH: usize = 64;

/// Pager texts used when a content type has no override
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalPagerSettings {
    pub previous_text: String,
    pub next_text: String,
}

impl GlobalPagerSettings {
    pub fn new(previous_text: impl Into<String>, next_text: impl Into<String>) -> Self {
        Self {
            previous_text: previous_text.into(),
            next_text: next_text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} is not a permitted number of more links (expected 0, 4, 6 or 10)")]
pub struct InvalidMoreLinks(pub u32);

/// Number of additional titles shown around the pager
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum MoreLinks {
    #[default]
    Off,
    Four,
    Six,
    Ten,
}

impl MoreLinks {
    pub const ALL: [MoreLinks; 4] = [MoreLinks::Off, MoreLinks::Four, MoreLinks::Six, MoreLinks::Ten];

    pub fn count(self) -> u32 {
        match self {
            MoreLinks::Off => 0,
            MoreLinks::Four => 4,
            MoreLinks::Six => 6,
            MoreLinks::Ten => 10,
        }
    }

    pub fn from_count(count: u32) -> Option<Self> {
        match count {
            0 => Some(MoreLinks::Off),
            4 => Some(MoreLinks::Four),
            6 => Some(MoreLinks::Six),
            10 => Some(MoreLinks::Ten),
            _ => None,
        }
    }

    /// Label shown in the select widget
    pub fn label(self) -> &'static str {
        match self {
            MoreLinks::Off => "Off",
            MoreLinks::Four => "4",
            MoreLinks::Six => "6",
            MoreLinks::Ten => "10",
        }
    }
}

impl TryFrom<u32> for MoreLinks {
    type Error = InvalidMoreLinks;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::from_count(count).ok_or(InvalidMoreLinks(count))
    }
}

impl From<MoreLinks> for u32 {
    fn from(more_links: MoreLinks) -> Self {
        more_links.count()
    }
}

impl fmt::Display for MoreLinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pager behaviour for one content type.
///
/// Empty texts inherit the global ones at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypePagerSettings {
    pub enabled: bool,
    pub pager_by_author: bool,
    pub previous_text: String,
    pub next_text: String,
    pub more_links: MoreLinks,
}

/// The complete configuration owned by the pager feature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerSettings {
    pub global: GlobalPagerSettings,
    pub content_types: BTreeMap<ContentTypeId, ContentTypePagerSettings>,
}

impl PagerSettings {
    pub fn content_type(&self, id: &ContentTypeId) -> Option<&ContentTypePagerSettings> {
        self.content_types.get(id)
    }

    /// Content types with the pager switched on
    pub fn enabled_content_types(&self) -> impl Iterator<Item = &ContentTypeId> {
        self.content_types
            .iter()
            .filter(|(_, settings)| settings.enabled)
            .map(|(id, _)| id)
    }
}
