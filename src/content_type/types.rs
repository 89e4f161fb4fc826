//! Content Type Types

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest machine name the host accepts for a content type
pub const MAX_CONTENT_TYPE_ID_LENGTH: usize = 32;

static MACHINE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]+$").expect("machine name pattern is valid"));

/// Rejected content type identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidContentTypeId {
    #[error("content type identifier is empty")]
    Empty,

    #[error("content type identifier `{id}` exceeds {max} characters")]
    TooLong { id: String, max: usize },

    #[error("content type identifier `{0}` may only contain lowercase letters, digits and underscores")]
    InvalidCharacters(String),
}

/// Machine name of a content type, e.g. `article`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentTypeId(String);

impl ContentTypeId {
    /// Validate and wrap a machine name
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidContentTypeId> {
        let id = id.into();

        if id.is_empty() {
            return Err(InvalidContentTypeId::Empty);
        }

        if id.len() > MAX_CONTENT_TYPE_ID_LENGTH {
            return Err(InvalidContentTypeId::TooLong {
                id,
                max: MAX_CONTENT_TYPE_ID_LENGTH,
            });
        }

        if !MACHINE_NAME.is_match(&id) {
            return Err(InvalidContentTypeId::InvalidCharacters(id));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentTypeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ContentTypeId {
    type Err = InvalidContentTypeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ContentTypeId {
    type Error = InvalidContentTypeId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContentTypeId> for String {
    fn from(id: ContentTypeId) -> Self {
        id.0
    }
}

/// A host-defined category of content, as listed by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    #[serde(rename = "type")]
    pub id: ContentTypeId,
    pub name: String,
}

impl ContentType {
    pub fn new(id: &str, name: impl Into<String>) -> Result<Self, InvalidContentTypeId> {
        Ok(Self {
            id: ContentTypeId::new(id)?,
            name: name.into(),
        })
    }
}
