//! Content Type Registry

use super::ContentType;
use std::sync::Arc;
use thiserror::Error;

/// The host could not list its content types
#[derive(Debug, Clone, Error)]
#[error("content type registry unavailable: {0}")]
pub struct RegistryError(pub String);

/// Source of the currently registered content types.
///
/// Implementations return types in host order; the order is used for display
/// only.
pub trait ContentTypeRegistry {
    fn content_types(&self) -> Result<Vec<ContentType>, RegistryError>;
}

impl<T: ContentTypeRegistry + ?Sized> ContentTypeRegistry for &T {
    fn content_types(&self) -> Result<Vec<ContentType>, RegistryError> {
        (**self).content_types()
    }
}

impl<T: ContentTypeRegistry + ?Sized> ContentTypeRegistry for Arc<T> {
    fn content_types(&self) -> Result<Vec<ContentType>, RegistryError> {
        (**self).content_types()
    }
}

/// Registry over a fixed list, typically read from the tool configuration
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    content_types: Vec<ContentType>,
}

impl StaticRegistry {
    /// Later entries replace earlier ones with the same id
    pub fn new(content_types: Vec<ContentType>) -> Self {
        content_types
            .into_iter()
            .fold(Self::default(), Self::with_content_type)
    }

    /// Add a content type, replacing any existing entry with the same id
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        match self
            .content_types
            .iter_mut()
            .find(|existing| existing.id == content_type.id)
        {
            Some(existing) => *existing = content_type,
            None => self.content_types.push(content_type),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.content_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content_types.is_empty()
    }
}

impl ContentTypeRegistry for StaticRegistry {
    fn content_types(&self) -> Result<Vec<ContentType>, RegistryError> {
        Ok(self.content_types.clone())
    }
}
