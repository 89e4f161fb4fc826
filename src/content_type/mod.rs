//! Content Type Module
//!
//! Content types are owned by the host system. This module only models the
//! identifier and display name, plus the registry seam they are listed through.

pub mod registry;
pub mod types;

pub use registry::{ContentTypeRegistry, RegistryError, StaticRegistry};
pub use types::{ContentType, ContentTypeId, InvalidContentTypeId, MAX_CONTENT_TYPE_ID_LENGTH};
