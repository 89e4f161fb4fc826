//! Pager Settings Library
//!
//! Configuration schema and update service for per content type
//! next/previous pager links: which content types show a pager, its texts,
//! author scoping and how many extra titles surround it.
//!
//! Settings are loaded for the content types a host registry lists and are
//! replaced as a whole by validated form submissions, committed atomically to
//! a namespaced key-value store.

pub mod config;
pub mod content_type;
pub mod error;
pub mod form;
pub mod service;
pub mod settings;
pub mod store;

pub use config::Config;
pub use content_type::{ContentType, ContentTypeId, ContentTypeRegistry, StaticRegistry};
pub use error::SettingsError;
pub use form::{FormDefinition, SettingsForm};
pub use service::SettingsService;
pub use settings::{PagerSettings, Submission, ValidationError};
pub use store::{ConfigStore, FileStore, MemoryStore, StoreError};

/// Common error type for the application edge
pub type Result<T> = anyhow::Result<T>;
