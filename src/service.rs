//! Settings Service
//!
//! Loads the pager settings for the registered content types and applies
//! submissions as one validate-then-overwrite transaction.

use crate::content_type::{ContentType, ContentTypeId, ContentTypeRegistry};
use crate::error::SettingsError;
use crate::settings::{
    codec, validate_submission, ContentTypePagerSettings, PagerSettings, Submission,
    SETTINGS_NAMESPACE,
};
use crate::store::ConfigStore;
use tracing::{debug, info, warn};

/// Configuration schema and update service for the pager feature
pub struct SettingsService<R, S> {
    registry: R,
    store: S,
}

impl<R: ContentTypeRegistry, S: ConfigStore> SettingsService<R, S> {
    pub fn new(registry: R, store: S) -> Self {
        Self { registry, store }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Content types as currently listed by the host
    pub fn content_types(&self) -> Result<Vec<ContentType>, SettingsError> {
        Ok(self.registry.content_types()?)
    }

    /// Load settings for every registered content type
    pub fn load_settings(&self) -> Result<PagerSettings, SettingsError> {
        let content_types = self.content_types()?;
        self.load_settings_for(&content_types)
    }

    /// Load settings for an explicit list of content types.
    ///
    /// Types without stored values get the default record. Nothing is written.
    pub fn load_settings_for(
        &self,
        content_types: &[ContentType],
    ) -> Result<PagerSettings, SettingsError> {
        let values = self.store.read(SETTINGS_NAMESPACE)?;
        let settings = codec::decode(&values, content_types)?;

        debug!(
            "Loaded pager settings for {} content types ({} stored keys)",
            settings.content_types.len(),
            values.len()
        );
        Ok(settings)
    }

    /// Validate a submission and overwrite every key the feature owns.
    ///
    /// On a validation failure nothing is written. Registered content types
    /// missing from the submission are reset to their defaults; submitted
    /// types the registry no longer lists are written as submitted.
    pub fn apply_settings(&self, submission: &Submission) -> Result<(), SettingsError> {
        let mut settings = validate_submission(submission)?;
        let content_types = self.content_types()?;

        for content_type in &content_types {
            if !settings.content_types.contains_key(&content_type.id) {
                warn!(
                    "Submission has no values for content type '{}', saving defaults",
                    content_type.id
                );
                settings
                    .content_types
                    .insert(content_type.id.clone(), ContentTypePagerSettings::default());
            }
        }

        for id in settings.content_types.keys() {
            if !content_types.iter().any(|content_type| &content_type.id == id) {
                debug!("Saving settings for unregistered content type '{}'", id);
            }
        }

        let mut editor = self.store.editable(SETTINGS_NAMESPACE);
        for (key, value) in codec::encode(&settings) {
            editor.set(key, value);
        }
        let written = editor.save()?;

        info!(
            "Applied pager settings: {} keys for {} content types, pager enabled on {}",
            written,
            settings.content_types.len(),
            settings.enabled_content_types().count()
        );
        Ok(())
    }

    /// Content types with stored settings that the registry no longer lists.
    ///
    /// Their records are kept as they are; this only reports them.
    pub fn orphaned_content_types(&self) -> Result<Vec<ContentTypeId>, SettingsError> {
        let content_types = self.content_types()?;
        let values = self.store.read(SETTINGS_NAMESPACE)?;
        let orphaned = codec::orphaned_content_types(&values, &content_types);

        for id in &orphaned {
            warn!("Stored pager settings for removed content type '{}'", id);
        }
        Ok(orphaned)
    }
}
