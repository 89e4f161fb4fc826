//! Error types for settings operations

use crate::content_type::RegistryError;
use crate::settings::ValidationError;
use crate::store::StoreError;
use thiserror::Error;

/// Failure of a load or apply
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The submission was rejected; the store is unchanged
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("configuration store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl SettingsError {
    /// The rejected fields, if the submitter can fix the failure
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            SettingsError::Validation(err) => Some(err),
            _ => None,
        }
    }
}
