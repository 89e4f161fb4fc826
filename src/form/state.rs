//! Settings form lifecycle

use super::builder::build_form;
use super::types::FormDefinition;
use crate::content_type::ContentTypeRegistry;
use crate::error::SettingsError;
use crate::service::SettingsService;
use crate::settings::{PagerSettings, Submission, ValidationError};
use crate::store::ConfigStore;
use tracing::debug;

/// Whether the form matches the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Clean,
    /// A submission is pending; `errors` is set once validation rejected it
    Dirty {
        submission: Submission,
        errors: Option<ValidationError>,
    },
}

/// The settings form: load, render, submit, re-prompt
pub struct SettingsForm<R, S> {
    service: SettingsService<R, S>,
    state: FormState,
}

impl<R: ContentTypeRegistry, S: ConfigStore> SettingsForm<R, S> {
    pub fn new(service: SettingsService<R, S>) -> Self {
        Self {
            service,
            state: FormState::Clean,
        }
    }

    pub fn service(&self) -> &SettingsService<R, S> {
        &self.service
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_dirty(&self) -> bool {
        matches!(self.state, FormState::Dirty { .. })
    }

    /// Load the stored settings, discarding any pending submission
    pub fn load(&mut self) -> Result<PagerSettings, SettingsError> {
        let settings = self.service.load_settings()?;
        self.state = FormState::Clean;
        Ok(settings)
    }

    /// Describe the form; a rejected submission is shown with its errors
    pub fn definition(&self) -> Result<FormDefinition, SettingsError> {
        let content_types = self.service.content_types()?;

        match &self.state {
            FormState::Clean => {
                let settings = self.service.load_settings_for(&content_types)?;
                Ok(build_form(&Submission::from(&settings), &content_types))
            }
            FormState::Dirty { submission, errors } => {
                let form = build_form(submission, &content_types);
                Ok(match errors {
                    Some(errors) => form.with_errors(errors),
                    None => form,
                })
            }
        }
    }

    /// Submit a full form; the form becomes clean again only if the write succeeded
    pub fn submit(&mut self, submission: Submission) -> Result<(), SettingsError> {
        let result = self.service.apply_settings(&submission);

        self.state = match &result {
            Ok(()) => FormState::Clean,
            Err(SettingsError::Validation(errors)) => {
                debug!("Settings form rejected: {}", errors);
                FormState::Dirty {
                    submission,
                    errors: Some(errors.clone()),
                }
            }
            Err(_) => FormState::Dirty {
                submission,
                errors: None,
            },
        };

        result
    }
}
