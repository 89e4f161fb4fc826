//! Settings Form Module
//!
//! Describes the settings form as data and tracks its clean/dirty lifecycle.
//! Rendering the widgets is left to the host.

pub mod builder;
pub mod state;
pub mod types;

pub use builder::{build_form, CONTENT_TYPE_FIELDSET, GLOBAL_FIELDSET};
pub use state::{FormState, SettingsForm};
pub use types::{FormDefinition, FormElement, SelectOption};
