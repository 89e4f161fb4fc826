//! Pager Settings Module
//!
//! The configuration schema of the pager feature: the structured settings,
//! their flat key names, the submission a form produces and its validation.

pub mod codec;
pub mod keys;
pub mod submission;
pub mod types;
pub mod validation;

pub use keys::{ContentTypeField, SettingKey, FORM_ID, SETTINGS_NAMESPACE};
pub use submission::{ContentTypeSubmission, FormValues, Submission};
pub use types::{
    ContentTypePagerSettings, GlobalPagerSettings, InvalidMoreLinks, MoreLinks, PagerSettings,
    MAX_TEXT_LENGTH,
};
pub use validation::{validate_submission, FieldViolation, ValidationError, ViolationKind};
