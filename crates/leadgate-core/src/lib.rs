//! Core library for `leadgate`.
//!
//! Contains the schema validator, the hosting-environment detector, the
//! channel selector, and the submission controllers for the site's two
//! lead-capture forms. This crate depends on `leadgate-channel` for the
//! delivery-channel trait and knows nothing about specific transports.

pub mod controller;
pub mod environment;
pub mod route;
pub mod validate;

pub use controller::{
    Artifact, ContactController, LeadController, SubmissionState, ToastTone, UiEvent,
};
pub use environment::Environment;
pub use route::ChannelPair;
pub use validate::{Field, FieldError, FieldErrors, RawContact, RawLead};
