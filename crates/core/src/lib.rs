//! Console core types: session settings, form validation and panel state

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod panel;
pub mod session;
pub mod toast;
pub mod validation;

pub use api::SessionSettingsApi;
pub use config::{ApiConfig, ConsoleConfig, FetchPolicy};
pub use error::{CoreError, CoreResult};
pub use form::{FieldRegistration, FormOptions, SessionForm, ValidationMode};
pub use panel::{
    PanelContext, PanelState, PendingSubmit, SessionSettingsPanel, SubmitOutcome, SubmitRejection,
};
pub use session::{
    AuthSessionSettings, ConfigPatch, ProjectConfig, ProjectId, Seconds, SessionConfig,
    TokenExpiration, DEFAULT_ACCESS_TOKEN_EXPIRES_IN, DEFAULT_REFRESH_TOKEN_EXPIRES_IN,
};
pub use toast::{Toast, ToastId, ToastKind, ToastMessages, ToastQueue, ToastStyle};
pub use validation::{FieldError, FieldErrorKind, FieldErrors, SessionField};
