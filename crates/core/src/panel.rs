//! Session settings panel state machine
//!
//! The panel starts in [`PanelState::Loading`], moves to [`PanelState::Ready`]
//! once the current settings are read, or to the terminal
//! [`PanelState::Error`] when the read fails. Submitting is split into
//! [`SessionSettingsPanel::begin_submit`] and
//! [`SessionSettingsPanel::complete_submit`] so that event-loop driven views
//! can run the write between the two steps; [`SessionSettingsPanel::submit`]
//! chains them for callers that can simply await.

use crate::api::SessionSettingsApi;
use crate::error::{CoreError, CoreResult};
use crate::form::{FormOptions, SessionForm, ValidationMode};
use crate::session::{AuthSessionSettings, ConfigPatch, ProjectId, SessionConfig};
use crate::toast::{ToastId, ToastKind, ToastMessages, ToastQueue};
use crate::validation::{FieldErrors, SessionField};
use tracing::{debug, info, warn};

/// Inputs the panel would otherwise pick up from ambient UI state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelContext {
    pub project_id: ProjectId,
    pub maintenance_active: bool,
}

impl PanelContext {
    pub fn new(project_id: impl Into<ProjectId>) -> Self {
        Self {
            project_id: project_id.into(),
            maintenance_active: false,
        }
    }

    #[must_use]
    pub fn with_maintenance(mut self, active: bool) -> Self {
        self.maintenance_active = active;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Loading,
    Ready(SessionForm),
    /// Reading the settings failed; the panel cannot recover from here
    Error(CoreError),
}

/// A validated submit waiting for the write to finish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmit {
    pub project_id: ProjectId,
    pub values: SessionConfig,
    pub patch: ConfigPatch,
    pub toast_id: ToastId,
}

/// Why a submit did not start
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejection {
    #[error("Session settings are not loaded")]
    NotReady,

    #[error("Settings cannot be changed while maintenance is active")]
    Maintenance,

    #[error("An update is already in progress")]
    InFlight,

    #[error("Session settings are invalid")]
    Invalid(FieldErrors),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved(SessionConfig),
    /// The write failed; the form still holds the user's edits
    Failed(CoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettingsPanel {
    context: PanelContext,
    state: PanelState,
    messages: ToastMessages,
    toasts: ToastQueue,
    pending: Option<PendingSubmit>,
    saved: Option<AuthSessionSettings>,
}

impl SessionSettingsPanel {
    pub fn new(context: PanelContext) -> Self {
        Self {
            context,
            state: PanelState::Loading,
            messages: ToastMessages::session_settings(),
            toasts: ToastQueue::new(),
            pending: None,
            saved: None,
        }
    }

    pub fn context(&self) -> &PanelContext {
        &self.context
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.context.project_id
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn form(&self) -> Option<&SessionForm> {
        match &self.state {
            PanelState::Ready(form) => Some(form),
            _ => None,
        }
    }

    fn form_mut(&mut self) -> Option<&mut SessionForm> {
        match &mut self.state {
            PanelState::Ready(form) => Some(form),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CoreError> {
        match &self.state {
            PanelState::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Last settings read from the server
    pub fn saved_settings(&self) -> Option<AuthSessionSettings> {
        self.saved
    }

    pub fn set_maintenance_active(&mut self, active: bool) {
        self.context.maintenance_active = active;
    }

    pub fn maintenance_active(&self) -> bool {
        self.context.maintenance_active
    }

    /// Initialize the form from the settings read
    ///
    /// Only the first result is applied; later calls are ignored.
    pub fn finish_loading(&mut self, result: CoreResult<Option<AuthSessionSettings>>) {
        if self.state != PanelState::Loading {
            debug!(project_id = %self.context.project_id, "Ignoring settings read outside of loading state");
            return;
        }

        match result {
            Ok(settings) => {
                let defaults = SessionConfig::from_settings(settings.as_ref());
                debug!(
                    project_id = %self.context.project_id,
                    access_token_expires_in = %defaults.access_token_expires_in,
                    refresh_token_expires_in = %defaults.refresh_token_expires_in,
                    "Session settings loaded"
                );
                self.saved = settings;
                self.state = PanelState::Ready(SessionForm::new(
                    defaults,
                    FormOptions {
                        re_validate_mode: ValidationMode::OnSubmit,
                    },
                ));
            }
            Err(err) => {
                warn!(project_id = %self.context.project_id, "Failed to load session settings: {err}");
                self.state = PanelState::Error(err);
            }
        }
    }

    pub async fn load<A>(&mut self, api: &A)
    where
        A: SessionSettingsApi + ?Sized,
    {
        let result = api.fetch_session_settings(&self.context.project_id).await;
        self.finish_loading(result);
    }

    /// Forward an edit to the form; ignored unless the panel is ready
    pub fn set_value(&mut self, field: SessionField, raw: impl Into<String>) {
        if let Some(form) = self.form_mut() {
            form.set_value(field, raw);
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingSubmit> {
        self.pending.as_ref()
    }

    /// Whether the submit button accepts clicks
    pub fn submit_enabled(&self) -> bool {
        self.form().is_some_and(SessionForm::is_dirty)
            && !self.context.maintenance_active
            && !self.is_submitting()
    }

    /// Whether the submit button shows its busy state
    pub fn submit_loading(&self) -> bool {
        self.form().is_some_and(SessionForm::is_submitting)
    }

    /// Validate the form and start a write
    pub fn begin_submit(&mut self) -> Result<PendingSubmit, SubmitRejection> {
        if self.form().is_none() {
            return Err(SubmitRejection::NotReady);
        }
        if self.context.maintenance_active {
            return Err(SubmitRejection::Maintenance);
        }
        if self.pending.is_some() {
            return Err(SubmitRejection::InFlight);
        }

        let project_id = self.context.project_id.clone();
        let form = self.form_mut().ok_or(SubmitRejection::NotReady)?;
        let values = form.handle_submit().map_err(SubmitRejection::Invalid)?;

        let toast_id = self.toasts.loading(self.messages.loading.clone());
        let pending = PendingSubmit {
            project_id,
            values,
            patch: values.to_patch(),
            toast_id,
        };
        debug!(project_id = %pending.project_id, "Submitting session settings");
        self.pending = Some(pending.clone());
        Ok(pending)
    }

    /// Apply the result of the write started by [`Self::begin_submit`]
    ///
    /// Returns `None` when no submit is pending.
    pub fn complete_submit(&mut self, result: CoreResult<()>) -> Option<SubmitOutcome> {
        let pending = self.pending.take()?;

        let outcome = match result {
            Ok(()) => {
                info!(
                    project_id = %pending.project_id,
                    access_token_expires_in = %pending.values.access_token_expires_in,
                    refresh_token_expires_in = %pending.values.refresh_token_expires_in,
                    "Session settings updated"
                );
                self.toasts.resolve(
                    pending.toast_id,
                    ToastKind::Success,
                    self.messages.success.clone(),
                );
                if let Some(form) = self.form_mut() {
                    form.reset(pending.values);
                }
                SubmitOutcome::Saved(pending.values)
            }
            Err(err) => {
                warn!(project_id = %pending.project_id, "Failed to update session settings: {err}");
                self.toasts.resolve(
                    pending.toast_id,
                    ToastKind::Error,
                    self.messages.error.clone(),
                );
                SubmitOutcome::Failed(err)
            }
        };

        if let Some(form) = self.form_mut() {
            form.finish_submit();
        }
        Some(outcome)
    }

    /// Record the settings re-read after a successful write
    pub fn apply_refetch(&mut self, result: CoreResult<Option<AuthSessionSettings>>) {
        match result {
            Ok(settings) => self.saved = settings,
            Err(err) => {
                warn!(project_id = %self.context.project_id, "Failed to refresh session settings: {err}");
            }
        }
    }

    /// Validate, write, and re-read the settings
    pub async fn submit<A>(&mut self, api: &A) -> Result<SubmitOutcome, SubmitRejection>
    where
        A: SessionSettingsApi + ?Sized,
    {
        let pending = self.begin_submit()?;
        let result = api
            .update_session_settings(&pending.project_id, &pending.patch)
            .await;
        let outcome = self
            .complete_submit(result)
            .ok_or(SubmitRejection::NotReady)?;

        if matches!(outcome, SubmitOutcome::Saved(_)) {
            let refreshed = api.refetch_session_settings(&pending.project_id).await;
            self.apply_refetch(refreshed);
        }

        Ok(outcome)
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn dismiss_toast(&mut self, id: ToastId) -> bool {
        self.toasts.dismiss(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockSessionSettingsApi;
    use crate::session::TokenExpiration;
    use crate::validation::FieldErrorKind;
    use mockall::predicate::eq;

    fn settings(access: i32, refresh: i32) -> AuthSessionSettings {
        AuthSessionSettings {
            access_token: Some(TokenExpiration {
                expires_in: Some(access.into()),
            }),
            refresh_token: Some(TokenExpiration {
                expires_in: Some(refresh.into()),
            }),
        }
    }

    fn ready_panel(context: PanelContext, existing: Option<AuthSessionSettings>) -> SessionSettingsPanel {
        let mut panel = SessionSettingsPanel::new(context);
        panel.finish_loading(Ok(existing));
        panel
    }

    #[tokio::test]
    async fn test_load_without_configuration_uses_defaults() {
        let mut api = MockSessionSettingsApi::new();
        api.expect_fetch_session_settings()
            .with(eq(ProjectId::new("app-1")))
            .times(1)
            .returning(|_| Ok(None));

        let mut panel = SessionSettingsPanel::new(PanelContext::new("app-1"));
        assert_eq!(panel.state(), &PanelState::Loading);

        panel.load(&api).await;

        let form = panel.form().unwrap();
        assert_eq!(form.defaults(), SessionConfig::new(900, 43_200));
        assert!(!panel.submit_enabled());
    }

    #[tokio::test]
    async fn test_load_with_existing_configuration() {
        let mut api = MockSessionSettingsApi::new();
        api.expect_fetch_session_settings()
            .returning(|_| Ok(Some(settings(600, 7200))));

        let mut panel = SessionSettingsPanel::new(PanelContext::new("app-1"));
        panel.load(&api).await;

        assert_eq!(
            panel.form().unwrap().defaults(),
            SessionConfig::new(600, 7200)
        );
        assert_eq!(panel.saved_settings(), Some(settings(600, 7200)));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_terminal() {
        let mut api = MockSessionSettingsApi::new();
        api.expect_fetch_session_settings()
            .returning(|_| Err(CoreError::fetch("connection refused")));

        let mut panel = SessionSettingsPanel::new(PanelContext::new("app-1"));
        panel.load(&api).await;

        assert_eq!(panel.error(), Some(&CoreError::fetch("connection refused")));

        // A late successful read does not revive the panel
        panel.finish_loading(Ok(None));
        assert!(panel.error().is_some());
        assert_eq!(panel.begin_submit(), Err(SubmitRejection::NotReady));
    }

    #[tokio::test]
    async fn test_submit_sends_exact_payload_and_resets_baseline() {
        let mut api = MockSessionSettingsApi::new();
        api.expect_update_session_settings()
            .withf(|project_id, patch| {
                project_id.as_str() == "app-1" && *patch == SessionConfig::new(1800, 86_400).to_patch()
            })
            .times(1)
            .returning(|_, _| Ok(()));
        api.expect_refetch_session_settings()
            .times(1)
            .returning(|_| Ok(Some(settings(1800, 86_400))));

        let mut panel = ready_panel(PanelContext::new("app-1"), None);
        panel.set_value(SessionField::AccessTokenExpiresIn, "1800");
        panel.set_value(SessionField::RefreshTokenExpiresIn, "86400");
        assert!(panel.submit_enabled());

        let outcome = panel.submit(&api).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Saved(SessionConfig::new(1800, 86_400)));
        let form = panel.form().unwrap();
        assert!(!form.is_dirty());
        assert!(!form.is_submitting());
        assert!(!panel.submit_enabled());
        assert_eq!(panel.saved_settings(), Some(settings(1800, 86_400)));

        let toast = panel.toasts().iter().last().unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.message, "Session settings have been updated successfully.");

        // A further edit enables submit again
        panel.set_value(SessionField::AccessTokenExpiresIn, "60");
        assert!(panel.submit_enabled());
    }

    #[tokio::test]
    async fn test_non_numeric_value_blocks_submit() {
        let mut api = MockSessionSettingsApi::new();
        api.expect_update_session_settings().never();

        let mut panel = ready_panel(PanelContext::new("app-1"), None);
        panel.set_value(SessionField::AccessTokenExpiresIn, "fifteen");

        let rejection = panel.submit(&api).await.unwrap_err();

        let SubmitRejection::Invalid(errors) = &rejection else {
            panic!("expected validation failure, got {rejection:?}");
        };
        assert_eq!(
            errors[&SessionField::AccessTokenExpiresIn].kind,
            FieldErrorKind::NotANumber
        );
        assert_eq!(
            panel
                .form()
                .unwrap()
                .register(SessionField::AccessTokenExpiresIn)
                .error
                .as_deref(),
            Some("Access token expiration must be a number")
        );
        assert!(panel.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_edits() {
        let mut api = MockSessionSettingsApi::new();
        api.expect_update_session_settings()
            .times(1)
            .returning(|_, _| Err(CoreError::update("Server error 500: boom")));
        api.expect_refetch_session_settings().never();

        let mut panel = ready_panel(PanelContext::new("app-1"), Some(settings(900, 43_200)));
        panel.set_value(SessionField::RefreshTokenExpiresIn, "100");

        let outcome = panel.submit(&api).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Failed(CoreError::Update { .. })));
        let form = panel.form().unwrap();
        assert_eq!(form.value(SessionField::RefreshTokenExpiresIn), "100");
        assert!(form.is_dirty());
        assert!(!form.is_submitting());
        assert!(panel.submit_enabled());

        let toast = panel.toasts().iter().last().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(
            toast.message,
            "An error occurred while trying to update the project's session settings."
        );
    }

    #[test]
    fn test_maintenance_disables_submit() {
        let mut panel = ready_panel(PanelContext::new("app-1").with_maintenance(true), None);
        panel.set_value(SessionField::AccessTokenExpiresIn, "120");

        // Editing stays available; only submission is blocked
        let form = panel.form().unwrap();
        assert_eq!(form.value(SessionField::AccessTokenExpiresIn), "120");
        assert!(form.is_dirty());
        assert!(!panel.submit_enabled());
        assert_eq!(panel.begin_submit(), Err(SubmitRejection::Maintenance));

        panel.set_maintenance_active(false);
        assert!(panel.submit_enabled());
    }

    #[test]
    fn test_second_submit_while_pending_is_rejected() {
        let mut panel = ready_panel(PanelContext::new("app-1"), None);
        panel.set_value(SessionField::AccessTokenExpiresIn, "120");

        let pending = panel.begin_submit().unwrap();
        assert!(panel.submit_loading());
        assert!(!panel.submit_enabled());
        let toast = panel.toasts().get(pending.toast_id).unwrap();
        assert_eq!(toast.kind, ToastKind::Loading);
        assert_eq!(toast.message, "Session settings are being updated...");
        assert_eq!(panel.begin_submit(), Err(SubmitRejection::InFlight));
        assert_eq!(panel.toasts().len(), 1);

        assert!(panel.complete_submit(Ok(())).is_some());
        assert!(panel.complete_submit(Ok(())).is_none());
    }

    #[tokio::test]
    async fn test_refetch_failure_does_not_fail_submit() {
        let mut api = MockSessionSettingsApi::new();
        api.expect_update_session_settings()
            .returning(|_, _| Ok(()));
        api.expect_refetch_session_settings()
            .returning(|_| Err(CoreError::fetch("timeout")));

        let mut panel = ready_panel(PanelContext::new("app-1"), Some(settings(900, 43_200)));
        panel.set_value(SessionField::AccessTokenExpiresIn, "300");

        let outcome = panel.submit(&api).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Saved(SessionConfig::new(300, 43_200)));
        assert_eq!(panel.saved_settings(), Some(settings(900, 43_200)));
    }
}
