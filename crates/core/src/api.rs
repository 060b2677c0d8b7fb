//! Backend seam for reading and writing session settings

use crate::error::CoreResult;
use crate::session::{AuthSessionSettings, ConfigPatch, ProjectId};
use async_trait::async_trait;

/// Remote configuration operations used by the settings panel
///
/// Futures are not required to be `Send` so that browser HTTP clients can
/// implement this trait.
#[async_trait(?Send)]
pub trait SessionSettingsApi {
    /// Read the current session settings on the panel's read path
    ///
    /// `Ok(None)` means the project has no session settings configured.
    async fn fetch_session_settings(
        &self,
        project_id: &ProjectId,
    ) -> CoreResult<Option<AuthSessionSettings>>;

    /// Persist the session expiration fields
    async fn update_session_settings(
        &self,
        project_id: &ProjectId,
        patch: &ConfigPatch,
    ) -> CoreResult<()>;

    /// Re-read the settings from the server after a write
    async fn refetch_session_settings(
        &self,
        project_id: &ProjectId,
    ) -> CoreResult<Option<AuthSessionSettings>>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub SessionSettingsApi {}

        #[async_trait(?Send)]
        impl SessionSettingsApi for SessionSettingsApi {
            async fn fetch_session_settings(
                &self,
                project_id: &ProjectId,
            ) -> CoreResult<Option<AuthSessionSettings>>;
            async fn update_session_settings(
                &self,
                project_id: &ProjectId,
                patch: &ConfigPatch,
            ) -> CoreResult<()>;
            async fn refetch_session_settings(
                &self,
                project_id: &ProjectId,
            ) -> CoreResult<Option<AuthSessionSettings>>;
        }
    }
}
