//! Session settings operations

use super::graphql::{
    GetAuthenticationSettingsData, GetAuthenticationSettingsVariables, GraphQlRequest,
    UpdateConfigData, UpdateConfigVariables, GET_AUTHENTICATION_SETTINGS, UPDATE_CONFIG,
};
use super::{ClientError, ConsoleClient};
use async_trait::async_trait;
use console_core::{
    AuthSessionSettings, ConfigPatch, CoreResult, FetchPolicy, ProjectId, SessionSettingsApi,
};
use tracing::debug;

impl ConsoleClient {
    /// Read the session settings of a project under the given policy
    pub async fn get_authentication_settings(
        &self,
        project_id: &ProjectId,
        policy: FetchPolicy,
    ) -> Result<Option<AuthSessionSettings>, ClientError> {
        match policy {
            FetchPolicy::CacheOnly => {
                let cached = self.cache.get(project_id);
                if cached.is_none() {
                    debug!(%project_id, "Session settings not cached");
                }
                Ok(cached.flatten())
            }
            FetchPolicy::CacheFirst => {
                if let Some(cached) = self.cache.get(project_id) {
                    debug!(%project_id, "Serving session settings from cache");
                    return Ok(cached);
                }
                self.query_authentication_settings(project_id).await
            }
            FetchPolicy::NetworkOnly => self.query_authentication_settings(project_id).await,
        }
    }

    async fn query_authentication_settings(
        &self,
        project_id: &ProjectId,
    ) -> Result<Option<AuthSessionSettings>, ClientError> {
        let operation = GraphQlRequest {
            query: GET_AUTHENTICATION_SETTINGS,
            operation_name: "GetAuthenticationSettings",
            variables: GetAuthenticationSettingsVariables {
                app_id: project_id.as_str(),
            },
        };

        let data: GetAuthenticationSettingsData = self.execute(&operation).await?;
        let settings = data.config.and_then(|config| config.session());
        self.cache.insert(project_id.clone(), settings);

        Ok(settings)
    }

    /// Apply a configuration patch to a project
    ///
    /// The project's cache entry is dropped once the write succeeds.
    pub async fn update_config(
        &self,
        project_id: &ProjectId,
        patch: &ConfigPatch,
    ) -> Result<(), ClientError> {
        let operation = GraphQlRequest {
            query: UPDATE_CONFIG,
            operation_name: "UpdateConfig",
            variables: UpdateConfigVariables {
                app_id: project_id.as_str(),
                config: patch,
            },
        };

        let _: UpdateConfigData = self.execute(&operation).await?;
        self.cache.invalidate(project_id);

        Ok(())
    }
}

#[async_trait(?Send)]
impl SessionSettingsApi for ConsoleClient {
    async fn fetch_session_settings(
        &self,
        project_id: &ProjectId,
    ) -> CoreResult<Option<AuthSessionSettings>> {
        self.get_authentication_settings(project_id, self.fetch_policy)
            .await
            .map_err(ClientError::into_fetch_error)
    }

    async fn update_session_settings(
        &self,
        project_id: &ProjectId,
        patch: &ConfigPatch,
    ) -> CoreResult<()> {
        self.update_config(project_id, patch)
            .await
            .map_err(ClientError::into_update_error)
    }

    async fn refetch_session_settings(
        &self,
        project_id: &ProjectId,
    ) -> CoreResult<Option<AuthSessionSettings>> {
        self.get_authentication_settings(project_id, FetchPolicy::NetworkOnly)
            .await
            .map_err(ClientError::into_fetch_error)
    }
}
