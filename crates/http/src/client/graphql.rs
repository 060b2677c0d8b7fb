//! GraphQL operation documents and envelopes

use console_core::{ConfigPatch, ProjectConfig};
use serde::{Deserialize, Serialize};

pub const GET_AUTHENTICATION_SETTINGS: &str = r"query GetAuthenticationSettings($appId: uuid!) {
  config(appID: $appId, resolve: true) {
    auth {
      session {
        accessToken {
          expiresIn
        }
        refreshToken {
          expiresIn
        }
      }
    }
  }
}";

pub const UPDATE_CONFIG: &str = r"mutation UpdateConfig($appId: uuid!, $config: ConfigConfigUpdateInput!) {
  updateConfig(appID: $appId, config: $config) {
    id: __typename
  }
}";

/// Request body posted to the GraphQL endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<V> {
    pub query: &'static str,
    pub operation_name: &'static str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAuthenticationSettingsVariables<'a> {
    pub app_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GetAuthenticationSettingsData {
    pub config: Option<ProjectConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigVariables<'a> {
    pub app_id: &'a str,
    pub config: &'a ConfigPatch,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigData {
    pub update_config: Option<serde_json::Value>,
}
