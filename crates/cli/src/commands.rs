//! CLI commands

use anyhow::{Result, anyhow, bail};
use clap::Subcommand;
use console_core::{
    ApiConfig, AuthSessionSettings, ConsoleConfig, FetchPolicy, PanelContext, ProjectId,
    SessionConfig, SessionField, SessionForm, SessionSettingsApi, SessionSettingsPanel,
    SubmitOutcome, SubmitRejection, ToastKind,
};
use console_http::ConsoleClient;
use std::path::PathBuf;
use tracing::info;

use crate::config;

#[derive(Subcommand)]
pub enum Commands {
    /// Show or change a project's session settings
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Print the effective token expirations
    Show {
        /// Project ID (defaults to `console.project_id` from the configuration)
        #[arg(short, long)]
        project: Option<String>,
    },

    /// Update the token expirations
    Set {
        /// Project ID (defaults to `console.project_id` from the configuration)
        #[arg(short, long)]
        project: Option<String>,

        /// Access token expiration in seconds
        #[arg(long, allow_hyphen_values = true)]
        access_token_expires_in: Option<String>,

        /// Refresh token expiration in seconds
        #[arg(long, allow_hyphen_values = true)]
        refresh_token_expires_in: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate a default configuration file
    Init {
        /// Output file path (defaults to the user configuration directory)
        output: Option<PathBuf>,
    },
}

impl Commands {
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        match self {
            Self::Session { command } => {
                let config = config::load_config(config_path.as_deref())?;
                command.execute(&config).await
            }
            Self::Config { command } => command.execute(),
        }
    }
}

impl SessionCommands {
    pub async fn execute(self, config: &ConsoleConfig) -> Result<()> {
        let client = cli_client(&config.api)?;

        match self {
            Self::Show { project } => {
                let context = panel_context(project, config)?;
                let output = show_session(&client, context).await?;
                print!("{output}");
                Ok(())
            }
            Self::Set {
                project,
                access_token_expires_in,
                refresh_token_expires_in,
            } => {
                let context = panel_context(project, config)?;
                let edits = [
                    (SessionField::AccessTokenExpiresIn, access_token_expires_in),
                    (SessionField::RefreshTokenExpiresIn, refresh_token_expires_in),
                ];
                let values = set_session(&client, context, edits).await?;
                println!(
                    "access token expires in: {}s\nrefresh token expires in: {}s",
                    values.access_token_expires_in, values.refresh_token_expires_in
                );
                Ok(())
            }
        }
    }
}

impl ConfigCommands {
    pub fn execute(self) -> Result<()> {
        match self {
            Self::Init { output } => {
                let config_path = output.unwrap_or_else(config::default_config_path);
                config::generate_default_config(&config_path)?;
                println!("Generated configuration at: {}", config_path.display());
                Ok(())
            }
        }
    }
}

/// The CLI reads through the cache once per run
fn cli_client(api: &ApiConfig) -> Result<ConsoleClient> {
    let api = ApiConfig {
        fetch_policy: FetchPolicy::CacheFirst,
        ..api.clone()
    };
    Ok(ConsoleClient::from_config(&api)?)
}

fn panel_context(project: Option<String>, config: &ConsoleConfig) -> Result<PanelContext> {
    let project_id = project
        .map(ProjectId::new)
        .or_else(|| config.console.project_id.clone())
        .ok_or_else(|| anyhow!("No project given; pass --project or set console.project_id"))?;

    Ok(PanelContext::new(project_id).with_maintenance(config.console.maintenance_active))
}

async fn load_panel<A>(api: &A, context: PanelContext) -> Result<SessionSettingsPanel>
where
    A: SessionSettingsApi + ?Sized,
{
    let mut panel = SessionSettingsPanel::new(context);
    panel.load(api).await;

    if let Some(err) = panel.error() {
        bail!("Failed to load session settings: {err}");
    }
    Ok(panel)
}

pub async fn show_session<A>(api: &A, context: PanelContext) -> Result<String>
where
    A: SessionSettingsApi + ?Sized,
{
    let panel = load_panel(api, context).await?;
    let values = panel
        .form()
        .map(SessionForm::defaults)
        .ok_or_else(|| anyhow!("Session settings are not loaded"))?;

    Ok(render_settings(panel.project_id(), values, panel.saved_settings()))
}

/// Apply the given edits through the settings panel and submit them
///
/// Fields without an edit keep their current value. Nothing is written when
/// the edits leave the settings unchanged.
pub async fn set_session<A>(
    api: &A,
    context: PanelContext,
    edits: [(SessionField, Option<String>); 2],
) -> Result<SessionConfig>
where
    A: SessionSettingsApi + ?Sized,
{
    if context.maintenance_active {
        bail!("Session settings cannot be changed while maintenance is active");
    }

    let mut panel = load_panel(api, context).await?;
    for (field, value) in edits {
        if let Some(value) = value {
            panel.set_value(field, value);
        }
    }

    let Some(form) = panel.form() else {
        bail!("Session settings are not loaded");
    };
    if !form.is_dirty() {
        info!(project_id = %panel.project_id(), "Session settings unchanged");
        return Ok(form.defaults());
    }

    let outcome = panel.submit(api).await;
    for toast in panel.toasts().iter() {
        match toast.kind {
            ToastKind::Error => eprintln!("{}", toast.message),
            ToastKind::Loading | ToastKind::Success => println!("{}", toast.message),
        }
    }

    match outcome {
        Ok(SubmitOutcome::Saved(values)) => Ok(values),
        Ok(SubmitOutcome::Failed(err)) => Err(err.into()),
        Err(SubmitRejection::Invalid(errors)) => {
            let messages: Vec<String> = errors.values().map(ToString::to_string).collect();
            bail!("Invalid session settings: {}", messages.join("; "))
        }
        Err(rejection) => Err(rejection.into()),
    }
}

fn render_settings(
    project_id: &ProjectId,
    values: SessionConfig,
    saved: Option<AuthSessionSettings>,
) -> String {
    let saved = saved.unwrap_or_default();
    let rows = [
        (
            SessionField::AccessTokenExpiresIn,
            saved.access_token_expires_in(),
        ),
        (
            SessionField::RefreshTokenExpiresIn,
            saved.refresh_token_expires_in(),
        ),
    ];

    let lines: String = rows
        .into_iter()
        .map(|(field, stored)| {
            let marker = if stored.is_none() { " (default)" } else { "" };
            format!(
                "  {}: {}{marker}\n",
                field.input_label(),
                field.get(&values)
            )
        })
        .collect();

    format!("Session settings for project {project_id}\n{lines}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_core::{Seconds, TokenExpiration};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ConsoleClient {
        cli_client(&ApiConfig {
            endpoint: format!("{}/v1/graphql", server.uri()),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    async fn mount_settings(server: &MockServer, data: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/v1/graphql"))
            .and(body_partial_json(
                json!({ "operationName": "GetAuthenticationSettings" }),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
            .mount(server)
            .await;
    }

    #[test]
    fn test_render_marks_defaults() {
        let saved = AuthSessionSettings {
            access_token: Some(TokenExpiration {
                expires_in: Some(Seconds::from(600)),
            }),
            refresh_token: None,
        };
        let values = SessionConfig::from_settings(Some(&saved));

        let output = render_settings(&ProjectId::new("app-1"), values, Some(saved));

        assert!(output.contains("Access Token Expires In (Seconds): 600\n"));
        assert!(output.contains("Refresh Token Expires In (Seconds): 43200 (default)\n"));
    }

    #[test]
    fn test_render_keeps_fractional_seconds() {
        let saved = AuthSessionSettings {
            access_token: Some(TokenExpiration {
                expires_in: Seconds::new(1.5),
            }),
            refresh_token: None,
        };
        let values = SessionConfig::from_settings(Some(&saved));

        let output = render_settings(&ProjectId::new("app-1"), values, Some(saved));

        assert_eq!(
            output,
            "Session settings for project app-1\n  \
             Access Token Expires In (Seconds): 1.5\n  \
             Refresh Token Expires In (Seconds): 43200 (default)\n"
        );
    }

    #[test]
    fn test_panel_context_falls_back_to_config() {
        let mut config = ConsoleConfig::default();
        assert!(panel_context(None, &config).is_err());

        config.console.project_id = Some(ProjectId::new("from-config"));
        config.console.maintenance_active = true;
        let context = panel_context(None, &config).unwrap();
        assert_eq!(context.project_id.as_str(), "from-config");
        assert!(context.maintenance_active);

        let context = panel_context(Some("from-flag".to_string()), &config).unwrap();
        assert_eq!(context.project_id.as_str(), "from-flag");
    }

    #[tokio::test]
    async fn test_show_uses_defaults_without_config() {
        let server = MockServer::start().await;
        mount_settings(&server, json!({ "config": null })).await;

        let output = show_session(&client(&server), PanelContext::new("app-1"))
            .await
            .unwrap();

        assert!(output.contains("900 (default)"));
        assert!(output.contains("43200 (default)"));
    }

    #[tokio::test]
    async fn test_set_refuses_during_maintenance() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let context = PanelContext::new("app-1").with_maintenance(true);
        let edits = [
            (SessionField::AccessTokenExpiresIn, Some("60".to_string())),
            (SessionField::RefreshTokenExpiresIn, None),
        ];

        assert!(set_session(&client(&server), context, edits).await.is_err());
    }

    #[tokio::test]
    async fn test_set_submits_only_changed_values_in_full_payload() {
        let server = MockServer::start().await;
        mount_settings(&server, json!({ "config": null })).await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "operationName": "UpdateConfig",
                "variables": {
                    "appId": "app-1",
                    "config": { "auth": { "session": {
                        "accessToken": { "expiresIn": 60 },
                        "refreshToken": { "expiresIn": 43200 }
                    } } }
                }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "updateConfig": { "id": "ConfigConfig" } } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let edits = [
            (SessionField::AccessTokenExpiresIn, Some("60".to_string())),
            (SessionField::RefreshTokenExpiresIn, None),
        ];
        let values = set_session(&client(&server), PanelContext::new("app-1"), edits)
            .await
            .unwrap();

        assert_eq!(values, SessionConfig::new(60, 43_200));
    }

    #[tokio::test]
    async fn test_set_rejects_non_numeric_value() {
        let server = MockServer::start().await;
        mount_settings(&server, json!({ "config": null })).await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "operationName": "UpdateConfig" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let edits = [
            (SessionField::AccessTokenExpiresIn, Some("soon".to_string())),
            (SessionField::RefreshTokenExpiresIn, None),
        ];
        let err = set_session(&client(&server), PanelContext::new("app-1"), edits)
            .await
            .unwrap_err();

        assert!(
            err.to_string()
                .contains("Access token expiration must be a number")
        );
    }
}
