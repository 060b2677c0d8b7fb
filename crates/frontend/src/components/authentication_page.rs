use crate::client::console_client;
use crate::components::{ActivityIndicator, LoadError, SessionSettings};
use crate::config::FrontendConfig;
use crate::ui::use_ui;
use console_core::{CoreError, FetchPolicy, ProjectId};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
enum PageState {
    Loading,
    Loaded,
    Failed(CoreError),
}

#[derive(Properties, PartialEq)]
pub struct AuthenticationPageProps {
    pub project_id: ProjectId,
}

/// Authentication settings page of a project
///
/// Reads the settings from the network once and hands the cached copy to the
/// panels below it.
#[function_component(AuthenticationPage)]
pub fn authentication_page(props: &AuthenticationPageProps) -> Html {
    let ui = use_ui();
    let state = use_state(|| PageState::Loading);

    {
        let state = state.clone();
        use_effect_with(props.project_id.clone(), move |project_id| {
            let project_id = project_id.clone();
            state.set(PageState::Loading);
            spawn_local(async move {
                let result = match console_client() {
                    Ok(client) => client
                        .get_authentication_settings(&project_id, FetchPolicy::NetworkOnly)
                        .await
                        .map_err(|e| e.into_fetch_error()),
                    Err(e) => Err(e.into_fetch_error()),
                };

                match result {
                    Ok(_) => state.set(PageState::Loaded),
                    Err(e) => {
                        tracing::error!(%project_id, "Failed to load authentication settings: {e}");
                        state.set(PageState::Failed(e));
                    }
                }
            });
            || ()
        });
    }

    let content = match &*state {
        PageState::Loading => html! {
            <ActivityIndicator
                label={"Loading session settings..."}
                delay_ms={FrontendConfig::ACTIVITY_INDICATOR_DELAY_MS}
            />
        },
        PageState::Failed(error) => html! {
            <LoadError title={"Failed to load authentication settings."} error={error.clone()} />
        },
        PageState::Loaded => html! {
            <SessionSettings
                project_id={props.project_id.clone()}
                maintenance_active={ui.maintenance_active}
            />
        },
    };

    html! {
        <div class="max-w-5xl mx-auto px-4 py-6">
            <h2 class="text-2xl font-medium text-gray-900 dark:text-gray-100 mb-1">{"Authentication"}</h2>
            <p class="text-sm text-gray-600 dark:text-gray-400 mb-6">
                {"Manage how users sign in to your project and how long their sessions last."}
            </p>
            if ui.maintenance_active {
                <div class="mb-4 p-3 bg-yellow-50 dark:bg-yellow-900/20 border border-yellow-200 dark:border-yellow-800 rounded-md text-sm text-yellow-800 dark:text-yellow-200">
                    {"Settings are read-only while maintenance is in progress."}
                </div>
            }
            {content}
        </div>
    }
}
