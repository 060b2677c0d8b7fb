//! Session settings panel

use crate::client::console_client;
use crate::components::{ActivityIndicator, LoadError, NumberInput, SettingsContainer, Toaster};
use crate::config::FrontendConfig;
use console_core::{
    AuthSessionSettings, CoreResult, PanelContext, PanelState, PendingSubmit, ProjectId,
    SessionField, SessionSettingsApi, SessionSettingsPanel, ToastId, ToastStyle,
};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Panel state shared with the reducer
#[derive(Clone, Debug, PartialEq)]
pub struct PanelModel {
    pub panel: SessionSettingsPanel,
}

pub enum PanelAction {
    Loaded(CoreResult<Option<AuthSessionSettings>>),
    Edit(SessionField, String),
    Submit,
    WriteFinished(CoreResult<()>),
    Refetched(CoreResult<Option<AuthSessionSettings>>),
    Maintenance(bool),
    DismissToast(ToastId),
}

impl Reducible for PanelModel {
    type Action = PanelAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut panel = self.panel.clone();

        match action {
            PanelAction::Loaded(result) => panel.finish_loading(result),
            PanelAction::Edit(field, raw) => panel.set_value(field, raw),
            PanelAction::Submit => {
                if let Err(rejection) = panel.begin_submit() {
                    tracing::debug!("Submit rejected: {rejection}");
                }
            }
            PanelAction::WriteFinished(result) => {
                panel.complete_submit(result);
            }
            PanelAction::Refetched(result) => panel.apply_refetch(result),
            PanelAction::Maintenance(active) => panel.set_maintenance_active(active),
            PanelAction::DismissToast(id) => {
                panel.dismiss_toast(id);
            }
        }

        Rc::new(Self { panel })
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionSettingsProps {
    pub project_id: ProjectId,
    #[prop_or(false)]
    pub maintenance_active: bool,
    #[prop_or_default]
    pub toast_style: ToastStyle,
}

#[function_component(SessionSettings)]
pub fn session_settings(props: &SessionSettingsProps) -> Html {
    let model = {
        let context =
            PanelContext::new(props.project_id.clone()).with_maintenance(props.maintenance_active);
        use_reducer(move || PanelModel {
            panel: SessionSettingsPanel::new(context),
        })
    };

    // Initial read; the page has already primed the cache
    {
        let model = model.clone();
        use_effect_with(props.project_id.clone(), move |project_id| {
            let project_id = project_id.clone();
            spawn_local(async move {
                let result = match console_client() {
                    Ok(client) => client.fetch_session_settings(&project_id).await,
                    Err(e) => Err(e.into_fetch_error()),
                };
                model.dispatch(PanelAction::Loaded(result));
            });
            || ()
        });
    }

    {
        let model = model.clone();
        use_effect_with(props.maintenance_active, move |active| {
            model.dispatch(PanelAction::Maintenance(*active));
            || ()
        });
    }

    // Runs the write once per accepted submit
    {
        let model = model.clone();
        let pending = model.panel.pending().cloned();
        use_effect_with(pending, move |pending| {
            if let Some(pending) = pending.clone() {
                spawn_local(run_update(model, pending));
            }
            || ()
        });
    }

    let on_submit = {
        let model = model.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            model.dispatch(PanelAction::Submit);
        })
    };

    let on_dismiss = {
        let model = model.clone();
        Callback::from(move |id: ToastId| model.dispatch(PanelAction::DismissToast(id)))
    };

    let panel = &model.panel;
    let toaster = html! {
        <Toaster
            toasts={panel.toasts().iter().cloned().collect::<Vec<_>>()}
            style={props.toast_style.clone()}
            on_dismiss={on_dismiss}
        />
    };

    let body = match panel.state() {
        PanelState::Loading => html! {
            <ActivityIndicator
                label={"Loading session settings..."}
                delay_ms={FrontendConfig::ACTIVITY_INDICATOR_DELAY_MS}
            />
        },
        PanelState::Error(error) => html! {
            <LoadError title={"Failed to load session settings."} error={error.clone()} />
        },
        PanelState::Ready(form) => {
            let inputs = SessionField::ALL
                .iter()
                .map(|&field| {
                    let registration = form.register(field);
                    let on_change = {
                        let model = model.clone();
                        Callback::from(move |raw: String| {
                            model.dispatch(PanelAction::Edit(field, raw));
                        })
                    };
                    html! {
                        <NumberInput
                            key={registration.name}
                            id={registration.name.to_string()}
                            name={registration.name.to_string()}
                            label={field.input_label()}
                            value={registration.value}
                            error={registration.error}
                            class={classes!("col-span-5", "lg:col-span-2")}
                            {on_change}
                        />
                    }
                })
                .collect::<Html>();

            html! {
                <form onsubmit={on_submit}>
                    <SettingsContainer
                        title={"Session"}
                        description={Some("Change the expiration time of the access and refresh tokens.".to_string())}
                        submit_disabled={!panel.submit_enabled()}
                        submit_loading={panel.submit_loading()}
                    >
                        {inputs}
                    </SettingsContainer>
                </form>
            }
        }
    };

    html! {
        <>
            {body}
            {toaster}
        </>
    }
}

async fn run_update(model: UseReducerHandle<PanelModel>, pending: PendingSubmit) {
    let client = match console_client() {
        Ok(client) => client,
        Err(e) => {
            model.dispatch(PanelAction::WriteFinished(Err(e.into_update_error())));
            return;
        }
    };

    let result = client
        .update_session_settings(&pending.project_id, &pending.patch)
        .await;
    let saved = result.is_ok();
    model.dispatch(PanelAction::WriteFinished(result));

    if saved {
        let refreshed = client.refetch_session_settings(&pending.project_id).await;
        model.dispatch(PanelAction::Refetched(refreshed));
    }
}

