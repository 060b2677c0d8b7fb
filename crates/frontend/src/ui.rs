//! Dashboard-wide UI state

use crate::config::FrontendConfig;
use gloo::utils::document;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct UiState {
    pub maintenance_active: bool,
}

impl UiState {
    /// Read the state the page was served with
    pub fn from_document() -> Self {
        let selector = format!("meta[name=\"{}\"]", FrontendConfig::MAINTENANCE_META);
        let maintenance_active = document()
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|meta| meta.get_attribute("content"))
            .is_some_and(|content| content.trim().eq_ignore_ascii_case("true"));

        Self { maintenance_active }
    }
}

#[derive(Properties, PartialEq)]
pub struct UiProviderProps {
    pub children: Html,
}

#[function_component(UiProvider)]
pub fn ui_provider(props: &UiProviderProps) -> Html {
    let state = use_memo((), |_| UiState::from_document());

    html! {
        <ContextProvider<UiState> context={(*state).clone()}>
            {props.children.clone()}
        </ContextProvider<UiState>>
    }
}

#[hook]
pub fn use_ui() -> UiState {
    use_context::<UiState>().unwrap_or_default()
}
