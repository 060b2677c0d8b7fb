use console_core::CoreError;
use gloo::utils::window;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadErrorProps {
    pub title: String,
    pub error: CoreError,
}

/// Terminal error view for settings that could not be loaded
#[function_component(LoadError)]
pub fn load_error(props: &LoadErrorProps) -> Html {
    let on_reload = Callback::from(|_: MouseEvent| {
        if let Err(e) = window().location().reload() {
            tracing::warn!("Failed to reload page: {e:?}");
        }
    });

    html! {
        <div role="alert" class="mb-4 p-4 bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800 rounded-md">
            <p class="font-medium text-red-800 dark:text-red-200">{&props.title}</p>
            <p class="text-sm text-red-700 dark:text-red-300 mt-1">{props.error.to_string()}</p>
            <button
                type="button"
                onclick={on_reload}
                class="mt-3 px-3 py-1.5 text-sm bg-red-600 hover:bg-red-700 text-white rounded-md transition-colors"
            >
                {"Reload"}
            </button>
        </div>
    }
}
