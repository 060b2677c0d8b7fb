//! Delayed loading indicator

use gloo::timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct ActivityIndicatorProps {
    #[prop_or_default]
    pub label: Option<String>,
    /// Milliseconds to wait before showing anything
    #[prop_or_default]
    pub delay_ms: u32,
}

#[function_component(ActivityIndicator)]
pub fn activity_indicator(props: &ActivityIndicatorProps) -> Html {
    let visible = use_state(|| props.delay_ms == 0);

    {
        let visible = visible.clone();
        use_effect_with(props.delay_ms, move |delay_ms| {
            let timeout = (*delay_ms > 0).then(|| Timeout::new(*delay_ms, move || visible.set(true)));
            move || drop(timeout)
        });
    }

    if !*visible {
        return html! {};
    }

    html! {
        <div class="flex flex-col items-center justify-center p-10" role="status">
            <div class="w-10 h-10 border-4 border-gray-200 dark:border-gray-700 border-t-blue-500 dark:border-t-blue-400 rounded-full animate-spin mb-5"></div>
            if let Some(label) = &props.label {
                <p class="text-gray-600 dark:text-gray-400 text-sm m-0">{label}</p>
            }
        </div>
    }
}
