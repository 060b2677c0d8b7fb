//! Toast notifications

use console_core::toast::ToastPosition;
use console_core::{Toast, ToastId, ToastKind, ToastStyle};
use gloo::timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToasterProps {
    pub toasts: Vec<Toast>,
    #[prop_or_default]
    pub style: ToastStyle,
    pub on_dismiss: Callback<ToastId>,
}

#[function_component(Toaster)]
pub fn toaster(props: &ToasterProps) -> Html {
    let position = match props.style.position {
        ToastPosition::TopCenter => "top-4 left-1/2 -translate-x-1/2",
        ToastPosition::TopRight => "top-4 right-4",
        ToastPosition::BottomCenter => "bottom-4 left-1/2 -translate-x-1/2",
        ToastPosition::BottomRight => "bottom-4 right-4",
    };

    html! {
        <div class={classes!("fixed", "z-50", "flex", "flex-col", "gap-2", position)} aria-live="polite">
            {props.toasts.iter().map(|toast| html! {
                <ToastItem
                    key={toast.id}
                    toast={toast.clone()}
                    style={props.style.clone()}
                    on_dismiss={props.on_dismiss.clone()}
                />
            }).collect::<Html>()}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    style: ToastStyle,
    on_dismiss: Callback<ToastId>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let id = props.toast.id;
    let duration = props.toast.duration_ms(&props.style);

    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with((props.toast.kind, duration), move |(_, duration)| {
            let timeout = duration.map(|ms| Timeout::new(ms, move || on_dismiss.emit(id)));
            move || drop(timeout)
        });
    }

    let (icon, accent) = match props.toast.kind {
        ToastKind::Loading => ("⏳", "border-blue-400"),
        ToastKind::Success => ("✓", "border-green-500"),
        ToastKind::Error => ("✕", "border-red-500"),
    };

    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    html! {
        <div
            role="status"
            style={format!("min-width: {}", props.style.min_width)}
            class={classes!(
                "flex", "items-center", "gap-3", "px-4", "py-3", "rounded-md", "shadow-lg", "border-l-4",
                "bg-white", "dark:bg-gray-800", "text-sm", "text-gray-900", "dark:text-gray-100",
                accent
            )}
            {onclick}
        >
            <span aria-hidden="true">{icon}</span>
            <span>{&props.toast.message}</span>
        </div>
    }
}
