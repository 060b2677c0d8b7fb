use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NumberInputProps {
    pub id: String,
    pub name: String,
    pub label: String,
    pub value: String,
    pub on_change: Callback<String>,
    /// Shown under the input and marks it invalid
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(NumberInput)]
pub fn number_input(props: &NumberInputProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    let has_error = props.error.is_some();
    let helper_id = format!("{}-helper-text", props.id);

    html! {
        <div class={props.class.clone()}>
            <label for={props.id.clone()} class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-1">
                {&props.label}
            </label>
            <input
                id={props.id.clone()}
                name={props.name.clone()}
                type="number"
                value={props.value.clone()}
                oninput={oninput}
                aria-invalid={has_error.to_string()}
                aria-describedby={has_error.then(|| helper_id.clone())}
                class={classes!(
                    "w-full", "px-2.5", "py-1.5", "text-sm", "rounded-md", "shadow-sm", "border",
                    "focus:outline-none", "focus:ring-2",
                    "bg-white", "dark:bg-gray-800", "text-gray-900", "dark:text-gray-100",
                    if has_error {
                        "border-red-500 focus:ring-red-500"
                    } else {
                        "border-gray-300 dark:border-gray-600 focus:ring-blue-500 focus:border-blue-500"
                    }
                )}
            />
            if let Some(error) = &props.error {
                <p id={helper_id} class="mt-1 text-xs text-red-600 dark:text-red-400">{error}</p>
            }
        </div>
    }
}
