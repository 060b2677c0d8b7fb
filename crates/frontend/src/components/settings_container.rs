use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SettingsContainerProps {
    pub title: String,
    #[prop_or_default]
    pub description: Option<String>,
    pub children: Html,
    #[prop_or(false)]
    pub submit_disabled: bool,
    #[prop_or(false)]
    pub submit_loading: bool,
    #[prop_or("Save".to_string())]
    pub submit_label: String,
}

/// Card with a title, the settings fields and a submit button
///
/// Meant to be placed inside a `<form>`; the button submits it.
#[function_component(SettingsContainer)]
pub fn settings_container(props: &SettingsContainerProps) -> Html {
    html! {
        <div class="border border-gray-200 dark:border-gray-700 rounded-lg mb-3 bg-white dark:bg-gray-800">
            <div class="px-4 py-3">
                <h3 class="text-base font-medium text-gray-900 dark:text-gray-100">
                    {&props.title}
                </h3>
                if let Some(description) = &props.description {
                    <p class="text-sm text-gray-600 dark:text-gray-400 mt-1">{description}</p>
                }
            </div>
            <div class="px-4 py-3 border-t border-gray-200 dark:border-gray-700 grid grid-cols-5 gap-y-6">
                {props.children.clone()}
            </div>
            <div class="px-4 py-2.5 border-t border-gray-200 dark:border-gray-700 flex justify-end">
                <button
                    type="submit"
                    disabled={props.submit_disabled || props.submit_loading}
                    aria-busy={props.submit_loading.to_string()}
                    class="px-4 py-2 bg-blue-500 hover:bg-blue-600 text-white rounded-md transition-colors disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    if props.submit_loading {
                        {"Saving..."}
                    } else {
                        {&props.submit_label}
                    }
                </button>
            </div>
        </div>
    }
}
