use crate::components::AuthenticationPage;
use crate::ui::UiProvider;
use console_core::ProjectId;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/projects/:project_id/settings/authentication")]
    AuthenticationSettings { project_id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::AuthenticationSettings { project_id } => html! {
            <AuthenticationPage project_id={ProjectId::new(project_id)} />
        },
        Route::NotFound => html! {
            <div class="min-h-screen flex items-center justify-center">
                <p class="text-gray-600 dark:text-gray-400">{"Page not found"}</p>
            </div>
        },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <UiProvider>
            <BrowserRouter>
                <div class="min-h-screen bg-gray-50 dark:bg-gray-900">
                    <Switch<Route> render={switch} />
                </div>
            </BrowserRouter>
        </UiProvider>
    }
}
