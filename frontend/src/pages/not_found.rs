use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <main class="not-found section">
            <div class="container">
                <h2 class="section-title">{"Page not found"}</h2>
                <p class="section-subtitle">{"The page you are looking for does not exist."}</p>
                <Link<Route> to={Route::Home} classes="cta-button">
                    {"Back to home"}
                </Link<Route>>
            </div>
        </main>
    }
}
