use std::rc::Rc;

use log::{info, Level};
use web_sys::{KeyboardEvent, MouseEvent, Node};
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_router::prelude::*;

mod capability;
mod config;
mod error;
/// Host-independent state machines. Nothing in here touches the DOM; time
/// always arrives as an explicit `now`.
mod state {
    pub mod form;
    pub mod hero;
    pub mod mailto;
    pub mod menu;
    pub mod notification;
    pub mod scroll;
    pub mod tagline;
    pub mod validation;
}
mod utils {
    pub mod timing;
}
mod components {
    pub mod careers;
    pub mod contact_form;
    pub mod hero;
    pub mod hooks;
    pub mod notification;
    pub mod scroll_effects;
    pub mod services;
}
mod pages {
    pub mod home;
    pub mod not_found;
}

use capability::Capabilities;
use components::notification::ToastProvider;
use components::scroll_effects::{scroll_to_section, ScrollEffects};
use config::SiteConfig;
use pages::{home::Home, not_found::NotFound};
use state::menu::{MenuEvent, MobileMenu};
use utils::timing::debounce;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        },
    }
}

const RESIZE_DEBOUNCE_MS: u32 = 150;

const NAV_LINKS: &[(&str, &str)] = &[
    ("home", "Home"),
    ("services", "Services"),
    ("about", "About"),
    ("careers", "Careers"),
    ("contact", "Contact"),
];

#[derive(Debug, Clone, PartialEq)]
struct MenuState(MobileMenu);

impl Reducible for MenuState {
    type Action = MenuEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut menu = self.0;
        if menu.handle(action) {
            Rc::new(Self(menu))
        } else {
            self
        }
    }
}

fn set_body_scroll_locked(locked: bool) {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    if let Some(body) = body {
        let _ = body.style().set_property("overflow", if locked { "hidden" } else { "" });
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let config = use_context::<Rc<SiteConfig>>().unwrap_or_default();
    let capabilities = use_context::<Capabilities>();
    let menu = {
        let breakpoint = config.mobile_breakpoint_px;
        use_reducer(move || MenuState(MobileMenu::new(breakpoint)))
    };
    let nav_ref = use_node_ref();
    let is_open = menu.0.is_open();

    // Close on any click outside the navigation.
    {
        let menu = menu.clone();
        let nav_ref = nav_ref.clone();
        use_event_with_window("click", move |e: MouseEvent| {
            let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = match (nav_ref.cast::<Node>(), target) {
                (Some(nav), Some(target)) => nav.contains(Some(&target)),
                _ => true,
            };
            if !inside {
                menu.dispatch(MenuEvent::ClickedOutside);
            }
        });
    }
    {
        let menu = menu.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                menu.dispatch(MenuEvent::EscapePressed);
            }
        });
    }
    {
        let menu = menu.clone();
        let resized = use_mut_ref(move || {
            debounce(move |width: f64| menu.dispatch(MenuEvent::Resized { width }), RESIZE_DEBOUNCE_MS)
        });
        use_event_with_window("resize", move |_: Event| {
            let width = web_sys::window()
                .and_then(|w| w.inner_width().ok())
                .and_then(|w| w.as_f64());
            if let Some(width) = width {
                (&mut *resized.borrow_mut())(width);
            }
        });
    }

    use_effect_with_deps(
        |open: &bool| {
            set_body_scroll_locked(*open);
            || set_body_scroll_locked(false)
        },
        is_open,
    );

    let toggle_menu = {
        let menu = menu.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu.dispatch(MenuEvent::Toggle);
        })
    };

    let nav_link = |section: &'static str, label: &'static str| {
        let menu = menu.clone();
        let capabilities = capabilities.clone();
        let onclick = Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            scroll_to_section(section, capabilities.as_ref());
            menu.dispatch(MenuEvent::LinkClicked);
        });
        html! {
            <li key={section}>
                <a href={format!("#{}", section)} class="nav-link" {onclick}>{label}</a>
            </li>
        }
    };

    let logo_label = config
        .company_name
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();

    html! {
        <nav id="navbar" class="navbar" ref={nav_ref}>
            <style>
                {r#"
                    .navbar {
                        position: fixed;
                        top: 0;
                        left: 0;
                        right: 0;
                        z-index: 1000;
                        background: rgba(15, 23, 42, 0.85);
                        backdrop-filter: blur(12px);
                        transform: translateY(-100%);
                        transition: transform 0.3s ease;
                    }
                    .navbar.visible {
                        transform: translateY(0);
                    }
                    .nav-content {
                        max-width: 1200px;
                        margin: 0 auto;
                        padding: 1rem 1.5rem;
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                    }
                    .nav-logo {
                        color: #f8fafc;
                        font-weight: 700;
                        font-size: 1.4rem;
                        text-decoration: none;
                    }
                    .nav-menu {
                        display: flex;
                        gap: 2rem;
                        list-style: none;
                        margin: 0;
                        padding: 0;
                    }
                    .nav-link {
                        color: #cbd5e1;
                        text-decoration: none;
                        transition: color 0.2s ease;
                    }
                    .nav-link:hover {
                        color: #60a5fa;
                    }
                    .burger-menu {
                        display: none;
                        flex-direction: column;
                        gap: 5px;
                        background: none;
                        border: none;
                        cursor: pointer;
                    }
                    .burger-menu span {
                        width: 25px;
                        height: 3px;
                        background: #f8fafc;
                        transition: transform 0.3s ease, opacity 0.3s ease;
                    }
                    .burger-menu.active span:nth-child(1) {
                        transform: rotate(45deg) translate(5px, 5px);
                    }
                    .burger-menu.active span:nth-child(2) {
                        opacity: 0;
                    }
                    .burger-menu.active span:nth-child(3) {
                        transform: rotate(-45deg) translate(6px, -6px);
                    }
                    @media (max-width: 768px) {
                        .burger-menu {
                            display: flex;
                        }
                        .nav-menu {
                            position: fixed;
                            top: 64px;
                            left: -100%;
                            width: 100%;
                            height: calc(100vh - 64px);
                            flex-direction: column;
                            align-items: center;
                            padding-top: 2rem;
                            background: rgba(15, 23, 42, 0.98);
                            transition: left 0.3s ease;
                        }
                        .nav-menu.active {
                            left: 0;
                        }
                    }
                "#}
            </style>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {logo_label}
                </Link<Route>>
                <button
                    class={classes!("burger-menu", is_open.then_some("active"))}
                    aria-label="Toggle navigation"
                    aria-expanded={is_open.to_string()}
                    onclick={toggle_menu}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <ul class={classes!("nav-menu", is_open.then_some("active"))}>
                    { for NAV_LINKS.iter().map(|&(section, label)| nav_link(section, label)) }
                </ul>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    let config = use_memo(|_| SiteConfig::from_document(), ());
    let capabilities = use_memo(|_| Capabilities::detect(), ());

    html! {
        <ContextProvider<Rc<SiteConfig>> context={config}>
            <ContextProvider<Capabilities> context={(*capabilities).clone()}>
                <ToastProvider>
                    <BrowserRouter>
                        <Nav />
                        <ScrollEffects />
                        <Switch<Route> render={switch} />
                    </BrowserRouter>
                </ToastProvider>
            </ContextProvider<Capabilities>>
        </ContextProvider<Rc<SiteConfig>>>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
