use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};
use yew::prelude::*;

use crate::capability::{Capabilities, SmoothScroll};
use crate::state::scroll::{
    section_scroll_target, NavbarVisibility, ScrollEffects as Effects, ScrollEvent, ScrollTracker, ScrollUpdate,
    Viewport,
};
use crate::utils::timing::{self, debounce, throttle};

const SCROLL_SAMPLE_MS: u64 = 10;
const LAYOUT_REFRESH_DEBOUNCE_MS: u32 = 150;
const NAV_REFRESH_DELAY_MS: u32 = 100;

fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

fn sample_viewport(window: &Window) -> Option<Viewport> {
    let root = window.document()?.document_element()?;
    Some(Viewport {
        scroll_top: window.scroll_y().ok()?,
        document_height: root.scroll_height() as f64,
        viewport_height: window.inner_height().ok()?.as_f64()?,
    })
}

fn apply_effects(document: &Document, effects: &Effects) {
    if let Some(bar) = html_element(document, "scrollProgress") {
        let _ = bar.style().set_property("width", &format!("{}%", effects.progress));
    }
    if let Some(navbar) = document.get_element_by_id("navbar") {
        let _ = match effects.navbar {
            NavbarVisibility::Visible => navbar.class_list().add_1("visible"),
            NavbarVisibility::Hidden => navbar.class_list().remove_1("visible"),
        };
    }
    if let Some(offset) = effects.parallax {
        let background = document
            .query_selector(".hero-bg")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(background) = background {
            let _ = background
                .style()
                .set_property("transform", &format!("translateY({}px)", offset));
        }
    }
}

fn request_wheel_frame(window: &Window, tracker: Rc<RefCell<ScrollTracker>>) {
    let win = window.clone();
    let frame = Closure::once_into_js(move || {
        let scroll_top = win.scroll_y().unwrap_or(0.0);
        let update = tracker.borrow_mut().handle(ScrollEvent::AnimationFrame { scroll_top });
        let wheel = win.document().and_then(|d| html_element(&d, "rotatingWheel"));
        if let (ScrollUpdate::Wheel { degrees }, Some(wheel)) = (update, wheel) {
            let _ = wheel.style().set_property("transform", &format!("rotate({}deg)", degrees));
        }
    });
    let _ = window.request_animation_frame(frame.unchecked_ref());
}

/// Smooth-scrolls to a section so it sits just below the navbar.
pub fn scroll_to_section(section_id: &str, capabilities: Option<&Capabilities>) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(section) = html_element(&document, section_id) else {
        log::debug!("no section #{}", section_id);
        return;
    };
    let navbar_height = html_element(&document, "navbar").map(|n| n.offset_height() as f64);
    let top = section_scroll_target(section.offset_top() as f64, navbar_height);

    capabilities.map_or(SmoothScroll::Native, |c| c.scroll).scroll_to(top);

    if let Some(reveal) = capabilities.map(|c| c.reveal.clone()) {
        Timeout::new(NAV_REFRESH_DELAY_MS, move || reveal.refresh()).forget();
    }
}

/// Progress bar plus every scroll-driven effect on the page.
#[function_component(ScrollEffects)]
pub fn scroll_effects() -> Html {
    let capabilities = use_context::<Capabilities>();

    use_effect_with_deps(
        move |capabilities: &Option<Capabilities>| {
            let reveal = capabilities.as_ref().map(|c| c.reveal.clone());
            let listeners = web_sys::window().and_then(|window| {
                let document = window.document()?;
                let tracker = Rc::new(RefCell::new(ScrollTracker::default()));

                let mut sample = {
                    let window = window.clone();
                    let tracker = tracker.clone();
                    throttle(
                        move |_: ()| {
                            let Some(viewport) = sample_viewport(&window) else {
                                return;
                            };
                            let update = tracker.borrow_mut().handle(ScrollEvent::Scrolled(viewport));
                            if let ScrollUpdate::Effects(effects) = update {
                                apply_effects(&document, &effects);
                            }
                        },
                        SCROLL_SAMPLE_MS,
                        timing::now,
                    )
                };
                let mut refresh_after_scroll = {
                    let reveal = reveal.clone();
                    debounce(
                        move |_: ()| {
                            if let Some(reveal) = &reveal {
                                reveal.refresh();
                            }
                        },
                        LAYOUT_REFRESH_DEBOUNCE_MS,
                    )
                };

                // Initial check
                sample(());

                let on_scroll = {
                    let window = window.clone();
                    Closure::wrap(Box::new(move || {
                        sample(());
                        // The wheel is batched by animation frames, not the throttle.
                        let update = tracker.borrow_mut().handle(ScrollEvent::WheelMoved);
                        if update == (ScrollUpdate::WheelFrame { needed: true }) {
                            request_wheel_frame(&window, tracker.clone());
                        }
                        refresh_after_scroll(());
                    }) as Box<dyn FnMut()>)
                };
                let _ = window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());

                let mut refresh_after_resize = debounce(
                    move |_: ()| {
                        if let Some(reveal) = &reveal {
                            reveal.refresh();
                        }
                    },
                    LAYOUT_REFRESH_DEBOUNCE_MS,
                );
                let on_resize = Closure::wrap(Box::new(move || refresh_after_resize(())) as Box<dyn FnMut()>);
                let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

                Some((window, on_scroll, on_resize))
            });

            move || {
                if let Some((window, on_scroll, on_resize)) = listeners {
                    let _ = window.remove_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
                    let _ = window.remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
                }
            }
        },
        capabilities,
    );

    html! {
        <div class="scroll-progress">
            <style>
                {r#"
                    .scroll-progress {
                        position: fixed;
                        top: 0;
                        left: 0;
                        width: 100%;
                        height: 4px;
                        z-index: 10001;
                        pointer-events: none;
                    }
                    .scroll-progress-bar {
                        width: 0;
                        height: 100%;
                        background: linear-gradient(90deg, #3b82f6, #8b5cf6, #ec4899);
                        transition: width 0.1s linear;
                    }
                "#}
            </style>
            <div id="scrollProgress" class="scroll-progress-bar"></div>
        </div>
    }
}
