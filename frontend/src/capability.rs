//! Optional browser features, each with an enhanced and a baseline
//! implementation picked once at startup.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Array, Reflect};
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::state::mailto::{MailComposer, MailtoLink};
use crate::state::scroll::ease_in_out_quad;

const REVEAL_CLASS_ATTR: &str = "data-reveal-class";
const REVEAL_DELAY_ATTR: &str = "data-reveal-delay";
const REVEAL_TARGET_ATTR: &str = "data-reveal-target";
const EASED_SCROLL_MS: f64 = 1_000.0;

fn css_supports(property: &str, value: &str) -> bool {
    web_sys::css::supports_with_value(property, value).unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Enhanced,
    Baseline,
}

impl Motion {
    pub fn detect() -> Self {
        if css_supports("animation", "none") {
            Motion::Enhanced
        } else {
            Motion::Baseline
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmoothScroll {
    Native,
    /// Animation-frame fallback for browsers without `scroll-behavior: smooth`.
    Eased { duration_ms: f64 },
}

impl SmoothScroll {
    pub fn detect() -> Self {
        if css_supports("scroll-behavior", "smooth") {
            SmoothScroll::Native
        } else {
            SmoothScroll::Eased {
                duration_ms: EASED_SCROLL_MS,
            }
        }
    }

    pub fn scroll_to(&self, top: f64) {
        let Some(window) = web_sys::window() else {
            return;
        };
        match *self {
            SmoothScroll::Native => {
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);
            }
            SmoothScroll::Eased { duration_ms } => animate_scroll(window, top, duration_ms),
        }
    }
}

fn animate_scroll(window: Window, target: f64, duration: f64) {
    let start = window.scroll_y().unwrap_or(0.0);
    let distance = target - start;
    let started_at: Rc<Cell<Option<f64>>> = Rc::default();

    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::default();
    let next_frame = frame.clone();
    let win = window.clone();

    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        let first = match started_at.get() {
            Some(t) => t,
            None => {
                started_at.set(Some(timestamp));
                timestamp
            }
        };
        let elapsed = timestamp - first;
        win.scroll_to_with_x_and_y(0.0, ease_in_out_quad(elapsed, start, distance, duration));

        if elapsed < duration {
            if let Some(callback) = next_frame.borrow().as_ref() {
                let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
            }
        } else {
            // Release the closure once this frame returns.
            let _ = next_frame.borrow_mut().take();
        }
    }) as Box<dyn FnMut(f64)>));

    let first_frame = frame.borrow();
    if let Some(callback) = first_frame.as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

/// How an element is revealed once it scrolls into view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSpec {
    pub class: &'static str,
    pub delay_ms: u32,
    pub threshold: f64,
    pub root_margin: &'static str,
    /// Put the class on the element with this id instead of the observed one.
    pub target_id: Option<&'static str>,
}

impl RevealSpec {
    pub const ANIMATE_IN: Self = Self {
        class: "animate-in",
        delay_ms: 0,
        threshold: 0.1,
        root_margin: "0px 0px -50px 0px",
        target_id: None,
    };

    pub const SECTION: Self = Self {
        class: "section-visible",
        delay_ms: 0,
        threshold: 0.1,
        root_margin: "0px 0px -100px 0px",
        target_id: None,
    };

    /// Fades the rotating wheel in once the services grid is a quarter visible.
    pub const WHEEL: Self = Self {
        class: "scroll-fade-in",
        delay_ms: 200,
        threshold: 0.25,
        root_margin: "0px 0px -100px 0px",
        target_id: Some("wheelBackground"),
    };

    pub const fn with_delay(self, delay_ms: u32) -> Self {
        Self { delay_ms, ..self }
    }
}

enum RevealBackend {
    Observer {
        callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
        observers: RefCell<Vec<((u64, &'static str), IntersectionObserver)>>,
    },
    Immediate,
}

/// Scroll-reveal layer. Uses IntersectionObserver where the browser has it
/// and otherwise reveals every element as soon as it is registered.
pub struct Revealer {
    backend: RevealBackend,
    targets: RefCell<Vec<Element>>,
}

impl Revealer {
    pub fn detect() -> Self {
        let supported = web_sys::window()
            .and_then(|w| Reflect::has(&w, &JsValue::from_str("IntersectionObserver")).ok())
            .unwrap_or(false);

        let backend = if supported {
            let callback = Closure::wrap(Box::new(|entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        reveal(&entry.target());
                    }
                }
            }) as Box<dyn FnMut(Array, IntersectionObserver)>);
            RevealBackend::Observer {
                callback,
                observers: RefCell::default(),
            }
        } else {
            RevealBackend::Immediate
        };

        Self {
            backend,
            targets: RefCell::default(),
        }
    }

    pub fn is_observing(&self) -> bool {
        matches!(self.backend, RevealBackend::Observer { .. })
    }

    pub fn observe(&self, element: &Element, spec: RevealSpec) {
        let _ = element.set_attribute(REVEAL_CLASS_ATTR, spec.class);
        let _ = element.set_attribute(REVEAL_DELAY_ATTR, &spec.delay_ms.to_string());
        if let Some(id) = spec.target_id {
            let _ = element.set_attribute(REVEAL_TARGET_ATTR, id);
        }
        self.targets.borrow_mut().push(element.clone());

        match &self.backend {
            RevealBackend::Immediate => reveal(element),
            RevealBackend::Observer { callback, observers } => {
                match observer_for(spec, callback, observers) {
                    Some(observer) => observer.observe(element),
                    None => reveal(element),
                }
            }
        }
    }

    /// Re-checks every registered element against the current viewport.
    pub fn refresh(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let viewport_height = window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);

        for element in self.targets.borrow().iter() {
            let rect = element.get_bounding_client_rect();
            if rect.top() < viewport_height && rect.bottom() > 0.0 {
                reveal(element);
            }
        }
        self.targets.borrow_mut().retain(|el| el.is_connected());
    }
}

fn observer_for(
    spec: RevealSpec,
    callback: &Closure<dyn FnMut(Array, IntersectionObserver)>,
    observers: &RefCell<Vec<((u64, &'static str), IntersectionObserver)>>,
) -> Option<IntersectionObserver> {
    let key = (spec.threshold.to_bits(), spec.root_margin);
    if let Some((_, observer)) = observers.borrow().iter().find(|(k, _)| *k == key) {
        return Some(observer.clone());
    }

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(spec.threshold));
    init.set_root_margin(spec.root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        .map_err(|e| log::warn!("IntersectionObserver unavailable: {:?}", e))
        .ok()?;
    observers.borrow_mut().push((key, observer.clone()));
    Some(observer)
}

fn reveal(element: &Element) {
    let Some(class) = element.get_attribute(REVEAL_CLASS_ATTR) else {
        return;
    };
    let delay = element
        .get_attribute(REVEAL_DELAY_ATTR)
        .and_then(|d| d.parse::<u32>().ok())
        .unwrap_or(0);
    let target = element
        .get_attribute(REVEAL_TARGET_ATTR)
        .and_then(|id| element.owner_document()?.get_element_by_id(&id))
        .unwrap_or_else(|| element.clone());

    if delay == 0 {
        let _ = target.class_list().add_1(&class);
    } else {
        Timeout::new(delay, move || {
            let _ = target.class_list().add_1(&class);
        })
        .forget();
    }
}

/// Everything selected at startup, shared through a Yew context.
#[derive(Clone)]
pub struct Capabilities {
    pub motion: Motion,
    pub scroll: SmoothScroll,
    pub reveal: Rc<Revealer>,
}

impl Capabilities {
    pub fn detect() -> Self {
        let capabilities = Self {
            motion: Motion::detect(),
            scroll: SmoothScroll::detect(),
            reveal: Rc::new(Revealer::detect()),
        };
        log::info!(
            "capabilities: motion={:?} scroll={:?} intersection_observer={}",
            capabilities.motion,
            capabilities.scroll,
            capabilities.reveal.is_observing()
        );
        capabilities
    }
}

impl PartialEq for Capabilities {
    fn eq(&self, other: &Self) -> bool {
        self.motion == other.motion && self.scroll == other.scroll && Rc::ptr_eq(&self.reveal, &other.reveal)
    }
}

/// Opens drafts in the visitor's default mail client.
pub struct LocationMailer;

impl MailComposer for LocationMailer {
    fn compose(&mut self, link: &MailtoLink) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(&link.href()) {
            log::error!("could not open mail client: {:?}", e);
        }
    }
}
