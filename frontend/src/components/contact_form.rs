use std::cell::RefCell;
use std::rc::Rc;

use chrono::Local;
use wasm_bindgen::JsCast;
use web_sys::{
    Event, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};
use yew::prelude::*;

use crate::capability::LocationMailer;
use crate::components::hooks::use_deadline;
use crate::components::notification::{ToastDispatcher, Toasts};
use crate::config::SiteConfig;
use crate::state::form::{ContactForm, FormEvent, SubmitOutcome};
use crate::state::validation::{Field, FieldKind};
use crate::utils::timing::{self, debounce};

const ERROR_CLEAR_DELAY_MS: u32 = 300;
const FORMAT_CHECK_DELAY_MS: u32 = 500;

pub const SERVICE_OPTIONS: &[(&str, &str)] = &[
    ("web-development", "Web Development"),
    ("mobile-development", "Mobile Development"),
    ("cloud-solutions", "Cloud Solutions"),
    ("ai-ml", "AI & Machine Learning"),
    ("cybersecurity", "Cybersecurity"),
    ("consulting", "IT Consulting"),
];

fn field_id(name: &str) -> String {
    format!("contact-{}", name)
}

fn event_value(e: &Event) -> Option<String> {
    let target = e.target()?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
        return Some(area.value());
    }
    target.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
}

fn focus_field(name: &str) {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(&field_id(name)))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let Some(element) = element else {
        return;
    };
    let _ = element.focus();
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// One debounced callback per field, each firing `event` for its own field.
fn field_debouncers(
    form: &Rc<RefCell<ContactForm>>,
    update: &UseForceUpdateHandle,
    toasts: &Option<Toasts>,
    quiet_ms: u32,
    event: fn(String) -> FormEvent,
) -> Vec<(String, impl FnMut(()))> {
    let names: Vec<String> = form.borrow().fields().iter().map(|f| f.name.clone()).collect();
    names
        .into_iter()
        .map(|name| {
            let form = form.clone();
            let update = update.clone();
            let toasts = toasts.clone();
            let field = name.clone();
            let fire = debounce(
                move |_: ()| {
                    let mut notifier = ToastDispatcher::new(toasts.clone());
                    form.borrow_mut().handle(event(field.clone()), timing::now(), &mut notifier);
                    update.force_update();
                },
                quiet_ms,
            );
            (name, fire)
        })
        .collect()
}

fn fire_for<F: FnMut(())>(debouncers: &RefCell<Vec<(String, F)>>, name: &str) {
    if let Some((_, fire)) = debouncers.borrow_mut().iter_mut().find(|(n, _)| n == name) {
        fire(());
    }
}

fn field_classes(field: Option<&Field>) -> Classes {
    let has_error = field.map_or(false, |f| f.has_error);
    classes!("form-control", has_error.then_some("error"))
}

#[function_component(ContactSection)]
pub fn contact_section() -> Html {
    let config = use_context::<Rc<SiteConfig>>().unwrap_or_default();
    let toasts = use_context::<Toasts>();
    let form = use_mut_ref(|| ContactForm::standard(&config));
    let update = use_force_update();

    let clear_timers = {
        let (form, update, toasts) = (form.clone(), update.clone(), toasts.clone());
        use_mut_ref(move || {
            field_debouncers(&form, &update, &toasts, ERROR_CLEAR_DELAY_MS, |field| {
                FormEvent::ErrorCleared { field }
            })
        })
    };
    let format_timers = {
        let (form, update, toasts) = (form.clone(), update.clone(), toasts.clone());
        use_mut_ref(move || {
            field_debouncers(&form, &update, &toasts, FORMAT_CHECK_DELAY_MS, |field| {
                FormEvent::FormatCheck { field }
            })
        })
    };

    {
        let form = form.clone();
        let toasts = toasts.clone();
        let deadline = form.borrow().next_deadline();
        use_deadline(deadline, move |at| {
            let mut notifier = ToastDispatcher::new(toasts.clone());
            form.borrow_mut().poll(at, Local::now(), &mut LocationMailer, &mut notifier);
        });
    }

    let on_value = |name: &'static str| {
        let form = form.clone();
        let update = update.clone();
        let clear_timers = clear_timers.clone();
        let format_timers = format_timers.clone();
        move |e: Event| {
            let Some(value) = event_value(&e) else {
                return;
            };
            let (has_error, kind) = {
                let mut form = form.borrow_mut();
                form.set_value(name, value);
                let field = form.field(name);
                (field.map_or(false, |f| f.has_error), field.map(|f| f.kind))
            };
            if has_error {
                fire_for(&*clear_timers, name);
            }
            if matches!(kind, Some(FieldKind::Email | FieldKind::Tel)) {
                fire_for(&*format_timers, name);
            }
            update.force_update();
        }
    };
    let oninput = |name: &'static str| {
        let on_value = on_value(name);
        Callback::from(move |e: InputEvent| on_value(e.into()))
    };
    let onchange = |name: &'static str| {
        let on_value = on_value(name);
        Callback::from(on_value)
    };
    let on_form_event = |event: fn(String) -> FormEvent, name: &'static str| {
        let form = form.clone();
        let update = update.clone();
        let toasts = toasts.clone();
        Callback::from(move |_: FocusEvent| {
            let mut notifier = ToastDispatcher::new(toasts.clone());
            form.borrow_mut().handle(event(name.to_string()), timing::now(), &mut notifier);
            update.force_update();
        })
    };
    let focus: fn(String) -> FormEvent = |field| FormEvent::Focus { field };
    let blur: fn(String) -> FormEvent = |field| FormEvent::Blur { field };
    let onfocus = |name: &'static str| on_form_event(focus, name);
    let onblur = |name: &'static str| on_form_event(blur, name);

    let onsubmit = {
        let form = form.clone();
        let update = update.clone();
        let toasts = toasts.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut notifier = ToastDispatcher::new(toasts.clone());
            let outcome = form.borrow_mut().submit(timing::now(), &mut notifier);
            match outcome {
                SubmitOutcome::Rejected { first_invalid } => focus_field(&first_invalid),
                SubmitOutcome::Pending { completes_at } => {
                    log::info!("contact form accepted, opening mail client at {}", completes_at)
                }
                SubmitOutcome::Ignored => log::debug!("submission already in progress"),
            }
            update.force_update();
        })
    };

    let snapshot = form.borrow().clone();
    let busy = snapshot.control().is_busy();
    let value = |name: &str| snapshot.field(name).map(|f| f.value.clone()).unwrap_or_default();
    let class = |name: &str| field_classes(snapshot.field(name));
    let selected_service = value("service");

    html! {
        <form class="contact-form" id="contactForm" novalidate={true} {onsubmit}>
            <style>
                {r#"
                    .contact-form {
                        display: grid;
                        gap: 1.25rem;
                    }
                    .form-row {
                        display: grid;
                        grid-template-columns: 1fr 1fr;
                        gap: 1.25rem;
                    }
                    .form-group label {
                        display: block;
                        margin-bottom: 0.4rem;
                        color: #cbd5e1;
                        font-size: 0.9rem;
                    }
                    .form-control {
                        width: 100%;
                        padding: 0.85rem 1rem;
                        border-radius: 10px;
                        border: 1px solid rgba(148, 163, 184, 0.3);
                        background: rgba(15, 23, 42, 0.6);
                        color: #f8fafc;
                        transition: border-color 0.2s ease, box-shadow 0.2s ease;
                    }
                    .form-control:focus {
                        outline: none;
                        border-color: #3b82f6;
                        box-shadow: 0 0 0 3px rgba(59, 130, 246, 0.25);
                    }
                    .form-control.error {
                        border-color: #ef4444;
                        box-shadow: 0 0 0 3px rgba(239, 68, 68, 0.2);
                    }
                    .submit-btn {
                        display: inline-flex;
                        align-items: center;
                        justify-content: center;
                        gap: 0.5rem;
                        padding: 0.9rem 2rem;
                        border: none;
                        border-radius: 10px;
                        background: linear-gradient(90deg, #3b82f6, #8b5cf6);
                        color: white;
                        font-weight: 600;
                        cursor: pointer;
                    }
                    .submit-btn:disabled {
                        opacity: 0.7;
                        cursor: wait;
                    }
                    .spinner {
                        width: 16px;
                        height: 16px;
                        border: 2px solid rgba(255, 255, 255, 0.4);
                        border-top-color: white;
                        border-radius: 50%;
                        animation: spin 0.8s linear infinite;
                    }
                    @keyframes spin {
                        to { transform: rotate(360deg); }
                    }
                    @media (max-width: 768px) {
                        .form-row {
                            grid-template-columns: 1fr;
                        }
                    }
                "#}
            </style>
            <div class="form-row">
                <div class="form-group">
                    <label for={field_id("name")}>{"Full Name *"}</label>
                    <input
                        type="text"
                        id={field_id("name")}
                        name="name"
                        class={class("name")}
                        placeholder="Jane Doe"
                        value={value("name")}
                        oninput={oninput("name")}
                        onfocus={onfocus("name")}
                        onblur={onblur("name")}
                    />
                </div>
                <div class="form-group">
                    <label for={field_id("email")}>{"Email Address *"}</label>
                    <input
                        type="email"
                        id={field_id("email")}
                        name="email"
                        class={class("email")}
                        placeholder="jane@company.com"
                        value={value("email")}
                        oninput={oninput("email")}
                        onfocus={onfocus("email")}
                        onblur={onblur("email")}
                    />
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label for={field_id("phone")}>{"Phone Number"}</label>
                    <input
                        type="tel"
                        id={field_id("phone")}
                        name="phone"
                        class={class("phone")}
                        placeholder="+1 (555) 000-0000"
                        value={value("phone")}
                        oninput={oninput("phone")}
                        onfocus={onfocus("phone")}
                        onblur={onblur("phone")}
                    />
                </div>
                <div class="form-group">
                    <label for={field_id("service")}>{"Service Interest"}</label>
                    <select
                        id={field_id("service")}
                        name="service"
                        class={class("service")}
                        onchange={onchange("service")}
                        onfocus={onfocus("service")}
                        onblur={onblur("service")}
                    >
                        <option value="" selected={selected_service.is_empty()}>{"Select a service"}</option>
                        { for SERVICE_OPTIONS.iter().map(|(option, label)| html! {
                            <option value={*option} selected={selected_service == *option}>{*label}</option>
                        }) }
                    </select>
                </div>
            </div>
            <div class="form-group">
                <label for={field_id("subject")}>{"Subject *"}</label>
                <input
                    type="text"
                    id={field_id("subject")}
                    name="subject"
                    class={class("subject")}
                    placeholder="How can we help?"
                    value={value("subject")}
                    oninput={oninput("subject")}
                    onfocus={onfocus("subject")}
                    onblur={onblur("subject")}
                />
            </div>
            <div class="form-group">
                <label for={field_id("message")}>{"Message *"}</label>
                <textarea
                    id={field_id("message")}
                    name="message"
                    rows="6"
                    class={class("message")}
                    placeholder="Tell us about your project"
                    value={value("message")}
                    oninput={oninput("message")}
                    onfocus={onfocus("message")}
                    onblur={onblur("message")}
                />
            </div>
            <button type="submit" class="submit-btn" disabled={busy}>
                if busy {
                    <span class="spinner"></span>
                    {"Sending..."}
                } else {
                    {"Send Message"}
                }
            </button>
        </form>
    }
}
