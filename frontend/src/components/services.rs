use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

use crate::config::SiteConfig;

pub struct Service {
    pub icon: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub details: &'static [&'static str],
}

pub const SERVICES: &[Service] = &[
    Service {
        icon: "fas fa-code",
        title: "Web Development",
        summary: "Fast, accessible websites and web apps built on modern stacks.",
        details: &["Custom web applications", "E-commerce platforms", "Progressive web apps"],
    },
    Service {
        icon: "fas fa-mobile-alt",
        title: "Mobile Development",
        summary: "Native and cross-platform apps your users will keep on their home screen.",
        details: &["iOS and Android", "Cross-platform builds", "App store launch support"],
    },
    Service {
        icon: "fas fa-cloud",
        title: "Cloud Solutions",
        summary: "Infrastructure that scales with you, without surprises on the invoice.",
        details: &["Cloud migration", "Infrastructure as code", "Monitoring and cost tuning"],
    },
    Service {
        icon: "fas fa-brain",
        title: "AI & Machine Learning",
        summary: "Practical models wired into the products and workflows you already have.",
        details: &["Predictive analytics", "Chat and document assistants", "Computer vision"],
    },
    Service {
        icon: "fas fa-shield-alt",
        title: "Cybersecurity",
        summary: "Audits, hardening, and monitoring to keep your systems and data safe.",
        details: &["Security audits", "Penetration testing", "Incident response plans"],
    },
    Service {
        icon: "fas fa-lightbulb",
        title: "IT Consulting",
        summary: "Technical strategy from people who also build the things they recommend.",
        details: &["Technology roadmaps", "Architecture reviews", "Team augmentation"],
    },
];

/// Taps only expand cards at or below the mobile breakpoint.
pub fn tap_expands(viewport_width: f64, breakpoint_px: f64) -> bool {
    viewport_width <= breakpoint_px
}

fn toggle_card(card: Option<Element>, breakpoint_px: f64) {
    let width = web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(f64::MAX);
    if !tap_expands(width, breakpoint_px) {
        return;
    }
    if let Some(card) = card {
        let _ = card.class_list().toggle("mobile-expanded");
    }
}

fn card_of(e: &Event) -> Option<Element> {
    e.current_target()?.dyn_into::<Element>().ok()
}

#[function_component(Services)]
pub fn services() -> Html {
    let config = use_context::<Rc<SiteConfig>>().unwrap_or_default();
    let breakpoint = config.mobile_breakpoint_px;

    let onclick = Callback::from(move |e: MouseEvent| toggle_card(card_of(&e), breakpoint));
    let onkeydown = Callback::from(move |e: KeyboardEvent| {
        if e.key() == " " || e.key() == "Enter" {
            e.prevent_default();
            toggle_card(card_of(&e), breakpoint);
        }
    });

    html! {
        <section id="services" class="services section">
            <style>
                {r#"
                    .services {
                        position: relative;
                        overflow: hidden;
                    }
                    .services-container {
                        position: relative;
                        z-index: 1;
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
                        gap: 2rem;
                    }
                    .service-card {
                        padding: 2rem;
                        border-radius: 18px;
                        background: rgba(30, 41, 59, 0.65);
                        border: 1px solid rgba(148, 163, 184, 0.15);
                        opacity: 0;
                        transform: translateY(30px);
                        transition: opacity 0.6s ease, transform 0.6s ease, border-color 0.3s ease;
                        cursor: pointer;
                    }
                    .service-card.animate-in {
                        opacity: 1;
                        transform: translateY(0);
                    }
                    .service-card:hover,
                    .service-card:focus {
                        border-color: #3b82f6;
                        outline: none;
                    }
                    .service-icon {
                        font-size: 2rem;
                        color: #60a5fa;
                        margin-bottom: 1rem;
                    }
                    .service-details {
                        margin: 1rem 0 0;
                        padding-left: 1.2rem;
                        color: #94a3b8;
                    }
                    .wheel-background {
                        position: absolute;
                        top: 50%;
                        left: 50%;
                        width: 600px;
                        height: 600px;
                        margin: -300px 0 0 -300px;
                        opacity: 0;
                        transition: opacity 1s ease;
                        pointer-events: none;
                    }
                    .wheel-background.scroll-fade-in {
                        opacity: 0.12;
                    }
                    .rotating-wheel {
                        width: 100%;
                        height: 100%;
                        border-radius: 50%;
                        border: 2px dashed #3b82f6;
                        will-change: transform;
                    }
                    @media (max-width: 768px) {
                        .service-details {
                            display: none;
                        }
                        .service-card.mobile-expanded .service-details {
                            display: block;
                        }
                    }
                "#}
            </style>
            <div class="wheel-background" id="wheelBackground">
                <div class="rotating-wheel" id="rotatingWheel"></div>
            </div>
            <div class="container">
                <h2 class="section-title">{"Our Services"}</h2>
                <p class="section-subtitle">{"Everything you need to design, build, and run modern software."}</p>
                <div class="services-container">
                    { for SERVICES.iter().map(|service| html! {
                        <div
                            class="service-card"
                            key={service.title}
                            tabindex="0"
                            onclick={onclick.clone()}
                            onkeydown={onkeydown.clone()}
                        >
                            <div class="service-icon"><i class={service.icon}></i></div>
                            <h3>{service.title}</h3>
                            <p>{service.summary}</p>
                            <ul class="service-details">
                                { for service.details.iter().map(|detail| html! { <li>{*detail}</li> }) }
                            </ul>
                        </div>
                    }) }
                </div>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taps_expand_only_on_narrow_viewports() {
        assert!(tap_expands(375.0, 768.0));
        assert!(tap_expands(768.0, 768.0));
        assert!(!tap_expands(769.0, 768.0));
        assert!(!tap_expands(1440.0, 768.0));
    }
}
