use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};
use yew::prelude::*;

use crate::capability::{Capabilities, RevealSpec, Revealer};
use crate::components::careers::Careers;
use crate::components::contact_form::ContactSection;
use crate::components::hero::Hero;
use crate::components::services::Services;
use crate::config::SiteConfig;

/// Stagger between consecutive service cards.
const CARD_STAGGER_MS: u32 = 100;

fn select_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn register_reveals(document: &Document, reveal: &Revealer) {
    for (i, card) in select_all(document, ".service-card").iter().enumerate() {
        let delay = u32::try_from(i).unwrap_or(u32::MAX).saturating_mul(CARD_STAGGER_MS);
        reveal.observe(card, RevealSpec::ANIMATE_IN.with_delay(delay));
    }
    for item in select_all(document, ".about-text, .contact-item") {
        reveal.observe(&item, RevealSpec::ANIMATE_IN);
    }
    for section in select_all(document, "section") {
        reveal.observe(&section, RevealSpec::SECTION);
    }
    if let Some(grid) = document.query_selector(".services-container").ok().flatten() {
        reveal.observe(&grid, RevealSpec::WHEEL);
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let config = use_context::<Rc<SiteConfig>>().unwrap_or_default();
    let capabilities = use_context::<Capabilities>();

    use_effect_with_deps(
        |capabilities: &Option<Capabilities>| {
            let document = web_sys::window().and_then(|w| w.document());
            if let (Some(document), Some(capabilities)) = (document, capabilities) {
                register_reveals(&document, &capabilities.reveal);
            }
            || ()
        },
        capabilities,
    );

    html! {
        <main class="home">
            <style>
                {r#"
                    .section {
                        padding: 6rem 1.5rem;
                        opacity: 0.6;
                        transition: opacity 0.8s ease;
                    }
                    .section.section-visible {
                        opacity: 1;
                    }
                    .container {
                        max-width: 1200px;
                        margin: 0 auto;
                    }
                    .section-title {
                        text-align: center;
                        font-size: 2.5rem;
                        margin-bottom: 0.75rem;
                        color: #f8fafc;
                    }
                    .section-subtitle {
                        text-align: center;
                        color: #94a3b8;
                        margin-bottom: 3rem;
                    }
                    .about-text,
                    .contact-item {
                        opacity: 0;
                        transform: translateY(30px);
                        transition: opacity 0.6s ease, transform 0.6s ease;
                    }
                    .about-text.animate-in,
                    .contact-item.animate-in {
                        opacity: 1;
                        transform: translateY(0);
                    }
                    .contact-grid {
                        display: grid;
                        grid-template-columns: 1fr 2fr;
                        gap: 3rem;
                    }
                    .contact-item {
                        display: flex;
                        gap: 1rem;
                        margin-bottom: 1.5rem;
                        color: #cbd5e1;
                    }
                    .contact-item a {
                        color: #93c5fd;
                    }
                    @media (max-width: 768px) {
                        .contact-grid {
                            grid-template-columns: 1fr;
                        }
                    }
                "#}
            </style>
            <Hero />
            <Services />
            <section id="about" class="about section">
                <div class="container">
                    <h2 class="section-title">{format!("About {}", config.company_name)}</h2>
                    <div class="about-text">
                        <p>
                            {"We are a team of engineers and designers who turn ambitious ideas into reliable software. \
                              From the first sketch to production support, we stay with our clients the whole way."}
                        </p>
                        <p>
                            {"Small, senior teams. Clear communication. Software that keeps working after launch."}
                        </p>
                    </div>
                </div>
            </section>
            <Careers />
            <section id="contact" class="contact section">
                <div class="container">
                    <h2 class="section-title">{"Get In Touch"}</h2>
                    <p class="section-subtitle">{"Tell us about your project and we'll get back to you within 24 hours."}</p>
                    <div class="contact-grid">
                        <div class="contact-info">
                            <div class="contact-item">
                                <i class="fas fa-envelope"></i>
                                <a href={format!("mailto:{}", config.contact_email)}>{config.contact_email.clone()}</a>
                            </div>
                            <div class="contact-item">
                                <i class="fas fa-clock"></i>
                                <span>{"Replies within one business day"}</span>
                            </div>
                            <div class="contact-item">
                                <i class="fas fa-globe"></i>
                                <span>{"Working with clients worldwide"}</span>
                            </div>
                        </div>
                        <ContactSection />
                    </div>
                </div>
            </section>
        </main>
    }
}
