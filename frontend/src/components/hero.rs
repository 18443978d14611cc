use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::capability::{Capabilities, Motion};
use crate::components::hooks::use_deadline;
use crate::components::scroll_effects::scroll_to_section;
use crate::config::SiteConfig;
use crate::state::hero::HeroTimeline;
use crate::state::tagline::{TaglineEvent, TaglineRotator};
use crate::utils::timing;

#[function_component(Hero)]
pub fn hero() -> Html {
    let config = use_context::<Rc<SiteConfig>>().unwrap_or_default();
    let capabilities = use_context::<Capabilities>();
    let motion = capabilities.as_ref().map_or(Motion::Enhanced, |c| c.motion);

    let timeline = {
        let config = config.clone();
        *use_state(move || HeroTimeline::new(timing::now(), &config, motion))
    };
    let rotator = {
        let config = config.clone();
        use_mut_ref(move || {
            TaglineRotator::new(config.taglines.clone(), config.tagline_timing()).map(|mut r| {
                r.schedule_start(timeline.taglines_at());
                r
            })
        })
    };

    let now = timing::now();
    let stage = timeline.stage(now);
    let deadline = [
        timeline.next_deadline(now),
        rotator.borrow().as_ref().and_then(TaglineRotator::next_deadline),
    ]
    .into_iter()
    .flatten()
    .min();

    {
        let rotator = rotator.clone();
        use_deadline(deadline, move |at| {
            if let Some(r) = rotator.borrow_mut().as_mut() {
                r.handle(TaglineEvent::Tick, at);
            }
        });
    }

    // Pause rotation while the tab is hidden.
    {
        let rotator = rotator.clone();
        let update = use_force_update();
        use_effect_with_deps(
            move |_| {
                let listener = web_sys::window().and_then(|w| w.document()).map(|document| {
                    let doc = document.clone();
                    let callback = Closure::wrap(Box::new(move || {
                        if let Some(r) = rotator.borrow_mut().as_mut() {
                            r.handle(TaglineEvent::VisibilityChanged { hidden: doc.hidden() }, timing::now());
                        }
                        update.force_update();
                    }) as Box<dyn FnMut()>);
                    let _ = document
                        .add_event_listener_with_callback("visibilitychange", callback.as_ref().unchecked_ref());
                    (document, callback)
                });

                move || {
                    if let Some((document, callback)) = listener {
                        let _ = document.remove_event_listener_with_callback(
                            "visibilitychange",
                            callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    use_effect_with_deps(
        |loaded| {
            if *loaded {
                if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
                    let _ = body.class_list().add_1("loaded");
                }
            }
            || ()
        },
        stage.page_loaded,
    );

    let (primary, secondary) = config
        .company_name
        .split_once(' ')
        .unwrap_or((config.company_name.as_str(), ""));

    let tagline = rotator.borrow().as_ref().map(|r| {
        html! {
            <p
                id="rotatingTagline"
                key={r.displayed_index()}
                class={classes!("hero-tagline", r.is_active().then_some("active"))}
            >
                { r.current() }
            </p>
        }
    });

    let get_in_touch = {
        let capabilities = capabilities.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            scroll_to_section("contact", capabilities.as_ref());
        })
    };

    html! {
        <section id="home" class="hero">
            <style>
                {r#"
                    .hero {
                        position: relative;
                        min-height: 100vh;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        overflow: hidden;
                        text-align: center;
                        color: #fff;
                    }
                    .hero-bg {
                        position: absolute;
                        inset: 0;
                        background: linear-gradient(135deg, #0f172a 0%, #1e3a8a 50%, #7c3aed 100%);
                        z-index: -1;
                        will-change: transform;
                    }
                    .hero-title span {
                        display: block;
                        opacity: 0;
                        transform: translateY(50px);
                        transition: all 1.2s ease-out;
                    }
                    .hero-title span.revealed {
                        opacity: 1;
                        transform: translateY(0);
                    }
                    .hero-tagline {
                        min-height: 2em;
                        font-size: 1.4rem;
                        opacity: 0;
                        transform: translateY(-30px);
                        transition: opacity 0.4s ease-in, transform 0.4s ease-in;
                    }
                    .hero-tagline.active {
                        opacity: 1;
                        transform: translateY(0);
                        transition: opacity 0.6s ease-out, transform 0.6s ease-out;
                    }
                "#}
            </style>
            <div class="hero-bg"></div>
            <div class="hero-content">
                <h1 class="hero-title">
                    <span id="titleZebrius" class={classes!("title-zebrius", stage.primary_visible.then_some("revealed"))}>
                        { primary }
                    </span>
                    <span id="titleTechnologies" class={classes!("title-technologies", stage.secondary_visible.then_some("revealed"))}>
                        { secondary }
                    </span>
                </h1>
                { for tagline }
                <a href="#contact" class="cta-button" onclick={get_in_touch}>{"Get in Touch"}</a>
            </div>
        </section>
    }
}
