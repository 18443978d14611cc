use std::rc::Rc;

use chrono::Local;
use yew::prelude::*;

use crate::capability::LocationMailer;
use crate::components::notification::{ToastDispatcher, Toasts};
use crate::config::SiteConfig;
use crate::state::mailto::{job_application, job_application_notice, MailComposer};
use crate::state::notification::{Notifier, ToastRequest};

#[derive(Clone, Copy, PartialEq)]
pub struct Opening {
    pub title: &'static str,
    pub kind: &'static str,
    pub location: &'static str,
    pub summary: &'static str,
}

pub const OPENINGS: &[Opening] = &[
    Opening {
        title: "Full Stack Developer",
        kind: "Full-time",
        location: "Remote",
        summary: "Build and ship client web platforms end to end, from API design to polished interfaces.",
    },
    Opening {
        title: "Mobile App Developer",
        kind: "Full-time",
        location: "Hybrid",
        summary: "Own cross-platform mobile apps and work closely with design on every release.",
    },
    Opening {
        title: "Cloud Engineer",
        kind: "Contract",
        location: "Remote",
        summary: "Design infrastructure, automate deployments, and keep production fast and observable.",
    },
    Opening {
        title: "UI/UX Designer",
        kind: "Internship",
        location: "On-site",
        summary: "Turn product ideas into flows, prototypes, and design systems our engineers love.",
    },
];

/// Opens a prefilled application draft and tells the visitor to finish it.
pub fn apply_for(
    job_title: &str,
    config: &SiteConfig,
    mailer: &mut impl MailComposer,
    notifier: &mut impl Notifier,
) {
    let link = job_application(job_title, &config.company_name, &config.contact_email, &Local::now());
    mailer.compose(&link);
    notifier.notify(ToastRequest::info(job_application_notice(job_title)));
    log::info!("job application opened: {}", job_title);
}

#[function_component(Careers)]
pub fn careers() -> Html {
    let config = use_context::<Rc<SiteConfig>>().unwrap_or_default();
    let toasts = use_context::<Toasts>();

    let on_apply = |title: &'static str| {
        let config = config.clone();
        let toasts = toasts.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            apply_for(title, &config, &mut LocationMailer, &mut ToastDispatcher::new(toasts.clone()));
        })
    };

    html! {
        <section id="careers" class="careers section">
            <style>
                {r#"
                    .job-list {
                        display: grid;
                        gap: 1.5rem;
                        max-width: 900px;
                        margin: 0 auto;
                    }
                    .job-item {
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                        gap: 1.5rem;
                        padding: 1.5rem 2rem;
                        border-radius: 16px;
                        background: rgba(30, 41, 59, 0.6);
                        border: 1px solid rgba(148, 163, 184, 0.15);
                    }
                    .job-item h4 {
                        margin: 0 0 0.35rem;
                        color: #f8fafc;
                    }
                    .job-meta {
                        color: #94a3b8;
                        font-size: 0.85rem;
                    }
                    .apply-btn {
                        flex-shrink: 0;
                        padding: 0.7rem 1.5rem;
                        border-radius: 999px;
                        border: 1px solid #3b82f6;
                        background: transparent;
                        color: #93c5fd;
                        cursor: pointer;
                        transition: background 0.2s ease;
                    }
                    .apply-btn:hover {
                        background: rgba(59, 130, 246, 0.15);
                    }
                    @media (max-width: 768px) {
                        .job-item {
                            flex-direction: column;
                            align-items: flex-start;
                        }
                    }
                "#}
            </style>
            <div class="container">
                <h2 class="section-title">{"Join Our Team"}</h2>
                <p class="section-subtitle">
                    {format!("Grow with {} and work on products that matter.", config.company_name)}
                </p>
                <div class="job-list">
                    { for OPENINGS.iter().map(|job| html! {
                        <div class="job-item" key={job.title}>
                            <div>
                                <h4>{job.title}</h4>
                                <div class="job-meta">{format!("{} · {}", job.kind, job.location)}</div>
                                <p>{job.summary}</p>
                            </div>
                            <button class="apply-btn" onclick={on_apply(job.title)}>{"Apply Now"}</button>
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
    use crate::state::mailto::MailtoLink;
    use crate::state::notification::Severity;
    use pretty_assertions::assert_eq;

    #[test]
    fn applying_opens_a_draft_and_an_info_toast() {
        let config = SiteConfig::default();
        let mut drafts: Vec<MailtoLink> = Vec::new();
        let mut toasts: Vec<ToastRequest> = Vec::new();

        apply_for("Cloud Engineer", &config, &mut drafts, &mut toasts);

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].subject, "Job Application - Cloud Engineer");
        assert_eq!(drafts[0].recipient, config.contact_email);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Info);
        assert_eq!(
            toasts[0].message,
            "Application email opened for Cloud Engineer. Please complete and send the email."
        );
    }

    #[test]
    fn openings_have_unique_titles() {
        let mut titles: Vec<_> = OPENINGS.iter().map(|o| o.title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), OPENINGS.len());
    }
}
