//! Contact form orchestration: validation, busy state, and the hand-off to
//! the visitor's mail client.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::state::mailto::{local_date, service_label, MailComposer, MailtoLink};
use crate::state::notification::{Notifier, ToastRequest};
use crate::state::validation::{self, ErrorToastGuard, Field, FieldKind};
use crate::error::SubmissionError;
use crate::utils::timing::Millis;

pub const FIX_ERRORS_MESSAGE: &str = "Please fix the errors in the form";
pub const SENT_MESSAGE: &str = "Message sent successfully! We'll get back to you within 24 hours.";
pub const SEND_FAILED_MESSAGE: &str =
    "There was an error sending your message. Please try again or contact us directly.";
pub const PHONE_FALLBACK: &str = "Not provided";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub subject: String,
    pub message: String,
    pub sent_at: DateTime<Local>,
}

impl ContactPayload {
    pub fn from_values(values: &[(String, String)], sent_at: DateTime<Local>) -> Result<Self, SubmissionError> {
        let lookup = |name: &str| {
            values
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.trim().to_string())
        };
        let require = |name: &str| lookup(name).ok_or_else(|| SubmissionError::MissingField(name.to_string()));

        let phone = lookup("phone").unwrap_or_default();
        Ok(Self {
            name: require("name")?,
            email: require("email")?,
            phone: if phone.is_empty() {
                PHONE_FALLBACK.to_string()
            } else {
                phone
            },
            service: service_label(&lookup("service").unwrap_or_default()),
            subject: require("subject")?,
            message: require("message")?,
            sent_at,
        })
    }

    pub fn to_mailto(&self, company: &str, recipient: &str) -> MailtoLink {
        let rule = "─".repeat(16);
        let body = format!(
            "Dear {company} Team,\n\
             \n\
             I am reaching out regarding your {service_lower} services.\n\
             \n\
             Contact Details:\n\
             {rule}\n\
             Name: {name}\n\
             Email: {email}\n\
             Phone: {phone}\n\
             Service Interest: {service}\n\
             \n\
             Subject: {subject}\n\
             \n\
             Message:\n\
             {short_rule}\n\
             {message}\n\
             \n\
             {rule}\n\
             This message was sent from the {company} website contact form on {date}.\n\
             \n\
             Best regards,\n\
             {name}",
            service_lower = self.service.to_lowercase(),
            short_rule = "─".repeat(8),
            name = self.name,
            email = self.email,
            phone = self.phone,
            service = self.service,
            subject = self.subject,
            message = self.message,
            date = local_date(&self.sent_at),
        );
        MailtoLink {
            recipient: recipient.to_string(),
            subject: format!("[{}] {}", self.service, self.subject),
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitControl {
    Ready,
    Busy {
        completes_at: Millis,
        snapshot: Vec<(String, String)>,
    },
}

impl SubmitControl {
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmitControl::Busy { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was sent; focus belongs on `first_invalid`.
    Rejected { first_invalid: String },
    Pending { completes_at: Millis },
    /// A submission is already in flight.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Input { field: String, value: String },
    Focus { field: String },
    Blur { field: String },
    ErrorCleared { field: String },
    FormatCheck { field: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    fields: Vec<Field>,
    control: SubmitControl,
    guard: ErrorToastGuard,
    company: String,
    recipient: String,
    processing_ms: Millis,
}

impl ContactForm {
    pub fn new(fields: Vec<Field>, config: &SiteConfig) -> Self {
        Self {
            fields,
            control: SubmitControl::Ready,
            guard: ErrorToastGuard::new(config.error_toast_guard_ms),
            company: config.company_name.clone(),
            recipient: config.contact_email.clone(),
            processing_ms: config.submit_processing_ms,
        }
    }

    /// The site's contact form, in document order.
    pub fn standard(config: &SiteConfig) -> Self {
        Self::new(
            vec![
                Field::new("name", FieldKind::Text).required(),
                Field::new("email", FieldKind::Email).required(),
                Field::new("phone", FieldKind::Tel),
                Field::new("service", FieldKind::Select),
                Field::new("subject", FieldKind::Text).required(),
                Field::new("message", FieldKind::TextArea).required(),
            ],
            config,
        )
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    pub fn handle(&mut self, event: FormEvent, now: Millis, notifier: &mut impl Notifier) {
        match event {
            FormEvent::Input { field, value } => self.set_value(&field, value),
            FormEvent::Focus { field } | FormEvent::ErrorCleared { field } => self.clear_error(&field),
            FormEvent::Blur { field } => {
                self.validate_field(&field, now, notifier);
            }
            FormEvent::FormatCheck { field } => self.check_format(&field, now, notifier),
        }
    }

    pub fn set_value(&mut self, name: &str, value: String) {
        if let Some(field) = self.field_mut(name) {
            field.value = value;
        }
    }

    pub fn clear_error(&mut self, name: &str) {
        if let Some(field) = self.field_mut(name) {
            field.has_error = false;
        }
    }

    /// Full rule check for one field, with error styling and a guarded toast.
    pub fn validate_field(&mut self, name: &str, now: Millis, notifier: &mut impl Notifier) -> bool {
        let Some(field) = self.field_mut(name) else {
            return true;
        };
        let result = validation::validate(field);
        field.has_error = !result.is_valid;
        if let Some(message) = result.message {
            self.show_field_error(name, message, now, notifier);
        }
        result.is_valid
    }

    /// Email / phone shape check while typing. Never clears an existing error.
    pub fn check_format(&mut self, name: &str, now: Millis, notifier: &mut impl Notifier) {
        let Some(field) = self.field_mut(name) else {
            return;
        };
        if let Some(message) = validation::format_error(field.kind, field.value.trim()) {
            field.has_error = true;
            self.show_field_error(name, message, now, notifier);
        }
    }

    fn show_field_error(&mut self, name: &str, message: &str, now: Millis, notifier: &mut impl Notifier) {
        if self.guard.try_claim(name, now) {
            notifier.notify(ToastRequest::error(message));
        }
    }

    /// Validates every field. On success the control goes busy until
    /// `completes_at`, when [`ContactForm::poll`] finishes the hand-off.
    pub fn submit(&mut self, now: Millis, notifier: &mut impl Notifier) -> SubmitOutcome {
        if self.control.is_busy() {
            return SubmitOutcome::Ignored;
        }

        let mut first_invalid = None;
        for field in &mut self.fields {
            let result = validation::validate(field);
            field.has_error = !result.is_valid;
            if !result.is_valid && first_invalid.is_none() {
                first_invalid = Some(field.name.clone());
            }
        }

        if let Some(first_invalid) = first_invalid {
            notifier.notify(ToastRequest::error(FIX_ERRORS_MESSAGE));
            return SubmitOutcome::Rejected { first_invalid };
        }

        let completes_at = now + self.processing_ms;
        self.control = SubmitControl::Busy {
            completes_at,
            snapshot: self
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.value.clone()))
                .collect(),
        };
        SubmitOutcome::Pending { completes_at }
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        match &self.control {
            SubmitControl::Busy { completes_at, .. } => Some(*completes_at),
            SubmitControl::Ready => None,
        }
    }

    /// Completes a due submission. The control is back to ready afterwards
    /// whether or not the draft could be built. Returns true if anything ran.
    pub fn poll(
        &mut self,
        now: Millis,
        sent_at: DateTime<Local>,
        mailer: &mut impl MailComposer,
        notifier: &mut impl Notifier,
    ) -> bool {
        match self.next_deadline() {
            Some(due) if now >= due => {}
            _ => return false,
        }

        let result = self.deliver(sent_at, mailer);
        self.control = SubmitControl::Ready;

        match result {
            Ok(()) => {
                self.reset();
                notifier.notify(ToastRequest::success(SENT_MESSAGE));
            }
            Err(e) => {
                log::error!("form submission error: {}", e);
                notifier.notify(ToastRequest::error(SEND_FAILED_MESSAGE));
            }
        }
        true
    }

    fn deliver(&self, sent_at: DateTime<Local>, mailer: &mut impl MailComposer) -> Result<(), SubmissionError> {
        let SubmitControl::Busy { snapshot, .. } = &self.control else {
            return Err(SubmissionError::NotBusy);
        };
        let payload = ContactPayload::from_values(snapshot, sent_at)?;
        if let Ok(json) = serde_json::to_string(&payload) {
            log::debug!("form data: {}", json);
        }
        mailer.compose(&payload.to_mailto(&self.company, &self.recipient));
        Ok(())
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.has_error = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::notification::{NotificationManager, Severity};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sent_at() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 9, 12, 0, 0)
            .single()
            .expect("unambiguous local time")
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::standard(&SiteConfig::default());
        for (name, value) in [
            ("name", "Ada Lovelace"),
            ("email", "ada@example.com"),
            ("service", "web-development"),
            ("subject", "New site"),
            ("message", "We would like a quote for a new website."),
        ] {
            form.set_value(name, value.to_string());
        }
        form
    }

    #[test]
    fn empty_required_name_never_reaches_the_mail_client() {
        let mut form = filled_form();
        form.set_value("name", String::new());
        let mut toasts = NotificationManager::default();
        let mut mailer: Vec<MailtoLink> = Vec::new();

        let outcome = form.submit(0, &mut toasts.at(0));
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                first_invalid: "name".to_string()
            }
        );
        assert!(!form.control().is_busy());
        assert!(form.field("name").is_some_and(|f| f.has_error));
        assert_eq!(
            toasts.live().map(|n| (n.message.as_str(), n.severity)),
            Some((FIX_ERRORS_MESSAGE, Severity::Error))
        );

        assert!(!form.poll(10_000, sent_at(), &mut mailer, &mut toasts.at(10_000)));
        assert!(mailer.is_empty());
    }

    #[test]
    fn valid_submission_goes_busy_then_hands_off_once() {
        let mut form = filled_form();
        let mut toasts = NotificationManager::default();
        let mut mailer: Vec<MailtoLink> = Vec::new();

        assert_eq!(
            form.submit(1_000, &mut toasts.at(1_000)),
            SubmitOutcome::Pending { completes_at: 3_000 }
        );
        assert!(form.control().is_busy());
        assert_eq!(form.submit(1_500, &mut toasts.at(1_500)), SubmitOutcome::Ignored);

        assert!(!form.poll(2_999, sent_at(), &mut mailer, &mut toasts.at(2_999)));
        assert!(form.control().is_busy());

        assert!(form.poll(3_000, sent_at(), &mut mailer, &mut toasts.at(3_000)));
        assert!(!form.control().is_busy());
        assert_eq!(mailer.len(), 1);
        assert!(form.fields().iter().all(|f| f.value.is_empty() && !f.has_error));

        let successes: Vec<_> = toasts
            .rendered()
            .iter()
            .filter(|n| n.severity == Severity::Success)
            .collect();
        assert_eq!(successes.len(), 1);
        assert_eq!(successes[0].message, SENT_MESSAGE);

        assert!(!form.poll(9_000, sent_at(), &mut mailer, &mut toasts.at(9_000)));
        assert_eq!(mailer.len(), 1);
    }

    #[test]
    fn mail_draft_carries_the_labelled_fields() {
        let mut form = filled_form();
        let mut toasts: Vec<ToastRequest> = Vec::new();
        let mut mailer: Vec<MailtoLink> = Vec::new();
        form.submit(0, &mut toasts);
        form.poll(2_000, sent_at(), &mut mailer, &mut toasts);

        let link = &mailer[0];
        assert_eq!(link.recipient, "zebriustechnologies@gmail.com");
        assert_eq!(link.subject, "[Web Development] New site");
        for line in [
            "Dear Zebrius Technologies Team,",
            "I am reaching out regarding your web development services.",
            "Name: Ada Lovelace",
            "Email: ada@example.com",
            "Phone: Not provided",
            "Service Interest: Web Development",
            "Subject: New site",
            "We would like a quote for a new website.",
            "website contact form on 3/9/2024.",
        ] {
            assert!(link.body.contains(line), "missing {line:?}");
        }
        assert!(link.href().starts_with("mailto:zebriustechnologies@gmail.com?subject=%5BWeb%20Development%5D"));
    }

    #[test]
    fn payload_build_failure_still_clears_busy_state() {
        let config = SiteConfig::default();
        let mut form = ContactForm::new(
            vec![Field::new("name", FieldKind::Text).with_value("Ada")],
            &config,
        );
        let mut toasts: Vec<ToastRequest> = Vec::new();
        let mut mailer: Vec<MailtoLink> = Vec::new();

        assert!(matches!(form.submit(0, &mut toasts), SubmitOutcome::Pending { .. }));
        assert!(form.poll(2_000, sent_at(), &mut mailer, &mut toasts));

        assert!(!form.control().is_busy());
        assert!(mailer.is_empty());
        assert_eq!(toasts, vec![ToastRequest::error(SEND_FAILED_MESSAGE)]);
        assert_eq!(form.field("name").map(|f| f.value.as_str()), Some("Ada"));
    }

    #[test]
    fn blur_errors_toast_once_per_guard_window() {
        let mut form = ContactForm::standard(&SiteConfig::default());
        let mut toasts: Vec<ToastRequest> = Vec::new();
        form.handle(FormEvent::Input { field: "email".into(), value: "nope".into() }, 0, &mut toasts);

        form.handle(FormEvent::Blur { field: "email".into() }, 0, &mut toasts);
        form.handle(FormEvent::Blur { field: "email".into() }, 1_000, &mut toasts);
        form.handle(FormEvent::FormatCheck { field: "email".into() }, 2_000, &mut toasts);
        assert_eq!(toasts.len(), 1);
        assert!(form.field("email").is_some_and(|f| f.has_error));

        form.handle(FormEvent::Focus { field: "email".into() }, 2_500, &mut toasts);
        assert!(form.field("email").is_some_and(|f| !f.has_error));

        form.handle(FormEvent::Blur { field: "email".into() }, 3_000, &mut toasts);
        assert_eq!(toasts.len(), 2);
    }

    #[test]
    fn format_check_ignores_empty_and_required_rules() {
        let mut form = ContactForm::standard(&SiteConfig::default());
        let mut toasts: Vec<ToastRequest> = Vec::new();
        form.check_format("email", 0, &mut toasts);
        form.check_format("name", 0, &mut toasts);
        assert!(toasts.is_empty());
        assert!(form.fields().iter().all(|f| !f.has_error));
    }

    #[test]
    fn phone_is_passed_through_when_given() {
        let values = vec![
            ("name".to_string(), "Ada".to_string()),
            ("email".to_string(), "ada@example.com".to_string()),
            ("phone".to_string(), " +1 555 123 4567 ".to_string()),
            ("subject".to_string(), "Hello".to_string()),
            ("message".to_string(), "A long enough message".to_string()),
        ];
        let payload = ContactPayload::from_values(&values, sent_at()).expect("complete payload");
        assert_eq!(payload.phone, "+1 555 123 4567");
        assert_eq!(payload.service, "General Inquiry");
    }
}
