use std::fmt;

use chrono::{DateTime, Local};

/// A draft handed to the visitor's mail client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailtoLink {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl MailtoLink {
    pub fn href(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body)
        )
    }
}

impl fmt::Display for MailtoLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

pub trait MailComposer {
    fn compose(&mut self, link: &MailtoLink);
}

impl MailComposer for Vec<MailtoLink> {
    fn compose(&mut self, link: &MailtoLink) {
        self.push(link.clone());
    }
}

/// `web-development` -> `Web Development`; nothing selected -> `General Inquiry`.
pub fn service_label(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return "General Inquiry".to_string();
    }
    value
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn local_date(at: &DateTime<Local>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}

pub fn job_application(
    job_title: &str,
    company: &str,
    recipient: &str,
    sent_at: &DateTime<Local>,
) -> MailtoLink {
    let rule = "─".repeat(24);
    let body = format!(
        "Dear {company} Hiring Team,\n\
         \n\
         I am interested in applying for the {job_title} position advertised on your website.\n\
         \n\
         Please find my details below:\n\
         {rule}\n\
         Name: [Your Full Name]\n\
         Email: [Your Email Address]\n\
         Phone: [Your Phone Number]\n\
         Current Location: [Your City, State]\n\
         Experience: [Years of relevant experience]\n\
         Current Role: [Your current position]\n\
         \n\
         Key Skills:\n\
         • [Skill 1]\n\
         • [Skill 2]\n\
         • [Skill 3]\n\
         \n\
         Why I'm interested:\n\
         [Brief explanation of your interest in the role and company]\n\
         \n\
         I have attached my resume and would be happy to discuss my qualifications further at your convenience.\n\
         \n\
         Thank you for considering my application.\n\
         \n\
         Best regards,\n\
         [Your Name]\n\
         \n\
         {rule}\n\
         This application was sent from the {company} careers page on {date}.",
        date = local_date(sent_at),
    );

    MailtoLink {
        recipient: recipient.to_string(),
        subject: format!("Job Application - {job_title}"),
        body,
    }
}

pub fn job_application_notice(job_title: &str) -> String {
    format!("Application email opened for {job_title}. Please complete and send the email.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn service_labels() {
        assert_eq!(service_label("web-development"), "Web Development");
        assert_eq!(service_label("cybersecurity"), "Cybersecurity");
        assert_eq!(service_label(""), "General Inquiry");
    }

    #[test]
    fn href_percent_encodes_subject_and_body() {
        let link = MailtoLink {
            recipient: "team@example.com".to_string(),
            subject: "[Web Development] Hi & bye".to_string(),
            body: "Line one\nLine two?".to_string(),
        };
        assert_eq!(
            link.href(),
            "mailto:team@example.com?subject=%5BWeb%20Development%5D%20Hi%20%26%20bye&body=Line%20one%0ALine%20two%3F"
        );
    }

    #[test]
    fn job_application_draft() {
        let sent_at = Local
            .with_ymd_and_hms(2024, 3, 9, 12, 0, 0)
            .single()
            .expect("unambiguous local time");
        let link = job_application("Rust Engineer", "Zebrius Technologies", "jobs@example.com", &sent_at);

        assert_eq!(link.subject, "Job Application - Rust Engineer");
        assert!(link
            .body
            .starts_with("Dear Zebrius Technologies Hiring Team,\n\nI am interested in applying for the Rust Engineer position"));
        assert!(link.body.ends_with("careers page on 3/9/2024."));
    }
}
