use serde::Deserialize;

use crate::state::tagline::TaglineTiming;
use crate::error::ConfigError;
use crate::utils::timing::Millis;

const CONFIG_ELEMENT_ID: &str = "site-config";

/// Site-wide settings. The page may embed overrides as JSON in
/// `<script type="application/json" id="site-config">`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub company_name: String,
    pub contact_email: String,
    pub taglines: Vec<String>,
    pub tagline_interval_ms: Millis,
    pub tagline_exit_ms: Millis,
    pub tagline_resume_delay_ms: Millis,
    pub hero_animation_delay_ms: Millis,
    pub hero_primary_delay_ms: Millis,
    pub hero_secondary_delay_ms: Millis,
    pub tagline_start_after_ms: Millis,
    pub page_loaded_delay_ms: Millis,
    pub notification_duration_ms: Millis,
    pub notification_exit_ms: Millis,
    pub error_toast_guard_ms: Millis,
    pub submit_processing_ms: Millis,
    pub mobile_breakpoint_px: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            company_name: "Zebrius Technologies".to_string(),
            contact_email: "zebriustechnologies@gmail.com".to_string(),
            taglines: vec![
                "Transforming businesses through innovative technology solutions".to_string(),
                "Your trusted partner in digital transformation journey".to_string(),
                "Building tomorrow's technology solutions today".to_string(),
                "Empowering growth with cutting-edge IT services".to_string(),
            ],
            tagline_interval_ms: 4_000,
            tagline_exit_ms: 400,
            tagline_resume_delay_ms: 1_000,
            hero_animation_delay_ms: 800,
            hero_primary_delay_ms: 500,
            hero_secondary_delay_ms: 1_300,
            tagline_start_after_ms: 2_500,
            page_loaded_delay_ms: 200,
            notification_duration_ms: 6_000,
            notification_exit_ms: 300,
            error_toast_guard_ms: 3_000,
            submit_processing_ms: 2_000,
            mobile_breakpoint_px: 768.0,
        }
    }
}

impl SiteConfig {
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_document() -> Self {
        let embedded = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match embedded {
            None => Self::default(),
            Some(json) => Self::parse(&json).unwrap_or_else(|e| {
                log::warn!("{}; using defaults", e);
                Self::default()
            }),
        }
    }

    pub fn tagline_timing(&self) -> TaglineTiming {
        TaglineTiming {
            interval_ms: self.tagline_interval_ms,
            exit_ms: self.tagline_exit_ms,
            resume_delay_ms: self.tagline_resume_delay_ms,
        }
    }
}
