//! Contact form
//!
//! Validation, the simulated submission and the transient success state.
//! No message is delivered anywhere: submission waits for a fixed delay and
//! reports success.

use crate::config::ContactConfig;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid regex"));

/// Offices offered in the location select
pub const LOCATIONS: [&str; 3] = ["Madison", "Milwaukee", "Chicago"];

/// Grade levels offered in the grade select
pub const GRADE_LEVELS: [&str; 20] = [
    "Pre-K",
    "Kindergarten",
    "1st Grade",
    "2nd Grade",
    "3rd Grade",
    "4th Grade",
    "5th Grade",
    "6th Grade",
    "7th Grade",
    "8th Grade",
    "9th Grade",
    "10th Grade",
    "11th Grade",
    "12th Grade",
    "College Freshman",
    "College Sophomore",
    "College Junior",
    "College Senior",
    "Graduate School",
    "Other",
];

/// "How did you hear about us?" options as (value, label)
pub const REFERRAL_SOURCES: [(&str, &str); 6] = [
    ("Google", "Google Search"),
    ("Referral", "Friend/Family Referral"),
    ("Social Media", "Social Media"),
    ("School", "School"),
    ("Event", "Event"),
    ("Other", "Other"),
];

pub const SUCCESS_TITLE: &str = "Thank You!";
pub const SUCCESS_MESSAGE: &str =
    "Your message has been sent successfully. We'll get back to you as soon as possible.";

/// Submitted contact form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub message: String,
}

/// Field name -> error message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }
}

impl ContactForm {
    /// Every failing field is reported, not just the first
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.insert("name", "Name is required");
        }
        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
        } else if !EMAIL.is_match(&self.email) {
            errors.insert("email", "Email is invalid");
        }
        if self.phone.trim().is_empty() {
            errors.insert("phone", "Phone number is required");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Submission state of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStatus {
    Idle,
    /// Shown until `until`, then the blank form returns
    Success { until: DateTime<Utc> },
}

impl ContactStatus {
    /// The status as seen at `now`; an expired success reads as idle
    pub fn status_at(&self, now: DateTime<Utc>) -> ContactStatus {
        match self {
            ContactStatus::Success { until } if now >= *until => ContactStatus::Idle,
            other => *other,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ContactStatus::Success { .. })
    }
}

/// Simulated contact submission
#[derive(Debug, Clone)]
pub struct ContactService {
    submit_delay: Duration,
    success_timeout: Duration,
}

impl ContactService {
    pub fn new(config: &ContactConfig) -> Self {
        Self {
            submit_delay: Duration::from_millis(config.submit_delay_ms),
            success_timeout: Duration::from_millis(config.success_timeout_ms),
        }
    }

    /// How long the success message stays up
    pub fn success_timeout(&self) -> Duration {
        self.success_timeout
    }

    /// Validate, wait out the simulated delay, and report success.
    ///
    /// Invalid forms return immediately without waiting.
    pub async fn submit(&self, form: &ContactForm) -> Result<ContactStatus, FieldErrors> {
        if let Err(errors) = form.validate() {
            tracing::debug!(fields = errors.len(), "Contact form rejected");
            return Err(errors);
        }

        tokio::time::sleep(self.submit_delay).await;

        tracing::info!(
            location = %form.location,
            grade = %form.grade,
            source = %form.source,
            "Contact request received"
        );
        let timeout = ChronoDuration::from_std(self.success_timeout)
            .unwrap_or_else(|_| ChronoDuration::seconds(5));
        Ok(ContactStatus::Success {
            until: Utc::now() + timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Jamie Rivera".into(),
            email: "foo@bar.com".into(),
            phone: "(555) 123-4567".into(),
            ..Default::default()
        }
    }

    fn instant_service() -> ContactService {
        ContactService::new(&ContactConfig {
            submit_delay_ms: 0,
            success_timeout_ms: 5000,
        })
    }

    #[test]
    fn test_empty_name_is_required() {
        let form = ContactForm { name: "  ".into(), ..valid_form() };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_email_rules() {
        let form = ContactForm { email: "foo".into(), ..valid_form() };
        assert_eq!(form.validate().unwrap_err().get("email"), Some("Email is invalid"));

        let form = ContactForm { email: String::new(), ..valid_form() };
        assert_eq!(form.validate().unwrap_err().get("email"), Some("Email is required"));

        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_all_errors_reported() {
        let errors = ContactForm::default().validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("phone"), Some("Phone number is required"));
    }

    #[test]
    fn test_success_reverts_after_deadline() {
        let now = Utc::now();
        let status = ContactStatus::Success {
            until: now + ChronoDuration::seconds(5),
        };
        assert!(status.status_at(now).is_success());
        assert_eq!(
            status.status_at(now + ChronoDuration::seconds(5)),
            ContactStatus::Idle
        );
        assert_eq!(ContactStatus::Idle.status_at(now), ContactStatus::Idle);
    }

    #[tokio::test]
    async fn test_submit_invalid_form_is_not_submitted() {
        let service = instant_service();
        let form = ContactForm { name: String::new(), ..valid_form() };
        let errors = service.submit(&form).await.unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
    }

    #[tokio::test]
    async fn test_submit_valid_form_succeeds() {
        let service = instant_service();
        let before = Utc::now();
        let status = service.submit(&valid_form()).await.unwrap();
        match status {
            ContactStatus::Success { until } => {
                assert!(until >= before + ChronoDuration::milliseconds(5000));
            }
            other => panic!("unexpected status {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn property_emails_without_at_are_invalid(s in "[a-z0-9.]{1,30}") {
            let form = ContactForm { email: s, ..valid_form() };
            prop_assert_eq!(form.validate().unwrap_err().get("email"), Some("Email is invalid"));
        }

        #[test]
        fn property_well_formed_emails_pass(user in "[a-z0-9]{1,10}", host in "[a-z]{1,10}", tld in "[a-z]{2,4}") {
            let form = ContactForm { email: format!("{user}@{host}.{tld}"), ..valid_form() };
            prop_assert!(form.validate().is_ok());
        }
    }
}
