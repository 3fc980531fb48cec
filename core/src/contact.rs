//! Contact form validation and the simulated submission flow.
//!
//! ```text
//! Normal ──submit (valid)──► Loading ──► Success ─┐
//!                                 └────► Error ───┴──(reset delay)──► Normal
//! ```

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use thiserror::Error;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("static regex"));
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));

pub const INVALID_FORM_MESSAGE: &str = "Please correct the errors above";
pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
pub const FAILURE_MESSAGE: &str = "Sorry, there was an error sending your message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Element id of the input.
    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }

    fn index(self) -> usize {
        match self {
            Field::Name => 0,
            Field::Email => 1,
            Field::Message => 2,
        }
    }

    fn rule(self) -> Rule {
        match self {
            Field::Name => Rule {
                min_chars: Some(2),
                pattern: Some(&NAME_PATTERN),
                message: "Please enter a valid name (letters only, minimum 2 characters)",
            },
            Field::Email => Rule {
                min_chars: None,
                pattern: Some(&EMAIL_PATTERN),
                message: "Please enter a valid email address",
            },
            Field::Message => Rule {
                min_chars: Some(10),
                pattern: None,
                message: "Please enter a message (minimum 10 characters)",
            },
        }
    }
}

/// Every field is required; the rest is per field.
struct Rule {
    min_chars: Option<usize>,
    pattern: Option<&'static LazyLock<Regex>>,
    message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{} is required", .0.label())]
    Required(Field),
    #[error("{0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Submission failed")]
pub struct SubmitError;

/// Check one field. The value is trimmed first.
pub fn validate_field(field: Field, value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required(field));
    }
    let rule = field.rule();
    if let Some(pattern) = rule.pattern
        && !pattern.is_match(value)
    {
        return Err(FieldError::Invalid(rule.message));
    }
    if let Some(min) = rule.min_chars
        && value.chars().count() < min
    {
        return Err(FieldError::Invalid(rule.message));
    }
    Ok(())
}

/// Stand-in for a real backend: fails with probability `failure_rate`.
pub fn simulate_submission<R: Rng>(rng: &mut R, failure_rate: f64) -> Result<(), SubmitError> {
    if rng.random::<f64>() >= failure_rate {
        Ok(())
    } else {
        Err(SubmitError)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Normal,
    Loading,
    Success,
    Error,
}

impl SubmitState {
    pub fn label(self) -> &'static str {
        match self {
            SubmitState::Normal => "Send Message",
            SubmitState::Loading => "Sending...",
            SubmitState::Success => "Message Sent!",
            SubmitState::Error => "Try Again",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            SubmitState::Normal => "btn normal",
            SubmitState::Loading => "btn loading",
            SubmitState::Success => "btn success",
            SubmitState::Error => "btn error",
        }
    }

    pub fn disabled(self) -> bool {
        self == SubmitState::Loading
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Inline message shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: &'static str,
}

impl FormMessage {
    pub fn class(&self) -> &'static str {
        match self.kind {
            MessageKind::Success => "form-message success",
            MessageKind::Error => "form-message error",
        }
    }
}

/// Validation status of a single input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldStatus {
    #[default]
    Untouched,
    Valid,
    Invalid(FieldError),
}

impl FieldStatus {
    pub fn class(&self) -> &'static str {
        match self {
            FieldStatus::Untouched => "",
            FieldStatus::Valid => "valid",
            FieldStatus::Invalid(_) => "error",
        }
    }

    pub fn error_text(&self) -> Option<String> {
        match self {
            FieldStatus::Invalid(err) => Some(err.to_string()),
            _ => None,
        }
    }
}

/// Form contents plus the submit button state.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: [String; 3],
    status: [FieldStatus; 3],
    submit: SubmitState,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    pub fn status(&self, field: Field) -> &FieldStatus {
        &self.status[field.index()]
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit
    }

    /// Floating label sits raised while the field has content.
    pub fn label_active(&self, field: Field) -> bool {
        !self.value(field).trim().is_empty()
    }

    /// Validate one field and record the result (on blur).
    pub fn validate(&mut self, field: Field) -> bool {
        let result = validate_field(field, self.value(field));
        let valid = result.is_ok();
        self.status[field.index()] = match result {
            Ok(()) => FieldStatus::Valid,
            Err(err) => FieldStatus::Invalid(err),
        };
        valid
    }

    /// Validate everything and enter `Loading` when the form is valid.
    ///
    /// Returns `None` when a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<Result<(), FormMessage>> {
        if self.submit == SubmitState::Loading {
            return None;
        }
        // Validate all fields so every error is shown, not just the first
        let mut valid = true;
        for field in Field::ALL {
            valid &= self.validate(field);
        }
        if !valid {
            return Some(Err(FormMessage {
                kind: MessageKind::Error,
                text: INVALID_FORM_MESSAGE,
            }));
        }
        self.submit = SubmitState::Loading;
        Some(Ok(()))
    }

    /// Record the submission outcome. A success clears the form.
    pub fn finish_submit(&mut self, outcome: Result<(), SubmitError>) -> FormMessage {
        match outcome {
            Ok(()) => {
                self.submit = SubmitState::Success;
                self.values = Default::default();
                self.status = Default::default();
                tracing::info!("Contact form submitted");
                FormMessage {
                    kind: MessageKind::Success,
                    text: SUCCESS_MESSAGE,
                }
            }
            Err(err) => {
                self.submit = SubmitState::Error;
                tracing::warn!(error = %err, "Contact form submission failed");
                FormMessage {
                    kind: MessageKind::Error,
                    text: FAILURE_MESSAGE,
                }
            }
        }
    }

    /// Return the button to its normal state after the reset delay.
    pub fn reset_button(&mut self) {
        if self.submit != SubmitState::Loading {
            self.submit = SubmitState::Normal;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_required_message_uses_field_label() {
        assert_eq!(
            validate_field(Field::Email, "   ").unwrap_err().to_string(),
            "Email is required"
        );
    }

    #[test]
    fn test_name_rules() {
        assert!(validate_field(Field::Name, "Ada Lovelace").is_ok());
        assert!(validate_field(Field::Name, "  Al ").is_ok());
        assert_eq!(
            validate_field(Field::Name, "A"),
            Err(FieldError::Invalid(
                "Please enter a valid name (letters only, minimum 2 characters)"
            ))
        );
        assert!(validate_field(Field::Name, "R2D2").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_field(Field::Email, "me@example.com").is_ok());
        assert!(validate_field(Field::Email, "me@example").is_err());
        assert!(validate_field(Field::Email, "me @example.com").is_err());
    }

    #[test]
    fn test_message_min_length_counts_chars() {
        assert!(validate_field(Field::Message, "too short").is_err());
        assert!(validate_field(Field::Message, "long enough").is_ok());
        assert!(validate_field(Field::Message, "éééééééééé").is_ok());
    }

    #[test]
    fn test_invalid_form_stays_normal() {
        let mut form = ContactForm::new();
        form.set_value(Field::Name, "Ada");

        let result = form.begin_submit().unwrap();
        assert_eq!(result.unwrap_err().text, INVALID_FORM_MESSAGE);
        assert_eq!(form.submit_state(), SubmitState::Normal);
        assert_eq!(form.status(Field::Name), &FieldStatus::Valid);
        assert_eq!(
            form.status(Field::Email).error_text().as_deref(),
            Some("Email is required")
        );
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_value(Field::Name, "Ada Lovelace");
        form.set_value(Field::Email, "ada@example.com");
        form.set_value(Field::Message, "Hello from the engine room");
        form
    }

    #[test]
    fn test_successful_submission_resets_form() {
        let mut form = filled_form();
        assert_eq!(form.begin_submit(), Some(Ok(())));
        assert_eq!(form.submit_state(), SubmitState::Loading);
        assert!(form.submit_state().disabled());
        assert_eq!(form.begin_submit(), None);

        let message = form.finish_submit(Ok(()));
        assert_eq!(message.kind, MessageKind::Success);
        assert_eq!(form.submit_state().label(), "Message Sent!");
        assert_eq!(form.value(Field::Name), "");
        assert!(!form.label_active(Field::Message));

        form.reset_button();
        assert_eq!(form.submit_state(), SubmitState::Normal);
    }

    #[test]
    fn test_failed_submission_keeps_values() {
        let mut form = filled_form();
        form.begin_submit();
        let message = form.finish_submit(Err(SubmitError));

        assert_eq!(message.class(), "form-message error");
        assert_eq!(form.submit_state().label(), "Try Again");
        assert_eq!(form.value(Field::Email), "ada@example.com");
    }

    #[test]
    fn test_simulated_failure_rate() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(simulate_submission(&mut rng, 0.0).is_ok());
        assert_eq!(simulate_submission(&mut rng, 1.0), Err(SubmitError));

        let failures = (0..10_000)
            .filter(|_| simulate_submission(&mut rng, 0.1).is_err())
            .count();
        assert!((700..1300).contains(&failures), "failures = {failures}");
    }
}
