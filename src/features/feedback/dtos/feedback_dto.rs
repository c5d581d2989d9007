use serde::Deserialize;
use validator::Validate;

use crate::shared::validation::clean_text;

/// Raw feedback form fields as posted by the browser
///
/// Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackFormDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Trimmed, HTML-escaped feedback ready to be stored
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewFeedback {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

impl From<FeedbackFormDto> for NewFeedback {
    fn from(form: FeedbackFormDto) -> Self {
        Self {
            name: clean_text(&form.name),
            email: clean_text(&form.email),
            message: clean_text(&form.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> FeedbackFormDto {
        FeedbackFormDto {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_new_feedback_is_trimmed_and_escaped() {
        let feedback = NewFeedback::from(form(" Ann ", "ann@example.com\n", " <b>hi</b> "));
        assert_eq!(feedback.name, "Ann");
        assert_eq!(feedback.email, "ann@example.com");
        assert_eq!(feedback.message, "&lt;b&gt;hi&lt;/b&gt;");
        assert!(feedback.validate().is_ok());
    }

    #[test]
    fn test_whitespace_only_field_fails_validation() {
        let feedback = NewFeedback::from(form("Ann", "   ", "hello"));
        let errors = feedback.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let form: FeedbackFormDto = serde_json::from_str(r#"{"name":"Ann"}"#).unwrap();
        assert_eq!(form.email, "");
        assert!(NewFeedback::from(form).validate().is_err());
    }
}
