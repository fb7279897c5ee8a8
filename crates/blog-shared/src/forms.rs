//! Input forms and their validation rules.
//!
//! A form is bound to submitted data, whitespace-normalised, then validated.
//! Errors are reported per field so the client can redisplay the form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

const REQUIRED_CODE: &str = "required";
const INVALID_EMAIL: &str = "Enter a valid email address.";

/// Field name -> human readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new(REQUIRED_CODE);
        err.message = Some("This field is required.".into());
        return Err(err);
    }
    Ok(())
}

/// Required address whose domain is dotted or `localhost`. Syntax is left to `email`.
fn required_email(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    if let Some((_, domain)) = value.trim().rsplit_once('@') {
        if domain != "localhost" && !domain.contains('.') {
            let mut err = ValidationError::new("email");
            err.message = Some(INVALID_EMAIL.into());
            return Err(err);
        }
    }
    Ok(())
}

/// A validatable form.
pub trait Form: Validate + Sized {
    /// Strip surrounding whitespace from text inputs.
    fn normalized(self) -> Self;
}

/// Full-text search box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SearchForm {
    #[serde(default)]
    #[validate(custom(function = "required"))]
    pub query: String,
}

impl Form for SearchForm {
    fn normalized(self) -> Self {
        Self {
            query: self.query.trim().to_string(),
        }
    }
}

/// Reader comment on a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(
        custom(function = "required"),
        length(max = 80, message = "Ensure this value has at most 80 characters.")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(
        custom(function = "required_email"),
        email(message = "Enter a valid email address.")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "required"))]
    pub body: String,
}

impl Form for CommentForm {
    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            body: self.body.trim().to_string(),
        }
    }
}

/// "Recommend this post" email form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EmailPostForm {
    #[serde(default)]
    #[validate(
        custom(function = "required"),
        length(max = 25, message = "Ensure this value has at most 25 characters.")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(
        custom(function = "required_email"),
        email(message = "Enter a valid email address.")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(
        custom(function = "required_email"),
        email(message = "Enter a valid email address.")
    )]
    pub to: String,

    #[serde(default)]
    pub comments: String,
}

impl Form for EmailPostForm {
    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            to: self.to.trim().to_string(),
            comments: self.comments.trim().to_string(),
        }
    }
}

/// A form together with its submitted data and validation outcome.
#[derive(Debug, Clone, Serialize)]
pub struct BoundForm<T> {
    pub data: T,
    pub errors: FieldErrors,
    pub is_bound: bool,
}

impl<T: Form + Default> BoundForm<T> {
    /// An empty form that has not been submitted.
    pub fn unbound() -> Self {
        Self {
            data: T::default(),
            errors: FieldErrors::new(),
            is_bound: false,
        }
    }
}

impl<T: Form> BoundForm<T> {
    /// Bind submitted data and run validation.
    pub fn bind(data: T) -> Self {
        let data = data.normalized();
        let errors = match data.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => field_errors(&errors),
        };

        Self {
            data,
            errors,
            is_bound: true,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_bound && self.errors.is_empty()
    }
}

/// Flatten validator errors; a missing value only reports "required".
fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let missing = errs.iter().any(|e| e.code == REQUIRED_CODE);
            let mut messages: Vec<String> = Vec::new();
            for e in errs.iter().filter(|e| !missing || e.code == REQUIRED_CODE) {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                if !messages.contains(&message) {
                    messages.push(message);
                }
            }
            (field.to_string(), messages)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_form_is_not_valid() {
        let form = BoundForm::<SearchForm>::unbound();
        assert!(!form.is_valid());
        assert!(form.errors.is_empty());
    }

    #[test]
    fn test_search_query_required() {
        let form = BoundForm::bind(SearchForm {
            query: "   ".to_string(),
        });
        assert!(!form.is_valid());
        assert_eq!(form.errors["query"], vec!["This field is required."]);
    }

    #[test]
    fn test_valid_comment_is_trimmed() {
        let form = BoundForm::bind(CommentForm {
            name: " Ana ".to_string(),
            email: "ana@example.com".to_string(),
            body: "Nice post\n".to_string(),
        });
        assert!(form.is_valid());
        assert_eq!(form.data.name, "Ana");
        assert_eq!(form.data.body, "Nice post");
    }

    #[test]
    fn test_comment_missing_email_reports_required_only() {
        let form = BoundForm::bind(CommentForm {
            name: "Ana".to_string(),
            email: String::new(),
            body: "Hi".to_string(),
        });
        assert!(!form.is_valid());
        assert_eq!(form.errors.len(), 1);
        assert_eq!(form.errors["email"], vec!["This field is required."]);
    }

    #[test]
    fn test_comment_field_errors() {
        let form = BoundForm::bind(CommentForm {
            name: "x".repeat(81),
            email: "not-an-email".to_string(),
            body: String::new(),
        });
        assert_eq!(
            form.errors["name"],
            vec!["Ensure this value has at most 80 characters."]
        );
        assert_eq!(form.errors["email"], vec!["Enter a valid email address."]);
        assert_eq!(form.errors["body"], vec!["This field is required."]);
    }

    #[test]
    fn test_email_domain_needs_a_dot() {
        let comment = |email: &str| {
            BoundForm::bind(CommentForm {
                name: "Ana".to_string(),
                email: email.to_string(),
                body: "Hi".to_string(),
            })
        };

        let form = comment("a@b");
        assert!(!form.is_valid());
        assert_eq!(form.errors["email"], vec!["Enter a valid email address."]);

        assert!(comment("ana@mail.example.com").is_valid());
        assert!(comment("root@localhost").is_valid());
    }

    #[test]
    fn test_email_post_form_comments_optional() {
        let form = BoundForm::bind(EmailPostForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            to: "bo@example.com".to_string(),
            comments: String::new(),
        });
        assert!(form.is_valid());
    }

    #[test]
    fn test_email_post_form_invalid_recipient() {
        let form = BoundForm::bind(EmailPostForm {
            name: "A very long name that exceeds".to_string(),
            email: "ana@example.com".to_string(),
            to: "bo".to_string(),
            comments: String::new(),
        });
        assert!(!form.is_valid());
        assert!(form.errors.contains_key("name"));
        assert!(form.errors.contains_key("to"));
        assert!(!form.errors.contains_key("email"));
    }
}
