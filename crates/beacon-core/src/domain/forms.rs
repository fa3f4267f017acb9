//! Contact-form definitions and email rendering.
//!
//! Every marketing form shares one submission pipeline: a [`FormSpec`] names
//! the fields a form carries and how the resulting email is labelled, and
//! [`FormSpec::render`] turns a submitted payload into an outbound message.
//! The per-site table of forms lives with the application, not here.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::DomainError;
use crate::ports::MailMessage;

/// One field of a contact form.
#[derive(Debug, Clone)]
pub struct FormField {
    /// Key in the submitted payload.
    pub name: &'static str,
    /// Label shown in the email body.
    pub label: &'static str,
    pub required: bool,
    /// Text rendered when an optional field is absent.
    pub fallback: &'static str,
}

impl FormField {
    pub fn required(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            required: true,
            fallback: "",
        }
    }

    pub fn optional(name: &'static str, label: &'static str, fallback: &'static str) -> Self {
        Self {
            name,
            label,
            required: false,
            fallback,
        }
    }
}

/// Declarative description of one marketing form.
#[derive(Debug, Clone)]
pub struct FormSpec {
    /// Path suffix the form is posted to (`/send-{slug}`).
    pub slug: &'static str,
    /// Display name used as the email sender label.
    pub sender_label: &'static str,
    pub subject: &'static str,
    /// Heading line at the top of the email body.
    pub heading: &'static str,
    pub fields: Vec<FormField>,
}

impl FormSpec {
    /// Render a submitted payload into the email for this form.
    ///
    /// Missing or blank required fields fail validation; missing optional
    /// fields render their fallback text. All submitted values are
    /// HTML-escaped before they reach the body.
    pub fn render(&self, payload: &Map<String, Value>) -> Result<MailMessage, DomainError> {
        let mut body = format!("<h3>{}</h3>\n", self.heading);

        for field in &self.fields {
            let value = payload.get(field.name).and_then(value_as_text);
            let value = value.as_deref().map(str::trim).filter(|v| !v.is_empty());

            let rendered = match value {
                Some(v) => escape_html(v),
                None if field.required => {
                    return Err(DomainError::Validation(format!(
                        "{} is required",
                        field.name
                    )));
                }
                None => field.fallback.to_string(),
            };

            body.push_str(&format!(
                "<p><strong>{}:</strong> {}</p>\n",
                field.label, rendered
            ));
        }

        Ok(MailMessage {
            sender_label: self.sender_label.to_string(),
            subject: self.subject.to_string(),
            html_body: body,
        })
    }
}

/// Lookup table of forms keyed by slug.
#[derive(Debug, Default)]
pub struct FormRegistry {
    forms: HashMap<&'static str, FormSpec>,
}

impl FormRegistry {
    pub fn new(forms: Vec<FormSpec>) -> Self {
        Self {
            forms: forms.into_iter().map(|f| (f.slug, f)).collect(),
        }
    }

    pub fn get(&self, slug: &str) -> Option<&FormSpec> {
        self.forms.get(slug)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Minimal HTML entity escaping for user-supplied text.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> FormSpec {
        FormSpec {
            slug: "contact",
            sender_label: "Website Contact Form",
            subject: "New contact message",
            heading: "New Contact Message Received",
            fields: vec![
                FormField::required("name", "Name"),
                FormField::required("email", "Email"),
                FormField::optional("message", "Message", "None"),
            ],
        }
    }

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn renders_all_fields_in_order() {
        let mail = spec()
            .render(&payload(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "message": "Hello"
            })))
            .unwrap();

        assert_eq!(mail.subject, "New contact message");
        let body = mail.html_body;
        assert!(body.starts_with("<h3>New Contact Message Received</h3>"));
        let name_pos = body.find("<strong>Name:</strong> Ada").unwrap();
        let email_pos = body.find("<strong>Email:</strong> ada@example.com").unwrap();
        assert!(name_pos < email_pos);
    }

    #[test]
    fn missing_optional_field_uses_fallback() {
        let mail = spec()
            .render(&payload(json!({"name": "Ada", "email": "a@b.c"})))
            .unwrap();
        assert!(mail.html_body.contains("<strong>Message:</strong> None"));
    }

    #[test]
    fn missing_required_field_fails_validation() {
        let err = spec()
            .render(&payload(json!({"email": "a@b.c"})))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn blank_required_field_fails_validation() {
        let err = spec()
            .render(&payload(json!({"name": "  ", "email": "a@b.c"})))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn values_are_html_escaped() {
        let mail = spec()
            .render(&payload(json!({
                "name": "<script>alert(1)</script>",
                "email": "a@b.c"
            })))
            .unwrap();
        assert!(!mail.html_body.contains("<script>"));
        assert!(mail.html_body.contains("&lt;script&gt;"));
    }

    #[test]
    fn numeric_values_are_stringified() {
        let mail = spec()
            .render(&payload(json!({"name": "Ada", "email": "a@b.c", "message": 42})))
            .unwrap();
        assert!(mail.html_body.contains("<strong>Message:</strong> 42"));
    }
}
