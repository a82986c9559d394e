//! Contact form state and the messaging redirect.
//!
//! The form has four required fields. Submitting a complete form produces a
//! [`Redirect`] to `https://<host>/<number>?text=<message>` and clears the
//! form; submitting with any field empty produces a [`ContactError`] and
//! leaves the form untouched. No other validation is applied, matching the
//! browser's `required` attribute: whitespace counts as a value.
//!
//! The message is percent-encoded in full, so line breaks, `&`, `#` and
//! non-ASCII input survive the round trip. `static/contact.js` builds the
//! same string with `encodeURIComponent`.

use crate::config::ContactConfig;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Phone, Field::Message];

    /// Form control `name` attribute.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Message => "message",
        }
    }

    /// Label used both on the form and in the forwarded message.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Message => "Message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(Field),
}

/// The one mutable record on the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Where the browser goes after a successful submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Redirect {
    pub url: String,
    /// Browsing context the URL opens in.
    pub target: &'static str,
    /// Transient success notification.
    pub notice: String,
}

impl ContactForm {
    pub fn new(name: &str, email: &str, phone: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            message: message.to_string(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.value(*f).is_empty())
    }

    /// First empty field, in form order.
    pub fn validate(&self) -> Result<(), ContactError> {
        match Field::ALL.into_iter().find(|f| self.value(*f).is_empty()) {
            Some(field) => Err(ContactError::MissingField(field)),
            None => Ok(()),
        }
    }

    /// The multi-line message forwarded to the chat.
    pub fn message_text(&self, greeting: &str) -> String {
        let mut text = format!("{greeting}\n");
        for field in Field::ALL {
            text.push('\n');
            text.push_str(field.label());
            text.push_str(": ");
            text.push_str(self.value(field));
        }
        text
    }

    /// Validate, build the redirect, and clear the form.
    pub fn submit(&mut self, config: &ContactConfig) -> Result<Redirect, ContactError> {
        self.validate()?;
        let redirect = Redirect {
            url: redirect_url(config, &self.message_text(&config.greeting)),
            target: "_blank",
            notice: config.notice.clone(),
        };
        log::debug!("contact redirect built ({} bytes)", redirect.url.len());
        *self = ContactForm::default();
        Ok(redirect)
    }
}

/// `https://<host>/<number>?text=<percent-encoded text>`.
pub fn redirect_url(config: &ContactConfig, text: &str) -> String {
    format!("{}?text={}", config.redirect_base(), urlencoding::encode(text))
}
