//! Contact form — the raw field values a visitor types and the validated
//! message handed to the relay.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::email::EmailAddress;
use crate::error::ValidationError;

/// One named input of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    /// Every field in display order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// The HTML input name for this field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Whether an empty value blocks submission.
    #[must_use]
    pub fn is_required(self) -> bool {
        !matches!(self, Self::Subject)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contact form field {0:?}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "subject" => Ok(Self::Subject),
            "message" => Ok(Self::Message),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// The user-entered values of one contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormState {
    /// Read one field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Overwrite one field. Returns `false` when the value was already set.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    /// Reset every field to the empty string.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    /// First required field that is blank after trimming, if any.
    #[must_use]
    pub fn first_missing(&self) -> Option<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| field.is_required())
            .find(|field| self.get(*field).trim().is_empty())
    }

    /// Check the required fields and the email pattern, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when `name`, `email` or
    /// `message` is blank, otherwise [`ValidationError::InvalidEmail`] when
    /// the email does not match.
    pub fn validate(&self) -> Result<ContactMessage, ValidationError> {
        if self.first_missing().is_some() {
            return Err(ValidationError::MissingField);
        }
        let email = EmailAddress::parse(self.email.as_str())?;
        Ok(ContactMessage {
            name: self.name.clone(),
            email,
            subject: self.subject.clone(),
            message: self.message.clone(),
        })
    }
}

/// A contact message that passed validation.
///
/// Values are kept exactly as typed; only the checks trim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    name: String,
    email: EmailAddress,
    subject: String,
    message: String,
}

impl ContactMessage {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
