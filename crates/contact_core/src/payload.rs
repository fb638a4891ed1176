use std::fmt;

/// One of the four contact form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw form input as typed by the visitor. Built fresh for every attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormPayload {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Subject => self.subject = value,
            Field::Message => self.message = value,
        }
    }

    /// Text the spam heuristics run against: `name subject message`, lowercased.
    pub fn screening_text(&self) -> String {
        format!("{} {} {}", self.name, self.subject, self.message).to_lowercase()
    }

    pub(crate) fn to_request(&self) -> DeliveryRequest {
        DeliveryRequest {
            from_name: self.name.clone(),
            from_email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
        }
    }
}

/// Template parameters handed to the delivery collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRequest {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
}
