//! Contact and partner forms handed off to the visitor's mail client.
//!
//! Nothing is sent from here. A submission becomes a subject/body pair and
//! a `mailto:` link; delivery is up to whatever handles that link.

use thiserror::Error;

/// Shown in place of an optional field left blank.
pub const NOT_PROVIDED: &str = "Not provided";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Partner,
}

impl FormKind {
    pub fn subject(self) -> &'static str {
        match self {
            FormKind::Contact => "New Contact Form Submission",
            FormKind::Partner => "New Referral Partner Application",
        }
    }

    pub fn recipient(self) -> &'static str {
        match self {
            FormKind::Contact => "support@evolvemerchants.com",
            FormKind::Partner => "Partners@ameritechpayments.com",
        }
    }

    /// Value of a form's `data-mailto-form` attribute.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "contact" => Some(FormKind::Contact),
            "partner" | "partners" => Some(FormKind::Partner),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactSubmission {
    pub kind: FormKind,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub partner_type: Option<String>,
    pub message: String,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ContactSubmission {
    /// Build from a field lookup keyed by the form's input names (`name`,
    /// `email`, `phone`, `company`, `partnerType`, `message`).
    pub fn from_fields<F>(kind: FormKind, mut field: F) -> Result<Self, FormError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut required =
            |key: &'static str| present(field(key)).ok_or(FormError::MissingField(key));
        let name = required("name")?;
        let email = required("email")?;
        let message = required("message")?;
        let partner_type = match kind {
            FormKind::Partner => Some(required("partnerType")?),
            FormKind::Contact => None,
        };
        Ok(Self {
            kind,
            name,
            email,
            phone: present(field("phone")),
            company: present(field("company")),
            partner_type,
            message,
        })
    }

    pub fn compose(&self) -> MailDraft {
        let or_placeholder = |v: &Option<String>| match present(v.clone()) {
            Some(v) => v,
            None => NOT_PROVIDED.to_string(),
        };
        let mut lines = vec![
            format!("Name: {}", self.name),
            format!("Email: {}", self.email),
            format!("Phone: {}", or_placeholder(&self.phone)),
            format!("Company: {}", or_placeholder(&self.company)),
        ];
        if self.kind == FormKind::Partner {
            lines.push(format!(
                "Partner Type: {}",
                self.partner_type.as_deref().unwrap_or_default()
            ));
        }
        lines.push(String::new());
        lines.push("Message:".to_string());
        lines.push(self.message.clone());
        MailDraft {
            recipient: self.kind.recipient().to_string(),
            subject: self.kind.subject().to_string(),
            body: lines.join("\n").trim().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailDraft {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl MailDraft {
    pub fn mailto_href(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            encode_uri_component(&self.subject),
            encode_uri_component(&self.body)
        )
    }
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, the
/// same set JavaScript's `encodeURIComponent` leaves alone.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
