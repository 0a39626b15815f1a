use askama::Template;

use crate::models::lead_models::LeadSubmission;

pub const LEAD_SUBJECT: &str = "New ReGenflō Lead";
pub const CALENDLY_URL: &str = "https://calendly.com/mehul-lifely";
/// Shown in place of an optional field the visitor left out.
pub const PLACEHOLDER: &str = "—";

fn or_placeholder(value: Option<&str>) -> &str {
    value.unwrap_or(PLACEHOLDER)
}

/// Operator notification email. Askama escapes every field.
#[derive(Template)]
#[template(path = "lead_email.html")]
pub struct LeadEmailTemplate<'a> {
    subject: &'a str,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    purpose: &'a str,
    message: &'a str,
    calendly: &'a str,
}

impl<'a> LeadEmailTemplate<'a> {
    pub fn new(lead: &'a LeadSubmission) -> Self {
        Self {
            subject: LEAD_SUBJECT,
            name: lead.name(),
            email: lead.email(),
            phone: or_placeholder(lead.phone()),
            purpose: or_placeholder(lead.purpose()),
            message: or_placeholder(lead.message()),
            calendly: CALENDLY_URL,
        }
    }
}

/// HTML body of the operator notification email.
pub fn render_lead_html(lead: &LeadSubmission) -> Result<String, askama::Error> {
    LeadEmailTemplate::new(lead).render()
}

/// Plain-text body of the WhatsApp notification.
pub fn render_lead_text(lead: &LeadSubmission) -> String {
    format!(
        "{}\nName: {}\nEmail: {}\nPhone: {}\nPurpose: {}\nMessage: {}\nCalendly: {}",
        LEAD_SUBJECT,
        lead.name(),
        lead.email(),
        or_placeholder(lead.phone()),
        or_placeholder(lead.purpose()),
        or_placeholder(lead.message()),
        CALENDLY_URL,
    )
}
