use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LeadValidationError {
    #[error("Missing name/email")]
    MissingNameOrEmail,
}

/// A validated lead. Only lives for the request that carried it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadSubmission {
    name: String,
    email: String,
    phone: Option<String>,
    purpose: Option<String>,
    message: Option<String>,
}

impl LeadSubmission {
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        purpose: Option<String>,
        message: Option<String>,
    ) -> Result<Self, LeadValidationError> {
        let (Some(name), Some(email)) = (non_empty(name), non_empty(email)) else {
            return Err(LeadValidationError::MissingNameOrEmail);
        };

        Ok(Self {
            name,
            email,
            phone: non_empty(phone),
            purpose: non_empty(purpose),
            message: non_empty(message),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn purpose(&self) -> Option<&str> {
        self.purpose.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
