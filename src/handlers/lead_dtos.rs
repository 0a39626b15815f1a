use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::lead_models::{LeadSubmission, LeadValidationError};

/// Body of `POST /api/lead`. Every key is optional at the wire level so that a
/// missing name/email is reported as such instead of as a malformed payload.
/// Numbers and booleans are taken as text; `null`, `false` and `0` count as absent.
#[derive(Debug, Deserialize)]
pub struct LeadRequest {
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub purpose: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub message: Option<String>,
}

impl LeadRequest {
    /// Decodes a raw request body.
    ///
    /// Fails only when the body is not JSON, is `null`, or carries a nested
    /// array/object in one of the lead fields. Any other non-object body has
    /// no fields and falls through to the name/email check.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Null => Err(de::Error::custom("lead payload is null")),
            value @ Value::Object(_) => serde_json::from_value(value),
            _ => Ok(Self {
                name: None,
                email: None,
                phone: None,
                purpose: None,
                message: None,
            }),
        }
    }
}

fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Bool(true) => Ok(Some("true".to_string())),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) => Ok(Some(s)),
        other => Err(de::Error::custom(format!(
            "expected a string, number or boolean, got {}",
            other
        ))),
    }
}

impl TryFrom<LeadRequest> for LeadSubmission {
    type Error = LeadValidationError;

    fn try_from(request: LeadRequest) -> Result<Self, Self::Error> {
        LeadSubmission::new(
            request.name,
            request.email,
            request.phone,
            request.purpose,
            request.message,
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadAcceptedResponse {
    pub ok: bool,
    pub email_ok: bool,
    pub wa_ok: bool,
}

#[derive(Debug, Serialize)]
pub struct LeadErrorResponse {
    pub ok: bool,
    pub error: &'static str,
}

impl LeadErrorResponse {
    pub fn new(error: &'static str) -> Self {
        Self { ok: false, error }
    }
}
