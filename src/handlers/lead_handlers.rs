use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};

use crate::api::notification_channel::ChannelKind;
use crate::handlers::lead_dtos::{LeadAcceptedResponse, LeadErrorResponse, LeadRequest};
use crate::models::lead_models::LeadSubmission;
use crate::AppState;

type LeadRejection = (StatusCode, Json<LeadErrorResponse>);

fn reject(status: StatusCode, error: &'static str) -> LeadRejection {
    (status, Json(LeadErrorResponse::new(error)))
}

/// `POST /api/lead`
///
/// The body is parsed by hand rather than through the `Json` extractor so that
/// a missing `Content-Type` header or any other malformed payload ends up as
/// the same `invalid` response.
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<LeadAcceptedResponse>, LeadRejection> {
    let request = LeadRequest::from_json(&body).map_err(|e| {
        tracing::error!("[lead:POST] invalid payload: {}", e);
        reject(StatusCode::BAD_REQUEST, "invalid")
    })?;

    let lead = LeadSubmission::try_from(request).map_err(|e| {
        tracing::info!("[lead:POST] rejected: {}", e);
        reject(StatusCode::BAD_REQUEST, "Missing name/email")
    })?;

    let report = state.lead_dispatcher.dispatch(&lead).await;
    if !report.any_sent() {
        tracing::error!("[lead:POST] no channel delivered the lead");
        return Err(reject(StatusCode::BAD_GATEWAY, "Delivery failed"));
    }

    Ok(Json(LeadAcceptedResponse {
        ok: true,
        email_ok: report.sent(ChannelKind::Email),
        wa_ok: report.sent(ChannelKind::WhatsApp),
    }))
}
