//! Contact and CV form actions
//!
//! Both forms are pass-through POSTs to the backend mail endpoints. The
//! outcome is reported as `{ errorCode, message?, debugId? }` where
//! `errorCode` is 0 on success or one of 422, 429, 500. Each submission gets
//! a fresh debug id that is logged with every step so a visitor's report can
//! be matched to the mail dispatch.

use axum::{
    extract::{multipart::Field, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use reqwest::multipart::{Form as MultipartForm, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use super::SiteLocale;
use crate::client::{ClientError, ContactMessage, ErrorKind};
use crate::error::ApiResult;
use crate::AppState;

/// Raw contact form fields as posted by the browser
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    /// Local part of the address; the domain is chosen separately
    pub email: Option<String>,
    pub email_domain: Option<String>,
    pub discuss: Option<String>,
}

impl ContactForm {
    /// Build the outgoing message, or `None` when a required field is blank
    ///
    /// Dashes are removed from the phone number and the address is assembled
    /// from its trimmed local part and domain.
    pub fn into_message(self, debug_id: &str) -> Option<ContactMessage> {
        let phone = self.phone.unwrap_or_default().replace('-', "");
        let email = self.email.unwrap_or_default().trim().to_string();
        let email_domain = self.email_domain.unwrap_or_default().trim().to_string();
        let name = self.name.unwrap_or_default();
        let company_name = self.company_name.unwrap_or_default();
        let discuss = self.discuss.unwrap_or_default();

        let required = [&name, &company_name, &phone, &email, &discuss, &email_domain];
        if required.iter().any(|field| field.is_empty()) {
            return None;
        }

        Some(ContactMessage {
            name,
            email: format!("{}@{}", email, email_domain),
            phone,
            company_name,
            discuss,
            debug_id: debug_id.to_string(),
        })
    }
}

/// Result envelope returned to the form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub error_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_id: Option<String>,
}

impl SubmissionOutcome {
    /// Rejected before anything was forwarded
    pub fn invalid() -> Self {
        Self {
            error_code: 422,
            message: None,
            debug_id: None,
        }
    }

    /// Classify the backend result of a forwarded submission
    pub fn from_result(result: &Result<Value, ClientError>, debug_id: &str) -> Self {
        let (error_code, message) = match result {
            Ok(_) => (0, None),
            Err(err) => match (err.kind(), err) {
                (ErrorKind::Validation, ClientError::Validation { message, .. }) => {
                    (422, Some(message.clone()).filter(|m| !m.is_empty()))
                }
                (ErrorKind::RateLimited, _) => (429, None),
                _ => (500, None),
            },
        };

        Self {
            error_code,
            message,
            debug_id: Some(debug_id.to_string()),
        }
    }

    /// JSON callers get the error code as HTTP status; plain form posts get 200
    pub fn into_response(self, wants_json: bool) -> Response {
        let status = if wants_json && self.error_code != 0 {
            StatusCode::from_u16(self.error_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            StatusCode::OK
        };
        (status, Json(self)).into_response()
    }
}

/// Whether the caller is a script expecting JSON status codes
pub fn wants_json(headers: &HeaderMap) -> bool {
    let accepts_json = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);
    let is_xhr = headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "XMLHttpRequest")
        .unwrap_or(false);

    accepts_json || is_xhr
}

fn new_debug_id() -> String {
    Uuid::new_v4().to_string()
}

fn log_result(form: &str, debug_id: &str, result: &Result<Value, ClientError>) {
    match result {
        Ok(body) => info!(
            debug_id = %debug_id,
            form,
            response = %body,
            "Backend accepted submission"
        ),
        Err(e) => warn!(
            debug_id = %debug_id,
            form,
            error = %e,
            "Backend rejected submission"
        ),
    }
}

/// POST /api/[:locale/]contact
pub async fn send_contact(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    headers: HeaderMap,
    Form(form): Form<ContactForm>,
) -> ApiResult<Response> {
    let wants_json = wants_json(&headers);

    let debug_id = new_debug_id();
    let Some(message) = form.into_message(&debug_id) else {
        info!("Contact form rejected: missing required fields");
        return Ok(SubmissionOutcome::invalid().into_response(wants_json));
    };

    info!(
        debug_id = %debug_id,
        name = %message.name,
        email = %message.email,
        phone = %message.phone,
        company_name = %message.company_name,
        "Forwarding contact message"
    );

    let result = state.client.send_contact(&message, locale).await;
    log_result("contact", &debug_id, &result);

    Ok(SubmissionOutcome::from_result(&result, &debug_id).into_response(wants_json))
}

/// Convert one multipart field into an outgoing part
///
/// File fields keep their file name and content type; everything else is
/// forwarded as text.
async fn forward_part(field: Field<'_>) -> Result<(String, Part), String> {
    let name = field.name().unwrap_or_default().to_string();
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| format!("field {}: {}", name, e))?;

    let part = match file_name {
        Some(file_name) => {
            let part = Part::bytes(bytes.to_vec()).file_name(file_name);
            match content_type {
                Some(mime) => part
                    .mime_str(&mime)
                    .map_err(|e| format!("field {}: bad content type: {}", name, e))?,
                None => part,
            }
        }
        None => Part::text(String::from_utf8_lossy(&bytes).into_owned()),
    };

    Ok((name, part))
}

/// POST /api/[:locale/]careers/cv
///
/// Forwards every multipart field unchanged. A body that cannot be read,
/// including one over the configured upload limit, is reported as a 422
/// outcome and nothing is forwarded.
pub async fn send_cv(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let wants_json = wants_json(&headers);

    let mut form = MultipartForm::new();
    let mut field_count = 0usize;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "CV submission rejected: unreadable body");
                return Ok(SubmissionOutcome::invalid().into_response(wants_json));
            }
        };

        match forward_part(field).await {
            Ok((name, part)) => form = form.part(name, part),
            Err(reason) => {
                warn!(error = %reason, "CV submission rejected: unreadable field");
                return Ok(SubmissionOutcome::invalid().into_response(wants_json));
            }
        }
        field_count += 1;
    }

    if field_count == 0 {
        info!("CV submission rejected: empty form");
        return Ok(SubmissionOutcome::invalid().into_response(wants_json));
    }

    let debug_id = new_debug_id();
    info!(debug_id = %debug_id, fields = field_count, "Forwarding CV submission");

    let result = state.client.send_cv(form, locale).await;
    log_result("cv", &debug_id, &result);

    Ok(SubmissionOutcome::from_result(&result, &debug_id).into_response(wants_json))
}
