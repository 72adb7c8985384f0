//! Response envelope shared by every `/api` endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub data: Option<T>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub server_date_time: String,
}

fn server_date_time() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            status: ResponseStatus::Success,
            data: Some(data),
            error_code: None,
            error_message: None,
            server_date_time: server_date_time(),
        }
    }
}

impl ApiResponse<()> {
    /// Error envelope body. Only [`AppError`](crate::web::AppError) sends
    /// these, together with the status of the error it wraps.
    pub(crate) fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        ApiResponse {
            status: ResponseStatus::Error,
            data: None,
            error_code: Some(code.into()),
            error_message: Some(message.into()),
            server_date_time: server_date_time(),
        }
    }
}

/// Handlers return success envelopes directly; they always go out as 200.
impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
