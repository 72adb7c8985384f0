use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::{ClipError, ProfileError};
use crate::web::response::ApiResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Clip(#[from] ClipError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("인증되지 않은 사용자입니다.")]
    Unauthorized,
    #[error("{0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Clip(err) => err.code(),
            AppError::Profile(err) => err.code(),
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Clip(err) => err.status_code(),
            AppError::Profile(err) => err.status_code(),
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ApiResponse::error(self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code_follow_inner_error() {
        let err = AppError::from(ClipError::NoUpdateData);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "NO_UPDATE_DATA");
        assert_eq!(err.to_string(), "수정할 데이터가 제공되지 않았습니다.");

        let err = AppError::from(ProfileError::NicknameCheckFailed);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unauthorized_response() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_error_envelope_carries_the_error_status() {
        let err = AppError::from(ClipError::ClipNotFound("클립을 찾을 수 없습니다.".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ERROR");
        assert_eq!(body["errorCode"], "CLIP_NOT_FOUND");
        assert_eq!(body["errorMessage"], "클립을 찾을 수 없습니다.");
    }
}
