use axum::http::StatusCode;
use thiserror::Error;

use crate::db::store::StoreError;

/// Failures of the clip pipeline. Every variant carries a stable code and
/// a display message; the web layer turns both into the error envelope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipError {
    #[error("유효하지 않은 클립 ID입니다.")]
    InvalidClipId,
    #[error("유효하지 않은 사용자 ID입니다.")]
    InvalidUserId,
    #[error("수정할 데이터가 제공되지 않았습니다.")]
    NoUpdateData,
    #[error("유효한 수정 데이터가 없습니다.")]
    NoValidUpdateData,
    #[error("{0}")]
    ClipNotFound(String),
    #[error("{0}")]
    ClipUpdateError(String),
    #[error("{0}")]
    ClipDeleteError(String),
    #[error("{0}")]
    ClipFetchError(String),
    #[error("태그 정보가 없는 클립이 포함되어 있습니다.")]
    TagJoinMissing,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ClipError {
    pub fn code(&self) -> &'static str {
        match self {
            ClipError::InvalidClipId => "INVALID_CLIP_ID",
            ClipError::InvalidUserId => "INVALID_USER_ID",
            ClipError::NoUpdateData => "NO_UPDATE_DATA",
            ClipError::NoValidUpdateData => "NO_VALID_UPDATE_DATA",
            ClipError::ClipNotFound(_) => "CLIP_NOT_FOUND",
            ClipError::ClipUpdateError(_) => "CLIP_UPDATE_ERROR",
            ClipError::ClipDeleteError(_) => "CLIP_DELETE_ERROR",
            ClipError::ClipFetchError(_) => "CLIP_FETCH_ERROR",
            ClipError::TagJoinMissing => "TAG_JOIN_MISSING",
            ClipError::Store(_) => "SERVER_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ClipError::InvalidClipId
            | ClipError::InvalidUserId
            | ClipError::NoUpdateData
            | ClipError::NoValidUpdateData => StatusCode::BAD_REQUEST,
            ClipError::ClipNotFound(_) => StatusCode::NOT_FOUND,
            ClipError::ClipUpdateError(_)
            | ClipError::ClipDeleteError(_)
            | ClipError::ClipFetchError(_)
            | ClipError::TagJoinMissing
            | ClipError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_requests() {
        for err in [
            ClipError::InvalidClipId,
            ClipError::InvalidUserId,
            ClipError::NoUpdateData,
            ClipError::NoValidUpdateData,
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_not_found_and_server_errors() {
        let not_found = ClipError::ClipNotFound("삭제할 클립을 찾을 수 없습니다.".to_string());
        assert_eq!(not_found.code(), "CLIP_NOT_FOUND");
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "삭제할 클립을 찾을 수 없습니다.");

        let store = ClipError::from(StoreError::Database("timeout".to_string()));
        assert_eq!(store.code(), "SERVER_ERROR");
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.to_string(), "timeout");
    }
}
