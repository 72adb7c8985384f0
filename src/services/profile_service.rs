use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::db::store::ProfileStore;

const MIN_NICKNAME_CHARS: usize = 2;
const MAX_NICKNAME_CHARS: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("닉네임은 필수입니다.")]
    NicknameRequired,
    #[error("닉네임은 2자 이상이어야 합니다.")]
    NicknameTooShort,
    #[error("닉네임은 10자 이하여야 합니다.")]
    NicknameTooLong,
    #[error("닉네임은 한글, 영문자, 숫자만 사용할 수 있습니다.")]
    NicknameInvalidCharacters,
    #[error("닉네임 중복 확인 중 오류가 발생했습니다.")]
    NicknameCheckFailed,
}

impl ProfileError {
    pub fn code(&self) -> &'static str {
        match self {
            ProfileError::NicknameCheckFailed => "NICKNAME_CHECK_ERROR",
            _ => "INVALID_NICKNAME",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ProfileError::NicknameCheckFailed => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NicknameCheck {
    pub is_duplicated: bool,
    pub message: String,
}

fn is_allowed_nickname_char(c: char) -> bool {
    matches!(c, '가'..='힣') || c.is_ascii_alphanumeric()
}

/// Trims and validates a nickname, returning the form to look up.
pub fn validate_nickname(raw: Option<&str>) -> Result<&str, ProfileError> {
    let nickname = raw.map(str::trim).unwrap_or_default();
    if nickname.is_empty() {
        return Err(ProfileError::NicknameRequired);
    }

    let chars = nickname.chars().count();
    if chars < MIN_NICKNAME_CHARS {
        return Err(ProfileError::NicknameTooShort);
    }
    if chars > MAX_NICKNAME_CHARS {
        return Err(ProfileError::NicknameTooLong);
    }
    if !nickname.chars().all(is_allowed_nickname_char) {
        return Err(ProfileError::NicknameInvalidCharacters);
    }

    Ok(nickname)
}

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn check_nickname_duplication(
        &self,
        nickname: Option<&str>,
    ) -> Result<NicknameCheck, ProfileError> {
        let nickname = validate_nickname(nickname)?;

        let exists = self.store.nickname_exists(nickname).await.map_err(|err| {
            error!(nickname, error = %err, "Nickname lookup failed.");
            ProfileError::NicknameCheckFailed
        })?;

        let message = if exists {
            "이미 사용 중인 닉네임입니다."
        } else {
            "사용할 수 있는 닉네임입니다."
        };

        Ok(NicknameCheck {
            is_duplicated: exists,
            message: message.to_string(),
        })
    }
}
