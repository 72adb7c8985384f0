use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use std::sync::Arc;

use crate::services::profile_service::NicknameCheck;
use crate::web::models::NicknameQuery;
use crate::web::response::ApiResponse;
use crate::web::{AppError, AppState};

async fn check_nickname_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<NicknameQuery>,
) -> Result<ApiResponse<NicknameCheck>, AppError> {
    let check = app_state
        .profiles
        .check_nickname_duplication(query.nickname.as_deref())
        .await?;
    Ok(ApiResponse::success(check))
}

pub fn create_profile_router() -> Router<Arc<AppState>> {
    Router::new().route("/nickname", get(check_nickname_handler))
}
