use axum::{
    Json, Router,
    extract::{Extension, Path, State, rejection::JsonRejection},
    routing::get,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::services::clip_mutation_service::{DeleteClipResult, UpdateClipResult};
use crate::services::clip_validator::parse_clip_id;
use crate::services::clip_view::{ClipPage, ClipView};
use crate::services::policy::OwnerScope;
use crate::web::middleware::auth::require_user;
use crate::web::models::AuthenticatedUser;
use crate::web::response::ApiResponse;
use crate::web::{AppError, AppState};

async fn list_clips_handler(
    Extension(user): Extension<Option<AuthenticatedUser>>,
    State(app_state): State<Arc<AppState>>,
) -> Result<ApiResponse<ClipPage>, AppError> {
    let owner_id = match app_state.config.list_scope {
        OwnerScope::Owner => Some(require_user(user)?.id),
        OwnerScope::Any => user.map(|u| u.id),
    };

    let page = app_state.clip_retrieval.list_clips(owner_id.as_deref()).await?;
    Ok(ApiResponse::success(page))
}

async fn get_clip_handler(
    State(app_state): State<Arc<AppState>>,
    Path(clip_id): Path<String>,
) -> Result<ApiResponse<ClipView>, AppError> {
    let clip_id = parse_clip_id(&clip_id)?;
    let clip = app_state.clip_retrieval.get_clip_detail(clip_id).await?;
    Ok(ApiResponse::success(clip))
}

async fn update_clip_handler(
    Extension(user): Extension<Option<AuthenticatedUser>>,
    State(app_state): State<Arc<AppState>>,
    Path(clip_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<ApiResponse<UpdateClipResult>, AppError> {
    let user = require_user(user)?;
    let Json(fields) = payload.map_err(|rejection| {
        warn!(clip_id = %clip_id, error = %rejection, "Rejected clip update body.");
        AppError::InvalidInput(rejection.body_text())
    })?;

    let result = app_state
        .clip_mutation
        .update_clip(&clip_id, &user.id, &fields)
        .await?;
    Ok(ApiResponse::success(result))
}

async fn delete_clip_handler(
    Extension(user): Extension<Option<AuthenticatedUser>>,
    State(app_state): State<Arc<AppState>>,
    Path(clip_id): Path<String>,
) -> Result<ApiResponse<DeleteClipResult>, AppError> {
    let user = require_user(user)?;
    let result = app_state
        .clip_mutation
        .delete_clip(&clip_id, Some(user.id.as_str()))
        .await?;
    Ok(ApiResponse::success(result))
}

pub fn create_clips_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_clips_handler)).route(
        "/{clip_id}",
        get(get_clip_handler)
            .patch(update_clip_handler)
            .delete(delete_clip_handler),
    )
}
