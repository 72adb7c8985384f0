use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::db::store::{ClipPatch, ClipStore, StoreError};
use crate::services::clip_validator::{self, UpdateField};
use crate::services::error::ClipError;
use crate::services::policy::OwnerScope;
use crate::services::tag_resolver::TagResolver;

const UPDATE_SUCCESS_MESSAGE: &str = "클립이 성공적으로 수정되었습니다.";
const DELETE_SUCCESS_MESSAGE: &str = "클립이 성공적으로 삭제되었습니다.";
const UPDATE_NOT_FOUND_MESSAGE: &str = "수정할 클립을 찾을 수 없습니다.";
const DELETE_NOT_FOUND_MESSAGE: &str = "삭제할 클립을 찾을 수 없습니다.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClipResult {
    pub message: String,
    pub updated_clip_id: i32,
    pub updated_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClipResult {
    pub message: String,
    pub deleted_clip_id: i32,
    pub deleted_clip_title: Option<String>,
}

/// Single-clip writes: update (always owner-scoped) and delete.
#[derive(Clone)]
pub struct ClipMutationService {
    store: Arc<dyn ClipStore>,
    tag_resolver: TagResolver,
    delete_scope: OwnerScope,
}

impl ClipMutationService {
    pub fn new(store: Arc<dyn ClipStore>, delete_scope: OwnerScope) -> Self {
        Self {
            tag_resolver: TagResolver::new(store.clone()),
            store,
            delete_scope,
        }
    }

    pub async fn update_clip(
        &self,
        clip_id: &str,
        owner_id: &str,
        raw_fields: &Value,
    ) -> Result<UpdateClipResult, ClipError> {
        let validated = clip_validator::validate_for_update(clip_id, owner_id, raw_fields)?;
        let fields = &validated.fields;

        let tag_id = match fields.non_blank(UpdateField::TagName) {
            Some(tag_name) => Some(self.tag_resolver.resolve(tag_name, owner_id).await?),
            None => None,
        };

        // Blank strings count as updated fields but are never written.
        let patch = ClipPatch {
            title: fields.non_blank(UpdateField::Title).map(str::to_string),
            url: fields.non_blank(UpdateField::Url).map(str::to_string),
            memo: fields.non_blank(UpdateField::Memo).map(str::to_string),
            tag_id,
        };

        let updated = self
            .store
            .update_clip_by_id_and_owner(validated.clip_id, owner_id, patch)
            .await
            .map_err(|err| match err {
                StoreError::NotFound => {
                    warn!(clip_id = validated.clip_id, owner_id, "Clip to update not found for owner.");
                    ClipError::ClipNotFound(UPDATE_NOT_FOUND_MESSAGE.to_string())
                }
                StoreError::Database(msg) => {
                    error!(clip_id = validated.clip_id, error = %msg, "Failed to update clip.");
                    ClipError::ClipUpdateError(msg)
                }
            })?;

        info!(clip_id = updated.id, owner_id, "Clip updated.");
        Ok(UpdateClipResult {
            message: UPDATE_SUCCESS_MESSAGE.to_string(),
            updated_clip_id: updated.id,
            updated_fields: fields.keys(),
        })
    }

    /// Deletes a clip. `owner_id` is only consulted when the delete scope is
    /// [`OwnerScope::Owner`].
    pub async fn delete_clip(
        &self,
        clip_id: &str,
        owner_id: Option<&str>,
    ) -> Result<DeleteClipResult, ClipError> {
        let clip_id = clip_validator::parse_clip_id(clip_id)?;
        let owner_filter = self.delete_scope.owner_filter(owner_id)?;

        let deleted = self
            .store
            .delete_clip_by_id(clip_id, owner_filter)
            .await
            .map_err(|err| match err {
                StoreError::NotFound => {
                    warn!(clip_id, "Clip to delete not found.");
                    ClipError::ClipNotFound(DELETE_NOT_FOUND_MESSAGE.to_string())
                }
                StoreError::Database(msg) => {
                    error!(clip_id, error = %msg, "Failed to delete clip.");
                    ClipError::ClipDeleteError(msg)
                }
            })?;

        info!(clip_id = deleted.id, "Clip deleted.");
        Ok(DeleteClipResult {
            message: DELETE_SUCCESS_MESSAGE.to_string(),
            deleted_clip_id: deleted.id,
            deleted_clip_title: deleted.title,
        })
    }
}
