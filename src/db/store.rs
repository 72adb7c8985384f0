//! Record store gateway.
//!
//! The clip services talk to persistence only through the traits in this
//! module. Each method is a single find/insert/update/delete against one
//! table and reports "no matching row" as [`StoreError::NotFound`], separate
//! from every other database failure.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("No matching row")]
    NotFound,
    #[error("{0}")]
    Database(String),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(_) => StoreError::NotFound,
            other => StoreError::Database(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub id: i32,
    pub user_id: String,
    pub name: String,
}

/// Column values to write on a clip. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub memo: Option<String>,
    pub tag_id: Option<i32>,
}

impl ClipPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.memo.is_none() && self.tag_id.is_none()
    }
}

/// Row returned by an owner-scoped update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedClipRecord {
    pub id: i32,
    pub title: Option<String>,
    pub url: Option<String>,
    pub memo: Option<String>,
    pub tag_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedClipRecord {
    pub id: i32,
    pub title: Option<String>,
}

/// The `tags.name` side of a clip/tag join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedTag {
    pub name: String,
}

/// A clip row as read for display, with its joined tag when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRecord {
    pub title: Option<String>,
    pub tag_id: Option<i32>,
    pub url: Option<String>,
    pub memo: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub thumbnail: Option<String>,
    pub tags: Option<JoinedTag>,
}

#[async_trait]
pub trait ClipStore: Send + Sync {
    /// Looks up the tag named `name` in `owner_id`'s namespace.
    async fn find_tag_by_owner_and_name(
        &self,
        owner_id: &str,
        name: &str,
    ) -> Result<Option<TagRecord>, StoreError>;

    /// Inserts `(owner_id, name)` unless it already exists and returns the
    /// stored row either way.
    async fn insert_tag(&self, owner_id: &str, name: &str) -> Result<TagRecord, StoreError>;

    /// Applies `patch` to the clip matching both `clip_id` and `owner_id`.
    async fn update_clip_by_id_and_owner(
        &self,
        clip_id: i32,
        owner_id: &str,
        patch: ClipPatch,
    ) -> Result<UpdatedClipRecord, StoreError>;

    /// Deletes a clip by id, optionally restricted to `owner_id`.
    async fn delete_clip_by_id(
        &self,
        clip_id: i32,
        owner_id: Option<String>,
    ) -> Result<DeletedClipRecord, StoreError>;

    async fn find_clip_by_id(&self, clip_id: i32) -> Result<ClipRecord, StoreError>;

    /// All clips, newest first, optionally restricted to `owner_id`.
    async fn find_all_clips(&self, owner_id: Option<String>) -> Result<Vec<ClipRecord>, StoreError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn nickname_exists(&self, nickname: &str) -> Result<bool, StoreError>;
}

#[cfg(test)]
mockall::mock! {
    pub Store {}

    #[async_trait]
    impl ClipStore for Store {
        async fn find_tag_by_owner_and_name(
            &self,
            owner_id: &str,
            name: &str,
        ) -> Result<Option<TagRecord>, StoreError>;
        async fn insert_tag(&self, owner_id: &str, name: &str) -> Result<TagRecord, StoreError>;
        async fn update_clip_by_id_and_owner(
            &self,
            clip_id: i32,
            owner_id: &str,
            patch: ClipPatch,
        ) -> Result<UpdatedClipRecord, StoreError>;
        async fn delete_clip_by_id(
            &self,
            clip_id: i32,
            owner_id: Option<String>,
        ) -> Result<DeletedClipRecord, StoreError>;
        async fn find_clip_by_id(&self, clip_id: i32) -> Result<ClipRecord, StoreError>;
        async fn find_all_clips(&self, owner_id: Option<String>) -> Result<Vec<ClipRecord>, StoreError>;
    }
}

#[cfg(test)]
mockall::mock! {
    pub Profiles {}

    #[async_trait]
    impl ProfileStore for Profiles {
        async fn nickname_exists(&self, nickname: &str) -> Result<bool, StoreError>;
    }
}
