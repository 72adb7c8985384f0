use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    sea_query::{Expr, OnConflict},
};
use tracing::debug;

use crate::db::entities::{clip, prelude::*, tag};
use crate::db::store::{
    ClipPatch, ClipRecord, ClipStore, DeletedClipRecord, JoinedTag, StoreError, TagRecord,
    UpdatedClipRecord,
};

impl From<tag::Model> for TagRecord {
    fn from(model: tag::Model) -> Self {
        TagRecord {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
        }
    }
}

impl From<clip::Model> for UpdatedClipRecord {
    fn from(model: clip::Model) -> Self {
        UpdatedClipRecord {
            id: model.id,
            title: model.title,
            url: model.url,
            memo: model.memo,
            tag_id: model.tag_id,
        }
    }
}

fn joined_record(clip: clip::Model, tag: Option<tag::Model>) -> ClipRecord {
    ClipRecord {
        title: clip.title,
        tag_id: clip.tag_id,
        url: clip.url,
        memo: clip.memo,
        created_at: clip.created_at,
        thumbnail: clip.thumbnail,
        tags: tag.map(|t| JoinedTag { name: t.name }),
    }
}

/// Postgres-backed clip and tag tables.
#[derive(Clone)]
pub struct PgClipStore {
    db: DatabaseConnection,
}

impl PgClipStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_tag(&self, owner_id: &str, name: &str) -> Result<Option<tag::Model>, DbErr> {
        Tag::find()
            .filter(tag::Column::UserId.eq(owner_id))
            .filter(tag::Column::Name.eq(name))
            .one(&self.db)
            .await
    }
}

#[async_trait]
impl ClipStore for PgClipStore {
    async fn find_tag_by_owner_and_name(
        &self,
        owner_id: &str,
        name: &str,
    ) -> Result<Option<TagRecord>, StoreError> {
        Ok(self.find_tag(owner_id, name).await?.map(TagRecord::from))
    }

    async fn insert_tag(&self, owner_id: &str, name: &str) -> Result<TagRecord, StoreError> {
        let new_tag = tag::ActiveModel {
            user_id: sea_orm::Set(owner_id.to_string()),
            name: sea_orm::Set(name.to_string()),
            ..Default::default()
        };

        // A concurrent insert of the same (owner, name) loses the race here
        // and falls through to the re-select below.
        match Tag::insert(new_tag)
            .on_conflict(
                OnConflict::columns([tag::Column::UserId, tag::Column::Name])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.db)
            .await
        {
            Ok(_) => {}
            Err(DbErr::RecordNotInserted) => {
                debug!(owner_id, name, "Tag already existed at insert time.");
            }
            Err(e) => return Err(e.into()),
        }

        let tag = self
            .find_tag(owner_id, name)
            .await?
            .ok_or(StoreError::NotFound)?;
        Ok(tag.into())
    }

    async fn update_clip_by_id_and_owner(
        &self,
        clip_id: i32,
        owner_id: &str,
        patch: ClipPatch,
    ) -> Result<UpdatedClipRecord, StoreError> {
        // With nothing to write this is just the owner-scoped existence check.
        if patch.is_empty() {
            let existing = Clip::find_by_id(clip_id)
                .filter(clip::Column::UserId.eq(owner_id))
                .one(&self.db)
                .await?
                .ok_or(StoreError::NotFound)?;
            return Ok(existing.into());
        }

        let mut update = Clip::update_many()
            .filter(clip::Column::Id.eq(clip_id))
            .filter(clip::Column::UserId.eq(owner_id));
        if let Some(title) = patch.title {
            update = update.col_expr(clip::Column::Title, Expr::value(title));
        }
        if let Some(url) = patch.url {
            update = update.col_expr(clip::Column::Url, Expr::value(url));
        }
        if let Some(memo) = patch.memo {
            update = update.col_expr(clip::Column::Memo, Expr::value(memo));
        }
        if let Some(tag_id) = patch.tag_id {
            update = update.col_expr(clip::Column::TagId, Expr::value(tag_id));
        }

        // UPDATE ... RETURNING: zero rows means no clip with this id for this owner.
        let updated = update
            .exec_with_returning(&self.db)
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::NotFound)?;
        Ok(updated.into())
    }

    async fn delete_clip_by_id(
        &self,
        clip_id: i32,
        owner_id: Option<String>,
    ) -> Result<DeletedClipRecord, StoreError> {
        let mut delete = Clip::delete_many().filter(clip::Column::Id.eq(clip_id));
        if let Some(owner_id) = owner_id {
            delete = delete.filter(clip::Column::UserId.eq(owner_id));
        }

        let deleted = delete
            .exec_with_returning(&self.db)
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::NotFound)?;
        Ok(DeletedClipRecord {
            id: deleted.id,
            title: deleted.title,
        })
    }

    async fn find_clip_by_id(&self, clip_id: i32) -> Result<ClipRecord, StoreError> {
        let (clip, tag) = Clip::find_by_id(clip_id)
            .find_also_related(Tag)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound)?;
        Ok(joined_record(clip, tag))
    }

    async fn find_all_clips(&self, owner_id: Option<String>) -> Result<Vec<ClipRecord>, StoreError> {
        let mut query = Clip::find().find_also_related(Tag);
        if let Some(owner_id) = owner_id {
            query = query.filter(clip::Column::UserId.eq(owner_id));
        }
        let rows = query
            .order_by_desc(clip::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(clip, tag)| joined_record(clip, tag))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn clip_row(id: i32, title: &str) -> clip::Model {
        clip::Model {
            id,
            user_id: "user-1".to_string(),
            title: Some(title.to_string()),
            url: Some("https://example.com".to_string()),
            memo: None,
            tag_id: Some(2),
            thumbnail: None,
            created_at: DateTime::parse_from_rfc3339("2025-01-15T14:30:00+09:00").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_delete_is_a_single_returning_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![clip_row(7, "삭제될 클립")]])
            .into_connection();
        let store = PgClipStore::new(db.clone());

        let deleted = store
            .delete_clip_by_id(7, Some("user-1".to_string()))
            .await
            .unwrap();
        assert_eq!(
            deleted,
            DeletedClipRecord {
                id: 7,
                title: Some("삭제될 클립".to_string()),
            }
        );

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("DELETE FROM"), "{sql}");
        assert!(sql.contains("RETURNING"), "{sql}");
    }

    #[tokio::test]
    async fn test_delete_without_matching_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<clip::Model>::new()])
            .into_connection();
        let store = PgClipStore::new(db);

        assert_eq!(store.delete_clip_by_id(999, None).await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_update_is_a_single_returning_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![clip_row(3, "새 제목")]])
            .into_connection();
        let store = PgClipStore::new(db.clone());

        let patch = ClipPatch {
            title: Some("새 제목".to_string()),
            ..Default::default()
        };
        let updated = store
            .update_clip_by_id_and_owner(3, "user-1", patch)
            .await
            .unwrap();
        assert_eq!(updated.id, 3);
        assert_eq!(updated.title.as_deref(), Some("새 제목"));
        assert_eq!(updated.tag_id, Some(2));

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("UPDATE"), "{sql}");
        assert!(sql.contains("RETURNING"), "{sql}");
    }

    #[tokio::test]
    async fn test_update_of_foreign_clip_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<clip::Model>::new()])
            .into_connection();
        let store = PgClipStore::new(db);

        let patch = ClipPatch {
            memo: Some("메모".to_string()),
            ..Default::default()
        };
        assert_eq!(
            store.update_clip_by_id_and_owner(3, "user-2", patch).await,
            Err(StoreError::NotFound)
        );
    }
}
