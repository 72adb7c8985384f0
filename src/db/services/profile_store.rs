use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::db::entities::{prelude::Profile, profile};
use crate::db::store::{ProfileStore, StoreError};

#[derive(Clone)]
pub struct PgProfileStore {
    db: DatabaseConnection,
}

impl PgProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn nickname_exists(&self, nickname: &str) -> Result<bool, StoreError> {
        let existing = Profile::find()
            .filter(profile::Column::Nickname.eq(nickname))
            .one(&self.db)
            .await?;
        Ok(existing.is_some())
    }
}
