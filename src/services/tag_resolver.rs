use std::sync::Arc;

use tracing::{debug, info};

use crate::db::store::{ClipStore, StoreError};

/// Finds a tag by name within an owner's namespace, creating it on first use.
#[derive(Clone)]
pub struct TagResolver {
    store: Arc<dyn ClipStore>,
}

impl TagResolver {
    pub fn new(store: Arc<dyn ClipStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, tag_name: &str, owner_id: &str) -> Result<i32, StoreError> {
        if let Some(existing) = self
            .store
            .find_tag_by_owner_and_name(owner_id, tag_name)
            .await?
        {
            debug!(tag_id = existing.id, owner_id, "Resolved existing tag.");
            return Ok(existing.id);
        }

        let created = self.store.insert_tag(owner_id, tag_name).await?;
        info!(tag_id = created.id, owner_id, tag_name, "Created tag.");
        Ok(created.id)
    }
}
