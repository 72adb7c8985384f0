use std::sync::Arc;

use tracing::{error, warn};

use crate::db::store::{ClipStore, StoreError};
use crate::services::clip_view::{ClipPage, ClipView};
use crate::services::error::ClipError;
use crate::services::policy::ClipPolicy;

const DETAIL_NOT_FOUND_MESSAGE: &str = "클립을 찾을 수 없습니다.";
const DETAIL_FETCH_ERROR_MESSAGE: &str = "데이터베이스 조회에 실패했습니다.";

#[derive(Clone)]
pub struct ClipRetrievalService {
    store: Arc<dyn ClipStore>,
    policy: ClipPolicy,
}

impl ClipRetrievalService {
    pub fn new(store: Arc<dyn ClipStore>, policy: ClipPolicy) -> Self {
        Self { store, policy }
    }

    /// Lists clips as a single page. Store failures are returned unchanged
    /// as [`ClipError::Store`].
    pub async fn list_clips(&self, owner_id: Option<&str>) -> Result<ClipPage, ClipError> {
        let owner_filter = self.policy.list_scope.owner_filter(owner_id)?;
        let records = self.store.find_all_clips(owner_filter).await?;

        let content = records
            .into_iter()
            .map(|record| ClipView::shape(record, self.policy.list_tag_join))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ClipPage::from_content(content))
    }

    /// Fetches one clip. The id is expected to be validated already.
    pub async fn get_clip_detail(&self, clip_id: i32) -> Result<ClipView, ClipError> {
        let record = self
            .store
            .find_clip_by_id(clip_id)
            .await
            .map_err(|err| match err {
                StoreError::NotFound => {
                    warn!(clip_id, "Clip not found.");
                    ClipError::ClipNotFound(DETAIL_NOT_FOUND_MESSAGE.to_string())
                }
                StoreError::Database(msg) => {
                    error!(clip_id, error = %msg, "Failed to fetch clip.");
                    ClipError::ClipFetchError(DETAIL_FETCH_ERROR_MESSAGE.to_string())
                }
            })?;

        ClipView::shape(record, self.policy.detail_tag_join)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::{ClipRecord, JoinedTag, MockStore};
    use crate::services::policy::{OwnerScope, TagJoinPolicy};
    use chrono::DateTime;

    fn record(title: &str, tag: Option<&str>) -> ClipRecord {
        ClipRecord {
            title: Some(title.to_string()),
            tag_id: tag.map(|_| 1),
            url: Some("https://velog.io/@dobby_min/token-management".to_string()),
            memo: None,
            created_at: DateTime::parse_from_rfc3339("2025-01-15T14:30:00Z").unwrap(),
            thumbnail: None,
            tags: tag.map(|name| JoinedTag {
                name: name.to_string(),
            }),
        }
    }

    fn service(store: MockStore) -> ClipRetrievalService {
        ClipRetrievalService::new(Arc::new(store), ClipPolicy::default())
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let mut store = MockStore::new();
        store
            .expect_find_all_clips()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let page = service(store).list_clips(None).await.unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.number_of_elements, 0);
        assert!(page.empty && page.first && page.last);
    }

    #[tokio::test]
    async fn test_list_shapes_every_record() {
        let mut store = MockStore::new();
        store.expect_find_all_clips().returning(|owner_id| {
            assert_eq!(owner_id, None);
            Ok(vec![record("효율적인 토큰 관리 방법", Some("개발")), record("유일한 클립", Some("기타"))])
        });

        let page = service(store).list_clips(Some("user-1")).await.unwrap();
        assert_eq!(page.number_of_elements, 2);
        assert!(!page.empty);
        assert_eq!(page.size, 20);
        assert_eq!(page.number, 0);
        assert_eq!(page.content[0].title.as_deref(), Some("효율적인 토큰 관리 방법"));
        assert_eq!(page.content[0].tag_name.as_deref(), Some("개발"));
        assert_eq!(page.content[0].tag_id, Some(1));
    }

    #[tokio::test]
    async fn test_list_fails_on_missing_tag_join() {
        let mut store = MockStore::new();
        store
            .expect_find_all_clips()
            .returning(|_| Ok(vec![record("a", Some("개발")), record("b", None)]));

        let err = service(store).list_clips(None).await.unwrap_err();
        assert_eq!(err, ClipError::TagJoinMissing);
    }

    #[tokio::test]
    async fn test_list_store_error_is_passed_through() {
        let mut store = MockStore::new();
        store
            .expect_find_all_clips()
            .returning(|_| Err(StoreError::Database("relation \"clips\" does not exist".to_string())));

        let err = service(store).list_clips(None).await.unwrap_err();
        assert_eq!(
            err,
            ClipError::Store(StoreError::Database("relation \"clips\" does not exist".to_string()))
        );
    }

    #[tokio::test]
    async fn test_owner_scoped_list() {
        let mut store = MockStore::new();
        store.expect_find_all_clips().times(1).returning(|owner_id| {
            assert_eq!(owner_id.as_deref(), Some("user-1"));
            Ok(Vec::new())
        });
        let policy = ClipPolicy {
            list_scope: OwnerScope::Owner,
            ..ClipPolicy::default()
        };
        let svc = ClipRetrievalService::new(Arc::new(store), policy);

        assert_eq!(svc.list_clips(None).await, Err(ClipError::InvalidUserId));
        assert!(svc.list_clips(Some("user-1")).await.unwrap().empty);
    }

    #[tokio::test]
    async fn test_detail_tolerates_missing_tag() {
        let mut store = MockStore::new();
        store.expect_find_clip_by_id().times(1).returning(|clip_id| {
            assert_eq!(clip_id, 3);
            Ok(record("태그 없음", None))
        });

        let view = service(store).get_clip_detail(3).await.unwrap();
        assert_eq!(view.title.as_deref(), Some("태그 없음"));
        assert_eq!(view.tag_name, None);
        assert_eq!(view.tag_id, None);
    }

    #[tokio::test]
    async fn test_detail_with_strict_join_policy() {
        let mut store = MockStore::new();
        store
            .expect_find_clip_by_id()
            .returning(|_| Ok(record("태그 없음", None)));
        let policy = ClipPolicy {
            detail_tag_join: TagJoinPolicy::Strict,
            ..ClipPolicy::default()
        };
        let svc = ClipRetrievalService::new(Arc::new(store), policy);

        assert_eq!(svc.get_clip_detail(3).await, Err(ClipError::TagJoinMissing));
    }

    #[tokio::test]
    async fn test_detail_errors() {
        let mut store = MockStore::new();
        store
            .expect_find_clip_by_id()
            .returning(|clip_id| match clip_id {
                404 => Err(StoreError::NotFound),
                _ => Err(StoreError::Database("timeout".to_string())),
            });
        let svc = service(store);

        let not_found = svc.get_clip_detail(404).await.unwrap_err();
        assert_eq!(not_found, ClipError::ClipNotFound("클립을 찾을 수 없습니다.".to_string()));

        let failed = svc.get_clip_detail(1).await.unwrap_err();
        assert_eq!(failed.code(), "CLIP_FETCH_ERROR");
        assert_eq!(failed.to_string(), "데이터베이스 조회에 실패했습니다.");
    }
}
