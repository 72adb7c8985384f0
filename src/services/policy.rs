//! Access and shaping policies for the clip services.
//!
//! Update always matches on owner. Delete and list default to unscoped and
//! the list/detail pair disagree on a missing tag join; both behaviors are
//! kept but made selectable here instead of living implicitly in each call.

use serde::Deserialize;

use crate::services::error::ClipError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerScope {
    /// No owner predicate on the store call.
    #[default]
    Any,
    /// Only rows owned by the requesting user.
    Owner,
}

impl OwnerScope {
    /// Owner filter to hand to the store, or `InvalidUserId` when the scope
    /// needs an owner and none was supplied.
    pub fn owner_filter(self, owner_id: Option<&str>) -> Result<Option<String>, ClipError> {
        match self {
            OwnerScope::Any => Ok(None),
            OwnerScope::Owner => owner_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| Some(id.to_string()))
                .ok_or(ClipError::InvalidUserId),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagJoinPolicy {
    /// A record without joined tag data fails the request.
    Strict,
    /// A missing (or empty) tag name becomes `null`.
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipPolicy {
    pub delete_scope: OwnerScope,
    pub list_scope: OwnerScope,
    pub list_tag_join: TagJoinPolicy,
    pub detail_tag_join: TagJoinPolicy,
}

impl Default for ClipPolicy {
    fn default() -> Self {
        ClipPolicy {
            delete_scope: OwnerScope::Any,
            list_scope: OwnerScope::Any,
            list_tag_join: TagJoinPolicy::Strict,
            detail_tag_join: TagJoinPolicy::Lenient,
        }
    }
}
