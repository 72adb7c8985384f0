//! Public shape of clips and of the single-page listing wrapped around them.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::db::store::ClipRecord;
use crate::services::error::ClipError;
use crate::services::policy::TagJoinPolicy;

pub const PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipView {
    pub title: Option<String>,
    pub tag_id: Option<i32>,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub tag_name: Option<String>,
    pub memo: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl ClipView {
    pub fn shape(record: ClipRecord, tag_join: TagJoinPolicy) -> Result<Self, ClipError> {
        let tag_name = match tag_join {
            TagJoinPolicy::Strict => Some(record.tags.ok_or(ClipError::TagJoinMissing)?.name),
            TagJoinPolicy::Lenient => record.tags.map(|t| t.name).filter(|name| !name.is_empty()),
        };

        Ok(ClipView {
            title: record.title,
            tag_id: record.tag_id,
            url: record.url,
            thumbnail: record.thumbnail,
            tag_name,
            memo: record.memo,
            created_at: record.created_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOrder {
    pub direction: &'static str,
    pub null_handling: &'static str,
    pub ascending: bool,
    pub property: &'static str,
    pub ignore_case: bool,
}

impl SortOrder {
    pub fn created_at_desc() -> Self {
        SortOrder {
            direction: "DESC",
            null_handling: "NATIVE",
            ascending: false,
            property: "createdAt",
            ignore_case: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    pub offset: u64,
    pub sort: Vec<SortOrder>,
    pub paged: bool,
    pub page_number: u32,
    pub page_size: u32,
    pub unpaged: bool,
}

/// Listing response. There is no real paging: everything comes back as the
/// first and last page, so every field is derived from `content` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipPage {
    pub size: u32,
    pub content: Vec<ClipView>,
    pub number: u32,
    pub sort: Vec<SortOrder>,
    pub number_of_elements: usize,
    pub pageable: Pageable,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl ClipPage {
    pub fn from_content(content: Vec<ClipView>) -> Self {
        let number_of_elements = content.len();
        ClipPage {
            size: PAGE_SIZE,
            number: 0,
            sort: vec![SortOrder::created_at_desc()],
            number_of_elements,
            pageable: Pageable {
                offset: 0,
                sort: vec![SortOrder::created_at_desc()],
                paged: true,
                page_number: 0,
                page_size: PAGE_SIZE,
                unpaged: false,
            },
            first: true,
            last: true,
            empty: number_of_elements == 0,
            content,
        }
    }
}
