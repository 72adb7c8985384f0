use serde_json::Value;

use crate::services::error::ClipError;

/// Logical fields a client may change on a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateField {
    Title,
    Url,
    TagName,
    Memo,
}

impl UpdateField {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "title" => Some(UpdateField::Title),
            "url" => Some(UpdateField::Url),
            "tagName" => Some(UpdateField::TagName),
            "memo" => Some(UpdateField::Memo),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            UpdateField::Title => "title",
            UpdateField::Url => "url",
            UpdateField::TagName => "tagName",
            UpdateField::Memo => "memo",
        }
    }
}

/// Trimmed update values in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedFields {
    entries: Vec<(UpdateField, String)>,
}

impl ValidatedFields {
    pub fn get(&self, field: UpdateField) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value.as_str())
    }

    /// Like [`get`](Self::get) but treats an empty value as absent.
    pub fn non_blank(&self, field: UpdateField) -> Option<&str> {
        self.get(field).filter(|value| !value.is_empty())
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(field, _)| field.key().to_string())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpdate {
    pub clip_id: i32,
    pub fields: ValidatedFields,
}

/// Parses a clip identifier; anything but a positive integer is rejected.
/// Ids live in a SERIAL column, so values past `i32::MAX` are rejected here
/// as malformed rather than looked up.
pub fn parse_clip_id(raw: &str) -> Result<i32, ClipError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(ClipError::InvalidClipId)
}

/// Checks an update request before anything touches the store.
///
/// Unknown keys and `null` values are dropped and strings are trimmed.
/// Any other value for a known key is kept as its JSON text, so `42`
/// becomes `"42"`.
pub fn validate_for_update(
    clip_id: &str,
    owner_id: &str,
    fields: &Value,
) -> Result<ValidatedUpdate, ClipError> {
    let clip_id = parse_clip_id(clip_id)?;

    if owner_id.trim().is_empty() {
        return Err(ClipError::InvalidUserId);
    }

    let raw = match fields {
        Value::Object(map) if !map.is_empty() => map,
        _ => return Err(ClipError::NoUpdateData),
    };

    let entries: Vec<(UpdateField, String)> = raw
        .iter()
        .filter_map(|(key, value)| {
            let field = UpdateField::from_key(key)?;
            let text = match value {
                Value::Null => return None,
                Value::String(text) => text.trim().to_string(),
                other => other.to_string(),
            };
            Some((field, text))
        })
        .collect();

    if entries.is_empty() {
        return Err(ClipError::NoValidUpdateData);
    }

    Ok(ValidatedUpdate {
        clip_id,
        fields: ValidatedFields { entries },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_clip_id() {
        assert_eq!(parse_clip_id("1"), Ok(1));
        assert_eq!(parse_clip_id("999999999"), Ok(999_999_999));
        for bad in ["", "abc", "0", "-1", "1.5", "12abc"] {
            assert_eq!(parse_clip_id(bad), Err(ClipError::InvalidClipId), "input {bad:?}");
        }
    }

    #[test]
    fn test_ids_beyond_serial_range_are_invalid() {
        assert_eq!(parse_clip_id("2147483647"), Ok(i32::MAX));
        assert_eq!(parse_clip_id("2147483648"), Err(ClipError::InvalidClipId));
    }

    #[test]
    fn test_filters_unknown_keys_and_nulls() {
        let update = validate_for_update(
            "7",
            "user-1",
            &json!({ "title": "  제목  ", "memo": null, "owner": "someone", "url": "https://a.b" }),
        )
        .unwrap();

        assert_eq!(update.clip_id, 7);
        assert_eq!(update.fields.keys(), vec!["title", "url"]);
        assert_eq!(update.fields.get(UpdateField::Title), Some("제목"));
        assert_eq!(update.fields.get(UpdateField::Memo), None);
    }

    #[test]
    fn test_blank_values_are_kept_as_updated_fields() {
        let update = validate_for_update("1", "user-1", &json!({ "memo": "   " })).unwrap();
        assert_eq!(update.fields.keys(), vec!["memo"]);
        assert_eq!(update.fields.get(UpdateField::Memo), Some(""));
        assert_eq!(update.fields.non_blank(UpdateField::Memo), None);
    }

    #[test]
    fn test_rejections_in_order() {
        assert_eq!(
            validate_for_update("abc", "", &json!({})),
            Err(ClipError::InvalidClipId)
        );
        assert_eq!(
            validate_for_update("1", "", &json!({ "title": "t" })),
            Err(ClipError::InvalidUserId)
        );
        assert_eq!(
            validate_for_update("1", "user-1", &json!({})),
            Err(ClipError::NoUpdateData)
        );
        assert_eq!(
            validate_for_update("1", "user-1", &Value::Null),
            Err(ClipError::NoUpdateData)
        );
        assert_eq!(
            validate_for_update("1", "user-1", &json!({ "invalidField": "값" })),
            Err(ClipError::NoValidUpdateData)
        );
        assert_eq!(
            validate_for_update("1", "user-1", &json!({ "title": null, "memo": null })),
            Err(ClipError::NoValidUpdateData)
        );
    }

    #[test]
    fn test_non_string_values_are_kept_as_json_text() {
        let update =
            validate_for_update("1", "user-1", &json!({ "title": 42, "memo": "m", "url": null }))
                .unwrap();
        assert_eq!(update.fields.keys(), vec!["title", "memo"]);
        assert_eq!(update.fields.get(UpdateField::Title), Some("42"));

        let update = validate_for_update("1", "user-1", &json!({ "title": 42 })).unwrap();
        assert_eq!(update.fields.keys(), vec!["title"]);

        let update =
            validate_for_update("1", "user-1", &json!({ "memo": true, "tagName": ["a"] })).unwrap();
        assert_eq!(update.fields.get(UpdateField::Memo), Some("true"));
        assert_eq!(update.fields.get(UpdateField::TagName), Some("[\"a\"]"));
    }
}
