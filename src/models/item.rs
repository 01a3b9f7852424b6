use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Marker stored in optional fields to mean "intentionally absent"
pub const NOT_AVAILABLE: &str = "N/A";

/// Reads an optional field, treating both `None` and the sentinel as absent
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| *value != NOT_AVAILABLE)
}

/// One catalog entry shown in a filterable list (a credit, a project or a
/// media title)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawItem")]
pub struct Item {
    /// Display and search key, never empty
    pub title: String,
    /// Four-digit year, or the sentinel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Free-form classification tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Numeric string, or the sentinel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
}

/// Unvalidated wire shape of an item
#[derive(Debug, Deserialize)]
struct RawItem {
    title: String,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    category: Option<String>,
    /// Older records tag items with `type`; it wins over `category`
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    rating: Option<String>,
}

impl TryFrom<RawItem> for Item {
    type Error = AppError;

    fn try_from(raw: RawItem) -> AppResult<Self> {
        let mut item = Item::new(raw.title)?;
        item.year = raw.year;
        item.role = raw.role;
        item.category = raw.kind.or(raw.category);
        item.rating = raw.rating;
        Ok(item)
    }
}

impl Item {
    /// Creates an item with only a title
    pub fn new(title: impl Into<String>) -> AppResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "item title must not be empty".to_string(),
            ));
        }

        Ok(Self {
            title,
            year: None,
            role: None,
            category: None,
            rating: None,
        })
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    pub fn year(&self) -> Option<&str> {
        present(&self.year)
    }

    pub fn role(&self) -> Option<&str> {
        present(&self.role)
    }

    pub fn category(&self) -> Option<&str> {
        present(&self.category)
    }

    pub fn rating(&self) -> Option<&str> {
        present(&self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item() {
        let item = Item::new("Arrival").unwrap().with_year("2016");
        assert_eq!(item.title, "Arrival");
        assert_eq!(item.year(), Some("2016"));
        assert_eq!(item.role(), None);
    }

    #[test]
    fn test_empty_title_rejected() {
        assert!(matches!(Item::new(""), Err(AppError::InvalidInput(_))));
        assert!(matches!(Item::new("   "), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_sentinel_reads_as_absent() {
        let item = Item::new("Gamma")
            .unwrap()
            .with_year(NOT_AVAILABLE)
            .with_rating(NOT_AVAILABLE);
        assert_eq!(item.year(), None);
        assert_eq!(item.rating(), None);
        // the raw value is still kept for round-tripping
        assert_eq!(item.year.as_deref(), Some("N/A"));
    }

    #[test]
    fn test_deserialize_accepts_type_alias() {
        let item: Item =
            serde_json::from_str(r#"{"title":"Heat","type":"Film","year":"1995"}"#).unwrap();
        assert_eq!(item.category(), Some("Film"));
        assert_eq!(item.year(), Some("1995"));
    }

    #[test]
    fn test_deserialize_prefers_type_over_category() {
        let item: Item =
            serde_json::from_str(r#"{"title":"Heat","type":"Film","category":"Drama"}"#)
                .unwrap();
        assert_eq!(item.category(), Some("Film"));

        let item: Item =
            serde_json::from_str(r#"{"title":"Heat","category":"Drama"}"#).unwrap();
        assert_eq!(item.category(), Some("Drama"));
    }

    #[test]
    fn test_deserialize_rejects_blank_title() {
        let result: Result<Item, _> = serde_json::from_str(r#"{"title":"  "}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let item = Item::new("Solo").unwrap().with_role("Editor");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Solo", "role": "Editor"}));
    }
}
