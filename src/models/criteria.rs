use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AppError;

/// Wire value that disables the category filter
pub const ALL_CATEGORIES: &str = "all";

/// Ordering applied to a filtered list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Year descending
    #[default]
    Newest,
    /// Year ascending
    Oldest,
    /// Title A to Z
    AlphabeticalAsc,
    /// Title Z to A
    AlphabeticalDesc,
    /// Rating descending
    RatingDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::Newest,
        SortMode::Oldest,
        SortMode::AlphabeticalAsc,
        SortMode::AlphabeticalDesc,
        SortMode::RatingDesc,
    ];

    /// Canonical wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
            SortMode::AlphabeticalAsc => "alphabetical-asc",
            SortMode::AlphabeticalDesc => "alphabetical-desc",
            SortMode::RatingDesc => "rating-desc",
        }
    }

    /// Parses a sort mode, falling back to `Newest` for unknown values
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!(sort_mode = %value, "Unknown sort mode, using newest");
            SortMode::Newest
        })
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = AppError;

    /// Accepts the canonical names plus the short `a-z`, `z-a` and `rating`
    /// forms, case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "newest" => Ok(SortMode::Newest),
            "oldest" => Ok(SortMode::Oldest),
            "alphabetical-asc" | "a-z" => Ok(SortMode::AlphabeticalAsc),
            "alphabetical-desc" | "z-a" => Ok(SortMode::AlphabeticalDesc),
            "rating-desc" | "rating" => Ok(SortMode::RatingDesc),
            other => Err(AppError::InvalidInput(format!(
                "Invalid sort mode '{other}'. Valid values are: newest, oldest, \
                 alphabetical-asc, alphabetical-desc, rating-desc"
            ))),
        }
    }
}

impl Serialize for SortMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(SortMode::parse_lenient(&value))
    }
}

/// Category selection: everything, or one exact category value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Exact(String),
}

impl CategoryFilter {
    /// Builds a filter from a selector value; `"all"` and blank mean no filter
    pub fn from_selection(value: &str) -> Self {
        if value.is_empty() || value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Exact(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Exact(category) => category,
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(CategoryFilter::from_selection(&value))
    }
}

/// The user's current query/filter/sort selection, passed in on every query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Raw free-text query; matching trims and lower-cases it
    pub search_query: String,
    pub selected_category: CategoryFilter,
    pub sort_mode: SortMode,
}

impl FilterCriteria {
    pub fn new(
        search_query: impl Into<String>,
        selected_category: CategoryFilter,
        sort_mode: SortMode,
    ) -> Self {
        Self {
            search_query: search_query.into(),
            selected_category,
            sort_mode,
        }
    }

    /// Number of criteria that differ from the defaults
    pub fn active_filter_count(&self) -> usize {
        [
            !self.search_query.trim().is_empty(),
            self.selected_category != CategoryFilter::All,
            self.sort_mode != SortMode::Newest,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_active(&self) -> bool {
        self.active_filter_count() > 0
    }

    /// Criteria with every filter reset
    pub fn cleared(&self) -> Self {
        Self::default()
    }
}
