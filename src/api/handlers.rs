use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::middleware::request_id::RequestId;
use crate::models::{CategoryFilter, FilterCriteria, Item, SortMode};
use crate::services::{list_filter, CatalogSnapshot};

use super::AppState;

// Request/Response types

/// Query string accepted by `GET /items`
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<SortMode>,
}

impl From<FilterParams> for FilterCriteria {
    fn from(params: FilterParams) -> Self {
        FilterCriteria::new(
            params.q.unwrap_or_default(),
            params
                .category
                .as_deref()
                .map(CategoryFilter::from_selection)
                .unwrap_or_default(),
            params.sort.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub items: Vec<Item>,
    #[serde(default)]
    pub criteria: FilterCriteria,
}

#[derive(Debug, Serialize)]
pub struct FilteredItemsResponse {
    pub items: Vec<Item>,
    pub result_count: usize,
    pub total_count: usize,
    pub categories: Vec<String>,
    pub rating_sort_available: bool,
    pub active_filters: usize,
    pub summary: String,
    pub no_results: bool,
}

impl FilteredItemsResponse {
    /// Runs the engine over `items` and captures an owned copy of the view
    fn build(items: &[Item], criteria: &FilterCriteria) -> Self {
        let view = list_filter::apply(items, criteria);

        Self {
            summary: view.summary(),
            no_results: view.no_results(),
            result_count: view.result_count,
            total_count: view.total_count,
            items: view.items.into_iter().cloned().collect(),
            categories: list_filter::distinct_categories(items)
                .into_iter()
                .map(str::to_string)
                .collect(),
            rating_sort_available: list_filter::rating_sort_available(items),
            active_filters: criteria.active_filter_count(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub rating_sort_available: bool,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub total_count: usize,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

impl From<&CatalogSnapshot> for CatalogResponse {
    fn from(snapshot: &CatalogSnapshot) -> Self {
        Self {
            total_count: snapshot.items.len(),
            source: snapshot.source.clone(),
            loaded_at: snapshot.loaded_at,
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Filter and sort the loaded catalog
pub async fn list_items(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<FilterParams>,
) -> Json<FilteredItemsResponse> {
    let criteria = FilterCriteria::from(params);
    let catalog = state.catalog.read().await;
    let response = FilteredItemsResponse::build(&catalog.items, &criteria);

    tracing::debug!(
        request_id = %request_id,
        sort_mode = %criteria.sort_mode,
        category = criteria.selected_category.as_str(),
        result_count = response.result_count,
        total_count = response.total_count,
        "Catalog filtered"
    );

    Json(response)
}

/// Replace the loaded catalog
pub async fn replace_items(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(items): Json<Vec<Item>>,
) -> Json<CatalogResponse> {
    let snapshot = CatalogSnapshot::new(items, "upload");
    let response = CatalogResponse::from(&snapshot);

    *state.catalog.write().await = snapshot;

    tracing::info!(
        request_id = %request_id,
        item_count = response.total_count,
        "Catalog replaced"
    );

    Json(response)
}

/// Distinct categories of the loaded catalog, for populating a selector
pub async fn get_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let catalog = state.catalog.read().await;

    Json(CategoriesResponse {
        categories: list_filter::distinct_categories(&catalog.items)
            .into_iter()
            .map(str::to_string)
            .collect(),
        rating_sort_available: list_filter::rating_sort_available(&catalog.items),
    })
}

/// Filter a caller-supplied item list without touching the loaded catalog
pub async fn filter_items(Json(request): Json<FilterRequest>) -> Json<FilteredItemsResponse> {
    Json(FilteredItemsResponse::build(&request.items, &request.criteria))
}
