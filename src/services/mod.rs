pub mod catalog;
pub mod list_filter;

pub use catalog::{load_catalog, CatalogSnapshot, CatalogSource, JsonFileSource, StaticSource};
pub use list_filter::{apply, distinct_categories, rating_sort_available, FilteredView};
