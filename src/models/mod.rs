pub mod criteria;
pub mod item;

pub use criteria::{CategoryFilter, FilterCriteria, SortMode, ALL_CATEGORIES};
pub use item::{present, Item, NOT_AVAILABLE};
