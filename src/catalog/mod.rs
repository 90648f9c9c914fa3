//! The catalog: ingestion, the live feed, and the pure search stage.

pub mod feed;
pub mod normalize;
pub mod query;

pub use feed::{CatalogFeed, CatalogState};
pub use normalize::{normalize_catalog, normalize_product};
pub use query::{category_options, CatalogQuery, CategoryFilter, SortMode};
