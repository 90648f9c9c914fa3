//! Search, category filter and sort over a catalog snapshot.

use crate::model::{Category, Language, Product};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &product.category == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(label: &str) -> Self {
        match label.trim() {
            "All" | "" => CategoryFilter::All,
            other => CategoryFilter::Only(Category::from(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Catalog order.
    #[default]
    Unsorted,
    PriceAscending,
    PriceDescending,
    RatingDescending,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode: {0}")]
pub struct UnknownSortMode(pub String);

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    /// Accepts the option values of the sort picker.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "default" | "none" => Ok(SortMode::Unsorted),
            "priceLow" => Ok(SortMode::PriceAscending),
            "priceHigh" => Ok(SortMode::PriceDescending),
            "rating" => Ok(SortMode::RatingDescending),
            other => Err(UnknownSortMode(other.to_string())),
        }
    }
}

/// Everything the catalog view lets the user narrow the list by.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    pub text: String,
    pub category: CategoryFilter,
    pub sort: SortMode,
    pub language: Language,
}

impl CatalogQuery {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Visible products, in display order. Pure.
    ///
    /// A product without a name in the active language never matches, even
    /// for an empty query. Sorting is stable, so ties keep catalog order.
    pub fn visible(&self, catalog: &[Product]) -> Vec<Product> {
        let needle = self.text.trim().to_lowercase();
        let mut visible: Vec<Product> = catalog
            .iter()
            .filter(|p| p.name_contains(self.language, &needle))
            .filter(|p| self.category.matches(p))
            .cloned()
            .collect();

        match self.sort {
            SortMode::Unsorted => {}
            SortMode::PriceAscending => visible.sort_by(|a, b| a.price.cmp(&b.price)),
            SortMode::PriceDescending => visible.sort_by(|a, b| b.price.cmp(&a.price)),
            SortMode::RatingDescending => visible.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
        visible
    }
}

/// Distinct category labels present in `catalog`, in first-seen order,
/// preceded by the "All" pseudo-category. Feeds the filter picker.
pub fn category_options(catalog: &[Product]) -> Vec<String> {
    let mut options = vec!["All".to_string()];
    for product in catalog {
        let label = product.category.label();
        if !options.iter().any(|seen| seen == label) {
            options.push(label.to_string());
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: &str, name: &str, price: i64, category: &str) -> Product {
        Product::new(id, name, Decimal::from(price), category)
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let catalog = vec![
            product("1", "Tomatoes", 40, "Vegetables"),
            product("2", "Carrots", 30, "Vegetables"),
        ];
        let hits = CatalogQuery::new(Language::English).with_text("TOM").visible(&catalog);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Tomatoes");
    }

    #[test]
    fn missing_localization_never_matches() {
        let catalog = vec![
            product("1", "Tomatoes", 40, "Vegetables").with_localized_names(Some("தக்காளி"), None::<String>),
            product("2", "Carrots", 30, "Vegetables"),
        ];
        let tamil = CatalogQuery::new(Language::Tamil).visible(&catalog);
        assert_eq!(tamil.len(), 1);
        assert!(CatalogQuery::new(Language::Hindi).visible(&catalog).is_empty());
    }

    #[test]
    fn category_filter_is_exact() {
        let catalog = vec![
            product("1", "Apple", 40, "Fruits"),
            product("2", "Carrot", 30, "Vegetables"),
            product("3", "Pepper", 30, "Spices"),
        ];
        let fruits = CatalogQuery::default().with_category("Fruits").visible(&catalog);
        assert_eq!(fruits.len(), 1);
        let spices = CatalogQuery::default().with_category("Spices").visible(&catalog);
        assert_eq!(spices[0].id, "3");
        assert_eq!(CatalogQuery::default().with_category("All").visible(&catalog).len(), 3);
    }

    #[test]
    fn sorts_are_stable() {
        let catalog = vec![
            product("a", "A", 10, "Fruits").with_rating(3.0),
            product("b", "B", 50, "Fruits").with_rating(4.5),
            product("c", "C", 10, "Fruits").with_rating(4.5),
        ];
        let ids = |sort| -> Vec<String> {
            CatalogQuery::default()
                .with_sort(sort)
                .visible(&catalog)
                .into_iter()
                .map(|p| p.id)
                .collect()
        };
        assert_eq!(ids(SortMode::Unsorted), ["a", "b", "c"]);
        assert_eq!(ids(SortMode::PriceAscending), ["a", "c", "b"]);
        assert_eq!(ids(SortMode::PriceDescending), ["b", "a", "c"]);
        assert_eq!(ids(SortMode::RatingDescending), ["b", "c", "a"]);
    }

    #[test]
    fn picker_values_parse() {
        assert_eq!("priceHigh".parse::<SortMode>().unwrap(), SortMode::PriceDescending);
        assert_eq!("default".parse::<SortMode>().unwrap(), SortMode::Unsorted);
        assert!("cheapest".parse::<SortMode>().is_err());
    }

    #[test]
    fn category_options_start_with_all() {
        let catalog = vec![
            product("1", "Apple", 40, "Fruits"),
            product("2", "Mango", 30, "Fruits"),
            product("3", "Carrot", 30, "Vegetables"),
        ];
        assert_eq!(category_options(&catalog), ["All", "Fruits", "Vegetables"]);
    }
}
