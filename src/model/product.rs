use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language of a view. Drives name matching in search and voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Tamil,
    Hindi,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Tamil, Language::Hindi];

    /// BCP-47 tag handed to the speech recognizer.
    pub fn speech_locale(self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Tamil => "ta-IN",
            Language::Hindi => "hi-IN",
        }
    }

    /// Label shown in the language picker.
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Tamil => "தமிழ்",
            Language::Hindi => "हिंदी",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Accepts the picker label, the English name or the ISO code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();
        let found = match lower.as_str() {
            "english" | "en" => Some(Language::English),
            "tamil" | "ta" => Some(Language::Tamil),
            "hindi" | "hi" => Some(Language::Hindi),
            _ => Language::ALL.into_iter().find(|lang| lang.label() == trimmed),
        };
        found.ok_or_else(|| UnknownLanguage(trimmed.to_string()))
    }
}

/// Product category. Unknown labels from the store are kept verbatim in
/// `Other` so they still display and filter, but they bill as uncategorized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Vegetables,
    Fruits,
    Seeds,
    DairyProducts,
    Herbs,
    Fertilizers,
    Uncategorized,
    Other(String),
}

impl Category {
    /// Bill buckets, in display order.
    pub const BILL_ORDER: [Category; 7] = [
        Category::Vegetables,
        Category::Fruits,
        Category::Seeds,
        Category::DairyProducts,
        Category::Herbs,
        Category::Fertilizers,
        Category::Uncategorized,
    ];

    pub fn label(&self) -> &str {
        match self {
            Category::Vegetables => "Vegetables",
            Category::Fruits => "Fruits",
            Category::Seeds => "Seeds",
            Category::DairyProducts => "Dairy Products",
            Category::Herbs => "Herbs",
            Category::Fertilizers => "Fertilizers",
            Category::Uncategorized => "Uncategorized",
            Category::Other(label) => label,
        }
    }

    /// The bill bucket this category is totalled under.
    pub fn bill_bucket(&self) -> Category {
        match self {
            Category::Other(_) => Category::Uncategorized,
            known => known.clone(),
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match label.trim() {
            "" | "Uncategorized" => Category::Uncategorized,
            "Vegetables" => Category::Vegetables,
            "Fruits" => Category::Fruits,
            "Seeds" => Category::Seeds,
            "Dairy Products" => Category::DairyProducts,
            "Herbs" => Category::Herbs,
            "Fertilizers" => Category::Fertilizers,
            _ => Category::Other(label),
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::from(label.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A catalog product, fully normalized.
///
/// Products are read-only on the client. Every default is substituted once,
/// when the raw store record is ingested (see [`crate::catalog::normalize`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tamil_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hindi_name: Option<String>,
    pub price: Decimal,
    pub category: Category,
    pub weight: String,
    pub description: String,
    pub image: String,
    pub images: Vec<String>,
    pub stock: u32,
    pub rating: f64,
}

impl Product {
    pub const DEFAULT_NAME: &'static str = "Unnamed Product";
    pub const DEFAULT_IMAGE: &'static str = "https://via.placeholder.com/150";
    pub const DEFAULT_WEIGHT: &'static str = "N/A";
    pub const DEFAULT_DESCRIPTION: &'static str = "No description available";
    pub const DEFAULT_STOCK: u32 = 10;
    pub const DEFAULT_RATING: f64 = 4.0;

    /// A product with every optional field at its ingestion default.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        category: impl Into<Category>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tamil_name: None,
            hindi_name: None,
            price,
            category: category.into(),
            weight: Self::DEFAULT_WEIGHT.to_string(),
            description: Self::DEFAULT_DESCRIPTION.to_string(),
            image: Self::DEFAULT_IMAGE.to_string(),
            images: vec![Self::DEFAULT_IMAGE.to_string()],
            stock: Self::DEFAULT_STOCK,
            rating: Self::DEFAULT_RATING,
        }
    }

    pub fn with_localized_names(
        mut self,
        tamil: Option<impl Into<String>>,
        hindi: Option<impl Into<String>>,
    ) -> Self {
        self.tamil_name = tamil.map(Into::into);
        self.hindi_name = hindi.map(Into::into);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Name in `language`, or `None` when that localization is absent.
    pub fn display_name(&self, language: Language) -> Option<&str> {
        match language {
            Language::English => Some(self.name.as_str()),
            Language::Tamil => self.tamil_name.as_deref(),
            Language::Hindi => self.hindi_name.as_deref(),
        }
    }

    /// Case-insensitive substring match on the name in `language`.
    /// `needle` must already be lowercase.
    pub fn name_contains(&self, language: Language, needle: &str) -> bool {
        self.display_name(language)
            .map(|name| name.to_lowercase().contains(needle))
            .unwrap_or(false)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_round_trip() {
        for category in Category::BILL_ORDER {
            assert_eq!(Category::from(category.label()), category);
        }
        assert_eq!(Category::from("Dairy Products"), Category::DairyProducts);
        assert_eq!(Category::from(""), Category::Uncategorized);
    }

    #[test]
    fn unknown_category_is_kept_but_bills_as_uncategorized() {
        let spices = Category::from("Spices");
        assert_eq!(spices.label(), "Spices");
        assert_eq!(spices.bill_bucket(), Category::Uncategorized);
    }

    #[test]
    fn display_name_has_no_fallback() {
        let tomato = Product::new("p1", "Tomatoes", Decimal::from(40), "Vegetables")
            .with_localized_names(Some("தக்காளி"), None::<String>);
        assert_eq!(tomato.display_name(Language::English), Some("Tomatoes"));
        assert_eq!(tomato.display_name(Language::Tamil), Some("தக்காளி"));
        assert_eq!(tomato.display_name(Language::Hindi), None);
        assert!(!tomato.name_contains(Language::Hindi, ""));
    }

    #[test]
    fn language_parses_labels_names_and_codes() {
        assert_eq!("English".parse::<Language>().unwrap(), Language::English);
        assert_eq!("தமிழ்".parse::<Language>().unwrap(), Language::Tamil);
        assert_eq!("hindi".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!("ta".parse::<Language>().unwrap(), Language::Tamil);
        assert!("klingon".parse::<Language>().is_err());
        assert_eq!(Language::Hindi.speech_locale(), "hi-IN");
    }

    #[test]
    fn category_serializes_as_plain_label() {
        let json = serde_json::to_string(&Category::DairyProducts).unwrap();
        assert_eq!(json, "\"Dairy Products\"");
        let back: Category = serde_json::from_str("\"Spices\"").unwrap();
        assert_eq!(back, Category::Other("Spices".into()));
    }
}
