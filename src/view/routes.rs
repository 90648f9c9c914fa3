//! Client-side route table.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Landing,
    /// `/getstarted`
    FarmerDashboard,
    /// `/addpro`
    ProductEntry,
    /// `/payment`
    Payment,
    /// `/shop`
    Shop,
    /// `/product/{id}`
    ProductDetails(String),
    NotFound(String),
}

impl Route {
    /// Resolves a path. Query strings, fragments and a trailing slash are ignored.
    pub fn parse(path: &str) -> Route {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Landing,
            ["getstarted"] => Route::FarmerDashboard,
            ["addpro"] => Route::ProductEntry,
            ["payment"] => Route::Payment,
            ["shop"] => Route::Shop,
            ["product", id] => Route::ProductDetails((*id).to_string()),
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::FarmerDashboard => "/getstarted".to_string(),
            Route::ProductEntry => "/addpro".to_string(),
            Route::Payment => "/payment".to_string(),
            Route::Shop => "/shop".to_string(),
            Route::ProductDetails(id) => format!("/product/{}", id),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
