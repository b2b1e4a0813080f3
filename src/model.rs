use serde::{Deserialize, Serialize};

/// One marketplace listing as returned by the search endpoint.
///
/// `price`, `rating_count`, `review_count` and `favorite_count` arrive as
/// decorated display strings (currency symbols, thousands separators, unit
/// suffixes like "件") and are kept verbatim; numeric interpretation happens
/// in `transform`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub url: String,
    #[serde(rename = "img")]
    pub image_url: String,
    pub price: String,
    #[serde(rename = "ratingcount")]
    pub rating_count: String,
    #[serde(rename = "reviewcount")]
    pub review_count: String,
    #[serde(rename = "favoritecount")]
    pub favorite_count: String,
}

/// The listings from one successful fetch. Each fetch produces a fresh
/// result that wholly replaces the previous one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub keyword: String,
    pub products: Vec<Product>,
}

/// The active ordering criterion. Changing it re-derives the view from the
/// current result; it never triggers a re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    ByPrice,
    ByFavoriteCount,
}

/// Aggregate over the parsed prices of the current result set. Computed on
/// demand, never stored. "No parsable prices" is `Option::None` at the
/// call site, not a sentinel value here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceStats {
    pub max: f64,
    pub min: f64,
    pub average: f64,
}
