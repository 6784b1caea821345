use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::domain::product::{
    ProductPage as DomainProductPage, ProductSummary as DomainProductSummary,
};

/// Product payload as served by the search backend.
///
/// Prices arrive in decimal currency units and are converted to integer
/// cents on the way into the domain.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: i32,
    pub name: String,
    /// Price in decimal currency units, for example `12.99`.
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub category_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl From<ProductSummary> for DomainProductSummary {
    fn from(value: ProductSummary) -> Self {
        Self {
            id: value.id,
            name: value.name,
            price_cents: to_cents(value.price),
            currency: value.currency,
            rating: value.rating,
            review_count: value.review_count,
            thumbnail_url: value.thumbnail_url,
            is_best_seller: value.is_best_seller,
            stock_quantity: value.stock_quantity,
            category_id: value.category_id,
            created_at: value.created_at,
        }
    }
}

/// Paginated search response payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<ProductSummary>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl From<ProductPage> for DomainProductPage {
    fn from(value: ProductPage) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            page: value.page,
            total_pages: value.total_pages,
            total_count: value.total_count,
        }
    }
}

/// Convert a decimal price into integer cents, rounding half up.
fn to_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}
