use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::filters::{MAX_PRICE_CENTS, SearchFilters, SortOption};

/// Summary of a product as returned by the search backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProductSummary {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Price represented in the smallest currency unit (for example cents).
    pub price_cents: i64,
    /// ISO 4217 currency code associated with the product price.
    pub currency: String,
    /// Average review rating between 0.0 and 5.0.
    pub rating: f32,
    /// Number of reviews behind the rating.
    pub review_count: u32,
    /// Optional reference to a thumbnail image.
    pub thumbnail_url: Option<String>,
    /// Flag set by the backend for best-selling products.
    pub is_best_seller: bool,
    /// Units currently available.
    pub stock_quantity: u32,
    /// Category the product is listed under, if any.
    pub category_id: Option<i32>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
}

/// One page of search results returned by the product search backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProductPage {
    /// Products on this page.
    pub items: Vec<ProductSummary>,
    /// 0-based index of this page.
    pub page: usize,
    /// Total number of pages for the query.
    pub total_pages: usize,
    /// Total number of matching products across all pages.
    pub total_count: usize,
}

impl ProductPage {
    /// An empty result set.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            total_pages: 0,
            total_count: 0,
        }
    }
}

/// Query definition sent to the product search backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSearchQuery {
    /// Optional free-text search term.
    pub search: Option<String>,
    /// Optional category restriction.
    pub category_id: Option<i32>,
    /// Optional lower price bound in the smallest currency unit.
    pub min_price_cents: Option<i64>,
    /// Optional upper price bound in the smallest currency unit.
    pub max_price_cents: Option<i64>,
    /// Optional minimum rating.
    pub min_rating: Option<f32>,
    /// Drop products with no stock.
    pub in_stock_only: bool,
    /// Ordering requested from the backend.
    pub sort_by: SortOption,
    /// 0-based page index requested.
    pub page: usize,
    /// Number of products per page.
    pub per_page: usize,
}

impl ProductSearchQuery {
    /// Construct a query for the first page with no restrictions.
    pub fn new(per_page: usize) -> Self {
        Self {
            search: None,
            category_id: None,
            min_price_cents: None,
            max_price_cents: None,
            min_rating: None,
            in_stock_only: false,
            sort_by: SortOption::Relevance,
            page: 0,
            per_page,
        }
    }

    /// Filter the results by a free-text search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Request the given 0-based page.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Apply every restriction carried by the filter state.
    ///
    /// Open ends of the price range are left unset so the backend only sees
    /// meaningful bounds.
    pub fn with_filters(mut self, filters: &SearchFilters) -> Self {
        self.category_id = filters.category_id;
        if let Some(range) = filters.price_range {
            self.min_price_cents = (range.min_cents > 0).then_some(range.min_cents);
            self.max_price_cents = (range.max_cents < MAX_PRICE_CENTS).then_some(range.max_cents);
        }
        self.min_rating = filters.rating.min_rating();
        self.in_stock_only = filters.in_stock_only;
        self.sort_by = filters.sort_by;
        self
    }
}

/// Format a cents amount as a decimal price string.
pub fn format_price(cents: i64) -> String {
    format!("{:.2}", cents as f64 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filters::{PriceRange, RatingOption};

    #[test]
    fn with_filters_copies_every_restriction() {
        let filters = SearchFilters {
            category_id: Some(3),
            price_range: Some(PriceRange::new(500, 2500)),
            rating: RatingOption::FourPlus,
            in_stock_only: true,
            sort_by: SortOption::PriceDesc,
        };

        let query = ProductSearchQuery::new(20).with_filters(&filters).page(2);

        assert_eq!(query.category_id, Some(3));
        assert_eq!(query.min_price_cents, Some(500));
        assert_eq!(query.max_price_cents, Some(2500));
        assert_eq!(query.min_rating, Some(4.0));
        assert!(query.in_stock_only);
        assert_eq!(query.sort_by, SortOption::PriceDesc);
        assert_eq!(query.page, 2);
        assert_eq!(query.per_page, 20);
    }

    #[test]
    fn with_filters_drops_open_price_bounds() {
        let filters = SearchFilters {
            price_range: Some(PriceRange::new(0, MAX_PRICE_CENTS)),
            ..SearchFilters::default()
        };

        let query = ProductSearchQuery::new(20).with_filters(&filters);

        assert_eq!(query.min_price_cents, None);
        assert_eq!(query.max_price_cents, None);
    }

    #[test]
    fn format_price_renders_two_decimals() {
        assert_eq!(format_price(1299), "12.99");
        assert_eq!(format_price(990), "9.90");
        assert_eq!(format_price(0), "0.00");
    }
}
