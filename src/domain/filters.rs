use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::product::format_price;

/// Upper bound used when a price filter leaves the maximum open.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Inclusive price restriction expressed in the smallest currency unit.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    /// Lower bound of the range.
    pub min_cents: i64,
    /// Upper bound of the range.
    pub max_cents: i64,
}

impl PriceRange {
    /// Build a range covering `min_cents` through `max_cents`.
    pub fn new(min_cents: i64, max_cents: i64) -> Self {
        Self {
            min_cents,
            max_cents,
        }
    }

    /// The full span, equivalent to no price restriction.
    pub fn unrestricted() -> Self {
        Self {
            min_cents: 0,
            max_cents: MAX_PRICE_CENTS,
        }
    }

    /// Display label for the range, eliding open ends.
    pub fn label(&self) -> String {
        match (self.min_cents > 0, self.max_cents < MAX_PRICE_CENTS) {
            (true, true) => format!(
                "Price {}-{}",
                format_price(self.min_cents),
                format_price(self.max_cents)
            ),
            (true, false) => format!("Price from {}", format_price(self.min_cents)),
            (false, true) => format!("Price up to {}", format_price(self.max_cents)),
            (false, false) => "Price any".to_string(),
        }
    }
}

/// Minimum-rating options offered by the filter sheet.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RatingOption {
    /// No rating restriction.
    Any,
    /// Products rated 3.0 or better.
    ThreePlus,
    /// Products rated 4.0 or better.
    FourPlus,
}

impl Default for RatingOption {
    fn default() -> Self {
        Self::Any
    }
}

impl RatingOption {
    /// Minimum rating implied by the option, if any.
    pub fn min_rating(self) -> Option<f32> {
        match self {
            RatingOption::Any => None,
            RatingOption::ThreePlus => Some(3.0),
            RatingOption::FourPlus => Some(4.0),
        }
    }
}

/// Orderings the search backend can apply to results.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Backend relevance ranking.
    Relevance,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Best rated first.
    RatingDesc,
    /// Most recently added first.
    Newest,
}

impl Default for SortOption {
    fn default() -> Self {
        Self::Relevance
    }
}

/// Identifies which filter field an active chip represents.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Category,
    Price,
    Rating,
    InStock,
}

/// Human-readable summary of one applied search filter.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    /// Field the chip maps back to when removed.
    pub field: FilterField,
    /// Display label shown on the chip.
    pub label: String,
}

/// Filter state owned by the search controller.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchFilters {
    /// Restrict results to a single category.
    pub category_id: Option<i32>,
    /// Restrict results to a price range.
    pub price_range: Option<PriceRange>,
    /// Restrict results to a minimum rating.
    pub rating: RatingOption,
    /// Drop products with no stock.
    pub in_stock_only: bool,
    /// Ordering requested from the backend.
    pub sort_by: SortOption,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            category_id: None,
            price_range: None,
            rating: RatingOption::Any,
            in_stock_only: false,
            sort_by: SortOption::Relevance,
        }
    }
}

impl SearchFilters {
    /// Compute the active filter chips for the current field values.
    ///
    /// The chips are a pure projection of the filter fields; they are never
    /// stored. `categories` resolves category names for chip labels, falling
    /// back to the bare identifier when the id is unknown.
    pub fn active_filters(&self, categories: &[Category]) -> Vec<ActiveFilter> {
        let mut chips = Vec::new();

        if let Some(category_id) = self.category_id {
            let label = categories
                .iter()
                .find(|category| category.id == category_id)
                .map(|category| format!("Category: {}", category.name))
                .unwrap_or_else(|| format!("Category: #{category_id}"));
            chips.push(ActiveFilter {
                field: FilterField::Category,
                label,
            });
        }

        if let Some(range) = self.price_range {
            chips.push(ActiveFilter {
                field: FilterField::Price,
                label: range.label(),
            });
        }

        match self.rating {
            RatingOption::Any => {}
            RatingOption::ThreePlus => chips.push(ActiveFilter {
                field: FilterField::Rating,
                label: "Rating 3+".to_string(),
            }),
            RatingOption::FourPlus => chips.push(ActiveFilter {
                field: FilterField::Rating,
                label: "Rating 4+".to_string(),
            }),
        }

        if self.in_stock_only {
            chips.push(ActiveFilter {
                field: FilterField::InStock,
                label: "In stock".to_string(),
            });
        }

        chips
    }
}
