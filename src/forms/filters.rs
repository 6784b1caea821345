use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::filters::{
    MAX_PRICE_CENTS, PriceRange, RatingOption, SearchFilters, SortOption,
};

/// Maximum length accepted for a price input string.
const PRICE_MAX_LEN: usize = 16;
const PRICE_MAX_LEN_VALIDATOR: u64 = PRICE_MAX_LEN as u64;

/// Result type returned by the filter form helpers.
pub type FilterFormResult<T> = Result<T, FilterFormError>;

/// Errors that can occur while processing the filter sheet form.
#[derive(Debug, Error)]
pub enum FilterFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A price field could not be parsed as a decimal amount.
    #[error("invalid {field} price `{value}`")]
    InvalidPrice { field: &'static str, value: String },
    /// The minimum price is above the maximum price.
    #[error("minimum price exceeds maximum price")]
    InvertedPriceRange,
}

/// Form payload emitted when submitting the filter sheet.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct FilterForm {
    /// Category selected in the sheet, if any.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub category_id: Option<i32>,
    /// Minimum price as entered by the user, in decimal currency units.
    #[serde(default)]
    #[validate(length(max = PRICE_MAX_LEN_VALIDATOR))]
    pub price_min: Option<String>,
    /// Maximum price as entered by the user, in decimal currency units.
    #[serde(default)]
    #[validate(length(max = PRICE_MAX_LEN_VALIDATOR))]
    pub price_max: Option<String>,
    /// Minimum rating option.
    #[serde(default)]
    pub rating: RatingOption,
    /// Whether to drop products with no stock.
    #[serde(default)]
    pub in_stock_only: bool,
    /// Requested result ordering.
    #[serde(default)]
    pub sort_by: SortOption,
}

impl FilterForm {
    /// Validates and converts the payload into controller filter state.
    ///
    /// Empty price fields leave the corresponding bound open; a single
    /// bound produces a half-open range.
    pub fn into_filters(self) -> FilterFormResult<SearchFilters> {
        self.validate()?;

        let min_cents = parse_optional_price(self.price_min, "minimum")?;
        let max_cents = parse_optional_price(self.price_max, "maximum")?;

        let price_range = match (min_cents, max_cents) {
            (None, None) => None,
            (min, max) => {
                let range = PriceRange {
                    min_cents: min.unwrap_or(0),
                    max_cents: max.unwrap_or(MAX_PRICE_CENTS),
                };
                if range.min_cents > range.max_cents {
                    return Err(FilterFormError::InvertedPriceRange);
                }
                Some(range)
            }
        };

        Ok(SearchFilters {
            category_id: self.category_id,
            price_range,
            rating: self.rating,
            in_stock_only: self.in_stock_only,
            sort_by: self.sort_by,
        })
    }
}

fn parse_optional_price(
    value: Option<String>,
    field: &'static str,
) -> FilterFormResult<Option<i64>> {
    let Some(raw) = value else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match parse_price_cents(trimmed) {
        Some(cents) => Ok(Some(cents)),
        None => Err(FilterFormError::InvalidPrice {
            field,
            value: trimmed.to_string(),
        }),
    }
}

/// Parse a decimal price string such as `12`, `12.5` or `12.50` into cents.
///
/// String based so that user input never takes a detour through floating
/// point. Rejects negative amounts and more than two decimal places.
fn parse_price_cents(value: &str) -> Option<i64> {
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if fraction.len() > 2 {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole_value: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };
    let fraction_value: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };

    whole_value
        .checked_mul(100)?
        .checked_add(fraction_value)
}
