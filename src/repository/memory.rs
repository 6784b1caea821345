use std::cmp::Reverse;

use serde::Deserialize;

use crate::domain::category::Category;
use crate::domain::filters::SortOption;
use crate::domain::product::{ProductPage, ProductSearchQuery, ProductSummary};
use crate::models;
use crate::repository::{CategoryReader, ProductSearcher, RepositoryResult};

/// In-memory catalog implementing the collaborator traits.
///
/// Stands in for the remote search service in tests and local demos; applies
/// the full query semantics (search, filters, sort, 0-based pagination).
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    categories: Vec<Category>,
    products: Vec<ProductSummary>,
}

/// Catalog document payload combining both backend listings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    #[serde(default)]
    categories: Vec<models::category::Category>,
    #[serde(default)]
    products: Vec<models::product::ProductSummary>,
}

impl InMemoryCatalog {
    /// Create a catalog over the supplied domain data.
    pub fn new(categories: Vec<Category>, products: Vec<ProductSummary>) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// Load a catalog document from its JSON representation.
    pub fn from_json(document: &str) -> RepositoryResult<Self> {
        let document: CatalogDocument = serde_json::from_str(document)?;

        Ok(Self {
            categories: document.categories.into_iter().map(Into::into).collect(),
            products: document.products.into_iter().map(Into::into).collect(),
        })
    }
}

impl CategoryReader for InMemoryCatalog {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        Ok(self.categories.clone())
    }
}

impl ProductSearcher for InMemoryCatalog {
    fn search_products(&self, query: &ProductSearchQuery) -> RepositoryResult<ProductPage> {
        let mut matches: Vec<&ProductSummary> = self
            .products
            .iter()
            .filter(|product| matches_query(product, query))
            .collect();

        sort_matches(&mut matches, query.sort_by);

        let total = matches.len();
        let per_page = query.per_page.max(1);
        let total_pages = total.div_ceil(per_page);
        let items = matches
            .into_iter()
            .skip(query.page * per_page)
            .take(per_page)
            .cloned()
            .collect();

        Ok(ProductPage {
            items,
            page: query.page,
            total_pages,
            total_count: total,
        })
    }
}

fn matches_query(product: &ProductSummary, query: &ProductSearchQuery) -> bool {
    if let Some(term) = query.search.as_ref() {
        if !product
            .name
            .to_lowercase()
            .contains(&term.to_lowercase())
        {
            return false;
        }
    }

    if let Some(category_id) = query.category_id {
        if product.category_id != Some(category_id) {
            return false;
        }
    }

    if let Some(min) = query.min_price_cents {
        if product.price_cents < min {
            return false;
        }
    }

    if let Some(max) = query.max_price_cents {
        if product.price_cents > max {
            return false;
        }
    }

    if let Some(min_rating) = query.min_rating {
        if product.rating < min_rating {
            return false;
        }
    }

    if query.in_stock_only && product.stock_quantity == 0 {
        return false;
    }

    true
}

fn sort_matches(matches: &mut [&ProductSummary], sort_by: SortOption) {
    match sort_by {
        // Insertion order stands in for backend relevance ranking.
        SortOption::Relevance => {}
        SortOption::PriceAsc => matches.sort_by_key(|product| product.price_cents),
        SortOption::PriceDesc => matches.sort_by_key(|product| Reverse(product.price_cents)),
        SortOption::RatingDesc => {
            matches.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        }
        SortOption::Newest => matches.sort_by_key(|product| Reverse(product.created_at)),
    }
}
