use std::time::{Duration, Instant};

use serde::Serialize;

use crate::LOW_STOCK_THRESHOLD;
use crate::domain::category::Category;
use crate::domain::filters::{
    ActiveFilter, FilterField, PriceRange, RatingOption, SearchFilters, SortOption,
};
use crate::domain::product::{
    ProductPage, ProductSearchQuery, ProductSummary, format_price,
};
use crate::forms::filters::FilterForm;
use crate::repository::{ProductSearcher, RepositoryResult};
use crate::services::{ServiceError, ServiceResult};

/// Quiet period after the last keystroke before a text search fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Number of products requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Distinguishes a fresh search from an incremental page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Replaces the accumulated results with page 0 of a new query.
    Fresh,
    /// Appends the next page to the accumulated results.
    NextPage,
}

/// A search the controller wants executed against the collaborator.
///
/// The generation token identifies the request so that responses arriving
/// after a newer search has been issued are discarded instead of applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTask {
    generation: u64,
    kind: SearchKind,
    query: ProductSearchQuery,
}

impl SearchTask {
    /// Whether this task replaces or extends the result list.
    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    /// The composed query to send to the collaborator.
    pub fn query(&self) -> &ProductSearchQuery {
        &self.query
    }
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    generation: u64,
    kind: SearchKind,
}

#[derive(Debug, Clone)]
struct PendingQuery {
    text: String,
    deadline: Instant,
}

/// Client-side search state machine in front of a [`ProductSearcher`].
///
/// The controller owns query text, filter state, active filter chips and
/// pagination bookkeeping. Mutating operations are synchronous and hand back
/// a [`SearchTask`] when a remote search is required; the caller executes the
/// task against the collaborator (or lets [`SearchController::run`] do the
/// round-trip) and feeds the outcome into
/// [`SearchController::finish_search`].
///
/// All methods must be invoked from a single logical event loop; the
/// controller holds no locks.
#[derive(Debug)]
pub struct SearchController {
    query_input: String,
    committed_query: String,
    filters: SearchFilters,
    categories: Vec<Category>,
    products: Vec<ProductSummary>,
    page: usize,
    total_pages: usize,
    total_count: usize,
    generation: u64,
    /// Generation whose results are currently displayed.
    results_generation: u64,
    in_flight: Option<InFlight>,
    pending_query: Option<PendingQuery>,
    error: Option<String>,
    completed_once: bool,
    debounce: Duration,
    page_size: usize,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    /// Create a controller with the default debounce window and page size.
    pub fn new() -> Self {
        Self {
            query_input: String::new(),
            committed_query: String::new(),
            filters: SearchFilters::default(),
            categories: Vec::new(),
            products: Vec::new(),
            page: 0,
            total_pages: 0,
            total_count: 0,
            generation: 0,
            results_generation: 0,
            in_flight: None,
            pending_query: None,
            error: None,
            completed_once: false,
            debounce: SEARCH_DEBOUNCE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the debounce window applied to text changes.
    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }

    /// Override the number of products requested per page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Install the flat category listing used to label category chips.
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    /// Update the free-text query, scheduling a debounced search.
    ///
    /// The visible text changes immediately; the remote search fires only
    /// once the text has been stable for the debounce window. Re-submitting
    /// the pending text keeps the existing deadline, and re-submitting the
    /// already committed text cancels the pending trigger entirely.
    pub fn set_search_query(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.query_input = text.clone();

        if text == self.committed_query {
            self.pending_query = None;
            return;
        }

        match &self.pending_query {
            Some(pending) if pending.text == text => {}
            _ => {
                self.pending_query = Some(PendingQuery {
                    text,
                    deadline: now + self.debounce,
                });
            }
        }
    }

    /// Empty the query text and search immediately.
    ///
    /// Clearing is a discrete tap rather than a keystroke, so it bypasses
    /// the debounce. Returns `None` when there is nothing to clear.
    pub fn clear_search(&mut self) -> Option<SearchTask> {
        self.pending_query = None;
        self.query_input.clear();

        if self.committed_query.is_empty() {
            return None;
        }

        Some(self.begin_fresh_search())
    }

    /// Next instant at which [`SearchController::poll_debounce`] can fire.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_query.as_ref().map(|pending| pending.deadline)
    }

    /// Fire the pending debounced search once its quiet period has elapsed.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<SearchTask> {
        match &self.pending_query {
            Some(pending) if pending.deadline <= now => {}
            _ => return None,
        }

        Some(self.begin_fresh_search())
    }

    /// Restrict results to a category, or lift the restriction with `None`.
    pub fn set_category(&mut self, category_id: Option<i32>) -> SearchTask {
        self.filters.category_id = category_id;
        self.begin_fresh_search()
    }

    /// Restrict results to a price range, or lift the restriction with `None`.
    pub fn set_price_range(&mut self, range: Option<PriceRange>) -> SearchTask {
        self.filters.price_range = range;
        self.begin_fresh_search()
    }

    /// Restrict results to a minimum rating.
    pub fn set_rating(&mut self, rating: RatingOption) -> SearchTask {
        self.filters.rating = rating;
        self.begin_fresh_search()
    }

    /// Toggle the in-stock-only restriction.
    pub fn set_in_stock_only(&mut self, in_stock_only: bool) -> SearchTask {
        self.filters.in_stock_only = in_stock_only;
        self.begin_fresh_search()
    }

    /// Change the result ordering.
    pub fn set_sort(&mut self, sort_by: SortOption) -> SearchTask {
        self.filters.sort_by = sort_by;
        self.begin_fresh_search()
    }

    /// Commit a filter draft assembled in a filter sheet.
    pub fn apply_filters(&mut self, filters: SearchFilters) -> SearchTask {
        self.filters = filters;
        self.begin_fresh_search()
    }

    /// Validate a filter sheet submission and commit it.
    pub fn apply_filter_sheet(&mut self, form: FilterForm) -> ServiceResult<SearchTask> {
        let filters = form
            .into_filters()
            .map_err(|err| ServiceError::Form(err.to_string()))?;

        Ok(self.apply_filters(filters))
    }

    /// Restore every filter field to its default without searching.
    pub fn reset_filters(&mut self) {
        self.filters = SearchFilters::default();
    }

    /// Re-run the committed query and filters from page 0.
    pub fn refresh(&mut self) -> SearchTask {
        self.begin_fresh_search()
    }

    /// Remove the chip at `index` of the current projection and re-search.
    ///
    /// Out-of-range indexes are a no-op.
    pub fn remove_active_filter(&mut self, index: usize) -> Option<SearchTask> {
        let chips = self.active_filters();
        let chip = chips.get(index)?;

        match chip.field {
            FilterField::Category => self.filters.category_id = None,
            FilterField::Price => self.filters.price_range = None,
            FilterField::Rating => self.filters.rating = RatingOption::Any,
            FilterField::InStock => self.filters.in_stock_only = false,
        }

        Some(self.begin_fresh_search())
    }

    /// Request the next page of the current query.
    ///
    /// Returns `None` while a search or another page fetch is in flight,
    /// when the last response reported no further pages, and when the
    /// displayed results belong to a superseded query (pages of the new
    /// query must never be appended onto the old list). Duplicate calls are
    /// ignored rather than queued.
    pub fn load_more(&mut self) -> Option<SearchTask> {
        if self.in_flight.is_some()
            || !self.has_more()
            || self.results_generation != self.generation
        {
            return None;
        }

        let task = SearchTask {
            generation: self.generation,
            kind: SearchKind::NextPage,
            query: self.compose_query(self.page + 1),
        };
        self.in_flight = Some(InFlight {
            generation: task.generation,
            kind: task.kind,
        });

        Some(task)
    }

    /// Apply the collaborator outcome for a previously issued task.
    ///
    /// Only the task matching the single in-flight descriptor is accepted;
    /// superseded responses are discarded so a slow generation never
    /// overwrites a newer one.
    pub fn finish_search(&mut self, task: &SearchTask, outcome: RepositoryResult<ProductPage>) {
        match self.in_flight {
            Some(in_flight)
                if in_flight.generation == task.generation && in_flight.kind == task.kind => {}
            _ => {
                log::debug!(
                    "discarding superseded search response (generation {})",
                    task.generation
                );
                return;
            }
        }
        self.in_flight = None;

        match (task.kind, outcome) {
            (SearchKind::Fresh, Ok(page)) => {
                self.products = page.items;
                self.page = page.page;
                self.total_pages = page.total_pages;
                self.total_count = page.total_count;
                self.results_generation = task.generation;
                self.error = None;
                self.completed_once = true;
            }
            (SearchKind::NextPage, Ok(page)) => {
                self.products.extend(page.items);
                self.page = page.page;
                self.total_pages = page.total_pages;
                self.total_count = page.total_count;
                self.error = None;
            }
            (kind, Err(err)) => {
                log::error!("product search failed: {err}");
                if kind == SearchKind::Fresh && !self.completed_once {
                    self.products.clear();
                    self.page = 0;
                    self.total_pages = 0;
                    self.total_count = 0;
                }
                self.error = Some(err.to_string());
            }
        }
    }

    /// Execute `task` against the collaborator and apply the outcome.
    pub fn run<P>(&mut self, port: &P, task: SearchTask)
    where
        P: ProductSearcher + ?Sized,
    {
        let outcome = port.search_products(&task.query);
        self.finish_search(&task, outcome);
    }

    /// Whether further pages exist beyond the accumulated results.
    pub fn has_more(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// Whether a fresh search is in flight.
    pub fn is_searching(&self) -> bool {
        matches!(
            self.in_flight,
            Some(InFlight {
                kind: SearchKind::Fresh,
                ..
            })
        )
    }

    /// Whether an incremental page fetch is in flight.
    pub fn is_loading_more(&self) -> bool {
        matches!(
            self.in_flight,
            Some(InFlight {
                kind: SearchKind::NextPage,
                ..
            })
        )
    }

    /// The query text as currently typed.
    pub fn query_input(&self) -> &str {
        &self.query_input
    }

    /// The committed filter state, for re-populating a filter editor.
    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    /// The accumulated product list.
    pub fn products(&self) -> &[ProductSummary] {
        &self.products
    }

    /// The last surfaced error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Dismiss the surfaced error message.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// The active filter chips for the committed filter state.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        self.filters.active_filters(&self.categories)
    }

    /// Serializable view of the controller state for the UI layer.
    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            query: self.query_input.clone(),
            products: self.products.iter().map(ProductView::from).collect(),
            is_searching: self.is_searching(),
            is_loading_more: self.is_loading_more(),
            error: self.error.clone(),
            active_filters: self.active_filters(),
            has_more: self.has_more(),
            page: self.page,
            total_pages: self.total_pages,
            total_count: self.total_count,
            filters: self.filters.clone(),
        }
    }

    /// Start a fresh search: commit the typed text, cancel any pending
    /// debounce, advance the generation and mark the request in flight.
    fn begin_fresh_search(&mut self) -> SearchTask {
        self.pending_query = None;
        self.committed_query = self.query_input.clone();
        self.generation += 1;

        let task = SearchTask {
            generation: self.generation,
            kind: SearchKind::Fresh,
            query: self.compose_query(0),
        };
        self.in_flight = Some(InFlight {
            generation: task.generation,
            kind: task.kind,
        });

        task
    }

    fn compose_query(&self, page: usize) -> ProductSearchQuery {
        let mut query = ProductSearchQuery::new(self.page_size)
            .with_filters(&self.filters)
            .page(page);

        if !self.committed_query.is_empty() {
            query = query.search(self.committed_query.clone());
        }

        query
    }
}

/// View model for one product row in the results list.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub price_formatted: String,
    pub currency: String,
    pub rating: f32,
    pub review_count: u32,
    pub thumbnail_url: Option<String>,
    pub is_best_seller: bool,
    /// Set when fewer than [`LOW_STOCK_THRESHOLD`] units remain.
    pub low_stock: bool,
}

impl From<&ProductSummary> for ProductView {
    fn from(product: &ProductSummary) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price_formatted: format_price(product.price_cents),
            currency: product.currency.clone(),
            rating: product.rating,
            review_count: product.review_count,
            thumbnail_url: product.thumbnail_url.clone(),
            is_best_seller: product.is_best_seller,
            low_stock: product.stock_quantity < LOW_STOCK_THRESHOLD,
        }
    }
}

/// Serializable snapshot of the controller state.
#[derive(Debug, Serialize)]
pub struct SearchSnapshot {
    /// Query text as currently typed.
    pub query: String,
    /// Accumulated product rows.
    pub products: Vec<ProductView>,
    /// A fresh search is in flight.
    pub is_searching: bool,
    /// An incremental page fetch is in flight.
    pub is_loading_more: bool,
    /// Last surfaced error message.
    pub error: Option<String>,
    /// Chips describing the applied filters.
    pub active_filters: Vec<ActiveFilter>,
    /// Further pages exist beyond the accumulated results.
    pub has_more: bool,
    /// 0-based index of the last loaded page.
    pub page: usize,
    /// Total pages reported by the backend.
    pub total_pages: usize,
    /// Total matching products reported by the backend.
    pub total_count: usize,
    /// Raw filter values for re-populating a filter editor.
    pub filters: SearchFilters,
}
