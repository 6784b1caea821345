use std::collections::HashSet;
use std::time::{Duration, Instant};

use storefront_core::domain::filters::RatingOption;
use storefront_core::domain::product::{ProductPage, ProductSearchQuery};
use storefront_core::forms::filters::FilterForm;
use storefront_core::repository::{
    CategoryReader, ProductSearcher, RepositoryError, RepositoryResult,
};
use storefront_core::services::categories::load_category_tree;
use storefront_core::services::search::SearchController;

mod common;

/// Collaborator that always fails, standing in for a dead backend.
struct FailingSearcher;

impl ProductSearcher for FailingSearcher {
    fn search_products(&self, _query: &ProductSearchQuery) -> RepositoryResult<ProductPage> {
        Err(RepositoryError::Network("connection reset".to_string()))
    }
}

#[test]
fn category_screen_builds_an_indented_tree() {
    let catalog = common::fixture_catalog();

    let data = load_category_tree(&catalog).expect("tree should build");

    let placements: Vec<(i32, usize)> = data
        .items
        .iter()
        .map(|item| (item.category.id, item.level))
        .collect();

    // Roots sorted by name, children beneath their parent, and the orphan
    // pointing at the missing category 99 demoted to a root.
    assert_eq!(placements, vec![(4, 0), (1, 0), (3, 1), (2, 1), (9, 0)]);
}

#[test]
fn typing_then_waiting_runs_a_single_search() {
    let catalog = common::fixture_catalog();
    let mut controller = SearchController::new();
    let start = Instant::now();

    controller.set_search_query("pho", start);
    controller.set_search_query("phone", start + Duration::from_millis(150));

    assert!(controller.poll_debounce(start + Duration::from_millis(300)).is_none());

    let task = controller
        .poll_debounce(start + Duration::from_millis(800))
        .expect("debounce should fire");
    controller.run(&catalog, task);

    // "phone" matches the two phones, the tripod and the headphones.
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.total_count, 4);
    assert!(snapshot.error.is_none());
    assert!(controller.poll_debounce(start + Duration::from_secs(5)).is_none());
}

#[test]
fn filter_sheet_drives_chips_and_results() {
    let catalog = common::fixture_catalog();
    let mut controller = SearchController::new();

    controller.set_categories(catalog.list_categories().expect("listing should succeed"));

    let form = FilterForm {
        category_id: Some(4),
        price_max: Some("100".to_string()),
        rating: RatingOption::FourPlus,
        in_stock_only: true,
        ..FilterForm::default()
    };
    let task = controller
        .apply_filter_sheet(form)
        .expect("sheet should validate");
    controller.run(&catalog, task);

    let labels: Vec<String> = controller
        .active_filters()
        .into_iter()
        .map(|chip| chip.label)
        .collect();
    assert_eq!(
        labels,
        vec![
            "Category: Audio".to_string(),
            "Price up to 100.00".to_string(),
            "Rating 4+".to_string(),
            "In stock".to_string(),
        ]
    );

    // Only the earbuds are in the audio category, under the price cap,
    // rated 4.0 or better and in stock.
    let ids: Vec<i32> = controller.products().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![5]);

    // Dropping the rating chip lets the headphones back in.
    let task = controller
        .remove_active_filter(2)
        .expect("chip removal should search");
    controller.run(&catalog, task);

    let ids: HashSet<i32> = controller.products().iter().map(|p| p.id).collect();
    assert_eq!(ids, HashSet::from([5, 6]));
}

#[test]
fn load_more_walks_every_page_without_duplicates() {
    let catalog = common::fixture_catalog();
    let mut controller = SearchController::new().with_page_size(4);

    let task = controller.refresh();
    controller.run(&catalog, task);

    assert_eq!(controller.products().len(), 4);
    assert!(controller.has_more());

    while let Some(task) = controller.load_more() {
        controller.run(&catalog, task);
    }

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.products.len(), 10);
    assert_eq!(snapshot.total_count, 10);
    assert!(!snapshot.has_more);

    let unique: HashSet<i32> = snapshot.products.iter().map(|p| p.id).collect();
    assert_eq!(unique.len(), 10);

    assert!(controller.load_more().is_none());
}

#[test]
fn backend_outage_keeps_loaded_results_until_retry() {
    let catalog = common::fixture_catalog();
    let mut controller = SearchController::new();

    let task = controller.refresh();
    controller.run(&catalog, task);
    assert_eq!(controller.products().len(), 10);

    let task = controller.set_in_stock_only(true);
    controller.run(&FailingSearcher, task);

    assert_eq!(
        controller.error(),
        Some("network failure: connection reset")
    );
    assert_eq!(controller.products().len(), 10);

    let task = controller.refresh();
    controller.run(&catalog, task);

    assert!(controller.error().is_none());
    // The in-stock restriction still applies on retry.
    assert!(controller.products().iter().all(|p| p.stock_quantity > 0));
    assert_eq!(controller.products().len(), 8);
}
