//! Helpers for integration tests.

use storefront_core::repository::memory::InMemoryCatalog;

/// Catalog document in the backend wire format.
pub const CATALOG_FIXTURE: &str = r#"{
    "categories": [
        {"id": 1, "name": "Electronics"},
        {"id": 2, "parentId": 1, "name": "Phones"},
        {"id": 3, "parentId": 1, "name": "Laptops"},
        {"id": 4, "name": "Audio"},
        {"id": 9, "parentId": 99, "name": "Clearance"}
    ],
    "products": [
        {"id": 1, "name": "Nebula X1 Phone", "price": 699.00, "rating": 4.6,
         "reviewCount": 320, "categoryId": 2, "stockQuantity": 42,
         "isBestSeller": true, "thumbnailUrl": "https://cdn.example.com/x1.jpg",
         "createdAt": "2024-05-01T09:00:00"},
        {"id": 2, "name": "Nebula X1 Case", "price": 19.99, "rating": 4.1,
         "reviewCount": 95, "categoryId": 2, "stockQuantity": 8,
         "createdAt": "2024-05-02T09:00:00"},
        {"id": 3, "name": "Astra Laptop 14", "price": 1099.00, "rating": 4.4,
         "reviewCount": 210, "categoryId": 3, "stockQuantity": 5,
         "createdAt": "2024-04-12T09:00:00"},
        {"id": 4, "name": "Astra Laptop 16", "price": 1499.00, "rating": 4.7,
         "reviewCount": 180, "categoryId": 3, "stockQuantity": 0,
         "createdAt": "2024-04-20T09:00:00"},
        {"id": 5, "name": "Pulse Earbuds", "price": 49.99, "rating": 4.2,
         "reviewCount": 812, "categoryId": 4, "stockQuantity": 120,
         "isBestSeller": true, "createdAt": "2024-03-07T09:00:00"},
        {"id": 6, "name": "Pulse Headphones", "price": 89.99, "rating": 3.8,
         "reviewCount": 45, "categoryId": 4, "stockQuantity": 15,
         "createdAt": "2024-03-09T09:00:00"},
        {"id": 7, "name": "Budget Phone Mini", "price": 99.00, "rating": 3.2,
         "reviewCount": 61, "categoryId": 2, "stockQuantity": 200,
         "createdAt": "2024-02-14T09:00:00"},
        {"id": 8, "name": "Studio Microphone", "price": 129.00, "rating": 4.9,
         "reviewCount": 33, "categoryId": 4, "stockQuantity": 3,
         "createdAt": "2024-01-30T09:00:00"},
        {"id": 9, "name": "Clearance Cable", "price": 4.99, "rating": 2.5,
         "reviewCount": 12, "categoryId": 9, "stockQuantity": 500,
         "createdAt": "2024-01-05T09:00:00"},
        {"id": 10, "name": "Phone Tripod", "price": 24.50, "rating": 4.0,
         "reviewCount": 77, "categoryId": 4, "stockQuantity": 0,
         "createdAt": "2024-02-01T09:00:00"}
    ]
}"#;

/// Catalog used as the search collaborator in integration tests.
pub fn fixture_catalog() -> InMemoryCatalog {
    InMemoryCatalog::from_json(CATALOG_FIXTURE).expect("fixture catalog should parse")
}
