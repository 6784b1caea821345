pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod services;

/// Products with fewer units in stock than this are flagged as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;
