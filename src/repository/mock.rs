use mockall::mock;

use crate::domain::category::Category;
use crate::domain::product::{ProductPage, ProductSearchQuery};
use crate::repository::{CategoryReader, ProductSearcher, RepositoryResult};

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    }
}

mock! {
    pub ProductSearcher {}

    impl ProductSearcher for ProductSearcher {
        fn search_products(&self, query: &ProductSearchQuery) -> RepositoryResult<ProductPage>;
    }
}
