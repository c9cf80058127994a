use crate::error::RepositoryError;
use crate::models::{
    CatalogProduct, Category, Menu, NewRestaurant, Product, ProductRecord, Restaurant,
};

#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod pg;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

pub trait RestaurantRepository: Send + Sync {
    fn find_by_id(&self, restaurant_id: i64) -> RepositoryResult<Option<Restaurant>>;
    fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Restaurant>>;
    fn exists_by_email(&self, email: &str) -> RepositoryResult<bool>;
    fn insert(&self, restaurant: &NewRestaurant) -> RepositoryResult<Restaurant>;
}

pub trait CategoryRepository: Send + Sync {
    fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Category>>;
    fn find_all(&self) -> RepositoryResult<Vec<Category>>;
}

pub trait ProductRepository: Send + Sync {
    /// Products of a restaurant, optionally narrowed to one category name.
    fn find_all_by_restaurant_id(
        &self,
        restaurant_id: i64,
        category: Option<&str>,
    ) -> RepositoryResult<Vec<CatalogProduct>>;

    fn find_by_id_and_restaurant_id(
        &self,
        product_id: i64,
        restaurant_id: i64,
    ) -> RepositoryResult<Option<CatalogProduct>>;

    /// Inserts the record, or replaces the row with the same id when the
    /// record carries one.
    fn save(&self, record: &ProductRecord) -> RepositoryResult<Product>;

    fn delete(&self, product: &Product) -> RepositoryResult<()>;

    fn count(&self) -> RepositoryResult<i64>;
}

pub trait MenuRepository: Send + Sync {
    fn find_all_by_restaurant_id(&self, restaurant_id: i64) -> RepositoryResult<Vec<Menu>>;
    fn find_by_id_and_restaurant_id(
        &self,
        menu_id: i64,
        restaurant_id: i64,
    ) -> RepositoryResult<Option<Menu>>;
}
