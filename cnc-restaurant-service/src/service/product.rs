use std::sync::Arc;

use tracing::{info, warn};

use super::ServiceResult;
use crate::error::{RepositoryError, ServiceError};
use crate::models::{CatalogProduct, Category, ProductDraft, ProductRecord};
use crate::repository::{CategoryRepository, ProductRepository, RestaurantRepository};

/// Product catalog use cases of a restaurant.
#[derive(Clone)]
pub struct ProductService {
    restaurants: Arc<dyn RestaurantRepository>,
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ProductService {
    pub fn new(
        restaurants: Arc<dyn RestaurantRepository>,
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            restaurants,
            products,
            categories,
        }
    }

    /// Unknown restaurants and unknown categories both give an empty list.
    pub fn find_products(
        &self,
        restaurant_id: i64,
        category: Option<&str>,
    ) -> ServiceResult<Vec<CatalogProduct>> {
        info!("Retrieving products for restaurant id '{restaurant_id}'");
        Ok(self
            .products
            .find_all_by_restaurant_id(restaurant_id, category)?)
    }

    pub fn find_product(&self, restaurant_id: i64, product_id: i64) -> ServiceResult<CatalogProduct> {
        info!("Retrieving product id '{product_id}' for restaurant id '{restaurant_id}'");
        self.products
            .find_by_id_and_restaurant_id(product_id, restaurant_id)?
            .ok_or_else(|| {
                ServiceError::UnknownResource(format!(
                    "Unknown product '{product_id}' for restaurant '{restaurant_id}'"
                ))
            })
    }

    pub fn save_product(
        &self,
        restaurant_id: i64,
        product: ProductDraft,
    ) -> ServiceResult<CatalogProduct> {
        self.store(restaurant_id, None, product)
    }

    pub fn update_product(
        &self,
        restaurant_id: i64,
        product_id: i64,
        product: ProductDraft,
    ) -> ServiceResult<CatalogProduct> {
        info!("Retrieving product id '{product_id}' for restaurant '{restaurant_id}'");
        if self
            .products
            .find_by_id_and_restaurant_id(product_id, restaurant_id)?
            .is_none()
        {
            info!("Product not found");
            return Err(missing_product(restaurant_id, product_id));
        }
        info!("Product found");
        self.store(restaurant_id, Some(product_id), product)
    }

    pub fn delete_product(&self, restaurant_id: i64, product_id: i64) -> ServiceResult<()> {
        info!("Retrieving product id '{product_id}' for restaurant '{restaurant_id}'");
        let found = self
            .products
            .find_by_id_and_restaurant_id(product_id, restaurant_id)?
            .ok_or_else(|| missing_product(restaurant_id, product_id))?;
        info!("Deleting product");
        self.products.delete(&found.product)?;
        Ok(())
    }

    pub fn find_categories(&self) -> ServiceResult<Vec<Category>> {
        info!("Retrieving categories");
        Ok(self.categories.find_all()?)
    }

    /// Restaurant must exist, then the category is resolved by name, then
    /// the row is written. The unique (restaurant, name) constraint of the
    /// store decides duplicates.
    fn store(
        &self,
        restaurant_id: i64,
        product_id: Option<i64>,
        product: ProductDraft,
    ) -> ServiceResult<CatalogProduct> {
        info!("Retrieving restaurant id '{restaurant_id}'");
        if self.restaurants.find_by_id(restaurant_id)?.is_none() {
            warn!("Restaurant id '{restaurant_id}' does not exist");
            return Err(ServiceError::UnknownResource(format!(
                "Unknown restaurant {restaurant_id}"
            )));
        }
        info!("Restaurant id '{restaurant_id}' found");

        info!("Retrieving category '{}'", product.category);
        let Some(category) = self.categories.find_by_name(&product.category)? else {
            warn!("Category '{}' does not exist", product.category);
            return Err(ServiceError::UnknownResource(format!(
                "Unknown category {}",
                product.category
            )));
        };
        info!("Category found with id '{}'", category.id);

        let record = ProductRecord {
            id: product_id,
            restaurant_id,
            category_id: category.id,
            name: product.name,
            price: product.price,
        };
        match self.products.save(&record) {
            Ok(saved) => {
                info!("Product id '{}' saved to database", saved.id);
                Ok(CatalogProduct {
                    product: saved,
                    category,
                })
            }
            Err(RepositoryError::UniqueViolation(_)) => Err(ServiceError::ResourceDuplication(
                format!("Product name '{}' already exists", record.name),
            )),
            Err(RepositoryError::ForeignKeyViolation(_)) => Err(ServiceError::UnknownResource(
                format!("Unknown restaurant {restaurant_id}"),
            )),
            Err(RepositoryError::Database(diesel::result::Error::NotFound)) => {
                Err(missing_product(restaurant_id, product_id.unwrap_or_default()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn missing_product(restaurant_id: i64, product_id: i64) -> ServiceError {
    ServiceError::UnknownResource(format!(
        "Product '{product_id}' doesn't exist for restaurant '{restaurant_id}'"
    ))
}
