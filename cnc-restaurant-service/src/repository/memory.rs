use std::sync::{Mutex, MutexGuard};

use bigdecimal::{BigDecimal, RoundingMode};

use super::{
    CategoryRepository, MenuRepository, ProductRepository, RepositoryResult,
    RestaurantRepository,
};
use crate::error::RepositoryError;
use crate::models::{
    CatalogProduct, Category, Menu, NewRestaurant, Product, ProductRecord, Restaurant,
};

#[derive(Default)]
struct Tables {
    restaurants: Vec<Restaurant>,
    categories: Vec<Category>,
    products: Vec<Product>,
    menus: Vec<Menu>,
    sequence: i64,
}

/// Prices come back from a `NUMERIC(10, 2)` column with two decimals.
fn numeric_price(price: &BigDecimal) -> BigDecimal {
    price.with_scale_round(2, RoundingMode::HalfUp)
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }

    fn catalog_product(&self, product: &Product) -> Option<CatalogProduct> {
        self.categories
            .iter()
            .find(|c| c.id == product.category_id)
            .map(|category| CatalogProduct {
                product: product.clone(),
                category: category.clone(),
            })
    }
}

/// Repositories kept in process memory, mirroring the constraints of the
/// Postgres schema (unique email, unique product name per restaurant,
/// foreign keys).
#[derive(Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same seed as the initial migration.
    pub fn seeded() -> Self {
        let repository = Self::new();
        for name in ["Entrée", "Plat", "Dessert", "Boisson"] {
            repository.add_category(name);
        }
        repository
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_category(&self, name: &str) -> Category {
        let mut tables = self.lock();
        let category = Category {
            id: tables.next_id(),
            name: name.to_string(),
        };
        tables.categories.push(category.clone());
        category
    }

    pub fn add_restaurant(&self, name: &str, email: &str) -> Restaurant {
        let mut tables = self.lock();
        let restaurant = Restaurant {
            id: tables.next_id(),
            name: name.to_string(),
            email: email.to_string(),
            password: String::new(),
        };
        tables.restaurants.push(restaurant.clone());
        restaurant
    }

    pub fn add_menu(&self, restaurant_id: i64, name: &str, price: BigDecimal) -> Menu {
        let mut tables = self.lock();
        let menu = Menu {
            id: tables.next_id(),
            restaurant_id,
            name: name.to_string(),
            price: numeric_price(&price),
        };
        tables.menus.push(menu.clone());
        menu
    }
}

impl RestaurantRepository for MemoryRepository {
    fn find_by_id(&self, restaurant_id: i64) -> RepositoryResult<Option<Restaurant>> {
        Ok(self
            .lock()
            .restaurants
            .iter()
            .find(|r| r.id == restaurant_id)
            .cloned())
    }

    fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Restaurant>> {
        Ok(self
            .lock()
            .restaurants
            .iter()
            .find(|r| r.email == email)
            .cloned())
    }

    fn exists_by_email(&self, email: &str) -> RepositoryResult<bool> {
        Ok(self.lock().restaurants.iter().any(|r| r.email == email))
    }

    fn insert(&self, restaurant: &NewRestaurant) -> RepositoryResult<Restaurant> {
        let mut tables = self.lock();
        if tables.restaurants.iter().any(|r| r.email == restaurant.email) {
            return Err(RepositoryError::UniqueViolation(
                "duplicate key value violates unique constraint \"restaurants_email_key\""
                    .to_string(),
            ));
        }
        let saved = Restaurant {
            id: tables.next_id(),
            name: restaurant.name.clone(),
            email: restaurant.email.clone(),
            password: restaurant.password.clone(),
        };
        tables.restaurants.push(saved.clone());
        Ok(saved)
    }
}

impl CategoryRepository for MemoryRepository {
    fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Category>> {
        Ok(self
            .lock()
            .categories
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    fn find_all(&self) -> RepositoryResult<Vec<Category>> {
        let mut categories = self.lock().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

impl ProductRepository for MemoryRepository {
    fn find_all_by_restaurant_id(
        &self,
        restaurant_id: i64,
        category: Option<&str>,
    ) -> RepositoryResult<Vec<CatalogProduct>> {
        let tables = self.lock();
        Ok(tables
            .products
            .iter()
            .filter(|p| p.restaurant_id == restaurant_id)
            .filter_map(|p| tables.catalog_product(p))
            .filter(|p| category.map_or(true, |name| p.category.name == name))
            .collect())
    }

    fn find_by_id_and_restaurant_id(
        &self,
        product_id: i64,
        restaurant_id: i64,
    ) -> RepositoryResult<Option<CatalogProduct>> {
        let tables = self.lock();
        Ok(tables
            .products
            .iter()
            .find(|p| p.id == product_id && p.restaurant_id == restaurant_id)
            .and_then(|p| tables.catalog_product(p)))
    }

    fn save(&self, record: &ProductRecord) -> RepositoryResult<Product> {
        let mut tables = self.lock();
        if !tables.restaurants.iter().any(|r| r.id == record.restaurant_id)
            || !tables.categories.iter().any(|c| c.id == record.category_id)
        {
            return Err(RepositoryError::ForeignKeyViolation(
                "insert or update on table \"products\" violates foreign key constraint"
                    .to_string(),
            ));
        }
        let duplicated = tables.products.iter().any(|p| {
            p.restaurant_id == record.restaurant_id
                && p.name == record.name
                && Some(p.id) != record.id
        });
        if duplicated {
            return Err(RepositoryError::UniqueViolation(
                "duplicate key value violates unique constraint \"products_restaurant_id_name_key\""
                    .to_string(),
            ));
        }

        let product = Product {
            id: match record.id {
                Some(id) => id,
                None => tables.next_id(),
            },
            restaurant_id: record.restaurant_id,
            category_id: record.category_id,
            name: record.name.clone(),
            price: numeric_price(&record.price),
        };
        match tables.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product.clone(),
            None if record.id.is_some() => {
                return Err(RepositoryError::Database(diesel::result::Error::NotFound))
            }
            None => tables.products.push(product.clone()),
        }
        Ok(product)
    }

    fn delete(&self, product: &Product) -> RepositoryResult<()> {
        self.lock().products.retain(|p| p.id != product.id);
        Ok(())
    }

    fn count(&self) -> RepositoryResult<i64> {
        Ok(self.lock().products.len() as i64)
    }
}

impl MenuRepository for MemoryRepository {
    fn find_all_by_restaurant_id(&self, restaurant_id: i64) -> RepositoryResult<Vec<Menu>> {
        Ok(self
            .lock()
            .menus
            .iter()
            .filter(|m| m.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    fn find_by_id_and_restaurant_id(
        &self,
        menu_id: i64,
        restaurant_id: i64,
    ) -> RepositoryResult<Option<Menu>> {
        Ok(self
            .lock()
            .menus
            .iter()
            .find(|m| m.id == menu_id && m.restaurant_id == restaurant_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn record(restaurant_id: i64, category_id: i64, name: &str) -> ProductRecord {
        ProductRecord {
            id: None,
            restaurant_id,
            category_id,
            name: name.to_string(),
            price: BigDecimal::from_str("12.56").unwrap(),
        }
    }

    #[test]
    fn test_duplicate_name_in_same_restaurant_is_rejected() {
        let repository = MemoryRepository::seeded();
        let restaurant = repository.add_restaurant("Chez Test", "test@example.com");
        let category = repository.find_by_name("Plat").unwrap().unwrap();

        repository
            .save(&record(restaurant.id, category.id, "Test product"))
            .unwrap();
        let result = repository.save(&record(restaurant.id, category.id, "Test product"));

        assert!(matches!(result, Err(RepositoryError::UniqueViolation(_))));
        assert_eq!(repository.count().unwrap(), 1);
    }

    #[test]
    fn test_same_name_in_other_restaurant_is_accepted() {
        let repository = MemoryRepository::seeded();
        let first = repository.add_restaurant("First", "first@example.com");
        let second = repository.add_restaurant("Second", "second@example.com");
        let category = repository.find_by_name("Plat").unwrap().unwrap();

        repository
            .save(&record(first.id, category.id, "Test product"))
            .unwrap();
        repository
            .save(&record(second.id, category.id, "Test product"))
            .unwrap();

        assert_eq!(repository.count().unwrap(), 2);
    }

    #[test]
    fn test_filter_by_category() {
        let repository = MemoryRepository::seeded();
        let restaurant = repository.add_restaurant("Chez Test", "test@example.com");
        let plat = repository.find_by_name("Plat").unwrap().unwrap();
        let dessert = repository.find_by_name("Dessert").unwrap().unwrap();
        repository
            .save(&record(restaurant.id, plat.id, "Burger"))
            .unwrap();
        repository
            .save(&record(restaurant.id, dessert.id, "Tiramisu"))
            .unwrap();

        let all = ProductRepository::find_all_by_restaurant_id(&repository, restaurant.id, None)
            .unwrap();
        let desserts =
            ProductRepository::find_all_by_restaurant_id(&repository, restaurant.id, Some("Dessert"))
                .unwrap();
        let unknown =
            ProductRepository::find_all_by_restaurant_id(&repository, restaurant.id, Some("test"))
                .unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(desserts.len(), 1);
        assert_eq!(desserts[0].product.name, "Tiramisu");
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_price_is_stored_with_two_decimals() {
        let repository = MemoryRepository::seeded();
        let restaurant = repository.add_restaurant("Chez Test", "test@example.com");
        let category = repository.find_by_name("Plat").unwrap().unwrap();
        let mut burger = record(restaurant.id, category.id, "Burger");
        burger.price = BigDecimal::from_str("12.5").unwrap();

        let saved = repository.save(&burger).unwrap();
        let menu = repository.add_menu(restaurant.id, "Formule", BigDecimal::from(15));

        assert_eq!(saved.price.to_string(), "12.50");
        assert_eq!(menu.price.to_string(), "15.00");
    }
}
