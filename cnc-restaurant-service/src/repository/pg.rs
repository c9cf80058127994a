use diesel::prelude::*;
use diesel::{insert_into, PgConnection};

use super::{
    CategoryRepository, MenuRepository, ProductRepository, RepositoryResult,
    RestaurantRepository,
};
use crate::models::{
    CatalogProduct, Category, Menu, NewRestaurant, Product, ProductRecord, Restaurant,
};
use crate::schema::{categories, menus, products, restaurants};
use crate::DbPool;

/// Diesel-backed repositories sharing one connection pool.
#[derive(Clone)]
pub struct PgRepository {
    pool: DbPool,
}

impl PgRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut PgConnection) -> QueryResult<T>,
    ) -> RepositoryResult<T> {
        let mut conn = self.pool.get()?;
        Ok(f(&mut *conn)?)
    }
}

impl RestaurantRepository for PgRepository {
    fn find_by_id(&self, restaurant_id: i64) -> RepositoryResult<Option<Restaurant>> {
        self.with_conn(|conn| {
            restaurants::table
                .find(restaurant_id)
                .select(Restaurant::as_select())
                .first(conn)
                .optional()
        })
    }

    fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Restaurant>> {
        self.with_conn(|conn| {
            restaurants::table
                .filter(restaurants::email.eq(email))
                .select(Restaurant::as_select())
                .first(conn)
                .optional()
        })
    }

    fn exists_by_email(&self, email: &str) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            diesel::select(diesel::dsl::exists(
                restaurants::table.filter(restaurants::email.eq(email)),
            ))
            .get_result(conn)
        })
    }

    fn insert(&self, restaurant: &NewRestaurant) -> RepositoryResult<Restaurant> {
        self.with_conn(|conn| {
            insert_into(restaurants::table)
                .values(restaurant)
                .returning(Restaurant::as_returning())
                .get_result(conn)
        })
    }
}

impl CategoryRepository for PgRepository {
    fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Category>> {
        self.with_conn(|conn| {
            categories::table
                .filter(categories::name.eq(name))
                .select(Category::as_select())
                .first(conn)
                .optional()
        })
    }

    fn find_all(&self) -> RepositoryResult<Vec<Category>> {
        self.with_conn(|conn| {
            categories::table
                .select(Category::as_select())
                .order(categories::name)
                .load(conn)
        })
    }
}

impl ProductRepository for PgRepository {
    fn find_all_by_restaurant_id(
        &self,
        restaurant_id: i64,
        category: Option<&str>,
    ) -> RepositoryResult<Vec<CatalogProduct>> {
        self.with_conn(|conn| {
            let mut query = products::table
                .inner_join(categories::table)
                .filter(products::restaurant_id.eq(restaurant_id))
                .select((Product::as_select(), Category::as_select()))
                .order(products::id)
                .into_boxed();
            if let Some(category) = category {
                query = query.filter(categories::name.eq(category));
            }
            query.load::<(Product, Category)>(conn)
        })
        .map(|rows| rows.into_iter().map(CatalogProduct::from).collect())
    }

    fn find_by_id_and_restaurant_id(
        &self,
        product_id: i64,
        restaurant_id: i64,
    ) -> RepositoryResult<Option<CatalogProduct>> {
        self.with_conn(|conn| {
            products::table
                .inner_join(categories::table)
                .filter(products::id.eq(product_id))
                .filter(products::restaurant_id.eq(restaurant_id))
                .select((Product::as_select(), Category::as_select()))
                .first::<(Product, Category)>(conn)
                .optional()
        })
        .map(|row| row.map(CatalogProduct::from))
    }

    fn save(&self, record: &ProductRecord) -> RepositoryResult<Product> {
        self.with_conn(|conn| match record.id {
            None => insert_into(products::table)
                .values(record)
                .returning(Product::as_returning())
                .get_result(conn),
            Some(product_id) => diesel::update(products::table.find(product_id))
                .set(record)
                .returning(Product::as_returning())
                .get_result(conn),
        })
    }

    fn delete(&self, product: &Product) -> RepositoryResult<()> {
        self.with_conn(|conn| {
            diesel::delete(products::table.find(product.id))
                .execute(conn)
                .map(|_| ())
        })
    }

    fn count(&self) -> RepositoryResult<i64> {
        self.with_conn(|conn| products::table.count().get_result(conn))
    }
}

impl MenuRepository for PgRepository {
    fn find_all_by_restaurant_id(&self, restaurant_id: i64) -> RepositoryResult<Vec<Menu>> {
        self.with_conn(|conn| {
            menus::table
                .filter(menus::restaurant_id.eq(restaurant_id))
                .select(Menu::as_select())
                .order(menus::id)
                .load(conn)
        })
    }

    fn find_by_id_and_restaurant_id(
        &self,
        menu_id: i64,
        restaurant_id: i64,
    ) -> RepositoryResult<Option<Menu>> {
        self.with_conn(|conn| {
            menus::table
                .filter(menus::id.eq(menu_id))
                .filter(menus::restaurant_id.eq(restaurant_id))
                .select(Menu::as_select())
                .first(conn)
                .optional()
        })
    }
}
