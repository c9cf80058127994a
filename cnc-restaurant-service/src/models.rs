use bigdecimal::BigDecimal;
use diesel::prelude::*;

use crate::schema::{categories, menus, products, restaurants};

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    pub name: String,
    pub email: String,
    /// PHC string produced by argon2, never the plain password.
    pub password: String,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = categories)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Category))]
#[diesel(table_name = products)]
pub struct Product {
    pub id: i64,
    pub restaurant_id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: BigDecimal,
}

/// Product row as written by a save. `id` is `None` for an insert and set
/// for a full replace of an existing row.
#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = products)]
pub struct ProductRecord {
    pub id: Option<i64>,
    pub restaurant_id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: BigDecimal,
}

/// A product joined with its category, the shape every read returns.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogProduct {
    pub product: Product,
    pub category: Category,
}

impl From<(Product, Category)> for CatalogProduct {
    fn from((product, category): (Product, Category)) -> Self {
        Self { product, category }
    }
}

/// Product as submitted by a client, before the category name is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: BigDecimal,
    pub category: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(table_name = menus)]
pub struct Menu {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub price: BigDecimal,
}
