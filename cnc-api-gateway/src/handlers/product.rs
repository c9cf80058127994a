use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::extract::{Path, Query, ValidatedJson};
use crate::models::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/restaurants/{restaurantId}/products",
            get(list_products).post(create_product),
        )
        .route(
            "/restaurants/{restaurantId}/products/{productId}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPath {
    pub restaurant_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPath {
    pub restaurant_id: i64,
    pub product_id: i64,
}

#[utoipa::path(
    get,
    path = "/restaurants/{restaurantId}/products",
    params(
        ("restaurantId" = i64, Path, description = "Restaurant id"),
        ("category" = Option<String>, Query, description = "Only products of this category"),
    ),
    responses(
        (status = 200, description = "Products of the restaurant", body = [ProductDto]),
        (status = 400, description = "Invalid restaurant id", body = ApiErrorResponse),
    ),
    tag = "products"
)]
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Path(path): Path<RestaurantPath>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Vec<ProductDto>>, ApiError> {
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let products = state
        .product_service
        .find_products(path.restaurant_id, category)?;
    info!("Found {} product(s)", products.len());
    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/restaurants/{restaurantId}/products/{productId}",
    params(
        ("restaurantId" = i64, Path, description = "Restaurant id"),
        ("productId" = i64, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Product found", body = ProductDto),
        (status = 400, description = "Invalid id", body = ApiErrorResponse),
        (status = 404, description = "Unknown product", body = ApiErrorResponse),
    ),
    tag = "products"
)]
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(path): Path<ProductPath>,
) -> Result<Json<ProductDto>, ApiError> {
    let product = state
        .product_service
        .find_product(path.restaurant_id, path.product_id)?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    post,
    path = "/restaurants/{restaurantId}/products",
    params(("restaurantId" = i64, Path, description = "Restaurant id")),
    request_body = ProductDto,
    responses(
        (status = 201, description = "Product created", body = ProductDto),
        (status = 400, description = "Invalid product", body = ApiErrorResponse),
        (status = 404, description = "Unknown restaurant or category", body = ApiErrorResponse),
        (status = 409, description = "Product name already used", body = ApiErrorResponse),
    ),
    tag = "products"
)]
#[instrument(skip(state))]
pub async fn create_product(
    State(state): State<AppState>,
    Path(path): Path<RestaurantPath>,
    ValidatedJson(product): ValidatedJson<ProductDto>,
) -> Result<(StatusCode, Json<ProductDto>), ApiError> {
    let saved = state
        .product_service
        .save_product(path.restaurant_id, product.into())?;
    info!("Product '{}' created", saved.product.id);
    Ok((StatusCode::CREATED, Json(saved.into())))
}

#[utoipa::path(
    put,
    path = "/restaurants/{restaurantId}/products/{productId}",
    params(
        ("restaurantId" = i64, Path, description = "Restaurant id"),
        ("productId" = i64, Path, description = "Product id"),
    ),
    request_body = ProductDto,
    responses(
        (status = 200, description = "Product replaced", body = ProductDto),
        (status = 400, description = "Invalid product", body = ApiErrorResponse),
        (status = 404, description = "Unknown product or category", body = ApiErrorResponse),
        (status = 409, description = "Product name already used", body = ApiErrorResponse),
    ),
    tag = "products"
)]
#[instrument(skip(state))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(path): Path<ProductPath>,
    ValidatedJson(product): ValidatedJson<ProductDto>,
) -> Result<Json<ProductDto>, ApiError> {
    let saved = state.product_service.update_product(
        path.restaurant_id,
        path.product_id,
        product.into(),
    )?;
    Ok(Json(saved.into()))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{restaurantId}/products/{productId}",
    params(
        ("restaurantId" = i64, Path, description = "Restaurant id"),
        ("productId" = i64, Path, description = "Product id"),
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Invalid id", body = ApiErrorResponse),
        (status = 404, description = "Unknown product", body = ApiErrorResponse),
    ),
    tag = "products"
)]
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(path): Path<ProductPath>,
) -> Result<StatusCode, ApiError> {
    state
        .product_service
        .delete_product(path.restaurant_id, path.product_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use cnc_restaurant_service::repository::memory::MemoryRepository;
    use serde_json::{Value, json};

    use crate::handlers::testing::{assert_error, json_body, send};

    fn burger() -> Value {
        json!({"name": "Burger", "price": 12.5, "category": "Plat"})
    }

    async fn create(repository: &Arc<MemoryRepository>, restaurant_id: i64, body: Value) -> Value {
        let uri = format!("/restaurants/{restaurant_id}/products");
        let response = send(repository, "POST", &uri, Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let repository = Arc::new(MemoryRepository::seeded());
        let restaurant = repository.add_restaurant("Chez Test", "owner@example.com");

        let created = create(&repository, restaurant.id, burger()).await;
        assert_eq!(created["name"], "Burger");
        assert_eq!(created["price"], "12.50");
        assert_eq!(created["category"], "Plat");

        let uri = format!("/restaurants/{}/products/{}", restaurant.id, created["id"]);
        let response = send(&repository, "GET", &uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, created);
    }

    #[tokio::test]
    async fn test_create_ignores_body_id() {
        let repository = Arc::new(MemoryRepository::seeded());
        let restaurant = repository.add_restaurant("Chez Test", "owner@example.com");

        let created = create(
            &repository,
            restaurant.id,
            json!({"id": 9999, "name": "Burger", "price": "12.50", "category": "Plat"}),
        )
        .await;

        assert_ne!(created["id"], 9999);
    }

    #[tokio::test]
    async fn test_list_products_with_category_filter() {
        let repository = Arc::new(MemoryRepository::seeded());
        let restaurant = repository.add_restaurant("Chez Test", "owner@example.com");
        create(&repository, restaurant.id, burger()).await;
        create(
            &repository,
            restaurant.id,
            json!({"name": "Cola", "price": "2.50", "category": "Boisson"}),
        )
        .await;

        let all = send(
            &repository,
            "GET",
            &format!("/restaurants/{}/products", restaurant.id),
            None,
        )
        .await;
        let drinks = send(
            &repository,
            "GET",
            &format!("/restaurants/{}/products?category=Boisson", restaurant.id),
            None,
        )
        .await;

        assert_eq!(json_body(all).await.as_array().unwrap().len(), 2);
        let drinks = json_body(drinks).await;
        assert_eq!(drinks.as_array().unwrap().len(), 1);
        assert_eq!(drinks[0]["name"], "Cola");
    }

    #[tokio::test]
    async fn test_list_products_of_unknown_restaurant_is_empty() {
        let repository = Arc::new(MemoryRepository::seeded());

        let response = send(&repository, "GET", "/restaurants/424242/products", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_get_unknown_product() {
        let repository = Arc::new(MemoryRepository::seeded());
        let restaurant = repository.add_restaurant("Chez Test", "owner@example.com");

        let uri = format!("/restaurants/{}/products/404", restaurant.id);
        let response = send(&repository, "GET", &uri, None).await;

        let body = assert_error(
            response,
            StatusCode::NOT_FOUND,
            &format!("Unknown product '404' for restaurant '{}'", restaurant.id),
        )
        .await;
        assert_eq!(body["status"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_product_of_another_restaurant_is_not_found() {
        let repository = Arc::new(MemoryRepository::seeded());
        let owner = repository.add_restaurant("Owner", "owner@example.com");
        let other = repository.add_restaurant("Other", "other@example.com");
        let created = create(&repository, owner.id, burger()).await;

        let uri = format!("/restaurants/{}/products/{}", other.id, created["id"]);
        let response = send(&repository, "GET", &uri, None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_restaurant_id() {
        let repository = Arc::new(MemoryRepository::seeded());

        let response = send(&repository, "GET", "/restaurants/abc/products", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["status"], "BAD_REQUEST");
        assert!(body["errors"]["restaurantId"].is_string());
    }

    #[tokio::test]
    async fn test_create_for_unknown_restaurant() {
        let repository = Arc::new(MemoryRepository::seeded());

        let response = send(
            &repository,
            "POST",
            "/restaurants/424242/products",
            Some(burger()),
        )
        .await;

        assert_error(response, StatusCode::NOT_FOUND, "Unknown restaurant 424242").await;
    }

    #[tokio::test]
    async fn test_create_with_unknown_category() {
        let repository = Arc::new(MemoryRepository::seeded());
        let restaurant = repository.add_restaurant("Chez Test", "owner@example.com");

        let uri = format!("/restaurants/{}/products", restaurant.id);
        let response = send(
            &repository,
            "POST",
            &uri,
            Some(json!({"name": "Burger", "price": 12.5, "category": "Brunch"})),
        )
        .await;

        assert_error(response, StatusCode::NOT_FOUND, "Unknown category Brunch").await;
    }

    #[tokio::test]
    async fn test_create_duplicated_name() {
        let repository = Arc::new(MemoryRepository::seeded());
        let restaurant = repository.add_restaurant("Chez Test", "owner@example.com");
        create(&repository, restaurant.id, burger()).await;

        let uri = format!("/restaurants/{}/products", restaurant.id);
        let response = send(&repository, "POST", &uri, Some(burger())).await;

        assert_error(
            response,
            StatusCode::CONFLICT,
            "Product name 'Burger' already exists",
        )
        .await;
    }

    #[tokio::test]
    async fn test_create_invalid_product() {
        let repository = Arc::new(MemoryRepository::seeded());
        let restaurant = repository.add_restaurant("Chez Test", "owner@example.com");

        let uri = format!("/restaurants/{}/products", restaurant.id);
        let response = send(
            &repository,
            "POST",
            &uri,
            Some(json!({"name": "", "price": -1, "category": "Plat"})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["errors"]["name"].is_string());
        assert!(body["errors"]["price"].is_string());
    }

    #[tokio::test]
    async fn test_create_malformed_body() {
        let repository = Arc::new(MemoryRepository::seeded());
        let restaurant = repository.add_restaurant("Chez Test", "owner@example.com");

        let uri = format!("/restaurants/{}/products", restaurant.id);
        let response = send(&repository, "POST", &uri, Some(json!({"price": [1, 2]}))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["status"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_update_product() {
        let repository = Arc::new(MemoryRepository::seeded());
        let restaurant = repository.add_restaurant("Chez Test", "owner@example.com");
        let created = create(&repository, restaurant.id, burger()).await;

        let uri = format!("/restaurants/{}/products/{}", restaurant.id, created["id"]);
        let response = send(
            &repository,
            "PUT",
            &uri,
            Some(json!({"name": "Cheeseburger", "price": "13.90", "category": "Plat"})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let updated = json_body(response).await;
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["name"], "Cheeseburger");
        assert_eq!(updated["price"], "13.90");
    }

    #[tokio::test]
    async fn test_update_unknown_product() {
        let repository = Arc::new(MemoryRepository::seeded());
        let restaurant = repository.add_restaurant("Chez Test", "owner@example.com");

        let uri = format!("/restaurants/{}/products/404", restaurant.id);
        let response = send(&repository, "PUT", &uri, Some(burger())).await;

        assert_error(
            response,
            StatusCode::NOT_FOUND,
            &format!("Product '404' doesn't exist for restaurant '{}'", restaurant.id),
        )
        .await;
    }

    #[tokio::test]
    async fn test_update_to_existing_name() {
        let repository = Arc::new(MemoryRepository::seeded());
        let restaurant = repository.add_restaurant("Chez Test", "owner@example.com");
        create(&repository, restaurant.id, burger()).await;
        let fries = create(
            &repository,
            restaurant.id,
            json!({"name": "Fries", "price": 3, "category": "Plat"}),
        )
        .await;

        let uri = format!("/restaurants/{}/products/{}", restaurant.id, fries["id"]);
        let response = send(&repository, "PUT", &uri, Some(burger())).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let repository = Arc::new(MemoryRepository::seeded());
        let restaurant = repository.add_restaurant("Chez Test", "owner@example.com");
        let created = create(&repository, restaurant.id, burger()).await;
        let uri = format!("/restaurants/{}/products/{}", restaurant.id, created["id"]);

        let deleted = send(&repository, "DELETE", &uri, None).await;
        let again = send(&repository, "DELETE", &uri, None).await;

        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }
}
