pub mod auth;
pub mod category;
pub mod menu;
pub mod product;

pub use auth::router as auth_router;
pub use category::router as category_router;
pub use menu::router as menu_router;
pub use product::router as product_router;

use cnc_restaurant_service::service::{AuthenticationService, MenuService, ProductService};
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthenticationService,
    pub product_service: ProductService,
    pub menu_service: MenuService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::check_email_exists,
        auth::check_email_exists_head,
        auth::login,
        product::list_products,
        product::get_product,
        product::create_product,
        product::update_product,
        product::delete_product,
        category::list_categories,
        menu::list_menus,
        menu::get_menu,
    ),
    components(
        schemas(
            crate::models::RegistrationFormDto,
            crate::models::LoginFormDto,
            crate::models::RestaurantDto,
            crate::models::AuthToken,
            crate::models::ProductDto,
            crate::models::CategoryDto,
            crate::models::MenuDto,
            crate::models::ApiErrorResponse
        )
    ),
    tags(
        (name = "auth", description = "Restaurant registration and login"),
        (name = "products", description = "Product catalog of a restaurant"),
        (name = "categories", description = "Product categories"),
        (name = "menus", description = "Menus of a restaurant")
    ),
    info(
        title = "Click and Collect API",
        description = "Restaurant back office for click and collect ordering",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use chrono::TimeDelta;
    use cnc_restaurant_service::repository::memory::MemoryRepository;
    use cnc_restaurant_service::service::{AuthenticationService, MenuService, ProductService};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::AppState;

    pub const SECRET_KEY: &str = "test-secret";

    pub fn state(repository: Arc<MemoryRepository>) -> AppState {
        AppState {
            auth_service: AuthenticationService::new(
                repository.clone(),
                SECRET_KEY,
                TimeDelta::hours(1),
            ),
            product_service: ProductService::new(
                repository.clone(),
                repository.clone(),
                repository.clone(),
            ),
            menu_service: MenuService::new(repository),
        }
    }

    /// Sends one request through the full application router.
    pub async fn send(
        repository: &Arc<MemoryRepository>,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> Response {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        crate::app(state(repository.clone()))
            .oneshot(request)
            .await
            .unwrap()
    }

    pub async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub async fn assert_error(response: Response, status: StatusCode, message: &str) -> Value {
        assert_eq!(response.status(), status);
        let body = json_body(response).await;
        assert_eq!(body["message"], message);
        body
    }
}
