use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod validation;

use handlers::{ApiDoc, AppState, auth_router, category_router, menu_router, product_router};

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(auth_router())
        .merge(product_router())
        .merge(category_router())
        .merge(menu_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
