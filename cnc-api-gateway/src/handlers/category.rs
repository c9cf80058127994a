use axum::{Router, extract::State, response::Json, routing::get};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Every product category", body = [CategoryDto]),
    ),
    tag = "categories"
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryDto>>, ApiError> {
    let categories = state.product_service.find_categories()?;
    Ok(Json(categories.into_iter().map(CategoryDto::from).collect()))
}
