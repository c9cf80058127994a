use axum::{Router, extract::State, response::Json, routing::get};
use serde::Deserialize;
use tracing::instrument;

use crate::error::ApiError;
use crate::extract::Path;
use crate::models::*;

use super::AppState;
use super::product::RestaurantPath;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants/{restaurantId}/menus", get(list_menus))
        .route("/restaurants/{restaurantId}/menus/{menuId}", get(get_menu))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPath {
    pub restaurant_id: i64,
    pub menu_id: i64,
}

#[utoipa::path(
    get,
    path = "/restaurants/{restaurantId}/menus",
    params(("restaurantId" = i64, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Menus of the restaurant", body = [MenuDto]),
        (status = 400, description = "Invalid restaurant id", body = ApiErrorResponse),
    ),
    tag = "menus"
)]
#[instrument(skip(state))]
pub async fn list_menus(
    State(state): State<AppState>,
    Path(path): Path<RestaurantPath>,
) -> Result<Json<Vec<MenuDto>>, ApiError> {
    let menus = state.menu_service.find_menus(path.restaurant_id)?;
    Ok(Json(menus.into_iter().map(MenuDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/restaurants/{restaurantId}/menus/{menuId}",
    params(
        ("restaurantId" = i64, Path, description = "Restaurant id"),
        ("menuId" = i64, Path, description = "Menu id"),
    ),
    responses(
        (status = 200, description = "Menu found", body = MenuDto),
        (status = 400, description = "Invalid id", body = ApiErrorResponse),
        (status = 404, description = "Unknown menu", body = ApiErrorResponse),
    ),
    tag = "menus"
)]
#[instrument(skip(state))]
pub async fn get_menu(
    State(state): State<AppState>,
    Path(path): Path<MenuPath>,
) -> Result<Json<MenuDto>, ApiError> {
    let menu = state
        .menu_service
        .find_menu(path.restaurant_id, path.menu_id)?;
    Ok(Json(menu.into()))
}
