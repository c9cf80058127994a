use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::extract::{Query, ValidatedJson};
use crate::models::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/auth/register",
            post(register)
                .get(check_email_exists)
                .head(check_email_exists_head),
        )
        .route("/auth/login", post(login))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegistrationFormDto,
    responses(
        (status = 201, description = "Restaurant registered", body = RestaurantDto),
        (status = 400, description = "Invalid registration form", body = ApiErrorResponse),
        (status = 409, description = "Email already registered", body = ApiErrorResponse),
    ),
    tag = "auth"
)]
#[instrument(skip_all, fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<RegistrationFormDto>,
) -> Result<(StatusCode, Json<RestaurantDto>), ApiError> {
    let restaurant = state.auth_service.register(form.into())?;
    info!("Restaurant '{}' registered", restaurant.id);
    Ok((StatusCode::CREATED, Json(restaurant.into())))
}

#[utoipa::path(
    get,
    path = "/auth/register",
    params(("email" = String, Query, description = "Email to look up")),
    responses(
        (status = 200, description = "Whether the email is already registered", body = bool),
        (status = 400, description = "Missing email", body = ApiErrorResponse),
    ),
    tag = "auth"
)]
#[instrument(skip(state))]
pub async fn check_email_exists(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<bool>, ApiError> {
    let exists = state
        .auth_service
        .check_email_exists_boolean(&normalize_email(&query.email))?;
    Ok(Json(exists))
}

#[utoipa::path(
    head,
    path = "/auth/register",
    params(("email" = String, Query, description = "Email to look up")),
    responses(
        (status = 200, description = "Email is registered"),
        (status = 404, description = "Email is unknown"),
    ),
    tag = "auth"
)]
#[instrument(skip(state))]
pub async fn check_email_exists_head(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<StatusCode, ApiError> {
    state
        .auth_service
        .check_email_exists(&normalize_email(&query.email))?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginFormDto,
    responses(
        (status = 200, description = "Token issued", body = AuthToken),
        (status = 400, description = "Invalid login form", body = ApiErrorResponse),
        (status = 401, description = "Invalid credentials", body = ApiErrorResponse),
    ),
    tag = "auth"
)]
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<LoginFormDto>,
) -> Result<Json<AuthToken>, ApiError> {
    let token = state
        .auth_service
        .login(&normalize_email(&form.email), &form.password)?;
    Ok(Json(token.into()))
}
