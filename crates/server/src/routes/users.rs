use axum::{extract::{Query, State}, Json};
use models::{RegisterInput, User};
use serde::Deserialize;
use tracing::info;

use crate::{errors::JsonApiError, metrics, routes::AppState};

/// `?secret_code=`; a missing value is treated as an unknown secret.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SecretQuery {
    #[serde(default)]
    pub secret_code: String,
}

/// The response is the only time the secret is handed out.
#[utoipa::path(
    post, path = "/register", tag = "users",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 200, description = "Registered; body carries id and secret_code"),
        (status = 400, description = "Malformed JSON")
    )
)]
pub async fn register(State(state): State<AppState>, Json(input): Json<RegisterInput>) -> Result<Json<User>, JsonApiError> {
    let user = state.store.register(input)?;
    metrics::USERS_REGISTERED_TOTAL.inc();
    info!(user_id = %user.id, "register ok");
    Ok(Json(user))
}

#[utoipa::path(
    get, path = "/login", tag = "users",
    params(SecretQuery),
    responses(
        (status = 200, description = "User with current complaints"),
        (status = 404, description = "User not found")
    )
)]
pub async fn login(State(state): State<AppState>, Query(q): Query<SecretQuery>) -> Result<Json<User>, JsonApiError> {
    Ok(Json(state.store.authenticate(&q.secret_code)?))
}
