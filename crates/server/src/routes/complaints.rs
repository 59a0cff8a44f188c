use axum::{extract::{Query, State}, Json};
use models::{Complaint, ComplaintInput};
use serde::Deserialize;
use tracing::info;

use crate::{errors::JsonApiError, metrics, routes::{users::SecretQuery, AppState}};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ComplaintQuery {
    #[serde(default)]
    pub complaint_id: String,
}

#[utoipa::path(
    post, path = "/submitComplaint", tag = "complaints",
    params(SecretQuery),
    request_body = crate::openapi::ComplaintRequest,
    responses(
        (status = 200, description = "Created complaint"),
        (status = 404, description = "User not found")
    )
)]
pub async fn submit(
    State(state): State<AppState>,
    Query(q): Query<SecretQuery>,
    Json(input): Json<ComplaintInput>,
) -> Result<Json<Complaint>, JsonApiError> {
    let complaint = state.store.submit_complaint(&q.secret_code, input)?;
    metrics::COMPLAINTS_SUBMITTED_TOTAL.inc();
    Ok(Json(complaint))
}

#[utoipa::path(
    get, path = "/getAllComplaintsForUser", tag = "complaints",
    params(SecretQuery),
    responses(
        (status = 200, description = "Caller's complaints in submission order"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_for_user(State(state): State<AppState>, Query(q): Query<SecretQuery>) -> Result<Json<Vec<Complaint>>, JsonApiError> {
    Ok(Json(state.store.list_complaints_for_user(&q.secret_code)?))
}

#[utoipa::path(
    get, path = "/getAllComplaintsForAdmin", tag = "admin",
    responses((status = 200, description = "All complaints, ordered by id"))
)]
pub async fn list_for_admin(State(state): State<AppState>) -> Result<Json<Vec<Complaint>>, JsonApiError> {
    let list = state.store.list_all_complaints()?;
    info!(count = list.len(), "list all complaints");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/viewComplaint", tag = "admin",
    params(ComplaintQuery),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Complaint not found")
    )
)]
pub async fn view(State(state): State<AppState>, Query(q): Query<ComplaintQuery>) -> Result<Json<Complaint>, JsonApiError> {
    Ok(Json(state.store.view_complaint(&q.complaint_id)?))
}

/// Idempotent: resolving an already resolved complaint returns it unchanged.
#[utoipa::path(
    post, path = "/resolveComplaint", tag = "admin",
    params(ComplaintQuery),
    responses(
        (status = 200, description = "Resolved complaint"),
        (status = 404, description = "Complaint not found")
    )
)]
pub async fn resolve(State(state): State<AppState>, Query(q): Query<ComplaintQuery>) -> Result<Json<Complaint>, JsonApiError> {
    let complaint = state.store.resolve_complaint(&q.complaint_id)?;
    metrics::COMPLAINTS_RESOLVED_TOTAL.inc();
    Ok(Json(complaint))
}
