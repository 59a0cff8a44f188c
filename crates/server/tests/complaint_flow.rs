use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::{self, AppState};
use service::Store;

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn build_app() -> Router {
    routes::build_router(AppState::new(Arc::new(Store::sequential())), cors())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

#[tokio::test]
async fn register_submit_resolve_flow() -> anyhow::Result<()> {
    let app = build_app();

    let (status, user) = send(&app, "POST", "/register", Some(json!({"name": "Ann", "email": "a@x.com"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user, json!({"id": "u1", "secret_code": "s1", "name": "Ann", "email": "a@x.com", "complaints": []}));

    let (status, complaint) = send(
        &app,
        "POST",
        "/submitComplaint?secret_code=s1",
        Some(json!({"title": "Late delivery", "summary": "Package arrived 3 days late", "severity": 2})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(complaint["id"], "c1");
    assert_eq!(complaint["resolved"], false);

    let (_, listed) = send(&app, "GET", "/getAllComplaintsForUser?secret_code=s1", None).await?;
    assert_eq!(listed, json!([complaint]));

    let (status, resolved) = send(&app, "POST", "/resolveComplaint?complaint_id=c1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved["resolved"], true);

    // resolution is visible through the user-facing paths
    let (_, listed) = send(&app, "GET", "/getAllComplaintsForUser?secret_code=s1", None).await?;
    assert_eq!(listed[0]["resolved"], true);
    let (_, login) = send(&app, "GET", "/login?secret_code=s1", None).await?;
    assert_eq!(login["complaints"][0]["resolved"], true);

    let (_, all) = send(&app, "GET", "/getAllComplaintsForAdmin", None).await?;
    assert_eq!(all, listed);
    let (_, viewed) = send(&app, "GET", "/viewComplaint?complaint_id=c1", None).await?;
    assert_eq!(viewed, resolved);
    Ok(())
}

#[tokio::test]
async fn resolve_twice_returns_same_record() -> anyhow::Result<()> {
    let app = build_app();
    send(&app, "POST", "/register", Some(json!({"name": "Ann", "email": "a@x.com"}))).await?;
    send(&app, "POST", "/submitComplaint?secret_code=s1", Some(json!({"title": "t", "summary": "s", "severity": 1}))).await?;

    let (first_status, first) = send(&app, "POST", "/resolveComplaint?complaint_id=c1", None).await?;
    let (second_status, second) = send(&app, "POST", "/resolveComplaint?complaint_id=c1", None).await?;
    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn unknown_keys_are_404() -> anyhow::Result<()> {
    let app = build_app();

    let (status, body) = send(&app, "GET", "/login?secret_code=unknown", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");

    // missing parameter behaves like an unknown one
    let (status, _) = send(&app, "GET", "/getAllComplaintsForUser", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/submitComplaint?secret_code=nope", Some(json!({"title": "t"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/viewComplaint?complaint_id=unknown", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Complaint not found");

    let (status, _) = send(&app, "POST", "/resolveComplaint?complaint_id=unknown", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, all) = send(&app, "GET", "/getAllComplaintsForAdmin", None).await?;
    assert_eq!(all, json!([]));
    Ok(())
}

#[tokio::test]
async fn malformed_register_body_is_rejected() -> anyhow::Result<()> {
    let app = build_app();
    let req = Request::builder()
        .method("POST")
        .uri("/register")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let resp = app.clone().oneshot(req).await?;
    assert!(resp.status().is_client_error());

    let (_, health) = send(&app, "GET", "/health", None).await?;
    assert_eq!(health["users"], 0);
    Ok(())
}

#[tokio::test]
async fn health_and_metrics() -> anyhow::Result<()> {
    let app = build_app();
    send(&app, "POST", "/register", Some(json!({"name": "Ann", "email": "a@x.com"}))).await?;
    send(&app, "POST", "/submitComplaint?secret_code=s1", Some(json!({"title": "t", "summary": "s", "severity": 1}))).await?;

    let (status, health) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health, json!({"status": "ok", "users": 1, "complaints": 1, "resolved": 0}));

    let req = Request::builder().uri("/metrics").body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(axum::body::to_bytes(resp.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("complaint_desk_complaints_submitted_total"));
    assert!(text.contains("complaint_desk_open_complaints"));

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/resolveComplaint"].is_object());
    Ok(())
}
