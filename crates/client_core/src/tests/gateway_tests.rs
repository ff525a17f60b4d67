use super::*;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

async fn spawn_server(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn gateway_for(base: &str) -> HttpWorkflowGateway {
    HttpWorkflowGateway::new(Url::parse(base).expect("base url"))
}

async fn two_workflows() -> Json<Value> {
    Json(json!([
        {"id": 1, "description": "A", "version": 1},
        {"id": 2, "description": "B", "version": 2}
    ]))
}

#[derive(Clone, Default)]
struct SeenIds(Arc<Mutex<Vec<String>>>);

async fn steps_for(
    State(seen): State<SeenIds>,
    Query(query): Query<StepQuery>,
) -> Json<Value> {
    seen.0.lock().await.push(query.id.clone());
    Json(json!({"steps": [{"id": "s1", "name": "Send OTP"}], "workflow": query.id}))
}

#[tokio::test]
async fn catalog_keeps_server_order() {
    let base = spawn_server(Router::new().route("/api/workflows/", get(two_workflows))).await;

    let catalog = gateway_for(&base).fetch_catalog().await.expect("catalog");

    let descriptions: Vec<&str> = catalog.iter().map(|w| w.description.as_str()).collect();
    assert_eq!(descriptions, ["A", "B"]);
    assert_eq!(catalog[0].id, Some(WorkflowId::from(1)));
    assert_eq!(catalog[1].version.as_ref().map(ToString::to_string).as_deref(), Some("2"));
}

#[tokio::test]
async fn step_fetch_sends_identifier_as_query_parameter() {
    let seen = SeenIds::default();
    let app = Router::new()
        .route("/api/steps/", get(steps_for))
        .with_state(seen.clone());
    let base = spawn_server(app).await;

    let id = WorkflowId::new("42").expect("id");
    let payload = gateway_for(&base).fetch_step(&id).await.expect("steps");

    assert_eq!(seen.0.lock().await.as_slice(), ["42".to_string()]);
    assert_eq!(payload.value()["workflow"], "42");
    assert_eq!(payload.value()["steps"][0]["name"], "Send OTP");
}

#[tokio::test]
async fn server_error_becomes_network_error_with_status() {
    let app = Router::new().route(
        "/api/workflows/",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = spawn_server(app).await;

    let err = gateway_for(&base)
        .fetch_catalog()
        .await
        .expect_err("must fail");

    assert_eq!(err.http_status(), Some(500));
    assert!(err.to_string().contains("500"), "unexpected error: {err}");
}

#[tokio::test]
async fn not_found_message_from_backend_is_kept() {
    let app = Router::new().route(
        "/api/steps/",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"message": "object not found"})),
            )
        }),
    );
    let base = spawn_server(app).await;

    let id = WorkflowId::new("missing").expect("id");
    let err = gateway_for(&base).fetch_step(&id).await.expect_err("404");

    assert_eq!(err.http_status(), Some(404));
    assert_eq!(err.to_string(), "HTTP 404: object not found");
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let app = Router::new().route("/api/workflows/", get(|| async { "<html>oops</html>" }));
    let base = spawn_server(app).await;

    let err = gateway_for(&base)
        .fetch_catalog()
        .await
        .expect_err("must fail");

    assert!(matches!(err, GatewayError::Parse(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error_without_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");

    let err = gateway_for(&format!("http://{addr}"))
        .fetch_catalog()
        .await
        .expect_err("must fail");

    assert!(matches!(err, GatewayError::Network { status: None, .. }));
}

// The backend contract is not written down anywhere; any JSON body is
// accepted whatever shape it has.
#[tokio::test]
async fn unexpected_shapes_pass_through_unvalidated() {
    let app = Router::new()
        .route(
            "/api/workflows/",
            get(|| async {
                Json(json!([
                    {"id": "9b2f", "name": "onboarding", "is_active": true},
                    {"id": 7, "description": "Billing", "version": "beta", "extra": [1, 2]}
                ]))
            }),
        )
        .route("/api/steps/", get(|| async { Json(json!([1, "two", null])) }));
    let base = spawn_server(app).await;
    let gateway = gateway_for(&base);

    let catalog = gateway.fetch_catalog().await.expect("catalog");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].description, "");
    assert!(catalog[0].version.is_none());

    let payload = gateway
        .fetch_step(&WorkflowId::from(7))
        .await
        .expect("steps");
    assert_eq!(payload.value(), &json!([1, "two", null]));
}

async fn catalog_from(body: Value) -> Result<Vec<WorkflowSummary>, GatewayError> {
    let app = Router::new().route(
        "/api/workflows/",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    let base = spawn_server(app).await;
    gateway_for(&base).fetch_catalog().await
}

#[tokio::test]
async fn entry_without_id_is_still_ready() {
    let catalog = catalog_from(json!([{"description": "A", "version": 1}]))
        .await
        .expect("catalog");

    assert_eq!(catalog.len(), 1);
    assert!(catalog[0].id.is_none());
    assert_eq!(catalog[0].description, "A");
}

#[tokio::test]
async fn paginated_object_body_is_unwrapped() {
    let catalog = catalog_from(json!({"count": 1, "results": [{"id": 5, "description": "Paged"}]}))
        .await
        .expect("catalog");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].id, Some(WorkflowId::from(5)));

    let empty = catalog_from(json!({"count": 1, "results": []}))
        .await
        .expect("catalog");
    assert!(empty.is_empty());
}

#[tokio::test]
async fn non_string_version_is_kept_as_json_text() {
    let catalog = catalog_from(json!([{"id": 1, "description": "A", "version": true}]))
        .await
        .expect("catalog");

    assert_eq!(
        catalog[0].version.as_ref().map(ToString::to_string).as_deref(),
        Some("true")
    );
}

#[tokio::test]
async fn base_url_path_prefix_is_preserved() {
    let app = Router::new().route("/flowpilot/api/workflows/", get(two_workflows));
    let base = spawn_server(app).await;

    let gateway = gateway_for(&format!("{base}/flowpilot"));
    assert!(gateway.base_url().as_str().ends_with("/flowpilot/"));

    let catalog = gateway.fetch_catalog().await.expect("catalog");
    assert_eq!(catalog.len(), 2);
}
