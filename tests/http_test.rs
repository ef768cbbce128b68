//! HTTP boundary: routes, status codes, headers, body limit.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use diagram_codegen::{common_routes, generate_routes, AppState, GeneratorSettings};
use std::path::Path;
use tower::ServiceExt;

const DIAGRAM: &str = r#"{"nodeDataArray":[
    {"key":1,"name":"A","properties":[{"name":"id","type":"SERIAL","visibility":"private","isKey":true}]},
    {"key":2,"name":"B","properties":[]}],
  "linkDataArray":[{"from":1,"to":2,"relationship":"Association","fromText":"1","toText":"1..*"}]}"#;

fn app(work_dir: &Path, max_body_bytes: usize) -> Router {
    let state = AppState::from_settings(GeneratorSettings {
        work_dir: work_dir.to_path_buf(),
        ..GeneratorSettings::default()
    });
    Router::new()
        .merge(common_routes())
        .merge(generate_routes(state, max_body_bytes))
}

fn post(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn payload() -> String {
    serde_json::json!({ "diagramData": DIAGRAM }).to_string()
}

#[tokio::test]
async fn generate_orm_returns_zip_attachment() {
    let tmp = tempfile::tempdir().unwrap();
    let res = app(tmp.path(), 1 << 20).oneshot(post("/generate-orm", payload())).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "application/zip");
    assert_eq!(
        res.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"spring-boot-orm.zip\""
    );
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let zip = zip::ZipArchive::new(std::io::Cursor::new(bytes.to_vec())).unwrap();
    assert_eq!(zip.len(), 4 + 4 * 2 + 2);
    assert!(std::fs::read_dir(tmp.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn preview_lists_artifacts_in_envelope() {
    let tmp = tempfile::tempdir().unwrap();
    let res = app(tmp.path(), 1 << 20)
        .oneshot(post("/generate-orm/preview", payload()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value =
        serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body["meta"]["count"], 10);
    assert_eq!(body["data"][0]["path"], "src/main/java/com/example/model/A.java");
    assert!(body["data"][0]["contents"].as_str().unwrap().contains("private List<B> bs;"));
}

#[tokio::test]
async fn malformed_diagram_is_bad_request() {
    let tmp = tempfile::tempdir().unwrap();
    let body = serde_json::json!({ "diagramData": "{ not json" }).to_string();
    let res = app(tmp.path(), 1 << 20).oneshot(post("/generate-orm", body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value =
        serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body["error"]["code"], "malformed_diagram");
}

#[tokio::test]
async fn modeling_error_is_unprocessable() {
    let tmp = tempfile::tempdir().unwrap();
    let diagram = r#"{"nodeDataArray":[
        {"key":1,"name":"A","properties":[]},{"key":2,"name":"B","properties":[]},{"key":3,"name":"C","properties":[]}],
      "linkDataArray":[{"from":1,"to":2,"relationship":"Inheritance"},{"from":1,"to":3,"relationship":"Inheritance"}]}"#;
    let body = serde_json::json!({ "diagramData": diagram }).to_string();
    let res = app(tmp.path(), 1 << 20).oneshot(post("/generate-orm", body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let res = app(tmp.path(), 64).oneshot(post("/generate-orm", payload())).await.unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn health_and_version() {
    let tmp = tempfile::tempdir().unwrap();
    let res = app(tmp.path(), 1 << 20)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app(tmp.path(), 1 << 20)
        .oneshot(Request::builder().uri("/version").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body: serde_json::Value =
        serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body["name"], "diagram-codegen");
}
