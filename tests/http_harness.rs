//! Driving the simulation server end to end through its router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use hedgerules_edge::http::build_router;
use hedgerules_edge::resolve::Resolver;
use hedgerules_edge::{MemoryStore, ResolverConfig};

mod common;
use common::store_of;

fn router_for(store: MemoryStore, config: ResolverConfig) -> axum::Router {
    build_router(Arc::new(Resolver::new(Arc::new(store), config)))
}

async fn body_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn redirect_key_answers_301_with_location() {
    let router = router_for(
        store_of(&[("/old-page", "https://example.com/new-page")]),
        ResolverConfig::default(),
    );

    let response = router
        .oneshot(Request::get("/old-page").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers()["location"],
        "https://example.com/new-page"
    );
}

#[tokio::test]
async fn merged_headers_arrive_on_the_wire() {
    let router = router_for(
        store_of(&[
            ("/", "x-frame-options: DENY"),
            ("*.html", "content-type: text/html; charset=utf-8"),
        ]),
        ResolverConfig::default(),
    );

    let response = router
        .oneshot(Request::get("/blog/post.html").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-frame-options"], "DENY");
    assert_eq!(
        response.headers()["content-type"],
        "text/html; charset=utf-8"
    );
}

#[tokio::test]
async fn directory_request_serves_index_document_path() {
    let router = router_for(MemoryStore::default(), ResolverConfig::default());

    let response = router
        .oneshot(Request::get("/foo/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response.into_body()).await, "/foo/index.html");
}

#[tokio::test]
async fn debug_headers_visible_when_enabled() {
    let router = router_for(
        store_of(&[("/", "x-a: 1")]),
        ResolverConfig {
            debug_headers: true,
            ..Default::default()
        },
    );

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.headers()["x-hedgerules-patterns"], "/");
    assert_eq!(response.headers()["x-hedgerules-matched"], "0");
    assert_eq!(response.headers()["x-hedgerules-size"], "8");
    assert!(!response.headers().contains_key("x-hedgerules-truncated"));
}

#[tokio::test]
async fn truncation_flag_surfaces_over_http() {
    let router = router_for(
        store_of(&[("/", "x-a: 1\nx-b: 2")]),
        ResolverConfig {
            debug_headers: true,
            header_budget: 10,
            ..Default::default()
        },
    );

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.headers()["x-a"], "1");
    assert!(!response.headers().contains_key("x-b"));
    assert_eq!(response.headers()["x-hedgerules-truncated"], "true");
}
