//! 可观测性模块集成测试
//!
//! 通过 tower oneshot 驱动 HTTP 中间件，验证请求 ID 透传与生成。

use axum::{
    Extension, Router,
    body::Body,
    http::{Request, StatusCode},
    middleware,
    routing::get,
};
use nest_shared::observability::{
    ObservabilityConfig,
    metrics::{record_admin_change, record_http_request},
    middleware::{REQUEST_ID_HEADER, RequestId, http_tracing, request_id},
};
use tower::ServiceExt;

fn app() -> Router {
    Router::new()
        .route(
            "/echo/{id}",
            get(|Extension(id): Extension<RequestId>| async move { id.as_str().to_string() }),
        )
        .route_layer(middleware::from_fn(http_tracing))
        .layer(middleware::from_fn(request_id))
}

mod middleware_tests {
    use super::*;

    #[tokio::test]
    async fn test_request_id_propagated() {
        let req = Request::builder()
            .uri("/echo/1")
            .header(REQUEST_ID_HEADER, "upstream-id")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "upstream-id");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"upstream-id");
    }

    #[tokio::test]
    async fn test_request_id_generated() {
        let req = Request::builder().uri("/echo/2").body(Body::empty()).unwrap();

        let response = app().oneshot(req).await.unwrap();
        let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_unmatched_route_still_gets_request_id() {
        let req = Request::builder().uri("/missing").body(Body::empty()).unwrap();

        let response = app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }
}

mod metrics_tests {
    use super::*;

    #[test]
    fn test_record_without_recorder() {
        record_http_request("GET", "/api/admin/badge-types", 200, 0.05);
        record_http_request("DELETE", "/api/admin/user-badges/{id}", 404, 0.01);
        record_admin_change("badge_type", "create");
        record_admin_change("user_badge", "delete");
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_custom_config() {
        let config = ObservabilityConfig {
            log_level: "debug".to_string(),
            json_logs: true,
            ..Default::default()
        }
        .with_service_name("nest-admin");

        assert_eq!(config.service_name, "nest-admin");
        assert!(config.json_logs);
    }
}
