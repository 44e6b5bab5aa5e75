//! Integration tests for the authorizer middleware and the admin route
//!
//! These drive the full router with `oneshot` requests, covering the
//! authorizer outcomes, the admin service gate behind it, and the helper that
//! turns HTTP requests into authorizer events.

#[cfg(test)]
mod tests {
    use super::super::middleware_hooks::*;
    use crate::{create_router, AppState, GatewayConfig};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::new(GatewayConfig::default()))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(uri: &str) -> (StatusCode, Value) {
        let response = app().oneshot(get(uri)).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_admin_token_reaches_content() {
        for token in ["admin", "ADMIN", "Admin"] {
            let (status, body) = send(&format!("/admin?auth={}", token)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["message"], "hello world from admin service admin");
        }
    }

    #[tokio::test]
    async fn test_user_token_is_gated_by_admin_service() {
        let (status, body) = send("/admin?auth=user").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("user"));
        assert!(message.contains("not allowed"));
    }

    #[tokio::test]
    async fn test_deny_token_is_stopped_by_gateway() {
        let (status, body) = send("/admin?auth=deny").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["Message"],
            "User is not authorized to access this resource with an explicit deny"
        );
    }

    #[tokio::test]
    async fn test_unknown_token_is_server_error() {
        for uri in ["/admin?auth=guest", "/admin?auth=", "/admin"] {
            let (status, body) = send(uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "uri {}", uri);
            assert_eq!(body["message"], Value::Null);
        }
    }

    #[tokio::test]
    async fn test_health_skips_authorizer() {
        let (status, body) = send("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["stage"], "dev");
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let (status, body) = send("/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/admin"].is_object());
        assert!(body["paths"]["/health"].is_object());
    }

    #[tokio::test]
    async fn test_response_headers() {
        let response = app().oneshot(get("/admin?auth=admin")).await.unwrap();
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(response.headers().get("x-gateway-stage").unwrap(), "dev");
    }

    #[tokio::test]
    async fn test_custom_admin_path() {
        let config = GatewayConfig::default().with_admin_path("/internal/admin");
        let app = create_router(AppState::new(config));

        let response = app
            .clone()
            .oneshot(get("/internal/admin?auth=admin"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/admin?auth=admin")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_build_authorizer_event() {
        let config = GatewayConfig::default();
        let request = Request::builder()
            .uri("/admin?auth=Admin&extra=1")
            .header("host", "localhost")
            .body(Body::empty())
            .unwrap();

        let event = build_authorizer_event(&config, &request);
        assert_eq!(
            event.method_arn,
            "arn:aws:execute-api:us-east-1:123456789012:local/dev/GET/admin"
        );
        assert_eq!(event.event_type.as_deref(), Some("REQUEST"));
        assert_eq!(event.http_method.as_deref(), Some("GET"));

        let query = event.query_string_parameters.unwrap();
        assert_eq!(query.get("auth").map(String::as_str), Some("Admin"));
        assert_eq!(query.get("extra").map(String::as_str), Some("1"));

        let headers = event.headers.unwrap();
        assert_eq!(headers.get("host").map(String::as_str), Some("localhost"));
    }

    #[test]
    fn test_build_authorizer_event_without_query() {
        let event = build_authorizer_event(&GatewayConfig::default(), &get("/admin"));
        assert!(event.query_string_parameters.unwrap().is_empty());
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::generate(), RequestId::generate());
    }
}
