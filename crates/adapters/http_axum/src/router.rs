//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use devicehub_app::ports::DeviceRepository;

use crate::error::panic_response;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the device routes at the root and a `/health` probe.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem, and a [`CatchPanicLayer`]
/// that turns a panicking handler into a JSON `500` instead of a dropped
/// connection.
pub fn build<DR>(state: AppState<DR>) -> Router
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use devicehub_app::services::device_service::DeviceService;
    use devicehub_domain::device::Device;
    use devicehub_domain::error::DeviceHubError;
    use devicehub_domain::id::DeviceId;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Repository holding a single fixed device with id 1.
    struct StubDeviceRepo;

    fn stub_device() -> Device {
        Device {
            id: Some(DeviceId::new(1)),
            name: "iPhone 6".to_string(),
            brand: "Apple".to_string(),
            creation_time: chrono::Utc::now(),
        }
    }

    impl DeviceRepository for StubDeviceRepo {
        async fn find_all(&self) -> Result<Vec<Device>, DeviceHubError> {
            Ok(vec![stub_device()])
        }
        async fn find_by_id(&self, id: DeviceId) -> Result<Option<Device>, DeviceHubError> {
            Ok((id.get() == 1).then(stub_device))
        }
        async fn find_by_brand(&self, brand: &str) -> Result<Vec<Device>, DeviceHubError> {
            Ok(if brand == "Apple" {
                vec![stub_device()]
            } else {
                vec![]
            })
        }
        async fn save(&self, mut device: Device) -> Result<Device, DeviceHubError> {
            device.validate()?;
            if device.id.is_none() {
                device.id = Some(DeviceId::new(2));
            }
            Ok(device)
        }
        async fn delete_by_id(&self, id: DeviceId) -> Result<bool, DeviceHubError> {
            Ok(id.get() == 1)
        }
    }

    /// Repository whose every call fails like a dropped connection.
    struct BrokenDeviceRepo;

    fn broken() -> DeviceHubError {
        DeviceHubError::Storage(Box::new(std::io::Error::other("connection refused")))
    }

    impl DeviceRepository for BrokenDeviceRepo {
        async fn find_all(&self) -> Result<Vec<Device>, DeviceHubError> {
            Err(broken())
        }
        async fn find_by_id(&self, _id: DeviceId) -> Result<Option<Device>, DeviceHubError> {
            Err(broken())
        }
        async fn find_by_brand(&self, _brand: &str) -> Result<Vec<Device>, DeviceHubError> {
            Err(broken())
        }
        async fn save(&self, _device: Device) -> Result<Device, DeviceHubError> {
            Err(broken())
        }
        async fn delete_by_id(&self, _id: DeviceId) -> Result<bool, DeviceHubError> {
            Err(broken())
        }
    }

    fn app() -> Router {
        build(AppState::new(DeviceService::new(StubDeviceRepo)))
    }

    fn request(method: &str, uri: &str, body: Option<&str>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app()
            .oneshot(request("GET", "/health", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_list_devices_filtered_by_brand() {
        let response = app()
            .oneshot(request("GET", "/device?brand=Samsung", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn should_return_created_device_with_assigned_id() {
        let response = app()
            .oneshot(request("POST", "/device", Some(r#"{"name":"S21"}"#)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json(response).await;
        assert_eq!(body["id"], 2);
        assert_eq!(body["name"], "S21");
        assert_eq!(body["brand"], "");
    }

    #[tokio::test]
    async fn should_reject_empty_body_with_message() {
        let response = app()
            .oneshot(request("POST", "/device", Some("{}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json(response).await["message"].is_string());
    }

    #[tokio::test]
    async fn should_reject_malformed_json_with_raw_error() {
        let response = app()
            .oneshot(request("POST", "/device", Some(r#"{"name":"#)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json(response).await["rawError"].is_string());
    }

    #[tokio::test]
    async fn should_reject_missing_content_type_as_bad_request() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/device")
                    .body(Body::from(r#"{"name":"S21"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_reject_non_integer_id_as_bad_request() {
        let response = app()
            .oneshot(request("GET", "/device/abc", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json(response).await["rawError"].is_string());
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_id() {
        let response = app()
            .oneshot(request("GET", "/device/99", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_merge_partial_update() {
        let response = app()
            .oneshot(request("PUT", "/device/1", Some(r#"{"brand":"Apple Inc."}"#)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["name"], "iPhone 6");
        assert_eq!(body["brand"], "Apple Inc.");
    }

    #[tokio::test]
    async fn should_return_no_content_when_deleting_existing_device() {
        let response = app()
            .oneshot(request("DELETE", "/device/1", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_unknown_device() {
        let response = app()
            .oneshot(request("DELETE", "/device/7", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_internal_error_with_raw_text_when_storage_fails() {
        let app = build(AppState::new(DeviceService::new(BrokenDeviceRepo)));
        let response = app
            .oneshot(request("GET", "/device", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(response).await["rawError"], "connection refused");
    }

    #[tokio::test]
    async fn should_answer_json_internal_error_when_handler_panics() {
        async fn boom() -> &'static str {
            panic!("device table corrupted")
        }

        let app: Router = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(panic_response));
        let response = app
            .oneshot(request("GET", "/boom", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json(response).await;
        assert_eq!(body["rawError"], "device table corrupted");
        assert!(body.get("message").is_none());
    }
}
