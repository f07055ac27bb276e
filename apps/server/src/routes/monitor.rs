use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use pulse::{Monitor, MonitorStatus, Registry};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::AppError;
use crate::views;

macros_utils::routes! {
    route monitor_status,
    route trigger_check,
    route monitor_page,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub name: String,
    pub current_status: MonitorStatus,
    pub last_check: Option<DateTime<Utc>>,
    pub history_count: usize,
}

#[derive(Debug, Serialize)]
pub struct TriggerResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub current_status: MonitorStatus,
    pub last_check: Option<DateTime<Utc>>,
}

fn find(registry: &Registry, key: &str) -> Result<Arc<Monitor>, AppError> {
    registry.lookup(key).ok_or_else(|| AppError::MonitorNotFound(key.to_string()))
}

#[get("/{key}")]
pub async fn monitor_page(
    registry: web::Data<Registry>,
    key: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let snapshot = find(&registry, &key)?.read_state()?;

    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(views::monitor_page(&snapshot)))
}

#[get("/{key}/api")]
pub async fn monitor_status(
    registry: web::Data<Registry>,
    key: web::Path<String>,
) -> Result<web::Json<StatusResponse>, AppError> {
    let monitor = find(&registry, &key)?;
    let snapshot = monitor.read_state()?;

    Ok(web::Json(StatusResponse {
        name: snapshot.name,
        current_status: snapshot.current_status,
        last_check: snapshot.last_check,
        history_count: snapshot.history.len(),
    }))
}

/// Run a check right away, outside the schedule.
///
/// Blocks for the duration of that one probe, bounded by the probe timeout.
#[post("/{key}/trigger")]
pub async fn trigger_check(
    registry: web::Data<Registry>,
    key: web::Path<String>,
) -> Result<web::Json<TriggerResponse>, AppError> {
    let monitor = find(&registry, &key)?;
    debug!(monitor = %monitor.key(), "Manual health check requested");

    let outcome = monitor.perform_check().await?;
    info!(monitor = %monitor.key(), status = %outcome.status, "Manual health check completed");

    Ok(web::Json(TriggerResponse {
        status: "success",
        message: "Health check completed",
        current_status: outcome.status.into(),
        last_check: Some(outcome.checked_at),
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use pulse::{MonitorConfig, Prober};
    use serde_json::Value;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn target(code: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(code))
            .mount(&server)
            .await;
        server
    }

    fn registry_for(server: &MockServer) -> web::Data<Registry> {
        let configs = vec![
            MonitorConfig::new("svc", "Service", format!("{}/health", server.uri())),
            MonitorConfig::new("other", "Other", format!("{}/missing", server.uri())),
        ];
        let prober = Prober::with_default_timeout().unwrap();
        web::Data::new(Registry::from_config(&configs, &prober).unwrap())
    }

    fn parse_time(value: &Value) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value.as_str().unwrap()).unwrap().with_timezone(&Utc)
    }

    #[actix_web::test]
    async fn test_status_before_any_check() {
        let server = target(200).await;
        let app = test::init_service(
            App::new().app_data(registry_for(&server)).configure(crate::routes::routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/svc/api").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["name"], "Service");
        assert_eq!(body["current_status"], "Unknown");
        assert_eq!(body["last_check"], Value::Null);
        assert_eq!(body["history_count"], 0);
    }

    #[actix_web::test]
    async fn test_trigger_returns_fresh_data() {
        let server = target(200).await;
        let app = test::init_service(
            App::new().app_data(registry_for(&server)).configure(crate::routes::routes),
        )
        .await;

        let req = test::TestRequest::post().uri("/svc/trigger").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let trigger: Value = test::read_body_json(resp).await;
        assert_eq!(trigger["status"], "success");
        assert_eq!(trigger["message"], "Health check completed");
        assert_eq!(trigger["current_status"], "UP");
        let triggered_at = parse_time(&trigger["last_check"]);

        let req = test::TestRequest::get().uri("/svc/api").to_request();
        let status: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(status["current_status"], "UP");
        assert_eq!(status["history_count"], 1);
        assert!(parse_time(&status["last_check"]) >= triggered_at);
    }

    #[actix_web::test]
    async fn test_trigger_against_failing_target_reports_down() {
        let server = target(503).await;
        let app = test::init_service(
            App::new().app_data(registry_for(&server)).configure(crate::routes::routes),
        )
        .await;

        let req = test::TestRequest::post().uri("/svc/trigger").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["current_status"], "DOWN");
    }

    #[actix_web::test]
    async fn test_unknown_key_is_not_found() {
        let server = target(200).await;
        let app = test::init_service(
            App::new().app_data(registry_for(&server)).configure(crate::routes::routes),
        )
        .await;

        for req in [
            test::TestRequest::get().uri("/nonexistent").to_request(),
            test::TestRequest::get().uri("/nonexistent/api").to_request(),
            test::TestRequest::post().uri("/nonexistent/trigger").to_request(),
            test::TestRequest::get().uri("/svc/unknown/path").to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        }

        let req = test::TestRequest::post().uri("/nonexistent/trigger").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "error");
    }

    #[actix_web::test]
    async fn test_pages_render() {
        let server = target(200).await;
        let registry = registry_for(&server);
        let app = test::init_service(
            App::new().app_data(registry.clone()).configure(crate::routes::routes),
        )
        .await;

        registry.lookup("svc").unwrap().perform_check().await.unwrap();

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains(r#"<a href="/svc">Service</a>"#));
        assert!(html.contains(r#"<a href="/other">Other</a>"#));

        let req = test::TestRequest::get().uri("/svc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("Service: UP"));
        assert!(html.contains("fetch('/svc/trigger'"));
    }

    #[actix_web::test]
    async fn test_list_and_health() {
        let server = target(200).await;
        let app = test::init_service(
            App::new().app_data(registry_for(&server)).configure(crate::routes::routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri("/api/monitors").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let keys: Vec<&str> = body.as_array().unwrap().iter().map(|m| m["key"].as_str().unwrap()).collect();
        assert_eq!(keys, vec!["svc", "other"]);
        assert_eq!(body[0]["running"], false);
    }
}
