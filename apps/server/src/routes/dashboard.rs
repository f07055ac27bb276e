use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, web};
use chrono::{DateTime, Utc};
use pulse::{MonitorSnapshot, MonitorStatus, Registry};
use serde::Serialize;

use crate::error::AppError;
use crate::views;

macros_utils::routes! {
    route list_monitors,
    route dashboard_page,
}

#[derive(Debug, Serialize)]
pub struct MonitorSummary {
    pub key: String,
    pub name: String,
    pub url: String,
    pub current_status: MonitorStatus,
    pub last_check: Option<DateTime<Utc>>,
    pub history_count: usize,
    pub running: bool,
}

impl From<MonitorSnapshot> for MonitorSummary {
    fn from(snapshot: MonitorSnapshot) -> Self {
        Self {
            history_count: snapshot.history.len(),
            key: snapshot.key,
            name: snapshot.name,
            url: snapshot.url,
            current_status: snapshot.current_status,
            last_check: snapshot.last_check,
            running: snapshot.running,
        }
    }
}

fn snapshots(registry: &Registry) -> Result<Vec<MonitorSnapshot>, AppError> {
    registry
        .all()
        .map(|(_, monitor)| monitor.read_state().map_err(AppError::from))
        .collect()
}

#[get("/")]
pub async fn dashboard_page(registry: web::Data<Registry>) -> Result<HttpResponse, AppError> {
    let snapshots = snapshots(&registry)?;

    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(views::dashboard(&snapshots)))
}

/// Every monitor in configuration order
#[get("/api/monitors")]
pub async fn list_monitors(
    registry: web::Data<Registry>,
) -> Result<web::Json<Vec<MonitorSummary>>, AppError> {
    let summaries = snapshots(&registry)?.into_iter().map(MonitorSummary::from).collect();

    Ok(web::Json(summaries))
}
