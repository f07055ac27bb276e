use actix_web::{HttpResponse, Responder, get};

macros_utils::routes! {
    route liveness,
}

/// Liveness of the dashboard process itself, independent of any monitor.
/// The status code is the whole answer.
#[get("/health")]
pub async fn liveness() -> impl Responder {
    HttpResponse::NoContent()
}
