use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

pub const BANNER: &str = "GameHaven API is running...";

/// Plain-text banner at the root path.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(BANNER)
}

/// Health check endpoint
///
/// Returns the current status of the API and timestamp.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    }))
}
