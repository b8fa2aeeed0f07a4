pub mod auth;
pub mod health;

use std::path::PathBuf;

use actix_files::Files;
use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::error::AppError;

/// Every route the server exposes: banner, health, `/api`, and `/uploads` served from `uploads_dir`.
///
/// Middleware (CORS, request logging) is wrapped by the caller since `ServiceConfig` cannot hold it.
pub fn configure_app(uploads_dir: impl Into<PathBuf>) -> impl FnOnce(&mut web::ServiceConfig) {
    let uploads_dir = uploads_dir.into();
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(health::index)
            .service(health::health)
            .service(web::scope("/api").configure(config))
            .service(Files::new("/uploads", uploads_dir));
    }
}

/// Mounts the API routes. Intended to sit under the `/api` scope.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::me),
    );
}

/// Reports unparseable request bodies with the same JSON error shape as `AppError`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        AppError::BadRequest(err.to_string()).into()
    })
}
