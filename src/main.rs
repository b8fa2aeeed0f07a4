use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use gamehaven::{
    auth::{AuthService, TokenSigner},
    config::Config,
    routes,
    store::{InMemoryUserStore, PgUserStore, UserStore},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let store: Arc<dyn UserStore> = match &config.database_url {
        Some(url) => {
            let store = PgUserStore::connect(url).await.map_err(|e| {
                log::error!("DB Error: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;
            log::info!("Database connected");
            Arc::new(store)
        }
        None => {
            log::warn!("DATABASE_URL not set, keeping users in memory");
            Arc::new(InMemoryUserStore::new())
        }
    };

    let auth = web::Data::new(AuthService::new(store, TokenSigner::new(&config.jwt_secret)));
    let uploads_dir = config.uploads_dir.clone();

    log::info!("Server on {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(auth.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(routes::configure_app(uploads_dir.clone()))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
