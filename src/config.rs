use std::env;

use crate::error::AppError;

/// Runtime settings, read from the process environment (and `.env` via `dotenv`).
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. When unset the server keeps users in memory.
    pub database_url: Option<String>,
    pub server_port: u16,
    pub server_host: String,
    /// Symmetric key used to sign and verify session tokens.
    pub jwt_secret: String,
    /// Directory served under `/uploads`.
    pub uploads_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| AppError::InternalServerError("JWT_SECRET must be set".into()))?;

        let server_port = match env::var("SERVER_PORT") {
            Ok(port) => port.parse().map_err(|_| {
                AppError::InternalServerError(format!("SERVER_PORT must be a number, got {:?}", port))
            })?,
            Err(_) => 3000,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            server_port,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt_secret,
            uploads_dir: env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()),
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
