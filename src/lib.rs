#![doc = "The `gamehaven` library crate."]
#![doc = ""]
#![doc = "Domain model, user storage, authentication (password hashing, session tokens,"]
#![doc = "register and login), routing and error handling for the GameHaven API."]
#![doc = "The binary (`main.rs`) wires these into an Actix Web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::auth::AuthService;
pub use crate::error::AppError;
pub use crate::models::{User, UserPublicView};
