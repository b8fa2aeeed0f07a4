//! User record storage.
//!
//! The authentication service talks to storage only through [`UserStore`].
//! [`PgUserStore`] backs the running server; [`InMemoryUserStore`] is used
//! when no database is configured and throughout the tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{NewUser, User},
};

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Persists a new user.
    ///
    /// Implementations must reject a second record for the same email with
    /// `AppError::Conflict`, even when two inserts race.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
}
