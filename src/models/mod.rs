pub mod user;

pub use user::{NewUser, User, UserPublicView, DEFAULT_ROLE};
