use std::sync::Arc;

use actix_web::web;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use super::{hash_password, verify_password, TokenSigner};
use crate::{
    error::{AppError, EMAIL_IN_USE, INVALID_CREDENTIALS},
    models::{NewUser, UserPublicView},
    store::UserStore,
};

/// Result of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed session token, valid for one day.
    pub token: String,
    pub user: UserPublicView,
}

/// Registers accounts and exchanges credentials for session tokens.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: TokenSigner,
    /// Hash compared against when the email is unknown, so both login failures cost one bcrypt verify.
    dummy_hash: Arc<OnceCell<String>>,
}

/// Input for the dummy hash; never matches a real account because no account is looked up with it.
const DUMMY_PASSWORD: &str = "gamehaven-unknown-account";

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenSigner) -> Self {
        Self {
            store,
            tokens,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    pub fn tokens(&self) -> &TokenSigner {
        &self.tokens
    }

    /// Creates a new account and returns it without its password hash.
    ///
    /// Fails with `AppError::Conflict` when the email is already registered.
    pub async fn register_user(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<UserPublicView, AppError> {
        if self.store.find_by_email(&email).await?.is_some() {
            log::info!("Registration rejected, email already in use");
            return Err(AppError::Conflict(EMAIL_IN_USE.into()));
        }

        let password_hash = run_blocking(move || hash_password(&password)).await?;
        let user = self
            .store
            .create(NewUser::new(name, email, password_hash))
            .await?;

        log::info!("Registered user {}", user.id);
        Ok(user.into())
    }

    /// Verifies credentials and issues a session token.
    ///
    /// An unknown email and a wrong password fail with the same
    /// `AppError::Unauthorized` message.
    pub async fn login_user(&self, email: &str, password: String) -> Result<LoginResponse, AppError> {
        let Some(user) = self.store.find_by_email(email).await? else {
            let dummy_hash = self
                .dummy_hash
                .get_or_try_init(|| run_blocking(|| hash_password(DUMMY_PASSWORD)))
                .await?
                .clone();
            run_blocking(move || verify_password(&password, &dummy_hash)).await?;
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        let stored_hash = user.password.clone();
        let is_match = run_blocking(move || verify_password(&password, &stored_hash)).await?;
        if !is_match {
            log::info!("Login rejected for user {}", user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let token = self.tokens.sign(&user)?;
        log::info!("User {} logged in", user.id);
        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    /// Resolves a session token to the account it was issued for.
    pub async fn current_user(&self, token: &str) -> Result<UserPublicView, AppError> {
        let claims = self.tokens.verify(token)?;
        self.store
            .find_by_id(claims.sub)
            .await?
            .map(UserPublicView::from)
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".into()))
    }
}

/// bcrypt is slow; run it on the actix blocking pool instead of a worker thread.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Hashing task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryUserStore;
    use pretty_assertions::assert_eq;

    fn service() -> (AuthService, InMemoryUserStore) {
        let store = InMemoryUserStore::new();
        let service = AuthService::new(Arc::new(store.clone()), TokenSigner::new("test-secret"));
        (service, store)
    }

    #[actix_rt::test]
    async fn test_register_returns_public_view_and_hashes_password() {
        let (service, store) = service();

        let view = service
            .register_user("Ava".into(), "ava@x.com".into(), "secret1".into())
            .await
            .unwrap();

        assert_eq!(view.name, "Ava");
        assert_eq!(view.email, "ava@x.com");
        assert_eq!(view.role, "user");

        let stored = store.find_by_email("ava@x.com").await.unwrap().unwrap();
        assert_eq!(stored.id, view.id);
        assert_ne!(stored.password, "secret1");
        assert!(verify_password("secret1", &stored.password).unwrap());
    }

    #[actix_rt::test]
    async fn test_register_duplicate_email_conflicts() {
        let (service, store) = service();
        service
            .register_user("Ava".into(), "ava@x.com".into(), "secret1".into())
            .await
            .unwrap();

        let result = service
            .register_user("Other".into(), "ava@x.com".into(), "another".into())
            .await;

        match result {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, EMAIL_IN_USE),
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(store.len().await, 1);
    }

    #[actix_rt::test]
    async fn test_login_issues_token_for_stored_user() {
        let (service, _store) = service();
        let registered = service
            .register_user("Ava".into(), "ava@x.com".into(), "secret1".into())
            .await
            .unwrap();

        let response = service.login_user("ava@x.com", "secret1".into()).await.unwrap();

        assert_eq!(response.user, registered);
        let claims = service.tokens().verify(&response.token).unwrap();
        assert_eq!(claims.sub, registered.id);
        assert_eq!(claims.role, "user");
    }

    #[actix_rt::test]
    async fn test_login_failures_share_one_message() {
        let (service, _store) = service();
        service
            .register_user("Ava".into(), "ava@x.com".into(), "secret1".into())
            .await
            .unwrap();

        let wrong_password = service.login_user("ava@x.com", "wrong".into()).await;
        let unknown_email = service.login_user("nobody@x.com", "secret1".into()).await;

        for result in [wrong_password, unknown_email] {
            match result {
                Err(AppError::Unauthorized(msg)) => assert_eq!(msg, INVALID_CREDENTIALS),
                other => panic!("expected unauthorized, got {:?}", other),
            }
        }
    }

    #[actix_rt::test]
    async fn test_current_user_resolves_token() {
        let (service, _store) = service();
        let registered = service
            .register_user("Ava".into(), "ava@x.com".into(), "secret1".into())
            .await
            .unwrap();
        let login = service.login_user("ava@x.com", "secret1".into()).await.unwrap();

        let me = service.current_user(&login.token).await.unwrap();
        assert_eq!(me, registered);

        assert!(matches!(
            service.current_user("garbage").await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[actix_rt::test]
    async fn test_token_for_unknown_user_is_rejected() {
        let (service, _store) = service();
        let ghost = NewUser::new("Ghost".into(), "ghost@x.com".into(), "hash".into()).into_user();
        let token = service.tokens().sign(&ghost).unwrap();

        assert!(matches!(
            service.current_user(&token).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[actix_rt::test]
    async fn test_login_rejects_guess_sharing_72_byte_prefix() {
        let (service, store) = service();
        let prefix = "a".repeat(72);

        let too_long = service
            .register_user("Ava".into(), "ava@x.com".into(), format!("{}secret", prefix))
            .await;
        assert!(matches!(too_long, Err(AppError::ValidationError(_))));
        assert!(store.is_empty().await);

        service
            .register_user("Ava".into(), "ava@x.com".into(), prefix.clone())
            .await
            .unwrap();

        match service.login_user("ava@x.com", format!("{}guess", prefix)).await {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, INVALID_CREDENTIALS),
            other => panic!("expected unauthorized, got {:?}", other),
        }
        assert!(service.login_user("ava@x.com", prefix).await.is_ok());
    }

    #[actix_rt::test]
    async fn test_unknown_email_still_runs_a_verify() {
        let (service, _store) = service();
        assert!(service.dummy_hash.get().is_none());

        let result = service.login_user("nobody@x.com", "secret1".into()).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));

        let dummy = service.dummy_hash.get().expect("dummy hash computed on first miss");
        assert!(dummy.starts_with("$2b$10$"));
        assert!(!verify_password("secret1", dummy).unwrap());
    }
}
