use crate::{
    auth::{AuthService, BearerToken, LoginRequest, RegisterRequest},
    error::AppError,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates an account and returns it without the password hash.
///
/// ## Responses:
/// - `201 Created`: the new `UserPublicView`.
/// - `400 Bad Request`: malformed JSON or missing fields.
/// - `409 Conflict`: the email is already registered.
/// - `422 Unprocessable Entity`: field validation failed.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let RegisterRequest {
        name,
        email,
        password,
    } = register_data.into_inner();
    let user = auth.register_user(name, email, password).await?;

    Ok(HttpResponse::Created().json(user))
}

/// Login user
///
/// Exchanges email and password for a session token plus the user's public view.
///
/// ## Responses:
/// - `200 OK`: `{ "token": ..., "user": ... }`.
/// - `400 Bad Request`: malformed JSON or missing fields.
/// - `401 Unauthorized`: unknown email or wrong password (same body for both).
/// - `422 Unprocessable Entity`: field validation failed.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let LoginRequest { email, password } = login_data.into_inner();
    let response = auth.login_user(&email, password).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Returns the account the bearer token was issued for.
#[get("/me")]
pub async fn me(
    auth: web::Data<AuthService>,
    token: BearerToken,
) -> Result<impl Responder, AppError> {
    let user = auth.current_user(&token.0).await?;
    Ok(HttpResponse::Ok().json(user))
}
