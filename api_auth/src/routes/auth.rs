use actix_session::Session;
use actix_web::{Responder, get, post, web};
use common::error::{AppError, Res};
use common::http::Success;
use common::session::USER_ID_KEY;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::dtos::auth::{AuthResponse, LoginRequest, SignupRequest};
use crate::services;

fn bind_session(session: &Session, user_id: i64) -> Res<()> {
    // new token on every login so a pre-login cookie cannot be reused
    session.renew();
    session
        .insert(USER_ID_KEY, user_id)
        .map_err(|e| AppError::Internal(format!("Failed to bind session: {}", e)))
}

/// Registers a new user and logs them in.
///
/// # Input
/// - `req`: JSON payload with `name`, `email` and `password`
/// - `pool`: Database connection pool
/// - `session`: Session that gets bound to the new user
///
/// # Output
/// - Success: `{"message": ..., "user_id": ...}` and a session cookie
/// - Error: 400 if the email already exists or a field is missing
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/signup', {
///   method: 'POST',
///   credentials: 'include',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({ name: 'Ada', email: 'ada@example.com', password: 'secret' })
/// });
/// ```
#[post("/signup")]
pub async fn post_signup(
    req: web::Json<SignupRequest>,
    pool: web::Data<Arc<SqlitePool>>,
    session: Session,
) -> Res<impl Responder> {
    let pool: &SqlitePool = &pool;
    services::user::validate_signup(&req)?;

    if services::user::exists_user_by_email(pool, &req.email).await? {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }
    let user = services::user::create_user_with_credentials(pool, &req).await?;
    bind_session(&session, user.id)?;

    log::info!("New user signed up: user_id={}", user.id);
    Success::ok(AuthResponse {
        message: "User created successfully",
        user_id: user.id,
    })
}

/// Authenticates a user with email and password.
///
/// # Output
/// - Success: `{"message": ..., "user_id": ...}` and a session cookie
/// - Error: 401 Unauthorized for invalid credentials
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    pool: web::Data<Arc<SqlitePool>>,
    session: Session,
) -> Res<impl Responder> {
    let pool: &SqlitePool = &pool;
    let user = services::auth::authenticate_user(pool, &login_data).await?;
    bind_session(&session, user.id)?;

    Success::ok(AuthResponse {
        message: "Login successful",
        user_id: user.id,
    })
}

/// Drops the session. Succeeds whether or not anyone was logged in.
#[get("/logout")]
pub async fn get_logout(session: Session) -> Res<impl Responder> {
    session.purge();
    Success::message("Logged out successfully")
}
