use common::error::{AppError, Res};
use db::dtos::user::UserCreateRequest;
use db::models::user::User;
use sqlx::SqlitePool;

use crate::dtos::auth::SignupRequest;
use crate::services::auth::spawn_hash_password;

pub async fn exists_user_by_email(pool: &SqlitePool, email: &str) -> Res<bool> {
    db::user::exists_user_by_email(pool, email).await
}

/// Inserts user record with a hashed password.
/// A concurrent signup that wins the race surfaces as the same `Conflict`.
pub async fn create_user_with_credentials(pool: &SqlitePool, req: &SignupRequest) -> Res<User> {
    let password_hash = spawn_hash_password(req.password.clone()).await?;

    db::user::insert_user(
        pool,
        UserCreateRequest {
            name: req.name.clone(),
            email: req.email.clone(),
            password_hash,
        },
    )
    .await
}

pub fn validate_signup(req: &SignupRequest) -> Res<()> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if !req.email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }
    if req.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }
    Ok(())
}
