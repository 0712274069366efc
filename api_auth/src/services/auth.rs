use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use actix_web::web;
use common::error::{AppError, Res};
use db::models::user::User;
use sqlx::SqlitePool;

use crate::dtos::auth::LoginRequest;

/// Hashes a password into an argon2 PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> Res<bool> {
    let parsed_hash = PasswordHash::new(password_hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// [`hash_password`] on the blocking thread pool, keeping argon2 off the worker thread.
pub async fn spawn_hash_password(password: String) -> Res<String> {
    web::block(move || hash_password(&password)).await?
}

pub async fn spawn_verify_password(password: String, password_hash: String) -> Res<bool> {
    web::block(move || verify_password(&password, &password_hash)).await?
}

/// Authenticates existing user.
/// Unknown email and wrong password both yield 401 so the response does not tell them apart.
///
/// # Arguments
///
/// * `pool` - A reference to the database connection pool.
/// * `login_data` - The login data.
pub async fn authenticate_user(pool: &SqlitePool, login_data: &LoginRequest) -> Res<User> {
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let (user, credentials) = db::user::get_user_with_password_hash(pool, &login_data.email)
        .await?
        .ok_or_else(invalid)?;

    if spawn_verify_password(login_data.password.clone(), credentials.password_hash).await? {
        Ok(user)
    } else {
        Err(invalid())
    }
}
