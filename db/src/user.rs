use common::error::{AppError, Res};
use sqlx::{Executor, Sqlite};

use crate::{
    dtos::user::UserCreateRequest,
    models::user::{User, UserCredentials},
};

pub async fn exists_user_by_email<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    email: &str,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
        .bind(email)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_user<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    data: UserCreateRequest,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password_hash)
        VALUES (?, ?, ?)
        RETURNING id, name, email, created_at
        "#,
    )
    .bind(data.name)
    .bind(data.email)
    .bind(data.password_hash)
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "Email already exists"))
}

pub async fn get_user_with_password_hash<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    email: &str,
) -> Res<Option<(User, UserCredentials)>> {
    let row = sqlx::query_as::<_, (i64, String, String, chrono::NaiveDateTime, String)>(
        "SELECT id, name, email, created_at, password_hash FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(|(id, name, email, created_at, password_hash)| {
        (
            User {
                id,
                name,
                email,
                created_at,
            },
            UserCredentials {
                user_id: id,
                password_hash,
            },
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{insert_test_user, memory_pool};

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let pool = memory_pool().await;
        insert_test_user(&pool, "fern@example.com").await;

        let err = insert_user(
            &pool,
            UserCreateRequest {
                name: "Other".to_string(),
                email: "fern@example.com".to_string(),
                password_hash: "x".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn looks_up_credentials_by_email() {
        let pool = memory_pool().await;
        let id = insert_test_user(&pool, "ivy@example.com").await;

        assert!(exists_user_by_email(&pool, "ivy@example.com").await.unwrap());
        assert!(!exists_user_by_email(&pool, "moss@example.com").await.unwrap());

        let (user, credentials) = get_user_with_password_hash(&pool, "ivy@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, id);
        assert_eq!(credentials.user_id, id);
        assert_eq!(credentials.password_hash, "not-a-real-hash");

        assert!(get_user_with_password_hash(&pool, "moss@example.com")
            .await
            .unwrap()
            .is_none());
    }
}
