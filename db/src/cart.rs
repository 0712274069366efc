use common::error::{AppError, Res};
use sqlx::{Executor, Sqlite};

use crate::{dtos::cart::CartAddRequest, models::cart::CartLine};

/// Cart rows of a user joined with the plant they reference.
pub async fn get_cart_lines<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    user_id: i64,
) -> Res<Vec<CartLine>> {
    sqlx::query_as::<_, CartLine>(
        r#"
        SELECT c.id, c.user_id, c.plant_id, c.quantity,
               p.name AS plant_name, p.price_cents AS plant_price_cents, p.image AS plant_image
        FROM cart c
        LEFT JOIN plants p ON c.plant_id = p.id
        WHERE c.user_id = ?
        ORDER BY c.id
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// Inserts the entry or adds to its quantity in one statement, so concurrent adds of the
/// same plant never lose an increment.
///
/// An increment that would overflow the stored quantity leaves the row untouched and is
/// reported as `BadRequest`.
pub async fn upsert_cart_entry<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    data: CartAddRequest,
) -> Res<()> {
    let result = sqlx::query(
        r#"
        INSERT INTO cart (user_id, plant_id, quantity)
        VALUES (?, ?, ?)
        ON CONFLICT (user_id, plant_id) DO UPDATE SET quantity = quantity + excluded.quantity
        WHERE cart.quantity <= 9223372036854775807 - excluded.quantity
        "#,
    )
    .bind(data.user_id)
    .bind(data.plant_id)
    .bind(data.quantity)
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::BadRequest("Quantity too large".to_string()));
    }
    Ok(())
}

/// Returns whether a row was removed.
pub async fn delete_cart_entry<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    user_id: i64,
    plant_id: i64,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM cart WHERE user_id = ? AND plant_id = ?")
        .bind(user_id)
        .bind(plant_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn clear_cart<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    user_id: i64,
) -> Res<u64> {
    let result = sqlx::query("DELETE FROM cart WHERE user_id = ?")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};

    use super::*;
    use crate::test_utils::{insert_test_user, memory_pool};

    fn add(user_id: i64, plant_id: i64, quantity: i64) -> CartAddRequest {
        CartAddRequest {
            user_id,
            plant_id,
            quantity,
        }
    }

    #[tokio::test]
    async fn repeat_add_increments_single_row() {
        let pool = memory_pool().await;
        let user_id = insert_test_user(&pool, "a@example.com").await;

        upsert_cart_entry(&pool, add(user_id, 31, 2)).await.unwrap();
        upsert_cart_entry(&pool, add(user_id, 31, 3)).await.unwrap();

        let lines = get_cart_lines(&pool, user_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);
        assert_eq!(lines[0].plant_name.as_deref(), Some("Tomato"));
        assert_eq!(lines[0].plant_price_cents, Some(499));
    }

    #[tokio::test]
    async fn carts_are_per_user() {
        let pool = memory_pool().await;
        let alice = insert_test_user(&pool, "alice@example.com").await;
        let bob = insert_test_user(&pool, "bob@example.com").await;

        upsert_cart_entry(&pool, add(alice, 1, 1)).await.unwrap();
        upsert_cart_entry(&pool, add(bob, 1, 4)).await.unwrap();

        assert_eq!(get_cart_lines(&pool, alice).await.unwrap()[0].quantity, 1);
        assert_eq!(get_cart_lines(&pool, bob).await.unwrap()[0].quantity, 4);
    }

    #[tokio::test]
    async fn unknown_plant_violates_foreign_key() {
        let pool = memory_pool().await;
        let user_id = insert_test_user(&pool, "a@example.com").await;
        assert!(upsert_cart_entry(&pool, add(user_id, 999, 1)).await.is_err());
    }

    #[tokio::test]
    async fn overflowing_increment_is_rejected_and_row_kept() {
        let pool = memory_pool().await;
        let user_id = insert_test_user(&pool, "hoarder@example.com").await;

        upsert_cart_entry(&pool, add(user_id, 1, i64::MAX)).await.unwrap();
        let err = upsert_cart_entry(&pool, add(user_id, 1, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let lines = get_cart_lines(&pool, user_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, i64::MAX);

        // largest increment that still fits
        upsert_cart_entry(&pool, add(user_id, 2, i64::MAX - 4)).await.unwrap();
        upsert_cart_entry(&pool, add(user_id, 2, 4)).await.unwrap();
        assert_eq!(get_cart_lines(&pool, user_id).await.unwrap()[1].quantity, i64::MAX);
    }

    #[tokio::test]
    async fn cart_quantity_must_be_an_integer() {
        let pool = memory_pool().await;
        let user_id = insert_test_user(&pool, "fractional@example.com").await;

        for quantity in [1.5_f64, 9.3e18] {
            let result = sqlx::query("INSERT INTO cart (user_id, plant_id, quantity) VALUES (?, 1, ?)")
                .bind(user_id)
                .bind(quantity)
                .execute(&pool)
                .await;
            assert!(result.is_err(), "quantity {} was accepted", quantity);
        }
        assert!(get_cart_lines(&pool, user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn removing_absent_entry_is_a_no_op() {
        let pool = memory_pool().await;
        let user_id = insert_test_user(&pool, "a@example.com").await;
        upsert_cart_entry(&pool, add(user_id, 2, 1)).await.unwrap();

        assert!(!delete_cart_entry(&pool, user_id, 3).await.unwrap());
        assert_eq!(get_cart_lines(&pool, user_id).await.unwrap().len(), 1);

        assert!(delete_cart_entry(&pool, user_id, 2).await.unwrap());
        assert!(get_cart_lines(&pool, user_id).await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_never_lose_increments() {
        let path = std::env::temp_dir().join(format!("bloomhaven-{}.db", uuid::Uuid::new_v4()));
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = crate::connect(options, 8).await.unwrap();
        let user_id = insert_test_user(&pool, "busy@example.com").await;

        let mut handles = Vec::new();
        for i in 1..=20 {
            let pool = pool.clone();
            handles.push(tokio::spawn(async move {
                upsert_cart_entry(&*pool, add(user_id, 5, i)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let lines = get_cart_lines(&*pool, user_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, (1..=20).sum::<i64>());

        pool.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }
}
