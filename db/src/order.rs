use common::error::{AppError, Res};
use sqlx::{Executor, Sqlite, SqliteConnection};

use crate::{
    cart,
    dtos::order::OrderCreateRequest,
    models::order::{CheckoutLine, Order, OrderItem},
};

/// Opens an order with a zero total for a user whose cart is not empty.
///
/// Returns the new order id, or `None` when the cart is empty. Being a write, this statement
/// takes SQLite's write lock before the cart is read, so inside a transaction nothing can
/// change the cart until commit.
pub async fn insert_pending_order<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    data: &OrderCreateRequest,
) -> Res<Option<i64>> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO orders (user_id, total_cents, delivery_address, delivery_option)
        SELECT ?, 0, ?, ?
        WHERE EXISTS (SELECT 1 FROM cart WHERE user_id = ?)
        RETURNING id
        "#,
    )
    .bind(data.user_id)
    .bind(&data.delivery_address)
    .bind(&data.delivery_option)
    .bind(data.user_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// The user's cart lines at current plant prices.
pub async fn get_checkout_lines<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    user_id: i64,
) -> Res<Vec<CheckoutLine>> {
    sqlx::query_as::<_, CheckoutLine>(
        r#"
        SELECT p.price_cents AS unit_price_cents, c.quantity
        FROM cart c
        JOIN plants p ON c.plant_id = p.id
        WHERE c.user_id = ?
        ORDER BY c.id
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// Sum of price × quantity over all lines, `None` if it does not fit in `i64` cents.
pub fn order_total_cents(lines: &[CheckoutLine]) -> Option<i64> {
    lines
        .iter()
        .try_fold(0i64, |total, line| total.checked_add(line.subtotal_cents()?))
}

pub async fn set_order_total<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    order_id: i64,
    total_cents: i64,
) -> Res<Order> {
    sqlx::query_as::<_, Order>(
        r#"
        UPDATE orders SET total_cents = ?
        WHERE id = ?
        RETURNING id, user_id, total_cents, delivery_address, delivery_option, status, created_at
        "#,
    )
    .bind(total_cents)
    .bind(order_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Copies the user's cart lines into `order_items` for the given order.
pub async fn snapshot_cart_items<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    order_id: i64,
    user_id: i64,
) -> Res<u64> {
    let result = sqlx::query(
        r#"
        INSERT INTO order_items (order_id, plant_id, plant_name, unit_price_cents, quantity)
        SELECT ?, p.id, p.name, p.price_cents, c.quantity
        FROM cart c
        JOIN plants p ON c.plant_id = p.id
        WHERE c.user_id = ?
        ORDER BY c.id
        "#,
    )
    .bind(order_id)
    .bind(user_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Runs the whole checkout on one connection: order row, total, item snapshot, cart clear.
/// The caller owns the transaction and decides whether to commit; on any error it must be
/// dropped so the pending order rolls back.
pub async fn checkout(conn: &mut SqliteConnection, data: &OrderCreateRequest) -> Res<Option<Order>> {
    let Some(order_id) = insert_pending_order(&mut *conn, data).await? else {
        return Ok(None);
    };

    let lines = get_checkout_lines(&mut *conn, data.user_id).await?;
    let total_cents = order_total_cents(&lines)
        .ok_or_else(|| AppError::BadRequest("Order total is too large".to_string()))?;
    let order = set_order_total(&mut *conn, order_id, total_cents).await?;

    snapshot_cart_items(&mut *conn, order.id, data.user_id).await?;
    cart::clear_cart(&mut *conn, data.user_id).await?;
    Ok(Some(order))
}

pub async fn get_orders_by_user_id<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    user_id: i64,
) -> Res<Vec<Order>> {
    sqlx::query_as::<_, Order>(
        r#"
        SELECT id, user_id, total_cents, delivery_address, delivery_option, status, created_at
        FROM orders
        WHERE user_id = ?
        ORDER BY id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_order_items_by_user_id<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    user_id: i64,
) -> Res<Vec<OrderItem>> {
    sqlx::query_as::<_, OrderItem>(
        r#"
        SELECT i.id, i.order_id, i.plant_id, i.plant_name, i.unit_price_cents, i.quantity
        FROM order_items i
        JOIN orders o ON i.order_id = o.id
        WHERE o.user_id = ?
        ORDER BY i.order_id DESC, i.id
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cart::{get_cart_lines, upsert_cart_entry},
        dtos::cart::CartAddRequest,
        test_utils::{insert_test_user, memory_pool},
    };

    fn request(user_id: i64) -> OrderCreateRequest {
        OrderCreateRequest {
            user_id,
            delivery_address: "1 Greenhouse Lane".to_string(),
            delivery_option: "standard".to_string(),
        }
    }

    async fn fill_cart(pool: &sqlx::SqlitePool, user_id: i64) {
        for (plant_id, quantity) in [(31, 2), (32, 1)] {
            upsert_cart_entry(
                pool,
                CartAddRequest {
                    user_id,
                    plant_id,
                    quantity,
                },
            )
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn checkout_totals_snapshots_and_clears() {
        let pool = memory_pool().await;
        let user_id = insert_test_user(&pool, "buyer@example.com").await;
        fill_cart(&pool, user_id).await;

        let mut tx = pool.begin().await.unwrap();
        let order = checkout(&mut tx, &request(user_id)).await.unwrap().unwrap();
        tx.commit().await.unwrap();

        assert_eq!(order.total_cents, 1397);
        assert_eq!(order.status, "pending");
        assert!(get_cart_lines(&pool, user_id).await.unwrap().is_empty());

        let items = get_order_items_by_user_id(&pool, user_id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].plant_name, "Tomato");
        assert_eq!(items[0].unit_price_cents, 499);
        assert_eq!(items[0].quantity, 2);

        let mut tx = pool.begin().await.unwrap();
        assert!(checkout(&mut tx, &request(user_id)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn overflowing_total_is_rejected() {
        let pool = memory_pool().await;
        let user_id = insert_test_user(&pool, "bulk@example.com").await;
        // 499 cents × 10^16 does not fit in i64
        upsert_cart_entry(
            &pool,
            CartAddRequest {
                user_id,
                plant_id: 31,
                quantity: 10_i64.pow(16),
            },
        )
        .await
        .unwrap();

        {
            let mut tx = pool.begin().await.unwrap();
            let err = checkout(&mut tx, &request(user_id)).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }

        let lines = get_cart_lines(&pool, user_id).await.unwrap();
        assert_eq!(lines[0].quantity, 10_i64.pow(16));
        assert!(get_orders_by_user_id(&pool, user_id).await.unwrap().is_empty());
    }

    #[test]
    fn totals_use_checked_arithmetic() {
        let line = |unit_price_cents, quantity| CheckoutLine {
            unit_price_cents,
            quantity,
        };
        assert_eq!(order_total_cents(&[line(499, 2), line(399, 1)]), Some(1397));
        assert_eq!(order_total_cents(&[]), Some(0));
        assert_eq!(order_total_cents(&[line(2, i64::MAX / 2 + 1)]), None);
        assert_eq!(order_total_cents(&[line(1, i64::MAX), line(1, 1)]), None);
    }

    #[tokio::test]
    async fn rolled_back_checkout_leaves_cart_and_orders_untouched() {
        let pool = memory_pool().await;
        let user_id = insert_test_user(&pool, "undecided@example.com").await;
        fill_cart(&pool, user_id).await;

        {
            let mut tx = pool.begin().await.unwrap();
            checkout(&mut tx, &request(user_id)).await.unwrap().unwrap();
            // dropped without commit
        }

        assert_eq!(get_cart_lines(&pool, user_id).await.unwrap().len(), 2);
        assert!(get_orders_by_user_id(&pool, user_id).await.unwrap().is_empty());
    }
}
