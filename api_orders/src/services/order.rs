use std::collections::HashMap;

use common::error::{AppError, Res};
use db::{dtos::order::OrderCreateRequest, models::order::Order};
use sqlx::SqlitePool;

use crate::dtos::order::{CreateOrderRequest, OrderItemResponse, OrderResponse};

/// Turns the user's cart into an order.
///
/// Order insert, item snapshot and cart clear share one transaction: either all of them
/// land or none do. An empty cart rolls back and reports `BadRequest`.
pub async fn create_order(pool: &SqlitePool, user_id: i64, req: &CreateOrderRequest) -> Res<Order> {
    if req.delivery_address.trim().is_empty() {
        return Err(AppError::BadRequest("delivery_address is required".to_string()));
    }
    if req.delivery_option.trim().is_empty() {
        return Err(AppError::BadRequest("delivery_option is required".to_string()));
    }

    let mut tx = pool.begin().await?;

    let order = db::order::checkout(
        &mut tx,
        &OrderCreateRequest {
            user_id,
            delivery_address: req.delivery_address.clone(),
            delivery_option: req.delivery_option.clone(),
        },
    )
    .await?
    .ok_or_else(|| AppError::BadRequest("Cart is empty".to_string()))?;

    tx.commit().await?;
    Ok(order)
}

/// The user's orders, newest first, each with its purchased lines.
pub async fn list_orders(pool: &SqlitePool, user_id: i64) -> Res<Vec<OrderResponse>> {
    let orders = db::order::get_orders_by_user_id(pool, user_id).await?;
    let items = db::order::get_order_items_by_user_id(pool, user_id).await?;

    let mut items_by_order: HashMap<i64, Vec<OrderItemResponse>> = HashMap::new();
    for item in items {
        items_by_order
            .entry(item.order_id)
            .or_default()
            .push(item.into());
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = items_by_order.remove(&order.id).unwrap_or_default();
            OrderResponse::from_order(order, items)
        })
        .collect())
}
