use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{error::Res, http::Success, misc::cents_to_price, session::SessionUser};
use sqlx::SqlitePool;

use crate::{
    dtos::order::{CreateOrderRequest, CreateOrderResponse},
    services,
};

/// Places an order for everything in the cart and empties the cart.
///
/// # Input
/// - `req`: JSON payload with `delivery_address` and `delivery_option`
///
/// # Output
/// - Success: `{"message": ..., "order_id": ..., "total": ...}`
/// - Error: 400 if the cart is empty, 401 if not logged in
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/order', {
///   method: 'POST',
///   credentials: 'include',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({ delivery_address: '1 Greenhouse Lane', delivery_option: 'standard' })
/// });
/// ```
#[post("")]
pub async fn post_order(
    user: web::ReqData<SessionUser>,
    pool: web::Data<Arc<SqlitePool>>,
    req: web::Json<CreateOrderRequest>,
) -> Res<impl Responder> {
    let order = services::order::create_order(&pool, user.user_id, &req).await?;
    log::info!(
        "Order {} placed by user_id={} total={}",
        order.id,
        user.user_id,
        cents_to_price(order.total_cents)
    );
    Success::ok(CreateOrderResponse {
        message: "Order created successfully",
        order_id: order.id,
        total: cents_to_price(order.total_cents),
    })
}

#[get("")]
pub async fn get_orders(
    user: web::ReqData<SessionUser>,
    pool: web::Data<Arc<SqlitePool>>,
) -> Res<impl Responder> {
    let orders = services::order::list_orders(&pool, user.user_id).await?;
    Success::ok(orders)
}
