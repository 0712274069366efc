use std::sync::Arc;

use actix_web::{Responder, delete, get, post, web};
use common::{env_config::Config, error::Res, http::Success, session::SessionUser};
use sqlx::SqlitePool;

use crate::{
    dtos::cart::{AddToCartRequest, RemoveFromCartRequest},
    services,
};

/// Returns the logged-in user's cart, each line enriched with plant name, price and image.
///
/// # Frontend Example
/// ```javascript
/// const cart = await (await fetch('/api/cart', { credentials: 'include' })).json();
/// // [{ id: 1, user_id: 3, plant_id: 31, quantity: 2, plant_name: 'Tomato', plant_price: 4.99, plant_image: 'http://...' }]
/// ```
#[get("")]
pub async fn get_cart(
    user: web::ReqData<SessionUser>,
    pool: web::Data<Arc<SqlitePool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let items = services::cart::get_cart(&pool, user.user_id, &config.public_url).await?;
    Success::ok(items)
}

/// Adds a plant to the cart. `quantity` defaults to 1; repeat adds accumulate.
#[post("")]
pub async fn post_add_to_cart(
    user: web::ReqData<SessionUser>,
    pool: web::Data<Arc<SqlitePool>>,
    req: web::Json<AddToCartRequest>,
) -> Res<impl Responder> {
    services::cart::add_to_cart(&pool, user.user_id, req.plant_id, req.quantity).await?;
    Success::message("Item added to cart")
}

#[delete("")]
pub async fn delete_from_cart(
    user: web::ReqData<SessionUser>,
    pool: web::Data<Arc<SqlitePool>>,
    req: web::Json<RemoveFromCartRequest>,
) -> Res<impl Responder> {
    services::cart::remove_from_cart(&pool, user.user_id, req.plant_id).await?;
    Success::message("Item removed from cart")
}
