use std::sync::Arc;

use actix_web::{Responder, get, web};
use common::{env_config::Config, error::Res, http::Success};
use sqlx::SqlitePool;

use crate::services;

/// Lists the whole catalog with absolute image URLs.
///
/// # Frontend Example
/// ```javascript
/// const plants = await (await fetch('/api/plants')).json();
/// // [{ id: 1, name: 'Rose', type: 'flowering', price: 12.99, image: 'http://.../images/flowering/rose.jpg', description: '...' }, ...]
/// ```
#[get("")]
pub async fn get_plants(
    pool: web::Data<Arc<SqlitePool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let plants = services::plant::list_plants(&pool, &config.public_url).await?;
    Success::ok(plants)
}

/// Lists plants of one category (`flowering`, `indoor`, `vegetable`).
/// Any other category returns an empty array.
#[get("/{category}")]
pub async fn get_plants_by_category(
    path: web::Path<String>,
    pool: web::Data<Arc<SqlitePool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let plants =
        services::plant::list_plants_by_category(&pool, path.as_str(), &config.public_url).await?;
    Success::ok(plants)
}
