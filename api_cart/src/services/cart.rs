use common::error::{AppError, Res};
use db::dtos::cart::CartAddRequest;
use sqlx::SqlitePool;

use crate::dtos::cart::CartItemResponse;

pub async fn get_cart(
    pool: &SqlitePool,
    user_id: i64,
    public_url: &str,
) -> Res<Vec<CartItemResponse>> {
    let lines = db::cart::get_cart_lines(pool, user_id).await?;
    Ok(lines
        .into_iter()
        .map(|line| CartItemResponse::from_line(line, public_url))
        .collect())
}

/// Adds `quantity` of a plant, incrementing an existing entry atomically.
pub async fn add_to_cart(pool: &SqlitePool, user_id: i64, plant_id: i64, quantity: i64) -> Res<()> {
    if plant_id <= 0 {
        return Err(AppError::BadRequest("plant_id must be a positive integer".to_string()));
    }
    if quantity <= 0 {
        return Err(AppError::BadRequest("quantity must be a positive integer".to_string()));
    }
    if !db::plant::exists_plant(pool, plant_id).await? {
        return Err(AppError::BadRequest(format!("Unknown plant {}", plant_id)));
    }

    db::cart::upsert_cart_entry(
        pool,
        CartAddRequest {
            user_id,
            plant_id,
            quantity,
        },
    )
    .await
}

/// Idempotent: removing a plant that is not in the cart is not an error.
pub async fn remove_from_cart(pool: &SqlitePool, user_id: i64, plant_id: i64) -> Res<()> {
    db::cart::delete_cart_entry(pool, user_id, plant_id).await?;
    Ok(())
}
