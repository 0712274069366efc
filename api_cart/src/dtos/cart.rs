use common::misc::{absolute_url, cents_to_price};
use db::models::cart::CartLine;
use serde::{Deserialize, Serialize};

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub plant_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub plant_id: i64,
}

#[derive(Debug, Serialize)]
pub struct CartItemResponse {
    pub id: i64,
    pub user_id: i64,
    pub plant_id: i64,
    pub quantity: i64,
    pub plant_name: Option<String>,
    pub plant_price: Option<f64>,
    pub plant_image: Option<String>,
}

impl CartItemResponse {
    pub fn from_line(line: CartLine, public_url: &str) -> Self {
        CartItemResponse {
            id: line.id,
            user_id: line.user_id,
            plant_id: line.plant_id,
            quantity: line.quantity,
            plant_name: line.plant_name,
            plant_price: line.plant_price_cents.map(cents_to_price),
            plant_image: line.plant_image.map(|image| absolute_url(public_url, &image)),
        }
    }
}
