use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub total_cents: i64,
    pub delivery_address: String,
    pub delivery_option: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// A cart line priced at checkout time.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CheckoutLine {
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl CheckoutLine {
    pub fn subtotal_cents(&self) -> Option<i64> {
        self.unit_price_cents.checked_mul(self.quantity)
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub plant_id: i64,
    pub plant_name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
}
