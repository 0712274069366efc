use chrono::NaiveDateTime;
use common::misc::cents_to_price;
use db::models::order::{Order, OrderItem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub delivery_address: String,
    pub delivery_option: String,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub message: &'static str,
    pub order_id: i64,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub plant_id: i64,
    pub plant_name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub total: f64,
    pub delivery_address: String,
    pub delivery_option: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            plant_id: item.plant_id,
            plant_name: item.plant_name,
            unit_price: cents_to_price(item.unit_price_cents),
            quantity: item.quantity,
        }
    }
}

impl OrderResponse {
    pub fn from_order(order: Order, items: Vec<OrderItemResponse>) -> Self {
        OrderResponse {
            id: order.id,
            total: cents_to_price(order.total_cents),
            delivery_address: order.delivery_address,
            delivery_option: order.delivery_option,
            status: order.status,
            created_at: order.created_at,
            items,
        }
    }
}
