use serde::Serialize;

/// Cart row left-joined with its plant.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct CartLine {
    pub id: i64,
    pub user_id: i64,
    pub plant_id: i64,
    pub quantity: i64,
    pub plant_name: Option<String>,
    pub plant_price_cents: Option<i64>,
    pub plant_image: Option<String>,
}
