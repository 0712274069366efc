use serde::Serialize;

/// Categories the catalog is seeded with.
pub const CATEGORIES: [&str; 3] = ["flowering", "indoor", "vegetable"];

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Plant {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    pub category: String,
    pub price_cents: i64,
    pub image: String,
    pub description: String,
}
