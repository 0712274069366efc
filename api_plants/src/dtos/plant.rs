use common::misc::{absolute_url, cents_to_price};
use db::models::plant::Plant;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PlantResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    pub price: f64,
    pub image: String,
    pub description: String,
}

impl PlantResponse {
    pub fn from_plant(plant: Plant, public_url: &str) -> Self {
        PlantResponse {
            id: plant.id,
            name: plant.name,
            category: plant.category,
            price: cents_to_price(plant.price_cents),
            image: absolute_url(public_url, &plant.image),
            description: plant.description,
        }
    }
}
