use common::error::Res;
use sqlx::SqlitePool;

use crate::dtos::plant::PlantResponse;

pub async fn list_plants(pool: &SqlitePool, public_url: &str) -> Res<Vec<PlantResponse>> {
    let plants = db::plant::get_plants(pool).await?;
    Ok(plants
        .into_iter()
        .map(|plant| PlantResponse::from_plant(plant, public_url))
        .collect())
}

/// Unknown categories simply match nothing.
pub async fn list_plants_by_category(
    pool: &SqlitePool,
    category: &str,
    public_url: &str,
) -> Res<Vec<PlantResponse>> {
    let plants = db::plant::get_plants_by_category(pool, category).await?;
    Ok(plants
        .into_iter()
        .map(|plant| PlantResponse::from_plant(plant, public_url))
        .collect())
}
