use common::error::{AppError, Res};
use sqlx::{Executor, Sqlite};

use crate::models::plant::Plant;

pub async fn get_plants<'e, E: Executor<'e, Database = Sqlite>>(executor: E) -> Res<Vec<Plant>> {
    sqlx::query_as::<_, Plant>(
        "SELECT id, name, type, price_cents, image, description FROM plants ORDER BY id",
    )
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_plants_by_category<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    category: &str,
) -> Res<Vec<Plant>> {
    sqlx::query_as::<_, Plant>(
        "SELECT id, name, type, price_cents, image, description FROM plants WHERE type = ? ORDER BY id",
    )
    .bind(category)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn exists_plant<'e, E: Executor<'e, Database = Sqlite>>(
    executor: E,
    plant_id: i64,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM plants WHERE id = ?)")
        .bind(plant_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::plant::CATEGORIES, test_utils::memory_pool};

    #[tokio::test]
    async fn catalog_is_seeded_once() {
        let pool = memory_pool().await;
        let plants = get_plants(&pool).await.unwrap();
        assert_eq!(plants.len(), 50);
        assert_eq!(plants[0].name, "Rose");
        assert_eq!(plants[0].price_cents, 1299);

        // re-running the migrator must not duplicate the seed
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        assert_eq!(get_plants(&pool).await.unwrap().len(), 50);
    }

    #[tokio::test]
    async fn category_filter_only_returns_that_category() {
        let pool = memory_pool().await;
        let mut total = 0;
        for category in CATEGORIES {
            let plants = get_plants_by_category(&pool, category).await.unwrap();
            assert!(!plants.is_empty());
            assert!(plants.iter().all(|p| p.category == category));
            total += plants.len();
        }
        assert_eq!(total, 50);
        assert_eq!(get_plants_by_category(&pool, "vegetable").await.unwrap().len(), 20);
        assert!(get_plants_by_category(&pool, "cactus").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn checks_plant_existence() {
        let pool = memory_pool().await;
        assert!(exists_plant(&pool, 31).await.unwrap());
        assert!(!exists_plant(&pool, 999).await.unwrap());
    }
}
