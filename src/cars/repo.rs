use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::cars::dto::NewCar;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub image: String,
    pub brand_name: String,
    pub price_per_day: i64,
    pub stock: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Car {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Car>> {
        let rows = sqlx::query_as::<_, Car>(
            r#"
            SELECT id, user_id, category_id, name, image, brand_name,
                   price_per_day, stock, created_at, updated_at
            FROM cars
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Car>> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            SELECT id, user_id, category_id, name, image, brand_name,
                   price_per_day, stock, created_at, updated_at
            FROM cars
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(car)
    }

    pub async fn exists(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM cars WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await?;
        Ok(exists)
    }

    pub async fn create(db: &PgPool, car: &NewCar) -> anyhow::Result<Car> {
        let created = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (user_id, category_id, name, image, brand_name, price_per_day, stock)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, category_id, name, image, brand_name,
                      price_per_day, stock, created_at, updated_at
            "#,
        )
        .bind(car.user_id)
        .bind(car.category_id)
        .bind(&car.name)
        .bind(&car.image)
        .bind(&car.brand_name)
        .bind(car.price_per_day)
        .bind(car.stock)
        .fetch_one(db)
        .await?;
        Ok(created)
    }

    pub async fn update(db: &PgPool, id: Uuid, car: &NewCar) -> anyhow::Result<Option<Car>> {
        let updated = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET user_id = $2, category_id = $3, name = $4, image = $5,
                brand_name = $6, price_per_day = $7, stock = $8, updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, category_id, name, image, brand_name,
                      price_per_day, stock, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(car.user_id)
        .bind(car.category_id)
        .bind(&car.name)
        .bind(&car.image)
        .bind(&car.brand_name)
        .bind(car.price_per_day)
        .bind(car.stock)
        .fetch_optional(db)
        .await?;
        Ok(updated)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
