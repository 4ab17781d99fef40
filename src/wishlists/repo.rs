use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::wishlists::dto::{WishlistCar, WishlistPair};

/// A wishlist row joined with its (possibly missing) car.
#[derive(Debug, Clone, FromRow)]
pub struct WishlistDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub created_at: OffsetDateTime,
    pub car_name: Option<String>,
    pub car_brand_name: Option<String>,
    pub car_category_id: Option<Uuid>,
    pub car_image: Option<String>,
    pub car_price_per_day: Option<i64>,
    pub car_stock: Option<i32>,
}

impl WishlistDetail {
    pub fn car(&self) -> Option<WishlistCar> {
        Some(WishlistCar {
            id: self.car_id,
            name: self.car_name.clone()?,
            brand_name: self.car_brand_name.clone()?,
            category_id: self.car_category_id?,
            image: self.car_image.clone()?,
            price_per_day: self.car_price_per_day?,
            stock: self.car_stock?,
        })
    }
}

const DETAIL_SELECT: &str = r#"
SELECT w.id, w.user_id, w.car_id, w.created_at,
       c.name AS car_name, c.brand_name AS car_brand_name,
       c.category_id AS car_category_id, c.image AS car_image,
       c.price_per_day AS car_price_per_day, c.stock AS car_stock
FROM wishlists w
LEFT JOIN cars c ON c.id = w.car_id
"#;

pub struct Wishlist;

impl Wishlist {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<WishlistDetail>> {
        let rows = sqlx::query_as::<_, WishlistDetail>(
            &format!("{DETAIL_SELECT} ORDER BY w.created_at DESC"),
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_detail(db: &PgPool, id: Uuid) -> anyhow::Result<Option<WishlistDetail>> {
        let row = sqlx::query_as::<_, WishlistDetail>(
            &format!("{DETAIL_SELECT} WHERE w.id = $1"),
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// First-or-create on the unique (user_id, car_id) pair: wishing for the
    /// same car twice returns the existing entry.
    pub async fn first_or_create(db: &PgPool, pair: &WishlistPair) -> anyhow::Result<Uuid> {
        let existing = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM wishlists WHERE user_id = $1 AND car_id = $2",
        )
        .bind(pair.user_id)
        .bind(pair.car_id)
        .fetch_optional(db)
        .await?;
        if let Some(id) = existing {
            return Ok(id);
        }

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO wishlists (user_id, car_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, car_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id
            "#,
        )
        .bind(pair.user_id)
        .bind(pair.car_id)
        .fetch_one(db)
        .await?;
        Ok(id)
    }

    pub async fn update(db: &PgPool, id: Uuid, pair: &WishlistPair) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE wishlists SET user_id = $2, car_id = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(pair.user_id)
        .bind(pair.car_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM wishlists WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
