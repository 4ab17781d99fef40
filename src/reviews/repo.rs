use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::reviews::dto::{NewReview, ReviewPatch};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const SELECT: &str =
    "SELECT id, user_id, car_id, rating, comment, created_at, updated_at FROM reviews";

impl Review {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            &format!("{SELECT} ORDER BY created_at DESC"),
        )
        .fetch_all(db)
        .await?;
        Ok(reviews)
    }

    pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(&format!("{SELECT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(review)
    }

    pub async fn create(db: &PgPool, review: &NewReview) -> anyhow::Result<Review> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (user_id, car_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, car_id, rating, comment, created_at, updated_at
            "#,
        )
        .bind(review.user_id)
        .bind(review.car_id)
        .bind(review.rating)
        .bind(&review.comment)
        .fetch_one(db)
        .await?;
        Ok(review)
    }

    /// Overwrites only the supplied fields; a patch with neither field still
    /// refreshes updated_at, matching a no-op save.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        patch: &ReviewPatch,
    ) -> anyhow::Result<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET rating = COALESCE($2, rating),
                comment = COALESCE($3, comment),
                updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, car_id, rating, comment, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.rating)
        .bind(&patch.comment)
        .fetch_optional(db)
        .await?;
        Ok(review)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
