use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Category {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn exists(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;
        Ok(exists)
    }

    /// True when another category (not `exclude`) already uses the name.
    pub async fn name_taken(
        db: &PgPool,
        name: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM categories WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(db)
        .await?;
        Ok(taken)
    }

    pub async fn create(db: &PgPool, name: &str) -> anyhow::Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .fetch_one(db)
        .await?;
        Ok(category)
    }

    pub async fn update(db: &PgPool, id: Uuid, name: &str) -> anyhow::Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(db)
        .await?;
        Ok(category)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
