use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::reservations::dto::{CarSummary, NewReservation, StatusPatch, ReservationFilter, UserSummary};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub proof_of_payment: String,
    pub payment_status: String,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A reservation row joined with its (possibly missing) user and car.
/// `users.name`/`cars.name` are NOT NULL, so a null joined column means the
/// referenced record no longer exists.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub proof_of_payment: String,
    pub payment_status: String,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub car_name: Option<String>,
    pub car_brand_name: Option<String>,
    pub car_category_id: Option<Uuid>,
    pub car_image: Option<String>,
    pub car_price_per_day: Option<i64>,
    pub car_stock: Option<i32>,
}

impl ReservationDetail {
    pub fn user_summary(&self) -> Option<UserSummary> {
        Some(UserSummary {
            id: self.user_id,
            name: self.user_name.clone()?,
            email: self.user_email.clone()?,
        })
    }

    pub fn car_summary(&self) -> Option<CarSummary> {
        Some(CarSummary {
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
SELECT r.id, r.user_id, r.car_id, r.start_date, r.end_date,
       r.proof_of_payment, r.payment_status, r.status,
       r.created_at, r.updated_at,
       u.name AS user_name, u.email AS user_email,
       c.name AS car_name, c.brand_name AS car_brand_name,
       c.category_id AS car_category_id, c.image AS car_image,
       c.price_per_day AS car_price_per_day, c.stock AS car_stock
FROM reservations r
LEFT JOIN users u ON u.id = r.user_id
LEFT JOIN cars c ON c.id = r.car_id
"#;

impl Reservation {
    pub async fn create(db: &PgPool, booking: &NewReservation) -> anyhow::Result<Reservation> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations
                (user_id, car_id, start_date, end_date, proof_of_payment, payment_status, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, car_id, start_date, end_date, proof_of_payment,
                      payment_status, status, created_at, updated_at
            "#,
        )
        .bind(booking.user_id)
        .bind(booking.car_id)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(&booking.proof_of_payment)
        .bind(booking.payment_status.as_str())
        .bind(booking.status.as_str())
        .fetch_one(db)
        .await?;
        Ok(reservation)
    }

    /// One reservation with user/car resolved, reflecting the referenced
    /// records as they are now.
    pub async fn find_detail(db: &PgPool, id: Uuid) -> anyhow::Result<Option<ReservationDetail>> {
        let detail = sqlx::query_as::<_, ReservationDetail>(
            &format!("{DETAIL_SELECT} WHERE r.id = $1"),
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(detail)
    }

    /// All reservations, newest first, optionally filtered by exact status
    /// and/or payment_status match.
    pub async fn list(
        db: &PgPool,
        filter: &ReservationFilter,
    ) -> anyhow::Result<Vec<ReservationDetail>> {
        let mut query = QueryBuilder::<Postgres>::new(DETAIL_SELECT);
        query.push(" WHERE 1 = 1");
        if let Some(status) = filter.status {
            query.push(" AND r.status = ").push_bind(status.as_str());
        }
        if let Some(payment_status) = filter.payment_status {
            query
                .push(" AND r.payment_status = ")
                .push_bind(payment_status.as_str());
        }
        query.push(" ORDER BY r.created_at DESC");

        let rows = query
            .build_query_as::<ReservationDetail>()
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    /// Overwrite payment_status and/or status; everything else is untouched
    /// apart from updated_at. Returns false when the id does not resolve.
    pub async fn update_status(
        db: &PgPool,
        id: Uuid,
        patch: &StatusPatch,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET payment_status = COALESCE($2, payment_status),
                status = COALESCE($3, status),
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.payment_status.map(|s| s.as_str()))
        .bind(patch.status.map(|s| s.as_str()))
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservations::dto::ReservationResponse;
    use time::macros::{date, datetime};

    fn detail() -> ReservationDetail {
        ReservationDetail {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            car_id: Uuid::new_v4(),
            start_date: date!(2025 - 06 - 01),
            end_date: date!(2025 - 06 - 05),
            proof_of_payment: "bukti.jpg".into(),
            payment_status: "pending".into(),
            status: "pending".into(),
            created_at: datetime!(2025-05-01 10:00:00 UTC),
            updated_at: datetime!(2025-05-01 12:00:00 UTC),
            user_name: Some("John Doe".into()),
            user_email: Some("john@example.com".into()),
            car_name: Some("Avanza".into()),
            car_brand_name: Some("Toyota".into()),
            car_category_id: Some(Uuid::new_v4()),
            car_image: Some("avanza.jpg".into()),
            car_price_per_day: Some(250_000),
            car_stock: Some(5),
        }
    }

    #[test]
    fn summaries_resolve_when_relations_exist() {
        let row = detail();
        let user = row.user_summary().expect("user present");
        assert_eq!(user.id, row.user_id);
        assert_eq!(user.name, "John Doe");
        let car = row.car_summary().expect("car present");
        assert_eq!(car.id, row.car_id);
        assert_eq!(car.brand_name, "Toyota");
        assert_eq!(car.stock, 5);
    }

    #[test]
    fn missing_relations_serialize_as_null() {
        let mut row = detail();
        row.car_name = None;
        row.car_brand_name = None;
        row.car_category_id = None;
        row.car_image = None;
        row.car_price_per_day = None;
        row.car_stock = None;

        let response = ReservationResponse::from(row);
        assert!(response.user.is_some());
        assert!(response.car.is_none());

        let json: serde_json::Value = serde_json::to_value(&response).unwrap();
        assert!(json["car"].is_null());
        assert_eq!(json["user"]["name"], "John Doe");
    }

    #[test]
    fn wire_formats_for_dates_and_timestamps() {
        let response = ReservationResponse::from(detail());
        let json: serde_json::Value = serde_json::to_value(&response).unwrap();
        assert_eq!(json["start_date"], "2025-06-01");
        assert_eq!(json["end_date"], "2025-06-05");
        assert_eq!(json["created_at"], "2025-05-01 10:00:00");
        assert_eq!(json["updated_at"], "2025-05-01 12:00:00");
    }
}
