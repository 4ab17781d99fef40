use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::FieldErrors;
use crate::wishlists::repo::WishlistDetail;

/// Request body for both create and update: the user/car pair.
#[derive(Debug, Deserialize)]
pub struct WishlistRequest {
    pub user_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
}

#[derive(Debug)]
pub struct WishlistPair {
    pub user_id: Uuid,
    pub car_id: Uuid,
}

impl WishlistRequest {
    pub fn validate(self) -> Result<WishlistPair, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.user_id.is_none() {
            errors.insert("user_id", "user_id is required".into());
        }
        if self.car_id.is_none() {
            errors.insert("car_id", "car_id is required".into());
        }
        match (self.user_id, self.car_id) {
            (Some(user_id), Some(car_id)) => Ok(WishlistPair { user_id, car_id }),
            _ => Err(errors),
        }
    }
}

/// Embedded car, resolved at read time; null when the car no longer exists.
#[derive(Debug, Serialize)]
pub struct WishlistCar {
    pub id: Uuid,
    pub name: String,
    pub brand_name: String,
    pub category_id: Uuid,
    pub image: String,
    pub price_per_day: i64,
    pub stock: i32,
}

#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    #[serde(serialize_with = "crate::datetime::timestamp::serialize")]
    pub created_at: OffsetDateTime,
    pub car: Option<WishlistCar>,
}

impl From<WishlistDetail> for WishlistResponse {
    fn from(row: WishlistDetail) -> Self {
        let car = row.car();
        Self {
            id: row.id,
            user_id: row.user_id,
            car_id: row.car_id,
            created_at: row.created_at,
            car,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn detail() -> WishlistDetail {
        WishlistDetail {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            car_id: Uuid::new_v4(),
            created_at: datetime!(2025-05-01 09:00:00 UTC),
            car_name: Some("Avanza".into()),
            car_brand_name: Some("Toyota".into()),
            car_category_id: Some(Uuid::new_v4()),
            car_image: Some("avanza.jpg".into()),
            car_price_per_day: Some(250_000),
            car_stock: Some(5),
        }
    }

    #[test]
    fn pair_must_be_complete() {
        let errors = WishlistRequest {
            user_id: None,
            car_id: None,
        }
        .validate()
        .unwrap_err();
        assert!(errors.contains_key("user_id"));
        assert!(errors.contains_key("car_id"));
    }

    #[test]
    fn embedded_car_resolves_when_present() {
        let response = WishlistResponse::from(detail());
        let car = response.car.expect("car present");
        assert_eq!(car.brand_name, "Toyota");
    }

    #[test]
    fn missing_car_serializes_as_null() {
        let mut row = detail();
        row.car_name = None;
        row.car_brand_name = None;
        row.car_category_id = None;
        row.car_image = None;
        row.car_price_per_day = None;
        row.car_stock = None;

        let response = WishlistResponse::from(row);
        let json: serde_json::Value = serde_json::to_value(&response).unwrap();
        assert!(json["car"].is_null());
        assert_eq!(json["created_at"], "2025-05-01 09:00:00");
    }
}
