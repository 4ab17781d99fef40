use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::cars::repo::Car;
use crate::error::FieldErrors;

/// Request body for creating or replacing a car. Every field is mandatory so
/// missing ones surface as field-level errors rather than a decode failure.
#[derive(Debug, Deserialize)]
pub struct CarRequest {
    pub user_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub brand_name: Option<String>,
    pub price_per_day: Option<i64>,
    pub stock: Option<i32>,
}

/// Validated car payload ready for persistence.
#[derive(Debug)]
pub struct NewCar {
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub image: String,
    pub brand_name: String,
    pub price_per_day: i64,
    pub stock: i32,
}

impl CarRequest {
    /// Field-level checks that need no database access; reference existence
    /// is verified by the handler afterwards.
    pub fn validate(self) -> Result<NewCar, FieldErrors> {
        let mut errors = FieldErrors::new();

        let user_id = self.user_id;
        if user_id.is_none() {
            errors.insert("user_id", "user_id is required".into());
        }
        let category_id = self.category_id;
        if category_id.is_none() {
            errors.insert("category_id", "category_id is required".into());
        }

        let name = self.name.map(|n| n.trim().to_string()).unwrap_or_default();
        if name.is_empty() {
            errors.insert("name", "name is required".into());
        } else if name.len() > 255 {
            errors.insert("name", "name must not exceed 255 characters".into());
        }

        let image = self.image.unwrap_or_default();
        if image.is_empty() {
            errors.insert("image", "image is required".into());
        }

        let brand_name = self
            .brand_name
            .map(|n| n.trim().to_string())
            .unwrap_or_default();
        if brand_name.is_empty() {
            errors.insert("brand_name", "brand_name is required".into());
        } else if brand_name.len() > 255 {
            errors.insert("brand_name", "brand_name must not exceed 255 characters".into());
        }

        let price_per_day = match self.price_per_day {
            Some(price) if price >= 0 => price,
            Some(_) => {
                errors.insert("price_per_day", "price_per_day must not be less than 0".into());
                0
            }
            None => {
                errors.insert("price_per_day", "price_per_day is required".into());
                0
            }
        };

        let stock = match self.stock {
            Some(stock) if stock >= 0 => stock,
            Some(_) => {
                errors.insert("stock", "stock must not be less than 0".into());
                0
            }
            None => {
                errors.insert("stock", "stock is required".into());
                0
            }
        };

        match (user_id, category_id) {
            (Some(user_id), Some(category_id)) if errors.is_empty() => Ok(NewCar {
                user_id,
                category_id,
                name,
                image,
                brand_name,
                price_per_day,
                stock,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CarResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub image: String,
    pub brand_name: String,
    pub price_per_day: i64,
    pub stock: i32,
    #[serde(serialize_with = "crate::datetime::timestamp::serialize")]
    pub created_at: OffsetDateTime,
    #[serde(serialize_with = "crate::datetime::timestamp::serialize")]
    pub updated_at: OffsetDateTime,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            user_id: car.user_id,
            category_id: car.category_id,
            name: car.name,
            image: car.image,
            brand_name: car.brand_name,
            price_per_day: car.price_per_day,
            stock: car.stock,
            created_at: car.created_at,
            updated_at: car.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CarRequest {
        CarRequest {
            user_id: Some(Uuid::new_v4()),
            category_id: Some(Uuid::new_v4()),
            name: Some("Toyota Fortuner".into()),
            image: Some("fortuner.jpg".into()),
            brand_name: Some("Toyota".into()),
            price_per_day: Some(500_000),
            stock: Some(5),
        }
    }

    #[test]
    fn accepts_a_complete_payload() {
        let car = full_request().validate().expect("valid payload");
        assert_eq!(car.name, "Toyota Fortuner");
        assert_eq!(car.price_per_day, 500_000);
    }

    #[test]
    fn reports_every_missing_field() {
        let empty = CarRequest {
            user_id: None,
            category_id: None,
            name: None,
            image: None,
            brand_name: None,
            price_per_day: None,
            stock: None,
        };
        let errors = empty.validate().unwrap_err();
        for field in [
            "user_id",
            "category_id",
            "name",
            "image",
            "brand_name",
            "price_per_day",
            "stock",
        ] {
            assert!(errors.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn rejects_negative_price_and_stock() {
        let mut request = full_request();
        request.price_per_day = Some(-1);
        request.stock = Some(-3);
        let errors = request.validate().unwrap_err();
        assert!(errors.contains_key("price_per_day"));
        assert!(errors.contains_key("stock"));
        assert_eq!(errors.len(), 2);
    }
}
