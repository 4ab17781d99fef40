use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::datetime::parse_date;
use crate::error::FieldErrors;
use crate::reservations::repo::ReservationDetail;
use crate::reservations::status::{PaymentStatus, ReservationStatus};

/// Request body for booking a car. Every field is mandatory; options let
/// missing fields surface as field-level errors instead of a decode failure.
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub user_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub proof_of_payment: Option<String>,
    pub payment_status: Option<String>,
    pub status: Option<String>,
}

/// Validated booking ready for persistence.
#[derive(Debug)]
pub struct NewReservation {
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub proof_of_payment: String,
    pub payment_status: PaymentStatus,
    pub status: ReservationStatus,
}

impl CreateReservationRequest {
    /// Field-level checks that need no database access; user/car existence
    /// is verified by the handler afterwards.
    pub fn validate(self) -> Result<NewReservation, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.user_id.is_none() {
            errors.insert("user_id", "user_id is required".into());
        }
        if self.car_id.is_none() {
            errors.insert("car_id", "car_id is required".into());
        }

        let start_date = match self.start_date.as_deref() {
            None => {
                errors.insert("start_date", "start_date is required".into());
                None
            }
            Some(raw) => match parse_date(raw) {
                Some(date) => Some(date),
                None => {
                    errors.insert("start_date", "start_date must be a valid date (YYYY-MM-DD)".into());
                    None
                }
            },
        };
        let end_date = match self.end_date.as_deref() {
            None => {
                errors.insert("end_date", "end_date is required".into());
                None
            }
            Some(raw) => match parse_date(raw) {
                Some(date) => Some(date),
                None => {
                    errors.insert("end_date", "end_date must be a valid date (YYYY-MM-DD)".into());
                    None
                }
            },
        };
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                errors.insert("end_date", "end_date must not be before start_date".into());
            }
        }

        let proof_of_payment = self.proof_of_payment.unwrap_or_default();
        if proof_of_payment.is_empty() {
            errors.insert("proof_of_payment", "proof_of_payment is required".into());
        }

        let payment_status = match self.payment_status.as_deref() {
            None => {
                errors.insert("payment_status", "payment_status is required".into());
                None
            }
            Some(raw) => match PaymentStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    errors.insert(
                        "payment_status",
                        format!("payment_status must be one of: {}", PaymentStatus::DOMAIN),
                    );
                    None
                }
            },
        };
        let status = match self.status.as_deref() {
            None => {
                errors.insert("status", "status is required".into());
                None
            }
            Some(raw) => match ReservationStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    errors.insert(
                        "status",
                        format!("status must be one of: {}", ReservationStatus::DOMAIN),
                    );
                    None
                }
            },
        };

        match (self.user_id, self.car_id, start_date, end_date, payment_status, status) {
            (Some(user_id), Some(car_id), Some(start_date), Some(end_date), Some(payment_status), Some(status))
                if errors.is_empty() =>
            {
                Ok(NewReservation {
                    user_id,
                    car_id,
                    start_date,
                    end_date,
                    proof_of_payment,
                    payment_status,
                    status,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Request body for the status-update operation. Both fields are optional;
/// only the supplied ones are overwritten.
#[derive(Debug, Deserialize)]
pub struct UpdateReservationStatusRequest {
    pub payment_status: Option<String>,
    pub status: Option<String>,
}

/// Validated patch for the two mutable fields.
#[derive(Debug)]
pub struct StatusPatch {
    pub payment_status: Option<PaymentStatus>,
    pub status: Option<ReservationStatus>,
}

impl UpdateReservationStatusRequest {
    pub fn validate(self) -> Result<StatusPatch, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.payment_status.is_none() && self.status.is_none() {
            errors.insert("status", "status or payment_status must be provided".into());
        }

        let payment_status = match self.payment_status.as_deref() {
            None => None,
            Some(raw) => match PaymentStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    errors.insert(
                        "payment_status",
                        format!("payment_status must be one of: {}", PaymentStatus::DOMAIN),
                    );
                    None
                }
            },
        };
        let status = match self.status.as_deref() {
            None => None,
            Some(raw) => match ReservationStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    errors.insert(
                        "status",
                        format!("status must be one of: {}", ReservationStatus::DOMAIN),
                    );
                    None
                }
            },
        };

        if errors.is_empty() {
            Ok(StatusPatch {
                payment_status,
                status,
            })
        } else {
            Err(errors)
        }
    }
}

/// Optional exact-match filters for the list operation.
#[derive(Debug, Default, Deserialize)]
pub struct ListReservationsQuery {
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

#[derive(Debug, Default)]
pub struct ReservationFilter {
    pub status: Option<ReservationStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl ListReservationsQuery {
    pub fn validate(self) -> Result<ReservationFilter, FieldErrors> {
        let mut errors = FieldErrors::new();

        let status = match self.status.as_deref() {
            None => None,
            Some(raw) => match ReservationStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    errors.insert(
                        "status",
                        format!("status must be one of: {}", ReservationStatus::DOMAIN),
                    );
                    None
                }
            },
        };
        let payment_status = match self.payment_status.as_deref() {
            None => None,
            Some(raw) => match PaymentStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    errors.insert(
                        "payment_status",
                        format!("payment_status must be one of: {}", PaymentStatus::DOMAIN),
                    );
                    None
                }
            },
        };

        if errors.is_empty() {
            Ok(ReservationFilter {
                status,
                payment_status,
            })
        } else {
            Err(errors)
        }
    }
}

/// Embedded user summary, resolved at read time.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Embedded car summary, resolved at read time.
#[derive(Debug, Serialize)]
pub struct CarSummary {
    pub id: Uuid,
    pub name: String,
    pub brand_name: String,
    pub category_id: Uuid,
    pub image: String,
    pub price_per_day: i64,
    pub stock: i32,
}

/// A reservation as serialized to clients, with its relations embedded.
/// A missing user or car renders as `null` rather than failing.
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub user: Option<UserSummary>,
    pub car: Option<CarSummary>,
    #[serde(serialize_with = "crate::datetime::date::serialize")]
    pub start_date: Date,
    #[serde(serialize_with = "crate::datetime::date::serialize")]
    pub end_date: Date,
    pub proof_of_payment: String,
    pub payment_status: String,
    pub status: String,
    #[serde(serialize_with = "crate::datetime::timestamp::serialize")]
    pub created_at: OffsetDateTime,
    #[serde(serialize_with = "crate::datetime::timestamp::serialize")]
    pub updated_at: OffsetDateTime,
}

impl From<ReservationDetail> for ReservationResponse {
    fn from(row: ReservationDetail) -> Self {
        let user = row.user_summary();
        let car = row.car_summary();
        Self {
            id: row.id,
            user,
            car,
            start_date: row.start_date,
            end_date: row.end_date,
            proof_of_payment: row.proof_of_payment,
            payment_status: row.payment_status,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn full_request() -> CreateReservationRequest {
        CreateReservationRequest {
            user_id: Some(Uuid::new_v4()),
            car_id: Some(Uuid::new_v4()),
            start_date: Some("2025-06-01".into()),
            end_date: Some("2025-06-05".into()),
            proof_of_payment: Some("bukti.jpg".into()),
            payment_status: Some("pending".into()),
            status: Some("pending".into()),
        }
    }

    #[test]
    fn accepts_a_complete_booking() {
        let booking = full_request().validate().expect("valid payload");
        assert_eq!(booking.start_date, date!(2025 - 06 - 01));
        assert_eq!(booking.end_date, date!(2025 - 06 - 05));
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
        assert_eq!(booking.status, ReservationStatus::Pending);
    }

    #[test]
    fn accepts_same_day_rental() {
        let mut request = full_request();
        request.end_date = Some("2025-06-01".into());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn reports_every_missing_field() {
        let empty = CreateReservationRequest {
            user_id: None,
            car_id: None,
            start_date: None,
            end_date: None,
            proof_of_payment: None,
            payment_status: None,
            status: None,
        };
        let errors = empty.validate().unwrap_err();
        for field in [
            "user_id",
            "car_id",
            "start_date",
            "end_date",
            "proof_of_payment",
            "payment_status",
            "status",
        ] {
            assert!(errors.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn rejects_out_of_domain_statuses() {
        let mut request = full_request();
        request.payment_status = Some("paid".into());
        request.status = Some("confirmed".into());
        let errors = request.validate().unwrap_err();
        assert!(errors["payment_status"].contains("waiting, pending, success, failed"));
        assert!(errors["status"].contains("pending, on_the_road, completed"));
    }

    #[test]
    fn rejects_malformed_dates() {
        let mut request = full_request();
        request.start_date = Some("01/06/2025".into());
        let errors = request.validate().unwrap_err();
        assert!(errors.contains_key("start_date"));
        assert!(!errors.contains_key("end_date"));
    }

    #[test]
    fn rejects_end_before_start() {
        let mut request = full_request();
        request.start_date = Some("2025-06-05".into());
        request.end_date = Some("2025-06-01".into());
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors["end_date"],
            "end_date must not be before start_date"
        );
    }

    #[test]
    fn patch_requires_at_least_one_field() {
        let patch = UpdateReservationStatusRequest {
            payment_status: None,
            status: None,
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors.contains_key("status"));
    }

    #[test]
    fn patch_accepts_a_single_field() {
        let patch = UpdateReservationStatusRequest {
            payment_status: Some("success".into()),
            status: None,
        };
        let patch = patch.validate().expect("valid patch");
        assert_eq!(patch.payment_status, Some(PaymentStatus::Success));
        assert_eq!(patch.status, None);
    }

    #[test]
    fn patch_rejects_unknown_labels() {
        let patch = UpdateReservationStatusRequest {
            payment_status: Some("refunded".into()),
            status: Some("cancelled".into()),
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors.contains_key("payment_status"));
        assert!(errors.contains_key("status"));
    }

    #[test]
    fn filter_validates_each_side_independently() {
        let query = ListReservationsQuery {
            status: Some("completed".into()),
            payment_status: None,
        };
        let filter = query.validate().expect("valid filter");
        assert_eq!(filter.status, Some(ReservationStatus::Completed));
        assert_eq!(filter.payment_status, None);

        let query = ListReservationsQuery {
            status: Some("done".into()),
            payment_status: Some("paid".into()),
        };
        let errors = query.validate().unwrap_err();
        assert!(errors.contains_key("status"));
        assert!(errors.contains_key("payment_status"));
    }
}
