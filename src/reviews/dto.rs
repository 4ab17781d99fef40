use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::FieldErrors;
use crate::reviews::repo::Review;

/// Request body for posting a review. user_id/car_id existence is verified
/// by the handler afterwards.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub user_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug)]
pub struct NewReview {
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

fn check_rating(rating: i32, errors: &mut FieldErrors) {
    if !(1..=5).contains(&rating) {
        errors.insert("rating", "rating must be between 1 and 5".into());
    }
}

impl CreateReviewRequest {
    pub fn validate(self) -> Result<NewReview, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.user_id.is_none() {
            errors.insert("user_id", "user_id is required".into());
        }
        if self.car_id.is_none() {
            errors.insert("car_id", "car_id is required".into());
        }
        match self.rating {
            None => {
                errors.insert("rating", "rating is required".into());
            }
            Some(rating) => check_rating(rating, &mut errors),
        }

        match (self.user_id, self.car_id, self.rating) {
            (Some(user_id), Some(car_id), Some(rating)) if errors.is_empty() => Ok(NewReview {
                user_id,
                car_id,
                rating,
                comment: self.comment,
            }),
            _ => Err(errors),
        }
    }
}

/// Update body: rating optional but must be valid when present, comment
/// nullable.
#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug)]
pub struct ReviewPatch {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

impl UpdateReviewRequest {
    pub fn validate(self) -> Result<ReviewPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(rating) = self.rating {
            check_rating(rating, &mut errors);
        }
        if errors.is_empty() {
            Ok(ReviewPatch {
                rating: self.rating,
                comment: self.comment,
            })
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    #[serde(serialize_with = "crate::datetime::timestamp::serialize")]
    pub created_at: OffsetDateTime,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            user_id: review.user_id,
            car_id: review.car_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CreateReviewRequest {
        CreateReviewRequest {
            user_id: Some(Uuid::new_v4()),
            car_id: Some(Uuid::new_v4()),
            rating: Some(4),
            comment: Some("Smooth ride".into()),
        }
    }

    #[test]
    fn accepts_a_complete_review() {
        let review = full_request().validate().expect("valid payload");
        assert_eq!(review.rating, 4);
        assert_eq!(review.comment.as_deref(), Some("Smooth ride"));
    }

    #[test]
    fn comment_is_optional() {
        let mut request = full_request();
        request.comment = None;
        let review = request.validate().expect("valid payload");
        assert_eq!(review.comment, None);
    }

    #[test]
    fn rejects_out_of_range_ratings() {
        for rating in [0, 6, -1] {
            let mut request = full_request();
            request.rating = Some(rating);
            let errors = request.validate().unwrap_err();
            assert!(errors.contains_key("rating"), "rating {rating} accepted");
        }
    }

    #[test]
    fn reports_missing_references() {
        let request = CreateReviewRequest {
            user_id: None,
            car_id: None,
            rating: Some(3),
            comment: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.contains_key("user_id"));
        assert!(errors.contains_key("car_id"));
    }

    #[test]
    fn patch_validates_rating_only_when_present() {
        let patch = UpdateReviewRequest {
            rating: None,
            comment: Some("updated".into()),
        };
        assert!(patch.validate().is_ok());

        let patch = UpdateReviewRequest {
            rating: Some(9),
            comment: None,
        };
        assert!(patch.validate().is_err());
    }
}
