//! Status label sets for a reservation. Both fields are flat enumerations:
//! any value can be overwritten with any other value, there is no enforced
//! transition graph.

use serde::{Deserialize, Serialize};

/// Financial settlement state of a reservation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Waiting,
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub const DOMAIN: &'static str = "waiting, pending, success, failed";

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Waiting => "waiting",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<PaymentStatus> {
        match value {
            "waiting" => Some(PaymentStatus::Waiting),
            "pending" => Some(PaymentStatus::Pending),
            "success" => Some(PaymentStatus::Success),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

/// Fulfillment state of a reservation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    OnTheRoad,
    Completed,
}

impl ReservationStatus {
    pub const DOMAIN: &'static str = "pending, on_the_road, completed";

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::OnTheRoad => "on_the_road",
            ReservationStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<ReservationStatus> {
        match value {
            "pending" => Some(ReservationStatus::Pending),
            "on_the_road" => Some(ReservationStatus::OnTheRoad),
            "completed" => Some(ReservationStatus::Completed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_status_covers_its_domain() {
        for value in ["waiting", "pending", "success", "failed"] {
            let parsed = PaymentStatus::parse(value).expect("in-domain value");
            assert_eq!(parsed.as_str(), value);
        }
        assert_eq!(PaymentStatus::parse("paid"), None);
        assert_eq!(PaymentStatus::parse("SUCCESS"), None);
        assert_eq!(PaymentStatus::parse(""), None);
    }

    #[test]
    fn reservation_status_covers_its_domain() {
        for value in ["pending", "on_the_road", "completed"] {
            let parsed = ReservationStatus::parse(value).expect("in-domain value");
            assert_eq!(parsed.as_str(), value);
        }
        assert_eq!(ReservationStatus::parse("confirmed"), None);
        assert_eq!(ReservationStatus::parse("on the road"), None);
    }

    #[test]
    fn serde_names_match_the_wire_format() {
        let json = serde_json::to_string(&ReservationStatus::OnTheRoad).unwrap();
        assert_eq!(json, r#""on_the_road""#);
        let back: PaymentStatus = serde_json::from_str(r#""waiting""#).unwrap();
        assert_eq!(back, PaymentStatus::Waiting);
    }
}
