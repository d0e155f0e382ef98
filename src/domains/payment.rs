// src/domains/payment.rs
use serde::{Deserialize, Serialize};

use crate::registry::PredictionResult;
use crate::service::{round_dp, Domain, Thresholds, Tier};

/// Validated payment record. `method` is accepted but not scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPayload {
    pub amount: f64,
    /// Days past the due date.
    pub days_overdue: f64,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub predicted_late: bool,
    pub risk_score: f64,
    pub risk_level: Tier,
}

/// Late-payment risk.
pub struct Payment;

impl Domain for Payment {
    const KEY: &'static str = "payment";
    const THRESHOLDS: Thresholds = Thresholds::new(0.4, 0.7);

    type Payload = PaymentPayload;
    type Response = PaymentResponse;
    type Features = [f64; 2];

    fn features(p: &PaymentPayload) -> [f64; 2] {
        [p.amount, p.days_overdue]
    }

    fn respond(result: &PredictionResult, tier: Tier) -> PaymentResponse {
        PaymentResponse {
            predicted_late: result.label,
            risk_score: round_dp(result.probability, 4),
            risk_level: tier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::PredictionService;

    #[test]
    fn thresholds_are_point_four_and_point_seven() {
        let svc = PredictionService::<Payment>::new();
        let tier = |p| svc.derive(&PredictionResult::from_probability(p)).risk_level;
        assert_eq!(tier(0.399_99), Tier::Low);
        assert_eq!(tier(0.4), Tier::Medium);
        assert_eq!(tier(0.699_99), Tier::Medium);
        assert_eq!(tier(0.7), Tier::High);
    }

    #[test]
    fn label_tracks_half_not_tier() {
        let svc = PredictionService::<Payment>::new();
        let r = svc.derive(&PredictionResult::from_probability(0.45));
        assert!(!r.predicted_late);
        assert_eq!(r.risk_level, Tier::Medium);
    }
}
