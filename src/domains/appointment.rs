// src/domains/appointment.rs
use serde::{Deserialize, Serialize};

use crate::registry::PredictionResult;
use crate::service::{round_dp, Domain, Thresholds, Tier};

/// Validated appointment record. `status` is accepted but not scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentPayload {
    /// Days between booking and appointment.
    pub booking_lead_days: f64,
    pub fee: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub predicted_no_show: bool,
    pub risk_score: f64,
    pub risk_level: Tier,
}

/// No-show risk.
pub struct Appointment;

impl Domain for Appointment {
    const KEY: &'static str = "appointment";
    const THRESHOLDS: Thresholds = Thresholds::new(0.33, 0.67);

    type Payload = AppointmentPayload;
    type Response = AppointmentResponse;
    type Features = [f64; 2];

    fn features(p: &AppointmentPayload) -> [f64; 2] {
        [p.booking_lead_days, p.fee]
    }

    fn respond(result: &PredictionResult, tier: Tier) -> AppointmentResponse {
        AppointmentResponse {
            predicted_no_show: result.label,
            risk_score: round_dp(result.probability, 4),
            risk_level: tier,
        }
    }
}
