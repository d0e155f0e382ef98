// src/domains/treatment.rs
//! Treatment urgency. Unlike the risk domains this one reports an integer
//! 0–100 urgency score, a note category and a suggested next step.

use serde::{Deserialize, Serialize};

use crate::registry::PredictionResult;
use crate::service::{round_dp, Domain, Thresholds, Tier};

/// Validated treatment record. `status` and `type` are accepted but not scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentPayload {
    pub cost: f64,
    pub status: String,
    #[serde(rename = "type")]
    pub treatment_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrgencyBand {
    Routine,
    Soon,
    Immediate,
}

impl UrgencyBand {
    pub fn name(self) -> &'static str {
        match self {
            UrgencyBand::Routine => "Routine",
            UrgencyBand::Soon => "Soon",
            UrgencyBand::Immediate => "Immediate",
        }
    }

    pub fn note_category(self) -> NoteCategory {
        match self {
            UrgencyBand::Routine => NoteCategory::Routine,
            UrgencyBand::Soon => NoteCategory::FollowUp,
            UrgencyBand::Immediate => NoteCategory::Emergency,
        }
    }

    pub fn recommended_next_step(self) -> String {
        format!("Schedule {} follow-up", self.name().to_lowercase())
    }
}

impl From<Tier> for UrgencyBand {
    fn from(t: Tier) -> Self {
        match t {
            Tier::Low => UrgencyBand::Routine,
            Tier::Medium => UrgencyBand::Soon,
            Tier::High => UrgencyBand::Immediate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteCategory {
    Routine,
    FollowUp,
    Emergency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentResponse {
    /// Whole number in `[0, 100]`, kept as a float on the wire.
    pub urgency_score: f64,
    pub note_category: NoteCategory,
    pub recommended_next_step: String,
}

pub struct Treatment;

impl Domain for Treatment {
    const KEY: &'static str = "treatment";
    const THRESHOLDS: Thresholds = Thresholds::new(0.5, 0.75);

    type Payload = TreatmentPayload;
    type Response = TreatmentResponse;
    type Features = [f64; 1];

    fn features(p: &TreatmentPayload) -> [f64; 1] {
        [p.cost]
    }

    fn respond(result: &PredictionResult, tier: Tier) -> TreatmentResponse {
        let band = UrgencyBand::from(tier);
        TreatmentResponse {
            urgency_score: round_dp(result.probability * 100.0, 0),
            note_category: band.note_category(),
            recommended_next_step: band.recommended_next_step(),
        }
    }
}
