//! # Prediction service
//! One generic service drives every domain. A [`Domain`] supplies the model
//! key, how a payload becomes a feature vector, the two tier thresholds and
//! how the final response is shaped. Everything here is pure; the only
//! state touched is the read-only registry.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PredictError;
use crate::registry::{ModelRegistry, PredictionResult};

/// Three ordinal bands shared by all domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Medium,
    High,
}

/// Two cut points; each is the inclusive lower bound of the band above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub lower: f64,
    pub upper: f64,
}

impl Thresholds {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Classify a raw (unrounded) probability.
    pub fn classify(&self, p: f64) -> Tier {
        if p >= self.upper {
            Tier::High
        } else if p >= self.lower {
            Tier::Medium
        } else {
            Tier::Low
        }
    }
}

/// Round half to even at `digits` decimal places.
pub fn round_dp(x: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (x * scale).round_ties_even() / scale
}

pub trait Domain: Send + Sync + 'static {
    /// Registry key of the model serving this domain.
    const KEY: &'static str;
    const THRESHOLDS: Thresholds;

    type Payload: DeserializeOwned + Serialize + fmt::Debug + Send + 'static;
    type Response: Serialize + fmt::Debug + Send + 'static;
    type Features: AsRef<[f64]>;

    fn features(payload: &Self::Payload) -> Self::Features;

    /// `tier` is always computed from the raw probability in `result`.
    fn respond(result: &PredictionResult, tier: Tier) -> Self::Response;
}

pub struct PredictionService<D> {
    _domain: PhantomData<fn() -> D>,
}

impl<D: Domain> PredictionService<D> {
    pub const fn new() -> Self {
        Self {
            _domain: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        D::KEY
    }

    pub fn assemble(&self, payload: &D::Payload) -> D::Features {
        D::features(payload)
    }

    pub fn derive(&self, result: &PredictionResult) -> D::Response {
        let tier = D::THRESHOLDS.classify(result.probability);
        D::respond(result, tier)
    }

    pub fn predict(
        &self,
        registry: &ModelRegistry,
        payload: &D::Payload,
    ) -> Result<D::Response, PredictError> {
        let features = self.assemble(payload);
        let result = registry.predict(D::KEY, features.as_ref())?;
        Ok(self.derive(&result))
    }
}

impl<D: Domain> Default for PredictionService<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_belong_to_the_higher_tier() {
        let t = Thresholds::new(0.33, 0.67);
        assert_eq!(t.classify(0.67), Tier::High);
        assert_eq!(t.classify(0.669_999), Tier::Medium);
        assert_eq!(t.classify(0.33), Tier::Medium);
        assert_eq!(t.classify(0.329_999), Tier::Low);
        assert_eq!(t.classify(0.0), Tier::Low);
        assert_eq!(t.classify(1.0), Tier::High);
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(round_dp(0.666_649, 4), 0.6666);
        assert_eq!(round_dp(0.669_99, 4), 0.67);
        assert_eq!(round_dp(12.5, 0), 12.0);
        assert_eq!(round_dp(13.5, 0), 14.0);
        assert_eq!(round_dp(95.26, 0), 95.0);
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(Tier::Low < Tier::Medium && Tier::Medium < Tier::High);
    }
}
