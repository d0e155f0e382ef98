//! # Scoring backends
//!
//! A backend maps an ordered feature vector to a probability in `[0, 1]`.
//! Three kinds exist and callers never need to know which one they hit:
//!
//! - `ClosedForm`: a fixed logistic formula compiled into the binary.
//! - `Probabilistic`: a loaded model that yields a class distribution.
//! - `PointEstimate`: a loaded model that yields a single number.
//!
//! Backends check the vector length and reject non-finite values, but never
//! clamp, pad or truncate input.

use std::fmt;

use crate::error::PredictError;

/// Capability: model returns `[p_negative, p_positive]` for one row.
pub trait ProbabilityModel: Send + Sync {
    fn n_features(&self) -> usize;
    fn predict_proba(&self, row: &[f64]) -> [f64; 2];
}

/// Capability: model returns one point estimate for one row.
pub trait PointEstimateModel: Send + Sync {
    fn n_features(&self) -> usize;
    fn predict(&self, row: &[f64]) -> f64;
}

/// Logistic squashing, `1 / (1 + e^-x)`. Saturates to exactly 0.0 / 1.0 at the extremes.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// `sigmoid(bias + Σ wᵢ·xᵢ)` with coefficients fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticFormula {
    pub bias: f64,
    pub weights: &'static [f64],
}

impl LogisticFormula {
    /// Shorter lead time and higher fee raise no-show risk. Features: `[lead_days, fee]`.
    pub const APPOINTMENT: Self = Self {
        bias: -1.0,
        weights: &[-0.10, 0.004],
    };

    /// Larger amount and more overdue days raise lateness risk. Features: `[amount, days_overdue]`.
    pub const PAYMENT: Self = Self {
        bias: -2.5,
        weights: &[0.002, 0.08],
    };

    /// Higher cost raises urgency. Features: `[cost]`.
    pub const TREATMENT: Self = Self {
        bias: -2.0,
        weights: &[0.008],
    };

    /// Built-in formula for a canonical model key.
    pub fn for_key(key: &str) -> Option<Self> {
        match key {
            "appointment" => Some(Self::APPOINTMENT),
            "payment" => Some(Self::PAYMENT),
            "treatment" => Some(Self::TREATMENT),
            _ => None,
        }
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn linear(&self, features: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(features)
            .fold(self.bias, |acc, (w, x)| acc + w * x)
    }
}

pub enum ScoringBackend {
    ClosedForm(LogisticFormula),
    Probabilistic(Box<dyn ProbabilityModel>),
    PointEstimate(Box<dyn PointEstimateModel>),
}

impl ScoringBackend {
    pub fn closed_form(formula: LogisticFormula) -> Self {
        ScoringBackend::ClosedForm(formula)
    }

    pub fn probabilistic(model: impl ProbabilityModel + 'static) -> Self {
        ScoringBackend::Probabilistic(Box::new(model))
    }

    pub fn point_estimate(model: impl PointEstimateModel + 'static) -> Self {
        ScoringBackend::PointEstimate(Box::new(model))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ScoringBackend::ClosedForm(_) => "closed_form",
            ScoringBackend::Probabilistic(_) => "probabilistic",
            ScoringBackend::PointEstimate(_) => "point_estimate",
        }
    }

    pub fn n_features(&self) -> usize {
        match self {
            ScoringBackend::ClosedForm(f) => f.n_features(),
            ScoringBackend::Probabilistic(m) => m.n_features(),
            ScoringBackend::PointEstimate(m) => m.n_features(),
        }
    }

    /// Positive-class probability for one feature vector.
    pub fn score(&self, features: &[f64]) -> Result<f64, PredictError> {
        check_features(features, self.n_features())?;
        let p = match self {
            ScoringBackend::ClosedForm(f) => sigmoid(f.linear(features)),
            ScoringBackend::Probabilistic(m) => m.predict_proba(features)[1],
            ScoringBackend::PointEstimate(m) => m.predict(features),
        };
        Ok(p)
    }
}

impl fmt::Debug for ScoringBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoringBackend")
            .field("kind", &self.kind())
            .field("n_features", &self.n_features())
            .finish()
    }
}

fn check_features(features: &[f64], expected: usize) -> Result<(), PredictError> {
    if features.len() != expected {
        return Err(PredictError::FeatureMismatch {
            expected,
            actual: features.len(),
        });
    }
    if let Some(index) = features.iter().position(|x| !x.is_finite()) {
        return Err(PredictError::NonFiniteFeature { index });
    }
    Ok(())
}
