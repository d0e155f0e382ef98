// src/domains/mod.rs
//! Per-domain payloads, responses and threshold sets.

pub mod appointment;
pub mod payment;
pub mod treatment;

use crate::service::Domain;

pub use appointment::{Appointment, AppointmentPayload, AppointmentResponse};
pub use payment::{Payment, PaymentPayload, PaymentResponse};
pub use treatment::{NoteCategory, Treatment, TreatmentPayload, TreatmentResponse, UrgencyBand};

/// Keys every deployment is expected to bind.
pub const DOMAIN_KEYS: [&str; 3] = [
    <Appointment as Domain>::KEY,
    <Payment as Domain>::KEY,
    <Treatment as Domain>::KEY,
];
