//! Foundation utilities shared across the engine
//!
//! Math types and frame timing. These modules have no rendering-backend
//! dependencies and can be used from application code freely.

pub mod math;
pub mod time;
