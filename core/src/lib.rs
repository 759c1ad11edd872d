//! Core types for Kinetic.
//!
//! Everything needed to run animations lives here: vectorized values, timing curves, the
//! per-property animator and the scheduler that drives it. The `kinetic` crate re-exports the
//! important types together with the `Vectorize` derive macro and should normally be used instead.

pub mod additive;
pub mod animator;
pub mod batch;
pub mod config;
pub mod easing;
pub mod error;
pub mod interpolation;
pub mod properties;
pub mod scheduler;
pub mod spring;
pub mod target;
pub mod value;
pub mod vectorize;

#[cfg(feature = "glam")]
pub mod glam;
