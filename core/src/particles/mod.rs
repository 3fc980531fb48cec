//! Cursor particle trail
//!
//! A bounded FIFO of short-lived particles. Two independent mechanisms
//! retire a particle:
//! - **capacity**: creating a particle when the field is full evicts the
//!   oldest one, whatever its remaining life
//! - **decay**: each frame step lowers life by a fixed amount and removes
//!   particles at or below zero
//!
//! The surface also runs a timed fade on every element that detaches it when
//! done; that fade is not tied to life and may finish first.

mod field;

#[cfg(test)]
mod field_tests;

pub use field::{Particle, ParticleField, ParticleSurface};
