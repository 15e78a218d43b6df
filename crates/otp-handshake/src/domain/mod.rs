//! # Domain Layer
//!
//! Pure trust and classification logic with no platform access.
//! This is the inner layer of the hexagonal architecture.

pub mod entities;
pub mod errors;
pub mod trust;
