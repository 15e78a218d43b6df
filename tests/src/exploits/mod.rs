//! # Exploit Tests
//!
//! Attack simulations against the inbound validator. Every test here
//! asserts that a forged reply is rejected before its payload is read.

pub mod forged_sender;
