// src/utils/mod.rs
//! Helper functions shared across the crate.

pub mod clock;
pub mod crypto;
pub mod serialization;
