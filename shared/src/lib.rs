//! Shared types and models for the Surf Report service
//!
//! This crate contains the marine-weather snapshot model decoded from the
//! Stormglass point API, plus small types shared by the backend.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
