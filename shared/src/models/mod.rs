//! Domain models for the Surf Report service

mod snapshot;

pub use snapshot::*;
