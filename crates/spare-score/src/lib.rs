//! Spare Score: a composite 0-100 household financial health score.
//!
//! The [`scoring`] module holds the pure pillar functions, the aggregator and
//! the classifier. The remaining modules carry the service plumbing used by
//! the API binary.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
