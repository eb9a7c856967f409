//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the appliance availability modes (`ApplianceMode`) and day window
//! - the immutable reference tables (casualty rates, turnout, drive times)
//! - scenario specs and per-scenario outputs (`ScoreResult`, `ComparisonRow`)

pub mod types;

pub use types::*;
