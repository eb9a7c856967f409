//! Scenario expansion and turnout-table layering.
//!
//! Responsibilities:
//!
//! - expand sparse per-appliance mode tags into full 24-hour turnout
//!   override vectors (`modes`)
//! - merge an override layer over the baseline turnout table without
//!   mutating it (`turnout`)

pub mod modes;
pub mod turnout;

pub use modes::*;
pub use turnout::*;
