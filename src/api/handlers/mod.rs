//! REST API handlers organized by domain.

pub mod health;
pub mod inspections;

pub use health::*;
pub use inspections::*;
