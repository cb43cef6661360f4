//! Shared types used across all modules.
//!
//! The change report and template records are the payloads the tools
//! serialize; other modules import them from here rather than reaching
//! into each other's internals.

pub mod report;
pub mod template;

pub use report::{ChangeReport, InspectOutcome};
pub use template::{Recommendation, TemplateRecord};
