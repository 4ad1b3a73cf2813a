//! CLI command implementations.

pub mod bom;
pub mod report;
