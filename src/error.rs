//! Errors that abort a BOM run before any output is produced.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BomError {
    #[error("unknown field \"{0}\"")]
    UnknownField(String),

    #[error("the \"qty\" field is only available with --cart")]
    QtyOutsideCart,

    #[error("got {given} multipliers for {schematics} schematics; use one per schematic or one globally")]
    MultiplierCount { given: usize, schematics: usize },

    #[error("invalid multiplier \"{0}\"")]
    InvalidMultiplier(String),

    #[error("no such file: {}", .0.display())]
    SchematicNotFound(PathBuf),
}
