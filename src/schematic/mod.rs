//! KiCad legacy schematic reading.
//!
//! This module turns `.sch` files into [`ComponentRecord`]s:
//! 1. Resolve command-line arguments into schematic files
//! 2. Tokenize and parse each file's `$Comp` blocks

mod discover;
mod parser;
mod tokenizer;
mod types;

pub use discover::{assign_multipliers, discover, parse_multipliers};
pub use parser::load_schematic;
pub use types::{ComponentRecord, Field};
