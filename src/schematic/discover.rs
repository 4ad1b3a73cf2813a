//! Resolution of command-line schematic arguments into files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::error::BomError;

/// A schematic file to parse and its quantity multiplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchematicSource {
    pub path: PathBuf,
    pub multiplier: u32,
}

/// Pair each argument with its multiplier.
///
/// Accepts either a single global multiplier or exactly one per argument.
pub fn assign_multipliers(
    args: &[PathBuf],
    multipliers: &[u32],
) -> Result<Vec<(PathBuf, u32)>, BomError> {
    match multipliers {
        [global] => Ok(args.iter().map(|a| (a.clone(), *global)).collect()),
        _ if multipliers.len() == args.len() => Ok(args
            .iter()
            .cloned()
            .zip(multipliers.iter().copied())
            .collect()),
        _ => Err(BomError::MultiplierCount {
            given: multipliers.len(),
            schematics: args.len(),
        }),
    }
}

/// Parse a comma-separated multiplier list (e.g., "2,1,5").
pub fn parse_multipliers(list: &str) -> Result<Vec<u32>, BomError> {
    list.split(',')
        .map(|m| {
            m.trim()
                .parse()
                .map_err(|_| BomError::InvalidMultiplier(m.to_string()))
        })
        .collect()
}

/// Resolve one argument into schematic files.
///
/// In order: an existing file, the same path with `.sch` appended, or a
/// directory whose `.sch` files are all used.
fn resolve(arg: &Path) -> Result<Vec<PathBuf>> {
    if arg.is_file() {
        return Ok(vec![arg.to_path_buf()]);
    }

    let mut with_ext = arg.as_os_str().to_os_string();
    with_ext.push(".sch");
    let with_ext = PathBuf::from(with_ext);
    if with_ext.is_file() {
        return Ok(vec![with_ext]);
    }

    if arg.is_dir() {
        let mut found = Vec::new();
        for entry in fs::read_dir(arg)
            .with_context(|| format!("Failed to read directory: {}", arg.display()))?
        {
            let path = entry?.path();
            if path.is_file() && path.to_string_lossy().ends_with(".sch") {
                found.push(path);
            }
        }
        found.sort();

        if found.is_empty() {
            eprintln!(
                "{} No schematics found in {}",
                "!".yellow(),
                arg.display()
            );
        }
        return Ok(found);
    }

    Err(BomError::SchematicNotFound(arg.to_path_buf()).into())
}

/// Resolve every argument, keeping argument order.
pub fn discover(args: &[(PathBuf, u32)]) -> Result<Vec<SchematicSource>> {
    let mut sources = Vec::new();

    for (arg, multiplier) in args {
        for path in resolve(arg)? {
            sources.push(SchematicSource {
                path,
                multiplier: *multiplier,
            });
        }
    }

    Ok(sources)
}
