//! Component extraction from KiCad legacy schematic (`.sch`) files.
//!
//! Components are described by blocks like:
//! ```text
//! $Comp
//! L Device:C C12
//! U 1 1 5C9A6A3B
//! P 5150 1250
//! F 0 "C12" H 5175 1350 50  0000 L CNN
//! F 1 "100nF" H 5175 1150 50  0000 L CNN
//! F 2 "Capacitor_SMD:C_0603_1608Metric" H 5188 1100 50  0001 C CNN
//! F 3 "https://uk.farnell.com/multicomp/mc0603b104k500ct/cap/dp/1759122" H 5150 1250 50  0001 C CNN
//! $EndComp
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::tokenizer::split;
use super::types::{ComponentRecord, Field};

const BLOCK_BEGIN: &str = "$Comp";
const BLOCK_END: &str = "$EndComp";

/// Parser state while walking the lines of one schematic.
#[derive(Debug)]
enum State {
    Outside,
    InBlock(ComponentRecord),
}

/// Map an `F <n>` field number to the record field it sets.
fn field_for_index(index: &str) -> Option<Field> {
    match index {
        "0" => Some(Field::Ref),
        "1" => Some(Field::Value),
        "2" => Some(Field::Footprint),
        "3" => Some(Field::Url),
        _ => None,
    }
}

/// Apply one line from inside a component block to the record.
///
/// Lines that are not `L` or `F` lines, or that lack the expected tokens,
/// are ignored.
fn apply_line(comp: &mut ComponentRecord, line: &str) {
    let tokens = split(line);

    match tokens.as_slice() {
        [marker, name, ..] if marker == "L" => {
            comp.name = name.clone();
        }
        [marker, index, text, ..] if marker == "F" => {
            if let Some(field) = field_for_index(index) {
                comp.set(field, text.clone());
            }
        }
        _ => {}
    }
}

/// Extract the components of one schematic from its lines.
///
/// Every record is tagged with `schematic` and `multiplier`. A block that is
/// still open at the end of the input is dropped.
pub fn parse_lines<'a, I>(lines: I, schematic: &str, multiplier: u32) -> Vec<ComponentRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut components = Vec::new();
    let mut state = State::Outside;

    for line in lines {
        let line = line.trim();

        state = match (state, line) {
            (_, BLOCK_BEGIN) => State::InBlock(ComponentRecord::new(schematic, multiplier)),
            (State::InBlock(comp), BLOCK_END) => {
                components.push(comp);
                State::Outside
            }
            (State::InBlock(mut comp), _) => {
                apply_line(&mut comp, line);
                State::InBlock(comp)
            }
            (State::Outside, _) => State::Outside,
        };
    }

    components
}

/// Schematic identifier used in reports: the file name without extension.
pub fn schematic_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read a schematic file and extract its components.
pub fn load_schematic(path: &Path, multiplier: u32) -> Result<Vec<ComponentRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schematic: {}", path.display()))?;

    Ok(parse_lines(content.lines(), &schematic_name(path), multiplier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SCHEMATIC: &str = r##"EESchema Schematic File Version 4
$Descr A4 11693 8268
$EndDescr
$Comp
L Device:C C12
U 1 1 5C9A6A3B
P 5150 1250
F 0 "C12" H 5175 1350 50  0000 L CNN
F 1 "100nF 50V" H 5175 1150 50  0000 L CNN
F 2 "Capacitor_SMD:C_0603_1608Metric" H 5188 1100 50  0001 C CNN
F 3 "https://uk.farnell.com/multicomp/mc0603b104k500ct/cap/dp/1759122" H 5150 1250 50  0001 C CNN
	1    5150 1250
	1    0    0    -1
$EndComp
$Comp
L power:GND #PWR03
U 1 1 5C9A7B10
F 0 "#PWR03" H 5150 1000 50  0001 C CNN
F 1 "GND" H 5155 1077 50  0000 C CNN
F 2 "" H 5150 1250 50  0001 C CNN
F 3 "" H 5150 1250 50  0001 C CNN
$EndComp
$EndSCHEMATC
"##;

    #[test]
    fn test_parse_blocks() {
        let comps = parse_lines(SCHEMATIC.lines(), "filter", 2);

        assert_eq!(comps.len(), 2);

        let cap = &comps[0];
        assert_eq!(cap.schematic, "filter");
        assert_eq!(cap.multiplier, 2);
        assert_eq!(cap.name, "Device:C");
        assert_eq!(cap.reference, "C12");
        assert_eq!(cap.value, "100nF 50V");
        assert_eq!(cap.footprint, "Capacitor_SMD:C_0603_1608Metric");
        assert_eq!(
            cap.url,
            "https://uk.farnell.com/multicomp/mc0603b104k500ct/cap/dp/1759122"
        );
        assert_eq!(cap.supplier, "");

        let gnd = &comps[1];
        assert_eq!(gnd.reference, "#PWR03");
        assert_eq!(gnd.footprint, "");
        assert_eq!(gnd.url, "");
    }

    #[test]
    fn test_unterminated_block_dropped() {
        let lines = [
            "$Comp",
            "F 0 \"R1\" H 0 0 50  0000 C CNN",
            "$EndComp",
            "$Comp",
            "F 0 \"R2\" H 0 0 50  0000 C CNN",
        ];
        let comps = parse_lines(lines, "main", 1);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].reference, "R1");
    }

    #[test]
    fn test_malformed_lines_ignored() {
        let lines = [
            "F 0 \"R0\" H 0 0 50  0000 C CNN",
            "$EndComp",
            "$Comp",
            "",
            "L",
            "F 0",
            "F 7 \"extra\" H 0 0 50  0000 C CNN",
            "X unknown line",
            "  F 0 \"R5\" H 0 0 50  0000 C CNN  ",
            "$EndComp",
        ];
        let comps = parse_lines(lines, "main", 1);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].reference, "R5");
        assert_eq!(comps[0].name, "");
    }

    #[test]
    fn test_begin_inside_block_restarts_record() {
        let lines = [
            "$Comp",
            "F 0 \"R1\" H 0 0 50  0000 C CNN",
            "F 1 \"10k\" H 0 0 50  0000 C CNN",
            "$Comp",
            "F 0 \"R2\" H 0 0 50  0000 C CNN",
            "$EndComp",
        ];
        let comps = parse_lines(lines, "main", 1);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].reference, "R2");
        assert_eq!(comps[0].value, "");
    }

    #[test]
    fn test_load_schematic() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("filter.sch");
        fs::write(&path, SCHEMATIC).unwrap();

        let comps = load_schematic(&path, 4).unwrap();
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].schematic, "filter");
        assert_eq!(comps[0].multiplier, 4);
    }

    #[test]
    fn test_load_missing_schematic() {
        let path = PathBuf::from("/nonexistent/board.sch");
        assert!(load_schematic(&path, 1).is_err());
    }
}
