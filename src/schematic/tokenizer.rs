//! Line tokenizer for KiCad legacy schematic files.

/// Split a line on whitespace, keeping double-quoted text together.
///
/// ```text
/// F 1 "100nF 50V" H 5150 1125  ->  ["F", "1", "100nF 50V", "H", "5150", "1125"]
/// ```
///
/// Quotes are stripped from the output. An unbalanced quote keeps the rest of
/// the line in a single token. A quoted empty string (`""`) between
/// separators yields an empty token so positional fields stay aligned.
pub fn split(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    // Set once a token has started, even if it has no characters yet ("")
    let mut started = false;

    for c in line.chars() {
        match c {
            c if c.is_whitespace() && !in_text => {
                if started {
                    tokens.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            '"' => {
                in_text = !in_text;
                started = true;
            }
            _ => {
                current.push(c);
                started = true;
            }
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
