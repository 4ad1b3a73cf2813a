//! Report rendering: terminal table, CSV and JSON.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::bom::{CartColumn, CartEntry, SupplierCart};
use crate::schematic::{ComponentRecord, Field};

/// CSV formatting options.
#[derive(Debug, Clone, Copy)]
pub struct CsvStyle {
    pub delimiter: u8,
    /// Wrap text fields in double quotes
    pub quote_text: bool,
    pub header: bool,
}

impl Default for CsvStyle {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote_text: true,
            header: true,
        }
    }
}

impl CsvStyle {
    fn writer<W: Write>(&self, out: W) -> csv::Writer<W> {
        let quote_style = if self.quote_text {
            csv::QuoteStyle::Always
        } else {
            csv::QuoteStyle::Never
        };
        self.writer_with(out, quote_style)
    }

    fn writer_with<W: Write>(&self, out: W, quote_style: csv::QuoteStyle) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(quote_style)
            .from_writer(out)
    }

    /// Text cell for a writer that never quotes on its own.
    fn text(&self, value: String) -> String {
        if self.quote_text {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value
        }
    }
}

fn header<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names.map(str::to_uppercase).collect()
}

/// Write components as CSV, one column per field.
pub fn write_components_csv<W: Write>(
    out: W,
    components: &[ComponentRecord],
    fields: &[Field],
    style: &CsvStyle,
) -> Result<()> {
    let mut writer = style.writer(out);

    if style.header {
        writer.write_record(header(fields.iter().map(|f| f.as_str())))?;
    }
    for comp in components {
        writer.write_record(fields.iter().map(|&f| comp.get(f)))?;
    }

    writer.flush()?;
    Ok(())
}

/// Write cart entries as CSV. Quoting is decided per column: `qty` is never
/// quoted, every other column is quoted even when its text is a number.
pub fn write_cart_csv<W: Write>(
    out: W,
    entries: &[CartEntry],
    columns: &[CartColumn],
    style: &CsvStyle,
) -> Result<()> {
    let mut writer = style.writer_with(out, csv::QuoteStyle::Never);

    if style.header {
        let names = header(columns.iter().map(|c| c.as_str()));
        writer.write_record(names.into_iter().map(|name| style.text(name)))?;
    }
    for entry in entries {
        writer.write_record(columns.iter().map(|&c| match c {
            CartColumn::Qty => entry.get(c),
            CartColumn::Record(_) => style.text(entry.get(c)),
        }))?;
    }

    writer.flush()?;
    Ok(())
}

/// Render components as an aligned, borderless table.
pub fn render_table(components: &[ComponentRecord], fields: &[Field], header_row: bool) -> String {
    let mut builder = Builder::default();

    if header_row {
        builder.push_record(header(fields.iter().map(|f| f.as_str())));
    }
    for comp in components {
        builder.push_record(fields.iter().map(|&f| comp.get(f).to_string()));
    }

    builder.build().with(Style::blank()).to_string()
}

/// Keep only the named keys of a serialized item, in the given order.
fn project<'a, T: Serialize>(item: &T, names: impl Iterator<Item = &'a str>) -> Result<Value> {
    let full = match serde_json::to_value(item)? {
        Value::Object(map) => map,
        other => return Ok(other),
    };

    let projected: Map<String, Value> = names
        .map(|name| (name.to_string(), full.get(name).cloned().unwrap_or(Value::Null)))
        .collect();
    Ok(Value::Object(projected))
}

/// JSON array of components restricted to `fields`.
pub fn components_json(components: &[ComponentRecord], fields: &[Field]) -> Result<Value> {
    let rows = components
        .iter()
        .map(|comp| project(comp, fields.iter().map(|f| f.as_str())))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(rows))
}

/// JSON object mapping each supplier to its cart entries.
pub fn carts_json(carts: &[SupplierCart], columns: &[CartColumn]) -> Result<Value> {
    let mut suppliers = Map::new();

    for cart in carts {
        let rows = cart
            .entries
            .iter()
            .map(|entry| project(entry, columns.iter().map(|c| c.as_str())))
            .collect::<Result<Vec<_>>>()?;
        suppliers.insert(supplier_label(&cart.supplier).to_string(), Value::Array(rows));
    }

    Ok(Value::Object(suppliers))
}

/// Name used for a supplier in cart output.
pub fn supplier_label(supplier: &str) -> &str {
    if supplier.is_empty() {
        "unclassified"
    } else {
        supplier
    }
}

/// Cart file for a supplier inside `dir` (e.g., `farnell.csv`).
pub fn cart_path(dir: &Path, supplier: &str) -> PathBuf {
    dir.join(format!("{}.csv", supplier_label(supplier)))
}

/// Normalize the `--output` name: trimmed, with a `.csv` extension.
pub fn csv_output_path(output: &str) -> PathBuf {
    let name = output.trim();
    if name.ends_with(".csv") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{}.csv", name))
    }
}
