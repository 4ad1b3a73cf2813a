//! BOM command - extract, filter and sort components, then report or build carts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use super::report::{self, CsvStyle};
use crate::bom::{build_carts, sort_components, CartColumn, Filter};
use crate::error::BomError;
use crate::schematic::{discover, load_schematic, ComponentRecord, Field};
use crate::supplier;

/// Terminal output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// What to produce from the selected components.
#[derive(Debug, Clone)]
pub enum Report {
    /// A listing of components, printed or written to a CSV file
    List {
        fields: Vec<Field>,
        output: Option<PathBuf>,
        print_count: bool,
    },
    /// One CSV file per supplier in `dir`, merged by supplier reference
    Cart {
        columns: Vec<CartColumn>,
        dir: PathBuf,
    },
}

/// Validated settings for a BOM run.
#[derive(Debug, Clone)]
pub struct BomOptions {
    /// Schematic arguments paired with their multiplier
    pub schematics: Vec<(PathBuf, u32)>,
    pub filter: Filter,
    /// Sort keys, primary first
    pub sort: Vec<Field>,
    pub report: Report,
    pub csv: CsvStyle,
    pub format: OutputFormat,
    pub verbose: bool,
}

/// Parse listing fields. `qty` only exists in cart reports.
pub fn parse_listing_fields(list: &str) -> Result<Vec<Field>, BomError> {
    CartColumn::parse_list(list)?
        .into_iter()
        .map(|column| match column {
            CartColumn::Record(field) => Ok(field),
            CartColumn::Qty => Err(BomError::QtyOutsideCart),
        })
        .collect()
}

/// Read every schematic, then classify suppliers, filter and sort.
pub fn collect_components(options: &BomOptions) -> Result<Vec<ComponentRecord>> {
    let sources = discover(&options.schematics)?;

    let mut components = Vec::new();
    for source in &sources {
        let parsed = load_schematic(&source.path, source.multiplier)?;
        if options.verbose {
            eprintln!(
                "  {} Parsed {} components from {}",
                "→".cyan(),
                parsed.len(),
                source.path.display()
            );
        }
        components.extend(parsed);
    }

    supplier::enrich(&mut components);

    let mut selected = options.filter.apply(components);
    sort_components(&mut selected, &options.sort);

    Ok(selected)
}

/// Execute the BOM command.
pub fn execute(options: &BomOptions) -> Result<()> {
    let components = collect_components(options)?;

    match &options.report {
        Report::List {
            fields,
            output: Some(path),
            ..
        } => export_csv(&components, fields, path, &options.csv),
        Report::List {
            fields,
            output: None,
            print_count,
        } => print_listing(&components, fields, *print_count, options),
        Report::Cart { columns, dir } => write_carts(&components, columns, dir, options),
    }
}

fn print_listing(
    components: &[ComponentRecord],
    fields: &[Field],
    print_count: bool,
    options: &BomOptions,
) -> Result<()> {
    match options.format {
        OutputFormat::Json => {
            let json = report::components_json(components, fields)?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Human => {
            if !components.is_empty() || options.csv.header {
                println!("{}", report::render_table(components, fields, options.csv.header));
            }
            if print_count {
                println!("Total : {} components", components.len());
            }
        }
    }

    Ok(())
}

fn export_csv(components: &[ComponentRecord], fields: &[Field], path: &Path, style: &CsvStyle) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    report::write_components_csv(io::BufWriter::new(file), components, fields, style)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} Exported {} components to {}",
        "✓".green().bold(),
        components.len(),
        path.display().to_string().cyan()
    );

    Ok(())
}

fn write_carts(
    components: &[ComponentRecord],
    columns: &[CartColumn],
    dir: &Path,
    options: &BomOptions,
) -> Result<()> {
    let carts = build_carts(components);

    if options.format == OutputFormat::Json {
        let json = report::carts_json(&carts, columns)?;
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    for cart in &carts {
        let path = report::cart_path(dir, &cart.supplier);
        let file = fs::File::create(&path)
            .with_context(|| format!("Failed to create cart file: {}", path.display()))?;
        report::write_cart_csv(io::BufWriter::new(file), &cart.entries, columns, &options.csv)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        println!(
            "{} Wrote {} {} lines to {}",
            "✓".green().bold(),
            cart.entries.len(),
            report::supplier_label(&cart.supplier),
            path.display().to_string().cyan()
        );
    }

    Ok(())
}
