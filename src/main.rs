//! kicad-bom - bill of materials extraction from KiCad schematics.
//!
//! Reads one or more KiCad legacy schematics (`.sch`), infers supplier
//! references from the component URL field, and prints or exports a filtered,
//! sorted component list. In cart mode, components are merged per supplier
//! reference into one order file per supplier.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, ValueEnum};

mod bom;
mod commands;
mod error;
mod schematic;
mod supplier;

use bom::{CartColumn, Filter, Predicate, UrlMode};
use commands::bom::{BomOptions, OutputFormat, Report};
use commands::report::{self, CsvStyle};
use schematic::Field;

#[derive(Parser)]
#[command(name = "kicad-bom")]
#[command(author, about = "Reads one or more KiCad schematics and extracts a bill of materials")]
#[command(after_help = "All filters accept comma-separated lists, for example: \"-V 100nF,1µF,10µF\"")]
struct Cli {
    /// KiCad schematics (.sch) or project folders
    #[arg(required = true)]
    schematics: Vec<PathBuf>,

    /// Show only components missing a supplier URL
    #[arg(short, long)]
    unspecified: bool,

    /// Show all components, including those with a placeholder (such as "-") instead of a URL
    #[arg(short, long)]
    all: bool,

    /// Write one CSV file per supplier, merged by supplier reference with quantities.
    /// -o and -n are ignored, -s defaults to "ref,value" and -f accepts "qty"
    #[arg(long)]
    cart: bool,

    /// Quantity multipliers for --cart: one global value or one per schematic
    #[arg(short, long, default_value = "1")]
    multipliers: String,

    /// Print progress to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    filters: FilterArgs,
}

#[derive(Args)]
#[command(next_help_heading = "Output format")]
struct OutputArgs {
    /// CSV output file name. If missing, the list is printed
    #[arg(short, long)]
    output: Option<String>,

    /// Print the number of components selected
    #[arg(short, long)]
    number: bool,

    /// Do not output header
    #[arg(short = 'H', long)]
    no_header: bool,

    /// Comma-separated list of fields to output among schematic, name, ref,
    /// value, footprint, url, supplier and supplier_ref
    /// [default: ref,value,supplier,supplier_ref,url, with schematic first for several schematics]
    #[arg(short, long)]
    fields: Option<String>,

    /// Comma-separated list of fields used to sort the result [default: schematic,ref]
    #[arg(short, long)]
    sort: Option<String>,

    /// CSV delimiter
    #[arg(short, long, value_enum, default_value = "c")]
    delimiter: Delimiter,

    /// Do not delimit CSV text fields with quotes
    #[arg(short = 't', long)]
    no_text_delimiter: bool,

    /// Terminal output format
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormat,
}

#[derive(Args)]
#[command(next_help_heading = "Filters")]
struct FilterArgs {
    /// Filter by component name
    #[arg(short = 'N', long)]
    name: Option<String>,

    /// Filter by reference
    #[arg(short = 'R', long = "ref")]
    reference: Option<String>,

    /// Filter by value
    #[arg(short = 'V', long)]
    value: Option<String>,

    /// Filter by footprint
    #[arg(short = 'F', long)]
    footprint: Option<String>,

    /// Filter by supplier
    #[arg(short = 'S', long)]
    supplier: Option<String>,

    /// Filter by supplier reference
    #[arg(short = 'Z', long = "supplier_ref", alias = "supplier-ref")]
    supplier_ref: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Delimiter {
    /// Comma
    #[value(name = "c")]
    Comma,
    /// Semicolon
    #[value(name = "s")]
    Semicolon,
    /// Tabulation
    #[value(name = "t")]
    Tab,
}

impl Delimiter {
    fn byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Tab => b'\t',
        }
    }
}

impl FilterArgs {
    fn predicates(&self) -> Vec<Predicate> {
        [
            (Field::Name, &self.name),
            (Field::Ref, &self.reference),
            (Field::Value, &self.value),
            (Field::Footprint, &self.footprint),
            (Field::Supplier, &self.supplier),
            (Field::SupplierRef, &self.supplier_ref),
        ]
        .into_iter()
        .filter_map(|(field, list)| list.as_deref().map(|l| Predicate::new(field, l)))
        .collect()
    }
}

/// Validate arguments into options for the BOM command.
fn bom_options(cli: Cli) -> Result<BomOptions> {
    let multipliers = schematic::parse_multipliers(&cli.multipliers)?;
    let schematics = schematic::assign_multipliers(&cli.schematics, &multipliers)?;

    let default_sort = if cli.cart { "ref,value" } else { "schematic,ref" };
    let sort = Field::parse_list(cli.output.sort.as_deref().unwrap_or(default_sort))?;

    let report = if cli.cart {
        let list = cli
            .output
            .fields
            .as_deref()
            .unwrap_or("supplier_ref,qty,url,name,value");
        Report::Cart {
            columns: CartColumn::parse_list(list)?,
            dir: PathBuf::from("."),
        }
    } else {
        let default_fields = if cli.schematics.len() >= 2 {
            "schematic,ref,value,supplier,supplier_ref,url"
        } else {
            "ref,value,supplier,supplier_ref,url"
        };
        let list = cli.output.fields.as_deref().unwrap_or(default_fields);
        Report::List {
            fields: commands::bom::parse_listing_fields(list)?,
            output: cli.output.output.as_deref().map(report::csv_output_path),
            print_count: cli.output.number,
        }
    };

    Ok(BomOptions {
        schematics,
        filter: Filter {
            predicates: cli.filters.predicates(),
            url_mode: UrlMode::from_flags(cli.unspecified, cli.all),
        },
        sort,
        report,
        csv: CsvStyle {
            delimiter: cli.output.delimiter.byte(),
            quote_text: !cli.output.no_text_delimiter,
            header: !cli.output.no_header,
        },
        format: cli.output.format,
        verbose: cli.verbose,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = bom_options(cli)?;
    commands::bom::execute(&options)
}
