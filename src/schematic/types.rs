//! Component records and the set of fields they expose.

use std::str::FromStr;

use serde::Serialize;

use crate::error::BomError;

/// A named attribute of a [`ComponentRecord`].
///
/// This is the closed schema shared by parsing, filtering, sorting and
/// output projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Schematic,
    Name,
    Ref,
    Value,
    Footprint,
    Url,
    Supplier,
    SupplierRef,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Schematic,
        Field::Name,
        Field::Ref,
        Field::Value,
        Field::Footprint,
        Field::Url,
        Field::Supplier,
        Field::SupplierRef,
    ];

    /// Name used on the command line and in report headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Schematic => "schematic",
            Field::Name => "name",
            Field::Ref => "ref",
            Field::Value => "value",
            Field::Footprint => "footprint",
            Field::Url => "url",
            Field::Supplier => "supplier",
            Field::SupplierRef => "supplier_ref",
        }
    }

    /// Whether values of this field embed numbers that should sort
    /// numerically (R2 before R10).
    pub fn is_natural(self) -> bool {
        matches!(self, Field::Ref | Field::Value | Field::SupplierRef)
    }

    /// Parse a comma-separated list of field names.
    pub fn parse_list(list: &str) -> Result<Vec<Field>, BomError> {
        list.split(',').map(str::parse).collect()
    }
}

impl FromStr for Field {
    type Err = BomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| BomError::UnknownField(s.to_string()))
    }
}

/// One component extracted from a `$Comp` ... `$EndComp` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentRecord {
    /// Schematic file stem the component comes from
    pub schematic: String,
    /// Library symbol name (e.g., "Device:R")
    pub name: String,
    /// Reference designator (e.g., "R12", "#PWR01")
    #[serde(rename = "ref")]
    pub reference: String,
    pub value: String,
    pub footprint: String,
    /// Supplier URL, placeholder, or empty
    pub url: String,
    /// Supplier inferred from `url` (e.g., "farnell")
    pub supplier: String,
    /// Supplier catalog reference inferred from `url`
    pub supplier_ref: String,
    /// Quantity weight of the originating schematic
    #[serde(skip)]
    pub multiplier: u32,
}

impl ComponentRecord {
    /// Create an empty record tagged with its schematic and multiplier.
    pub fn new(schematic: &str, multiplier: u32) -> Self {
        Self {
            schematic: schematic.to_string(),
            multiplier,
            ..Default::default()
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Schematic => &self.schematic,
            Field::Name => &self.name,
            Field::Ref => &self.reference,
            Field::Value => &self.value,
            Field::Footprint => &self.footprint,
            Field::Url => &self.url,
            Field::Supplier => &self.supplier,
            Field::SupplierRef => &self.supplier_ref,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Schematic => &mut self.schematic,
            Field::Name => &mut self.name,
            Field::Ref => &mut self.reference,
            Field::Value => &mut self.value,
            Field::Footprint => &mut self.footprint,
            Field::Url => &mut self.url,
            Field::Supplier => &mut self.supplier,
            Field::SupplierRef => &mut self.supplier_ref,
        };
        *slot = value;
    }

    /// Whether this is a power symbol or other non-physical component.
    pub fn is_virtual(&self) -> bool {
        self.reference.starts_with('#')
    }
}
