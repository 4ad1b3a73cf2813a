//! Per-supplier order carts.
//!
//! Components are grouped by supplier and merged by supplier reference, with
//! quantities summed from each schematic's multiplier.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Serialize;

use crate::error::BomError;
use crate::schematic::{ComponentRecord, Field};

/// A column of a cart report: any record field, or the ordered quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartColumn {
    Record(Field),
    Qty,
}

impl CartColumn {
    pub fn as_str(self) -> &'static str {
        match self {
            CartColumn::Record(field) => field.as_str(),
            CartColumn::Qty => "qty",
        }
    }

    /// Parse a comma-separated list of column names.
    pub fn parse_list(list: &str) -> Result<Vec<CartColumn>, BomError> {
        list.split(',').map(str::parse).collect()
    }
}

impl FromStr for CartColumn {
    type Err = BomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "qty" {
            Ok(CartColumn::Qty)
        } else {
            s.parse().map(CartColumn::Record)
        }
    }
}

/// One line of a cart: a component and how many to order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub component: ComponentRecord,
    pub qty: u32,
}

impl CartEntry {
    /// Text of a column, with `qty` rendered as a number.
    pub fn get(&self, column: CartColumn) -> String {
        match column {
            CartColumn::Record(field) => self.component.get(field).to_string(),
            CartColumn::Qty => self.qty.to_string(),
        }
    }
}

/// Entries to order from one supplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierCart {
    /// Supplier name; empty for unclassified components
    pub supplier: String,
    pub entries: Vec<CartEntry>,
}

/// Group components into carts, one per supplier.
///
/// Suppliers appear in order of their first component. Within a supplier,
/// the first component with a given reference becomes the entry and later
/// ones add their multiplier to its quantity.
pub fn build_carts(components: &[ComponentRecord]) -> Vec<SupplierCart> {
    let mut carts: Vec<SupplierCart> = Vec::new();
    // Supplier -> index into `carts`
    let mut supplier_index: HashMap<&str, usize> = HashMap::new();
    // (supplier, supplier_ref) -> index into that cart's entries
    let mut entry_index: HashMap<(&str, &str), usize> = HashMap::new();

    for comp in components {
        let cart_idx = *supplier_index.entry(comp.supplier.as_str()).or_insert_with(|| {
            carts.push(SupplierCart {
                supplier: comp.supplier.clone(),
                entries: Vec::new(),
            });
            carts.len() - 1
        });
        let cart = &mut carts[cart_idx];

        match entry_index.get(&(comp.supplier.as_str(), comp.supplier_ref.as_str())) {
            Some(&i) => {
                let entry = &mut cart.entries[i];
                entry.qty = entry.qty.saturating_add(comp.multiplier);
            }
            None => {
                entry_index.insert(
                    (comp.supplier.as_str(), comp.supplier_ref.as_str()),
                    cart.entries.len(),
                );
                cart.entries.push(CartEntry {
                    component: comp.clone(),
                    qty: comp.multiplier,
                });
            }
        }
    }

    carts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(reference: &str, supplier: &str, supplier_ref: &str, multiplier: u32) -> ComponentRecord {
        ComponentRecord {
            reference: reference.to_string(),
            supplier: supplier.to_string(),
            supplier_ref: supplier_ref.to_string(),
            ..ComponentRecord::new("main", multiplier)
        }
    }

    #[test]
    fn test_quantities_summed() {
        let carts = build_carts(&[comp("C1", "X", "Y", 2), comp("C7", "X", "Y", 3)]);

        assert_eq!(carts.len(), 1);
        assert_eq!(carts[0].supplier, "X");
        assert_eq!(carts[0].entries.len(), 1);
        assert_eq!(carts[0].entries[0].qty, 5);
        assert_eq!(carts[0].entries[0].component.reference, "C1");
    }

    #[test]
    fn test_grouping_preserves_first_appearance() {
        let carts = build_carts(&[
            comp("R1", "mouser", "A", 1),
            comp("R2", "farnell", "B", 1),
            comp("R3", "mouser", "C", 1),
            comp("R4", "mouser", "A", 4),
            comp("R5", "", "", 1),
            comp("R6", "", "", 1),
        ]);

        let suppliers: Vec<&str> = carts.iter().map(|c| c.supplier.as_str()).collect();
        assert_eq!(suppliers, vec!["mouser", "farnell", ""]);

        let mouser: Vec<(&str, u32)> = carts[0]
            .entries
            .iter()
            .map(|e| (e.component.supplier_ref.as_str(), e.qty))
            .collect();
        assert_eq!(mouser, vec![("A", 5), ("C", 1)]);

        assert_eq!(carts[2].entries.len(), 1);
        assert_eq!(carts[2].entries[0].qty, 2);
    }

    #[test]
    fn test_same_reference_different_suppliers() {
        let carts = build_carts(&[comp("R1", "mouser", "A", 1), comp("R2", "digikey", "A", 1)]);
        assert_eq!(carts.len(), 2);
        assert_eq!(carts[0].entries[0].qty, 1);
        assert_eq!(carts[1].entries[0].qty, 1);
    }

    #[test]
    fn test_quantity_saturates() {
        let carts = build_carts(&[comp("R1", "X", "Y", 3_000_000_000), comp("R2", "X", "Y", 3_000_000_000)]);
        assert_eq!(carts[0].entries[0].qty, u32::MAX);
    }

    #[test]
    fn test_cart_columns() {
        assert_eq!(
            CartColumn::parse_list("supplier_ref,qty").unwrap(),
            vec![CartColumn::Record(Field::SupplierRef), CartColumn::Qty]
        );
        assert!(CartColumn::parse_list("quantity").is_err());

        let entry = CartEntry {
            component: comp("R1", "X", "Y", 1),
            qty: 12,
        };
        assert_eq!(entry.get(CartColumn::Qty), "12");
        assert_eq!(entry.get(CartColumn::Record(Field::Ref)), "R1");
    }
}
