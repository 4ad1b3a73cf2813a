//! Selection, ordering and aggregation of extracted components.

mod cart;
mod filter;
mod sort;

pub use cart::{build_carts, CartColumn, CartEntry, SupplierCart};
pub use filter::{Filter, Predicate, UrlMode};
pub use sort::sort_components;
