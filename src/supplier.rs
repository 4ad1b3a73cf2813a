//! Supplier detection from component URLs.
//!
//! Schematics store a supplier product link in field 3. The supplier is
//! recognised from the URL host, and the catalog reference is pulled from the
//! path or query depending on the supplier's URL layout.

use url::Url;

use crate::schematic::ComponentRecord;

/// Supplier and catalog reference inferred from a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub supplier: &'static str,
    /// Catalog reference; empty when the URL shape is not understood
    pub reference: String,
}

struct SupplierRule {
    name: &'static str,
    host_marker: &'static str,
    reference: fn(&Url) -> Option<String>,
}

/// Known suppliers, checked in order.
const SUPPLIERS: &[SupplierRule] = &[
    SupplierRule {
        name: "farnell",
        host_marker: "farnell",
        reference: last_segment,
    },
    SupplierRule {
        name: "mouser",
        host_marker: "mouser",
        reference: mouser_reference,
    },
    SupplierRule {
        name: "digikey",
        host_marker: "digikey",
        reference: second_to_last_segment,
    },
];

/// Path segments, including the empty one before the leading `/`.
fn segments(url: &Url) -> Vec<&str> {
    url.path().split('/').collect()
}

/// `https://uk.farnell.com/multicomp/mc0603b104k500ct/cap/dp/1759122` -> `1759122`
fn last_segment(url: &Url) -> Option<String> {
    segments(url).last().map(|s| s.to_string())
}

/// `https://www.digikey.com/product-detail/en/yageo/RC0603FR-0710KL/311-10.0KHRCT-ND/729827/` -> `729827`
fn second_to_last_segment(url: &Url) -> Option<String> {
    let segments = segments(url);
    segments
        .len()
        .checked_sub(2)
        .map(|i| segments[i].to_string())
}

/// Mouser has used two URL layouts:
/// - `/search/ProductDetail.aspx?R=0virtualkey0virtualkey511-LD1117V33`
/// - `/ProductDetail/Texas-Instruments/TPS7A4700RGWR/?qs=...`
fn mouser_reference(url: &Url) -> Option<String> {
    let path = url.path();

    if path.starts_with("/search/ProductDetail.aspx") {
        let query = url.query().unwrap_or("");
        query.rsplit("virtualkey").next().map(|s| s.to_string())
    } else if path.starts_with("/ProductDetail/") {
        second_to_last_segment(url)
    } else {
        None
    }
}

/// Decode percent-escapes, keeping the raw text if it is not valid UTF-8.
fn decode(reference: String) -> String {
    match urlencoding::decode(&reference) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => reference,
    }
}

/// Identify the supplier of a product URL.
///
/// Returns `None` for placeholders, non-HTTP text and unknown hosts.
pub fn classify(url: &str) -> Option<Classification> {
    let parsed = Url::parse(url).ok()?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return None;
    }
    let host = parsed.host_str()?;

    let rule = SUPPLIERS.iter().find(|r| host.contains(r.host_marker))?;
    let reference = (rule.reference)(&parsed).map(decode).unwrap_or_default();

    Some(Classification {
        supplier: rule.name,
        reference,
    })
}

/// Fill `supplier` and `supplier_ref` on every record from its URL.
pub fn enrich(components: &mut [ComponentRecord]) {
    for comp in components.iter_mut() {
        if let Some(class) = classify(&comp.url) {
            comp.supplier = class.supplier.to_string();
            comp.supplier_ref = class.reference;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(url: &str) -> Option<(&'static str, String)> {
        classify(url).map(|c| (c.supplier, c.reference))
    }

    #[test]
    fn test_farnell() {
        assert_eq!(
            reference("https://uk.farnell.com/search/abc123"),
            Some(("farnell", "abc123".to_string()))
        );
        assert_eq!(
            reference("http://fr.farnell.com/multicomp/mc0603b104k500ct/cap/dp/1759122"),
            Some(("farnell", "1759122".to_string()))
        );
    }

    #[test]
    fn test_mouser_search_shape() {
        assert_eq!(
            reference("https://www.mouser.fr/search/ProductDetail.aspx?R=0virtualkey0virtualkey511-LD1117V33"),
            Some(("mouser", "511-LD1117V33".to_string()))
        );
    }

    #[test]
    fn test_mouser_detail_shape() {
        assert_eq!(
            reference("https://www.mouser.com/ProductDetail/Texas-Instruments/TPS7A4700RGWR/?qs=abc"),
            Some(("mouser", "TPS7A4700RGWR".to_string()))
        );
    }

    #[test]
    fn test_mouser_unknown_shape() {
        assert_eq!(
            reference("https://www.mouser.com/c/passive-components/"),
            Some(("mouser", String::new()))
        );
    }

    #[test]
    fn test_digikey() {
        assert_eq!(
            reference("https://www.digikey.com/product-detail/en/yageo/RC0603FR-0710KL/311-10.0KHRCT-ND/729827/"),
            Some(("digikey", "729827".to_string()))
        );
        assert_eq!(
            reference("https://www.digikey.fr/product-detail/en/on/MMBT3904LT1G/MMBT3904LT1GOSCT%2DND/919601"),
            Some(("digikey", "MMBT3904LT1GOSCT-ND".to_string()))
        );
    }

    #[test]
    fn test_unclassified() {
        assert_eq!(reference(""), None);
        assert_eq!(reference("-"), None);
        assert_eq!(reference("ftp://farnell.com/a/b"), None);
        assert_eq!(reference("www.farnell.com/a/b"), None);
        assert_eq!(reference("https://www.lcsc.com/product-detail/C14663.html"), None);
    }

    #[test]
    fn test_enrich() {
        let mut comps = vec![
            ComponentRecord {
                url: "https://uk.farnell.com/dp/1759122".to_string(),
                ..ComponentRecord::new("main", 1)
            },
            ComponentRecord {
                url: "-".to_string(),
                ..ComponentRecord::new("main", 1)
            },
        ];

        enrich(&mut comps);

        assert_eq!(comps[0].supplier, "farnell");
        assert_eq!(comps[0].supplier_ref, "1759122");
        assert_eq!(comps[1].supplier, "");
        assert_eq!(comps[1].supplier_ref, "");
    }
}
