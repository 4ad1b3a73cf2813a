//! Component selection by field allow-lists and URL state.

use crate::schematic::{ComponentRecord, Field};

/// Which components to keep based on their supplier URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UrlMode {
    /// Drop components with a one-character placeholder URL (e.g., "-")
    #[default]
    Default,
    /// Keep placeholder URLs too
    All,
    /// Keep only components without any URL
    Unspecified,
}

impl UrlMode {
    /// Combine the `--unspecified` and `--all` flags. Unspecified wins.
    pub fn from_flags(unspecified: bool, all: bool) -> Self {
        if unspecified {
            UrlMode::Unspecified
        } else if all {
            UrlMode::All
        } else {
            UrlMode::Default
        }
    }

    fn accepts(self, url: &str) -> bool {
        match self {
            UrlMode::Default => url.chars().count() != 1,
            UrlMode::All => true,
            UrlMode::Unspecified => url.is_empty(),
        }
    }
}

/// Case-insensitive allow-list for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    field: Field,
    allowed: Vec<String>,
}

impl Predicate {
    /// Build from a comma-separated list (e.g., "100nF,1µF,10µF").
    pub fn new(field: Field, list: &str) -> Self {
        Self {
            field,
            allowed: list.to_lowercase().split(',').map(str::to_string).collect(),
        }
    }

    fn matches(&self, comp: &ComponentRecord) -> bool {
        let value = comp.get(self.field).to_lowercase();
        self.allowed.iter().any(|a| *a == value)
    }
}

/// Selection criteria applied to every component.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub predicates: Vec<Predicate>,
    pub url_mode: UrlMode,
}

impl Filter {
    /// Whether a component is selected. Power symbols (`#` references) never are.
    pub fn keep(&self, comp: &ComponentRecord) -> bool {
        !comp.is_virtual()
            && self.url_mode.accepts(&comp.url)
            && self.predicates.iter().all(|p| p.matches(comp))
    }

    /// Keep the selected components, preserving order.
    pub fn apply(&self, components: Vec<ComponentRecord>) -> Vec<ComponentRecord> {
        components.into_iter().filter(|c| self.keep(c)).collect()
    }
}
