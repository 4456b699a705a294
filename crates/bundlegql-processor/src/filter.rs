use std::collections::BTreeSet;
use std::fmt;

use bundlegql_core::CatalogProduct;

/// Product field a [`ChildFilter`] matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Sku,
}

impl FilterField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterField::Sku => "sku",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    In,
}

impl Condition {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::In => "in",
        }
    }
}

/// Criteria for the single batched child fetch of one processing call.
///
/// Built fresh for every call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildFilter {
    field: FilterField,
    condition: Condition,
    values: BTreeSet<String>,
}

impl ChildFilter {
    /// `sku in (skus...)`; duplicates collapse.
    pub fn sku_in<I>(skus: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            field: FilterField::Sku,
            condition: Condition::In,
            values: skus.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn field(&self) -> FilterField {
        self.field
    }

    #[must_use]
    pub fn condition(&self) -> Condition {
        self.condition
    }

    #[must_use]
    pub fn values(&self) -> &BTreeSet<String> {
        &self.values
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn matches(&self, product: &CatalogProduct) -> bool {
        match (self.field, self.condition) {
            (FilterField::Sku, Condition::In) => self.values.contains(&product.sku),
        }
    }
}

impl fmt::Display for ChildFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} values)",
            self.field.as_str(),
            self.condition.as_str(),
            self.values.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::*;

    fn product(sku: &str) -> CatalogProduct {
        CatalogProduct {
            id: 1,
            sku: sku.to_string(),
            name: sku.to_string(),
            type_id: None,
            price: None,
            attributes: Map::new(),
        }
    }

    #[test]
    fn sku_in_deduplicates_and_sorts() {
        let filter = ChildFilter::sku_in(vec!["B".to_string(), "A".to_string(), "B".to_string()]);
        let values: Vec<&str> = filter.values().iter().map(String::as_str).collect();
        assert_eq!(values, vec!["A", "B"]);
        assert_eq!(filter.len(), 2);
        assert_eq!(filter.field(), FilterField::Sku);
        assert_eq!(filter.condition(), Condition::In);
    }

    #[test]
    fn matches_only_listed_skus() {
        let filter = ChildFilter::sku_in(vec!["A".to_string()]);
        assert!(filter.matches(&product("A")));
        assert!(!filter.matches(&product("a")));
        assert!(!filter.matches(&product("B")));
    }

    #[test]
    fn display_summarises_the_filter() {
        let filter = ChildFilter::sku_in(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(filter.to_string(), "sku in (2 values)");
        assert!(ChildFilter::sku_in(Vec::new()).is_empty());
    }
}
