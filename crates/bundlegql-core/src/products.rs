use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::attribute::AttributeValue;

/// Default `type_id` that marks a result record as a bundle product.
pub const BUNDLE_TYPE_ID: &str = "bundle";

// ---------------------------------------------------------------------------
// Incoming bundle records
// ---------------------------------------------------------------------------

/// A bundle record as produced by the upstream product query.
///
/// Only the fields this crate reshapes are typed; everything else is kept in
/// `attributes` and written back out untouched.
///
/// The attribute codes distinguish an absent key (`None`) from an explicit
/// `null` (`Some(None)`).
#[derive(Debug, Clone, Deserialize)]
pub struct RawBundleProduct {
    pub sku: String,
    pub type_id: String,
    #[serde(default, deserialize_with = "present")]
    pub price_view: Option<Option<AttributeValue>>,
    #[serde(default, deserialize_with = "present")]
    pub shipment_type: Option<Option<AttributeValue>>,
    #[serde(default, deserialize_with = "present")]
    pub price_type: Option<Option<AttributeValue>>,
    #[serde(default, deserialize_with = "present")]
    pub sku_type: Option<Option<AttributeValue>>,
    #[serde(default, deserialize_with = "present")]
    pub weight_type: Option<Option<AttributeValue>>,
    #[serde(default)]
    pub bundle_product_options: Option<Vec<RawBundleOption>>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn remove_keys(map: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        map.remove(*key);
    }
}

/// One option group of a bundle, e.g. "Choose a drink".
#[derive(Debug, Clone, Deserialize)]
pub struct RawBundleOption {
    #[serde(default)]
    pub product_links: Vec<RawBundleLink>,
    /// The option's own data (`option_id`, `title`, `required`, `type`, ...).
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

/// A link from a bundle option to one child product.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBundleLink {
    pub sku: String,
    #[serde(default)]
    pub id: Option<AttributeValue>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub position: Option<AttributeValue>,
    #[serde(default)]
    pub qty: Option<Decimal>,
    #[serde(default)]
    pub is_default: Option<AttributeValue>,
    #[serde(default)]
    pub price_type: Option<AttributeValue>,
    #[serde(default)]
    pub can_change_quantity: Option<AttributeValue>,
}

// ---------------------------------------------------------------------------
// Child products
// ---------------------------------------------------------------------------

/// A child product as returned by the catalog, before formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Catalog entity id; category associations are keyed by it.
    pub id: i64,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub type_id: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A category association of a child product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLink {
    pub position: usize,
    pub category_id: i64,
}

/// A child product formatted for API output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildProduct {
    pub id: i64,
    pub sku: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
    pub category_links: Vec<CategoryLink>,
}

impl ChildProduct {
    /// Keys written from typed fields; attributes with these names are
    /// dropped so each key appears once.
    pub const FIELDS: &'static [&'static str] =
        &["id", "sku", "name", "type_id", "price", "category_links"];

    /// Removes attributes that would repeat a typed field's key.
    pub fn remove_shadowed_attributes(&mut self) {
        remove_keys(&mut self.attributes, Self::FIELDS);
    }

    /// Replaces `category_links` with `{position, category_id}` pairs in the
    /// order the ids are given.
    pub fn attach_categories(&mut self, category_ids: &[i64]) {
        self.category_links = category_ids
            .iter()
            .enumerate()
            .map(|(position, &category_id)| CategoryLink {
                position,
                category_id,
            })
            .collect();
    }
}

/// Resolution state of a link's child product.
///
/// Serializes as `{"status": "found", "child": {...}}` or
/// `{"status": "not_found"}`. The child's attributes sit under `child`, so
/// a product attribute named `status` cannot replace the marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "child", rename_all = "snake_case")]
pub enum LinkedProduct {
    Found(ChildProduct),
    NotFound,
}

impl LinkedProduct {
    pub const NOT_FOUND_MESSAGE: &'static str = "Bundled product not found";

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, LinkedProduct::Found(_))
    }

    #[must_use]
    pub fn child(&self) -> Option<&ChildProduct> {
        match self {
            LinkedProduct::Found(child) => Some(child),
            LinkedProduct::NotFound => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Outgoing bundle records
// ---------------------------------------------------------------------------

/// A formatted link inside a [`BundleItem`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleItemOption {
    pub product: LinkedProduct,
    /// The child's display name, set once the child is resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub price: Option<Decimal>,
    pub position: Option<AttributeValue>,
    pub id: Option<AttributeValue>,
    pub qty: i64,
    pub is_default: bool,
    pub price_type: String,
    pub can_change_quantity: Option<AttributeValue>,
}

impl BundleItemOption {
    /// Marks the slot as resolved to `child`.
    pub fn resolve(&mut self, child: &ChildProduct) {
        self.label = Some(child.name.clone());
        self.product = LinkedProduct::Found(child.clone());
    }
}

/// Link slots of one bundle option, keyed by child SKU in insertion order.
///
/// Serializes as a JSON object. Inserting a SKU that is already present
/// replaces the earlier slot in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkSlots(Vec<(String, BundleItemOption)>);

impl LinkSlots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sku: String, slot: BundleItemOption) {
        match self.0.iter_mut().find(|(existing, _)| *existing == sku) {
            Some((_, existing_slot)) => *existing_slot = slot,
            None => self.0.push((sku, slot)),
        }
    }

    #[must_use]
    pub fn get(&self, sku: &str) -> Option<&BundleItemOption> {
        self.0
            .iter()
            .find(|(existing, _)| existing == sku)
            .map(|(_, slot)| slot)
    }

    pub fn get_mut(&mut self, sku: &str) -> Option<&mut BundleItemOption> {
        self.0
            .iter_mut()
            .find(|(existing, _)| existing == sku)
            .map(|(_, slot)| slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BundleItemOption)> {
        self.0.iter().map(|(sku, slot)| (sku.as_str(), slot))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut BundleItemOption)> {
        self.0.iter_mut().map(|(sku, slot)| (sku.as_str(), slot))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for LinkSlots {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (sku, slot) in &self.0 {
            map.serialize_entry(sku, slot)?;
        }
        map.end()
    }
}

/// An option group of a formatted bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleItem {
    #[serde(flatten)]
    pub data: Map<String, Value>,
    pub options: LinkSlots,
}

impl BundleItem {
    /// Builds an item; an `options` key in the option's own data is
    /// replaced by the link slots.
    #[must_use]
    pub fn new(mut data: Map<String, Value>, options: LinkSlots) -> Self {
        data.remove("options");
        Self { data, options }
    }
}

/// A bundle record after formatting.
///
/// Raw attribute codes are passed through next to the derived fields.
/// Fields that were absent on input stay absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleProduct {
    pub sku: String,
    pub type_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_type: Option<AttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_bundle_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_type: Option<AttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_price: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku_type: Option<AttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_sku: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_type: Option<AttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_weight: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<BundleItem>>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl BundleProduct {
    /// Sets `items`, replacing any `items` attribute carried over from input.
    pub fn set_items(&mut self, items: Vec<BundleItem>) {
        self.attributes.remove("items");
        self.items = Some(items);
    }

    /// Iterates every link slot across all items.
    pub fn link_slots(&self) -> impl Iterator<Item = (&str, &BundleItemOption)> {
        self.items
            .iter()
            .flatten()
            .flat_map(|item| item.options.iter())
    }
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
