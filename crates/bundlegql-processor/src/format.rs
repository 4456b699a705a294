//! Bundle attribute and link formatting. Pure mapping, no I/O.

use bundlegql_core::{
    is_truthy, BundleItemOption, BundleProduct, EnumLookup, EnumLookupError, LinkedProduct,
    RawBundleLink, RawBundleProduct, PRICE_TYPE_ENUM, PRICE_VIEW_ENUM, SHIP_BUNDLE_ITEMS_ENUM,
};
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;

/// Link `price_type` used when the enum lookup has no match.
pub const DEFAULT_LINK_PRICE_TYPE: &str = "DYNAMIC";

/// Maps bundle attribute codes to their API representation.
///
/// `dynamic_price` is derived from `price_type` but only when `price_view`
/// is present. `bundle_product_options` is not carried over; the collector
/// builds `items` from it.
///
/// Attribute codes that arrive as explicit `null` are written back as
/// `null` and derive nothing. An input key named after a derived field is
/// dropped whenever its source code is present, so the derived value wins.
///
/// # Errors
///
/// Returns [`EnumLookupError`] if a required enum table is not defined.
pub fn format_bundle_attributes<L: EnumLookup>(
    product: RawBundleProduct,
    lookup: &L,
) -> Result<BundleProduct, EnumLookupError> {
    let RawBundleProduct {
        sku,
        type_id,
        price_view,
        shipment_type,
        price_type,
        sku_type,
        weight_type,
        mut attributes,
        ..
    } = product;

    for (code, value) in [
        ("price_view", &price_view),
        ("shipment_type", &shipment_type),
        ("price_type", &price_type),
        ("sku_type", &sku_type),
        ("weight_type", &weight_type),
    ] {
        if matches!(value, Some(None)) {
            attributes.insert(code.to_string(), Value::Null);
        }
    }

    let price_view = price_view.flatten();
    let shipment_type = shipment_type.flatten();
    let price_type = price_type.flatten();
    let sku_type = sku_type.flatten();
    let weight_type = weight_type.flatten();

    for (source_present, derived) in [
        (shipment_type.is_some(), "ship_bundle_items"),
        (price_view.is_some(), "dynamic_price"),
        (sku_type.is_some(), "dynamic_sku"),
        (weight_type.is_some(), "dynamic_weight"),
    ] {
        if source_present {
            attributes.remove(derived);
        }
    }

    let resolved_price_view = price_view
        .as_ref()
        .map(|raw| lookup.resolve(PRICE_VIEW_ENUM, raw))
        .transpose()?
        .flatten();

    let ship_bundle_items = shipment_type
        .as_ref()
        .map(|raw| lookup.resolve(SHIP_BUNDLE_ITEMS_ENUM, raw))
        .transpose()?
        .flatten();

    let dynamic_price = price_view
        .is_some()
        .then(|| !is_truthy(price_type.as_ref()));
    let dynamic_sku = sku_type.as_ref().map(|v| !v.is_truthy());
    let dynamic_weight = weight_type.as_ref().map(|v| !v.is_truthy());

    Ok(BundleProduct {
        sku,
        type_id,
        price_view: resolved_price_view,
        shipment_type,
        ship_bundle_items,
        price_type,
        dynamic_price,
        sku_type,
        dynamic_sku,
        weight_type,
        dynamic_weight,
        items: None,
        attributes,
    })
}

/// Formats one link into a slot that still points at
/// [`LinkedProduct::NotFound`].
///
/// # Errors
///
/// Returns [`EnumLookupError`] if the price type enum is not defined.
pub fn format_link<L: EnumLookup>(
    link: RawBundleLink,
    lookup: &L,
) -> Result<BundleItemOption, EnumLookupError> {
    let price_type = link
        .price_type
        .as_ref()
        .map(|raw| lookup.resolve(PRICE_TYPE_ENUM, raw))
        .transpose()?
        .flatten()
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| DEFAULT_LINK_PRICE_TYPE.to_string());

    let qty = link
        .qty
        .and_then(|qty| qty.trunc().to_i64())
        .unwrap_or(0);

    Ok(BundleItemOption {
        product: LinkedProduct::NotFound,
        label: None,
        price: link.price,
        position: link.position,
        id: link.id,
        qty,
        is_default: is_truthy(link.is_default.as_ref()),
        price_type,
        can_change_quantity: link.can_change_quantity,
    })
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
