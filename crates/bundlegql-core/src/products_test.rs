use serde_json::{json, Value};

use super::*;

fn make_child(sku: &str, name: &str) -> ChildProduct {
    ChildProduct {
        id: 11,
        sku: sku.to_string(),
        name: name.to_string(),
        type_id: Some("simple".to_string()),
        price: None,
        attributes: Map::new(),
        category_links: vec![],
    }
}

fn make_slot() -> BundleItemOption {
    BundleItemOption {
        product: LinkedProduct::NotFound,
        label: None,
        price: None,
        position: Some(AttributeValue::Int(1)),
        id: Some(AttributeValue::Int(7)),
        qty: 1,
        is_default: false,
        price_type: "DYNAMIC".to_string(),
        can_change_quantity: None,
    }
}

#[test]
fn attach_categories_numbers_positions_from_zero() {
    let mut child = make_child("CAN-1", "Blood Orange");
    child.attach_categories(&[40, 12, 7]);
    assert_eq!(
        child.category_links,
        vec![
            CategoryLink { position: 0, category_id: 40 },
            CategoryLink { position: 1, category_id: 12 },
            CategoryLink { position: 2, category_id: 7 },
        ]
    );
}

#[test]
fn attach_categories_replaces_previous_links() {
    let mut child = make_child("CAN-1", "Blood Orange");
    child.attach_categories(&[1, 2]);
    child.attach_categories(&[3]);
    assert_eq!(child.category_links.len(), 1);
    assert_eq!(child.category_links[0].category_id, 3);
}

#[test]
fn resolve_sets_product_and_label() {
    let mut slot = make_slot();
    slot.resolve(&make_child("CAN-1", "Blood Orange"));
    assert!(slot.product.is_found());
    assert_eq!(slot.label.as_deref(), Some("Blood Orange"));
    assert_eq!(
        slot.product.child().map(|c| c.sku.as_str()),
        Some("CAN-1")
    );
}

#[test]
fn link_slots_insert_replaces_existing_sku_in_place() {
    let mut slots = LinkSlots::new();
    slots.insert("A".to_string(), make_slot());
    slots.insert("B".to_string(), make_slot());

    let mut replacement = make_slot();
    replacement.qty = 5;
    slots.insert("A".to_string(), replacement);

    let keys: Vec<&str> = slots.iter().map(|(sku, _)| sku).collect();
    assert_eq!(keys, vec!["A", "B"]);
    assert_eq!(slots.get("A").map(|s| s.qty), Some(5));
    assert_eq!(slots.len(), 2);
}

#[test]
fn link_slots_serialize_as_object_keyed_by_sku() {
    let mut slots = LinkSlots::new();
    slots.insert("B".to_string(), make_slot());
    slots.insert("A".to_string(), make_slot());

    let value = serde_json::to_value(&slots).expect("serialization failed");
    let keys: Vec<&String> = value.as_object().expect("object").keys().collect();
    assert_eq!(keys, vec!["B", "A"]);
    assert_eq!(value["B"]["product"], json!({"status": "not_found"}));
    assert_eq!(value["B"]["price_type"], json!("DYNAMIC"));
    assert!(value["B"].get("label").is_none());
}

#[test]
fn found_product_serializes_child_under_status_marker() {
    let mut child = make_child("CAN-1", "Blood Orange");
    child.attach_categories(&[3]);
    let value =
        serde_json::to_value(LinkedProduct::Found(child)).expect("serialization failed");

    assert_eq!(value["status"], json!("found"));
    assert_eq!(value["child"]["sku"], json!("CAN-1"));
    assert_eq!(value["child"]["name"], json!("Blood Orange"));
    assert_eq!(
        value["child"]["category_links"],
        json!([{"position": 0, "category_id": 3}])
    );
}

#[test]
fn raw_bundle_keeps_unknown_fields_in_attributes() {
    let raw: RawBundleProduct = serde_json::from_value(json!({
        "sku": "BNDL-1",
        "type_id": "bundle",
        "name": "Party Pack",
        "price_view": "1",
        "bundle_product_options": [
            {
                "option_id": 4,
                "title": "Pick a flavour",
                "product_links": [{"sku": "CAN-1", "qty": "2.0000", "price": "1.50"}]
            }
        ]
    }))
    .expect("valid bundle record");

    assert_eq!(raw.sku, "BNDL-1");
    assert_eq!(
        raw.price_view,
        Some(Some(AttributeValue::Text("1".to_string())))
    );
    assert!(raw.sku_type.is_none());
    assert_eq!(raw.attributes.get("name"), Some(&json!("Party Pack")));
    assert!(!raw.attributes.contains_key("bundle_product_options"));

    let options = raw.bundle_product_options.expect("options present");
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].data.get("title"), Some(&json!("Pick a flavour")));
    assert!(!options[0].data.contains_key("product_links"));
    assert_eq!(options[0].product_links[0].sku, "CAN-1");
    assert_eq!(
        options[0].product_links[0].qty,
        Some(Decimal::new(2, 0))
    );
}

#[test]
fn catalog_product_roundtrips_through_json() {
    let product: CatalogProduct = serde_json::from_value(json!({
        "id": 11,
        "sku": "CAN-1",
        "name": "Blood Orange",
        "type_id": "simple",
        "url_key": "blood-orange"
    }))
    .expect("valid catalog product");

    assert_eq!(product.id, 11);
    assert!(product.price.is_none());
    assert_eq!(product.attributes.get("url_key"), Some(&json!("blood-orange")));
}

#[test]
fn child_status_attribute_stays_inside_child() {
    let mut child = make_child("CAN-1", "Blood Orange");
    child.attributes.insert("status".to_string(), json!(1));

    let rendered =
        serde_json::to_string(&LinkedProduct::Found(child)).expect("serialization failed");
    let value: Value = serde_json::from_str(&rendered).expect("valid json");

    assert_eq!(value["status"], json!("found"));
    assert_eq!(value["child"]["status"], json!(1));
    assert_eq!(rendered.matches("\"status\":").count(), 2);
}

#[test]
fn remove_shadowed_attributes_keeps_other_attributes() {
    let mut child = make_child("CAN-1", "Blood Orange");
    child.attributes.insert("sku".to_string(), json!("OTHER"));
    child.attributes.insert("category_links".to_string(), json!([]));
    child.attributes.insert("url_key".to_string(), json!("blood-orange"));

    child.remove_shadowed_attributes();

    let keys: Vec<&String> = child.attributes.keys().collect();
    assert_eq!(keys, vec!["url_key"]);
    let rendered = serde_json::to_string(&child).expect("serialization failed");
    assert_eq!(rendered.matches("\"sku\":").count(), 1);
}

#[test]
fn bundle_item_drops_options_from_data() {
    let mut data = Map::new();
    data.insert("option_id".to_string(), json!(3));
    data.insert("options".to_string(), json!("stale"));

    let item = BundleItem::new(data, LinkSlots::new());
    assert!(!item.data.contains_key("options"));
    assert_eq!(item.data.get("option_id"), Some(&json!(3)));
}

#[test]
fn raw_bundle_distinguishes_null_from_absent() {
    let raw: RawBundleProduct = serde_json::from_value(json!({
        "sku": "BNDL-1",
        "type_id": "bundle",
        "price_view": null
    }))
    .expect("valid bundle record");

    assert_eq!(raw.price_view, Some(None));
    assert_eq!(raw.shipment_type, None);
    assert!(!raw.attributes.contains_key("price_view"));
}
