//! ClassModel built from bound declarations.

use typedex::index::TypeKind;

use crate::helpers::compile_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_model_identity() {
    let compilation = compile(SHOP);
    let index = build_index(&compilation);
    let order = index.find_class("Shop.Models.Order").expect("order");

    assert_eq!(order.name(), "Order");
    assert_eq!(order.full_name(), "Shop.Models.Order");
    assert_eq!(order.namespace(), Some("Shop.Models"));
    assert_eq!(order.kind(), TypeKind::Class);
    assert!(!order.is_generic());
    assert_eq!(order.base_type(), Some("Shop.Models.Entity"));
    assert_eq!(order.interfaces(), &["Shop.Models.IAuditable".to_string()]);
}

#[test]
fn test_model_attributes() {
    let compilation = compile(SHOP);
    let index = build_index(&compilation);
    let order = index.find_class("Shop.Models.Order").expect("order");

    assert_eq!(order.attributes().len(), 2);
    assert!(order.has_attribute("Serializable"));
    assert!(order.has_attribute("SerializableAttribute"));
    let table = order.attribute("Table").expect("table attribute");
    assert_eq!(table.positional(0), Some("\"orders\""));
    assert_eq!(table.named("Schema"), Some("\"sales\""));
    assert!(!order.has_attribute("Obsolete"));
}

#[test]
fn test_model_modifiers_and_docs() {
    let compilation = compile(SHOP);
    let index = build_index(&compilation);

    let entity = index.find_class("Shop.Models.Entity").expect("entity");
    assert!(entity.is_abstract());
    assert!(entity.has_modifier("public"));
    assert_eq!(entity.documentation(), Some("Base of every persisted model."));
    assert_eq!(entity.base_type(), Some("System.Object"));

    let order = index.find_class("Shop.Models.Order").expect("order");
    assert!(order.has_modifier("sealed"));
    assert!(!order.is_abstract());
}

#[test]
fn test_model_location() {
    let compilation = compile(SHOP);
    let index = build_index(&compilation);
    let customer = index.find_class("Shop.Models.Customer").expect("customer");

    let location = customer.location().expect("location");
    assert_eq!(location.file, compilation.units()[0].file());
    let text = &compilation.units()[0].text()[location.range];
    assert_eq!(text, "Customer");
}

#[test]
fn test_generic_model() {
    let compilation = compile(GENERIC_BOX);
    let index = build_index(&compilation);

    let boxed = index.find_class("Box<T>").expect("box");
    assert!(boxed.is_generic());
    assert_eq!(boxed.type_arguments(), &["T".to_string()]);
    assert_eq!(boxed.namespace(), Some("A.B"));

    let foo_box = index.find_class("A.B.FooBox").expect("foo box");
    assert_eq!(foo_box.base_type(), Some("Box<Foo>"));
}

#[test]
fn test_find_by_base_type_models() {
    let compilation = compile(SHOP);
    let index = build_index(&compilation);

    let names: Vec<String> = index
        .find_by_base_type("Shop.Models.Customer")
        .map(|m| m.full_name().to_string())
        .collect();
    assert_eq!(names, vec!["Shop.Models.PremiumCustomer"]);
    assert_eq!(index.find_by_base_type("Missing").count(), 0);
}

#[test]
fn test_to_class_model_matches_find_class() {
    let compilation = compile(PETS);
    let index = build_index(&compilation);
    let dog = index.lookup_by_name("Dog").expect("dog");

    assert_eq!(Some(index.to_class_model(dog)), index.find_class("Dog"));
}
