//! Lookup by canonical name and by transitive base type.

use rstest::rstest;
use typedex::index::{IndexOptions, TypeDescriptor, canonical_name};

use crate::helpers::compile_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// LOOKUP BY NAME
// =============================================================================

#[test]
fn test_every_class_found_by_canonical_name() {
    let compilation = compile(SHOP);
    let index = build_index(&compilation);

    for name in [
        "Shop.Models.Entity",
        "Shop.Models.Order",
        "Shop.Models.Customer",
        "Shop.Models.PremiumCustomer",
    ] {
        let found = index.lookup_by_name(name).expect(name);
        assert_eq!(canonical_name(found, true), name);
    }
    // Interfaces are not class declarations.
    assert!(index.lookup_by_name("Shop.Models.IAuditable").is_none());
    assert_eq!(index.len(), 4);
}

#[rstest]
#[case::qualified(true, "A.B.Foo")]
#[case::simple(false, "Foo")]
fn test_namespace_prefix(#[case] include_namespace: bool, #[case] expected: &str) {
    let compilation = compile(GENERIC_BOX);
    let foo = compilation.find_type("A.B.Foo", 0).expect("Foo");
    assert_eq!(canonical_name(&foo, include_namespace), expected);
}

#[test]
fn test_global_namespace_has_no_leading_dot() {
    let compilation = compile("class Lonely {}");
    let index = build_index(&compilation);
    assert!(index.lookup_by_name("Lonely").is_some());
    assert!(index.lookup_by_name(".Lonely").is_none());
}

#[test]
fn test_same_name_in_different_namespaces() {
    let compilation = compile(WIDGETS);
    let index = build_index(&compilation);

    let controls = index.lookup_by_name("Ui.Controls.Widget").expect("controls widget");
    let inventory = index.lookup_by_name("Inventory.Widget").expect("inventory widget");
    assert_ne!(controls, inventory);
    assert_eq!(index.stats().collisions, 0);
}

#[test]
fn test_identical_full_names_last_write_wins() {
    let compilation = compile(
        "namespace N { class Outer { class Inner {} } class Other { class Inner {} } }",
    );
    let index = build_index(&compilation);

    let inner = index.lookup_by_name("N.Inner").expect("inner");
    let other = compilation.find_type("N.Other.Inner", 0).expect("Other.Inner");
    assert_eq!(inner, &other);
    assert_eq!(index.stats().collisions, 1);
}

#[test]
fn test_missing_name() {
    let compilation = compile(PETS);
    let index = build_index(&compilation);
    assert!(index.lookup_by_name("Cat").is_none());
    assert!(index.find_class("Cat").is_none());
}

// =============================================================================
// LOOKUP BY BASE TYPE
// =============================================================================

#[test]
fn test_pets_scenario() {
    let compilation = compile(PETS);
    let index = build_index(&compilation);

    assert_eq!(names(index.lookup_by_base_type("Animal")), vec!["Dog"]);
    assert_eq!(names(index.lookup_by_base_type("IPet")), vec!["Dog"]);
    assert!(index.lookup_by_base_type("Dog").is_empty());
    assert_eq!(
        names(index.lookup_by_base_type("System.Object")),
        vec!["Animal", "Dog"]
    );
}

#[test]
fn test_transitive_descendants() {
    let compilation = compile(SHOP);
    let index = build_index(&compilation);

    assert_eq!(
        names(index.lookup_by_base_type("Shop.Models.Entity")),
        vec![
            "Shop.Models.Order",
            "Shop.Models.Customer",
            "Shop.Models.PremiumCustomer"
        ]
    );
    assert_eq!(
        names(index.lookup_by_base_type("Shop.Models.Customer")),
        vec!["Shop.Models.PremiumCustomer"]
    );
    assert_eq!(
        names(index.lookup_by_base_type("Shop.Models.IAuditable")),
        vec!["Shop.Models.Order"]
    );
}

#[test]
fn test_every_ancestor_lists_the_class() {
    let compilation = compile(SHOP);
    let index = build_index(&compilation);

    for name in index.type_names().map(str::to_string).collect::<Vec<_>>() {
        let symbol = index.lookup_by_name(&name).expect("indexed").clone();
        for ancestor in index.ancestor_chain(&symbol) {
            let key = canonical_name(&ancestor, true);
            assert!(
                index.lookup_by_base_type(&key).contains(&symbol),
                "{name} missing under {key}"
            );
        }
    }
}

#[rstest]
#[case::unknown("Nope")]
#[case::unqualified_base("Entity")]
#[case::empty("")]
fn test_unknown_base_is_empty(#[case] key: &str) {
    let compilation = compile(SHOP);
    let index = build_index(&compilation);
    assert!(index.lookup_by_base_type(key).is_empty());
}

#[test]
fn test_interfaces_of_intermediate_levels() {
    let compilation = compile(
        "interface IA {} interface IB {} class Base : IA {} class Mid : Base, IB {} class Leaf : Mid {}",
    );
    let index = build_index(&compilation);

    // Each step collects the interfaces of the type it starts from.
    assert_eq!(names(index.lookup_by_base_type("IB")), vec!["Mid", "Leaf"]);
    assert_eq!(names(index.lookup_by_base_type("IA")), vec!["Base", "Mid", "Leaf"]);
}

// =============================================================================
// GENERICS
// =============================================================================

#[test]
fn test_generic_base_key() {
    let compilation = compile(GENERIC_BOX);
    let index = build_index(&compilation);

    assert_eq!(names(index.lookup_by_base_type("Box<Foo>")), vec!["A.B.FooBox"]);
    assert!(index.lookup_by_name("Box<T>").is_some());
    assert!(index.lookup_by_name("A.B.Box<T>").is_none());
}

#[test]
fn test_qualified_type_arguments_option() {
    let compilation = compile(GENERIC_BOX);
    let index = build_index_with(
        &compilation,
        IndexOptions::default().with_qualified_type_arguments(true),
    );

    assert_eq!(
        names(index.lookup_by_base_type("Box<A.B.Foo>")),
        vec!["A.B.FooBox"]
    );
    assert!(index.lookup_by_base_type("Box<Foo>").is_empty());
}

#[test]
fn test_substituted_generic_chain() {
    let compilation = compile(
        "class Repo<T> {} class CachedRepo<U> : Repo<U> {} class User {} class UserRepo : CachedRepo<User> {}",
    );
    let index = build_index(&compilation);

    assert_eq!(names(index.lookup_by_base_type("CachedRepo<User>")), vec!["UserRepo"]);
    assert_eq!(names(index.lookup_by_base_type("Repo<User>")), vec!["UserRepo"]);
    assert_eq!(
        names(index.lookup_by_base_type("Repo<U>")),
        vec!["CachedRepo<U>"]
    );
}

// =============================================================================
// ROBUSTNESS
// =============================================================================

#[test]
fn test_unresolved_base_keyed_by_written_name() {
    let compilation = compile("class Dog : External.Animal {}");
    let index = build_index(&compilation);

    assert_eq!(names(index.lookup_by_base_type("External.Animal")), vec!["Dog"]);
    let dog = index.lookup_by_name("Dog").expect("dog");
    assert!(dog.base_type().and_then(|b| b.base_type()).is_none());
}

#[test]
fn test_cyclic_inheritance_terminates() {
    let compilation = compile("class A : B {} class B : A {}");
    let index = build_index(&compilation);

    assert_eq!(index.len(), 2);
    assert_eq!(names(index.lookup_by_base_type("System.Object")), vec!["A", "B"]);
}

#[rstest]
#[case::object_first("namespace System { class Object : Animal {} } class Animal {}")]
#[case::object_last("class Animal {} namespace System { class Object : Animal {} }")]
#[case::object_through_chain("namespace System { class Object : Dog {} } class Animal {} class Dog : Animal {}")]
#[case::object_on_itself("namespace System { class Object : Object {} }")]
fn test_cycle_through_system_object_terminates(#[case] source: &str) {
    let compilation = compile(source);
    assert_eq!(diagnostic_codes(&compilation), vec!["E0003"]);

    let mut current = compilation.find_type("System.Object", 0).expect("System.Object");
    let mut steps = 0;
    while let Some(base) = current.base_type() {
        current = base;
        steps += 1;
        assert!(steps <= 4, "base chain of System.Object does not terminate");
    }

    let index = build_index(&compilation);
    for name in index.type_names() {
        let class = index.lookup_by_name(name).expect("indexed");
        assert!(index.ancestor_chain(class).len() <= 3, "{name}");
    }
}

#[test]
fn test_nameless_class_is_skipped() {
    let mut project = typedex::project::Project::new();
    project.add_file("broken.cs", "class { } class Named {}");
    let compilation = project.compile();
    let index = build_index(&compilation);

    assert_eq!(index.len(), 1);
    assert_eq!(index.stats().skipped, 1);
    assert_eq!(index.stats().declarations, 2);
}

#[test]
fn test_depth_limit() {
    let compilation = compile("class A {} class B : A {} class C : B {}");
    let index = build_index_with(&compilation, IndexOptions::default().with_max_ancestor_depth(1));

    assert_eq!(names(index.lookup_by_base_type("B")), vec!["C"]);
    assert_eq!(names(index.lookup_by_base_type("A")), vec!["B"]);
    assert_eq!(names(index.lookup_by_base_type("System.Object")), vec!["A"]);
    assert_eq!(index.stats().truncated_chains, 2);
}

#[test]
fn test_build_is_deterministic() {
    let compilation = compile_files(&[("shop.cs", SHOP), ("pets.cs", PETS), ("widgets.cs", WIDGETS)]);
    let first = build_index(&compilation);
    let second = build_index(&compilation);

    assert_eq!(
        first.type_names().collect::<Vec<_>>(),
        second.type_names().collect::<Vec<_>>()
    );
    assert_eq!(
        first.ancestor_names().collect::<Vec<_>>(),
        second.ancestor_names().collect::<Vec<_>>()
    );
    for key in first.ancestor_names() {
        assert_eq!(first.lookup_by_base_type(key), second.lookup_by_base_type(key));
    }
}

#[test]
fn test_units_indexed_in_order() {
    let compilation = compile_files(&[
        ("b.cs", "class Beta : Root {}"),
        ("a.cs", "class Root {} class Alpha : Root {}"),
    ]);
    let index = build_index(&compilation);

    assert_eq!(index.type_names().collect::<Vec<_>>(), vec!["Beta", "Root", "Alpha"]);
    assert_eq!(names(index.lookup_by_base_type("Root")), vec!["Beta", "Alpha"]);
    assert_eq!(index.stats().units, 2);
}
