//! Generic definitions, constructed types and substitution.

use rstest::rstest;
use typedex::index::{TypeDescriptor, TypeKind, canonical_name};

use crate::helpers::compile_helpers::*;

fn base_name(source: &str, class: &str, arity: usize) -> String {
    let compilation = compile(source);
    let ty = compilation.find_type(class, arity).expect(class);
    canonical_name(&ty.base_type().expect("base"), true)
}

#[rstest]
#[case::simple("class Box<T> {} class Foo {} class D : Box<Foo> {}", "Box<Foo>")]
#[case::two_args("class Pair<K, V> {} class D : Pair<string, int> {}", "Pair<String, Int32>")]
#[case::nested_args("class Box<T> {} class Foo {} class D : Box<Box<Foo>> {}", "Box<Box<Foo>>")]
#[case::arrays("class Box<T> {} class Foo {} class D : Box<Foo[]> {}", "Box<Foo[]>")]
#[case::nullable_value("class Box<T> {} class D : Box<int?> {}", "Box<Nullable<Int32>>")]
#[case::nullable_reference("class Box<T> {} class Foo {} class D : Box<Foo?> {}", "Box<Foo>")]
#[case::unresolved_arg("class Box<T> {} class D : Box<Missing> {}", "Box<Missing>")]
fn test_constructed_base_names(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(base_name(source, "D", 0), expected);
}

#[test]
fn test_arity_selects_definition() {
    let source = "class Box {} class Box<T> {} class Foo {} class A : Box {} class B : Box<Foo> {}";
    let compilation = compile(source);
    let plain = compilation.find_type("Box", 0).expect("Box");
    let generic = compilation.find_type("Box", 1).expect("Box<T>");
    assert_ne!(plain, generic);

    let a = compilation.find_type("A", 0).and_then(|t| t.base_type()).expect("A base");
    let b = compilation.find_type("B", 0).and_then(|t| t.base_type()).expect("B base");
    assert_eq!(a, plain);
    assert_eq!(b.definition(), generic);
}

#[test]
fn test_wrong_arity_is_unresolved() {
    let compilation = compile("class Box<T> {} class D : Box {}");
    let base = compilation
        .find_type("D", 0)
        .and_then(|t| t.base_type())
        .expect("base");
    assert_eq!(base.kind(), TypeKind::Error);
    assert_eq!(diagnostic_codes(&compilation), vec!["E0001"]);
}

#[test]
fn test_constructed_types_are_shared() {
    let compilation = compile("class Box<T> {} class Foo {} class A : Box<Foo> {} class B : Box<Foo> {}");
    let a = compilation.find_type("A", 0).and_then(|t| t.base_type()).expect("A base");
    let b = compilation.find_type("B", 0).and_then(|t| t.base_type()).expect("B base");
    assert_eq!(a, b);
}

#[test]
fn test_definition_arguments_are_its_parameters() {
    let compilation = compile("class Map<K, V> {}");
    let map = compilation.find_type("Map", 2).expect("map");
    let arguments = map.type_arguments();
    assert_eq!(arguments, map.type_parameters());
    assert!(arguments.iter().all(|a| !a.is_named_type()));
    assert_eq!(canonical_name(&map, true), "Map<K, V>");
}

#[test]
fn test_base_substitution_through_levels() {
    let source = r#"
        namespace Data
        {
            interface IRepository<T> {}
            class Repository<T> : IRepository<T> {}
            class AuditedRepository<T> : Repository<T> {}
            class Order {}
            class OrderRepository : AuditedRepository<Order> {}
        }
    "#;
    let compilation = compile(source);
    let orders = compilation.find_type("Data.OrderRepository", 0).expect("orders");

    let audited = orders.base_type().expect("audited");
    assert_eq!(canonical_name(&audited, true), "AuditedRepository<Order>");
    let repository = audited.base_type().expect("repository");
    assert_eq!(canonical_name(&repository, true), "Repository<Order>");
    assert_eq!(
        repository.interfaces().iter().map(|i| canonical_name(i, true)).collect::<Vec<_>>(),
        vec!["IRepository<Order>"]
    );
    let object = repository.base_type().expect("object");
    assert_eq!(canonical_name(&object, true), "System.Object");
}

#[test]
fn test_outer_type_parameters_visible_in_nested_base() {
    let compilation = compile("class Base<T> {} class Outer<T> { class Inner : Base<T> {} }");
    let inner = compilation.find_type("Outer.Inner", 0);
    // Outer is generic, so its nested types are reached through the arity-1 definition.
    assert!(inner.is_none());
    let outer = compilation.find_type("Outer", 1).expect("outer");
    let inner = compilation
        .types()
        .get(outer.id())
        .nested_types
        .values()
        .next()
        .map(|&id| compilation.named_type(id))
        .expect("inner");
    let base = inner.base_type().expect("base");
    assert_eq!(canonical_name(&base, true), "Base<T>");
    assert_eq!(base.type_arguments(), outer.type_parameters());
    assert!(compilation.diagnostics().is_empty());
}

#[test]
fn test_self_referential_generic_base_is_circular() {
    let compilation = compile("class C<T> : C<C<T>> {}");
    assert_eq!(diagnostic_codes(&compilation), vec!["E0003"]);
    let c = compilation.find_type("C", 1).expect("C");
    assert_eq!(canonical_name(&c.base_type().expect("base"), true), "System.Object");
}

#[test]
fn test_curiously_recurring_pattern() {
    let compilation = compile("class Entity<TSelf> {} class User : Entity<User> {}");
    assert!(compilation.diagnostics().is_empty());
    assert_eq!(base_name("class Entity<TSelf> {} class User : Entity<User> {}", "User", 0), "Entity<User>");
}
