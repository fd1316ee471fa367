//! Name resolution tests for base-list references.

use rstest::rstest;
use typedex::index::{TypeDescriptor, TypeKind, canonical_name};

use crate::helpers::compile_helpers::*;

fn base_of(source: &str, class: &str) -> String {
    let compilation = compile(source);
    let ty = compilation.find_type(class, 0).expect(class);
    let base = ty.base_type().expect("base type");
    canonical_name(&base, true)
}

#[rstest]
#[case::same_namespace("namespace N { class B {} class D : B {} }", "N.D", "N.B")]
#[case::outer_namespace("namespace N { class B {} namespace M { class D : B {} } }", "N.M.D", "N.B")]
#[case::dotted_namespace("namespace N { class B {} } namespace N.M { class D : B {} }", "N.M.D", "N.B")]
#[case::qualified("namespace N { class B {} } class D : N.B {}", "D", "N.B")]
#[case::global_alias("class B {} namespace N { class B {} class D : global::B {} }", "N.D", "B")]
#[case::using_import("namespace N { class B {} } namespace M { using N; class D : B {} }", "M.D", "N.B")]
#[case::using_alias("namespace N { class B {} } namespace M { using X = N.B; class D : X {} }", "M.D", "N.B")]
#[case::namespace_alias("namespace N.Deep { class B {} } namespace M { using Q = N.Deep; class D : Q.B {} }", "M.D", "N.Deep.B")]
#[case::alias_qualifier("namespace N.Deep { class B {} } namespace M { using Q = N.Deep; class D : Q::B {} }", "M.D", "N.Deep.B")]
#[case::nested_type("class Outer { class Inner {} class D : Inner {} }", "Outer.D", "Inner")]
#[case::qualified_nested("class Outer { public class Inner {} } class D : Outer.Inner {}", "D", "Inner")]
#[case::static_using("namespace N { static class Holder { public class B {} } } namespace M { using static N.Holder; class D : B {} }", "M.D", "N.B")]
#[case::implicit_object("class D {}", "D", "System.Object")]
#[case::explicit_object("class D : object {}", "D", "System.Object")]
fn test_base_resolution(#[case] source: &str, #[case] class: &str, #[case] expected: &str) {
    assert_eq!(base_of(source, class), expected);
}

#[test]
fn test_type_in_namespace_beats_using() {
    let source = "namespace Other { class B {} } namespace N { using Other; class B {} class D : B {} }";
    assert_eq!(base_of(source, "N.D"), "N.B");
}

#[test]
fn test_usings_do_not_leak_into_other_files() {
    let compilation = compile_files(&[
        ("a.cs", "using Lib; namespace Lib { class Base {} }"),
        ("b.cs", "class D : Base {}"),
    ]);
    let base = compilation
        .find_type("D", 0)
        .and_then(|d| d.base_type())
        .expect("base");
    assert_eq!(base.kind(), TypeKind::Error);
}

#[test]
fn test_namespaces_merge_across_files() {
    let compilation = compile_files(&[
        ("a.cs", "namespace Zoo { class Animal {} }"),
        ("b.cs", "namespace Zoo { class Dog : Animal {} }"),
    ]);
    assert!(compilation.diagnostics().is_empty());
    assert_eq!(
        canonical_name(&compilation.find_type("Zoo.Dog", 0).and_then(|d| d.base_type()).expect("base"), true),
        "Zoo.Animal"
    );
}

#[test]
fn test_file_scoped_namespace() {
    let compilation = compile("namespace App.Models;\nclass Base {}\nclass Derived : Base {}\n");
    let derived = compilation.find_type("App.Models.Derived", 0).expect("derived");
    assert_eq!(derived.namespace_path(), vec!["App", "Models"]);
    assert_eq!(
        canonical_name(&derived.base_type().expect("base"), true),
        "App.Models.Base"
    );
}

#[rstest]
#[case::class("class T {}", TypeKind::Class, Some("System.Object"))]
#[case::record("record T(int X);", TypeKind::Record, Some("System.Object"))]
#[case::record_struct("record struct T(int X);", TypeKind::RecordStruct, Some("System.ValueType"))]
#[case::structure("struct T {}", TypeKind::Struct, Some("System.ValueType"))]
#[case::enumeration("enum T { A, B }", TypeKind::Enum, Some("System.Enum"))]
#[case::interface("interface T {}", TypeKind::Interface, None)]
fn test_declared_kinds(#[case] source: &str, #[case] kind: TypeKind, #[case] base: Option<&str>) {
    let compilation = compile(source);
    let ty = compilation.find_type("T", 0).expect("T");
    assert_eq!(ty.kind(), kind);
    assert_eq!(
        ty.base_type().map(|b| canonical_name(&b, true)).as_deref(),
        base
    );
}

#[test]
fn test_record_base_and_interfaces() {
    let compilation = compile("record Person(string Name); interface IStaff {} record Employee(string Name, int Id) : Person(Name), IStaff;");
    let employee = compilation.find_type("Employee", 0).expect("employee");
    assert_eq!(canonical_name(&employee.base_type().expect("base"), true), "Person");
    assert_eq!(
        employee.interfaces().iter().map(|i| canonical_name(i, true)).collect::<Vec<_>>(),
        vec!["IStaff"]
    );
}

#[test]
fn test_struct_interfaces() {
    let compilation = compile("interface IShape {} struct Point : IShape {}");
    let point = compilation.find_type("Point", 0).expect("point");
    assert_eq!(canonical_name(&point.base_type().expect("base"), true), "System.ValueType");
    assert_eq!(point.interfaces().len(), 1);
}

#[test]
fn test_interface_inherits_interfaces() {
    let compilation = compile("interface IA {} interface IB : IA {}");
    let ib = compilation.find_type("IB", 0).expect("IB");
    assert!(ib.base_type().is_none());
    assert_eq!(ib.interfaces().len(), 1);
}

#[test]
fn test_user_declared_system_object_is_merged() {
    let compilation = compile("namespace System { public class Object {} } class D {}");
    assert!(compilation.diagnostics().is_empty());
    let object = compilation.find_type("System.Object", 0).expect("object");
    assert!(object.base_type().is_none());
    assert!(!object.is_implicit());
    let d = compilation.find_type("D", 0).expect("D");
    assert_eq!(d.base_type(), Some(object));
}
