//! The syntax tree always reproduces its input exactly.

use rstest::rstest;
use typedex::parser::{AstNode, SourceFile, parse};

use crate::helpers::source_fixtures::*;

fn assert_lossless(source: &str) {
    let parse = parse(source);
    assert_eq!(parse.syntax().text().to_string(), source);
}

#[rstest]
#[case::pets(PETS)]
#[case::widgets(WIDGETS)]
#[case::generics(GENERIC_BOX)]
#[case::shop(SHOP)]
#[case::empty("")]
#[case::file_scoped("namespace A.B;\n\nclass C : D<E, F<G>>, IH where E : class {}\n")]
#[case::members("class C { public int X { get; set; } void M() { if (x) { } } class N {} }")]
#[case::comments("// leading\n/* block */ class C /* inner */ : B // trailing\n{}")]
#[case::verbatim("class @class : @base {}")]
#[case::byte_order_mark("\u{FEFF}namespace Zoo { class Animal {} class Dog : Animal {} }")]
fn test_valid_sources_round_trip(#[case] source: &str) {
    assert_lossless(source);
    assert!(parse(source).ok(), "unexpected errors for {source:?}");
}

#[rstest]
#[case::unterminated("class C : {")]
#[case::stray_braces("}}} class {{{")]
#[case::garbage("@#$%^&*()_+ namespace ; using = ;")]
#[case::half_generic("class C<T : Base<")]
#[case::unclosed_attribute("[Attr(1, 2 class C {}")]
#[case::unicode("class Größe : Base {} // ünïcödé")]
#[case::only_keywords("class interface struct enum record namespace using")]
fn test_invalid_sources_round_trip(#[case] source: &str) {
    assert_lossless(source);
}

#[test]
fn test_every_prefix_round_trips() {
    for end in (0..=SHOP.len()).filter(|&i| SHOP.is_char_boundary(i)) {
        assert_lossless(&SHOP[..end]);
    }
}

#[test]
fn test_errors_are_reported_not_fatal() {
    let parse = parse("class A : {} class B {}");
    assert!(!parse.ok());
    let root = SourceFile::cast(parse.syntax()).expect("source file");
    let names: Vec<_> = root.class_decls().filter_map(|c| c.name()).collect();
    assert_eq!(names, vec!["A", "B"]);
}
