//! Loading a directory tree and indexing it end to end.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use typedex::index::TypeHierarchyIndex;
use typedex::project::{LoaderOptions, ProjectLoader};

use crate::helpers::compile_helpers::names;

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(path, text).expect("write file");
}

#[test]
fn test_load_and_index_directory() {
    let temp = TempDir::new().expect("temp dir");
    write(temp.path(), "Models/Entity.cs", "namespace Shop.Models { public abstract class Entity {} }");
    write(temp.path(), "Models/Order.cs", "namespace Shop.Models { public class Order : Entity {} }");
    write(
        temp.path(),
        "Services/OrderService.cs",
        "using Shop.Models;\nnamespace Shop.Services { class SpecialOrder : Order {} }",
    );
    write(temp.path(), "bin/Debug/Generated.cs", "class Generated : Shop.Models.Entity {}");

    let project = ProjectLoader::default()
        .load_directory(temp.path())
        .expect("load");
    assert_eq!(project.len(), 3);

    let compilation = project.compile();
    assert!(compilation.diagnostics().is_empty(), "{:?}", compilation.diagnostics());
    let index = TypeHierarchyIndex::build(&compilation);

    assert_eq!(
        names(index.lookup_by_base_type("Shop.Models.Entity")),
        vec!["Shop.Models.Order", "Shop.Services.SpecialOrder"]
    );
    assert!(index.lookup_by_name("Generated").is_none());
}

#[test]
fn test_files_in_sorted_order() {
    let temp = TempDir::new().expect("temp dir");
    write(temp.path(), "z.cs", "class Z {}");
    write(temp.path(), "m/inner.cs", "class M {}");
    write(temp.path(), "a.cs", "class A {}");

    let project = ProjectLoader::default()
        .load_directory(temp.path())
        .expect("load");
    let files: Vec<String> = project
        .units()
        .iter()
        .map(|u| {
            u.path()
                .strip_prefix(temp.path())
                .expect("under root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    assert_eq!(files, vec!["a.cs", "m/inner.cs", "z.cs"]);
}

#[test]
fn test_parse_errors_survive_loading() {
    let temp = TempDir::new().expect("temp dir");
    write(temp.path(), "broken.cs", "class Broken : {");
    write(temp.path(), "fine.cs", "class Fine {}");

    let project = ProjectLoader::new(LoaderOptions::default())
        .load_directory(temp.path())
        .expect("load");
    assert!(project.units()[0].has_errors());
    assert!(!project.units()[1].has_errors());

    let compilation = project.compile();
    let index = TypeHierarchyIndex::build(&compilation);
    assert!(index.lookup_by_name("Broken").is_some());
    assert!(index.lookup_by_name("Fine").is_some());
}
