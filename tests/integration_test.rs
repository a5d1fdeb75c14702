//! End-to-end tests driving the analyzer over on-disk project layouts.

use std::fs;
use std::path::Path;

use pymood::{CompiledConfig, MoodConfig, analyze_project, build_report};

fn write_file(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn analyzes_a_small_project() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        dir.path(),
        "shapes.py",
        r#"
class Shape:
    def area(self):
        raise NotImplementedError

    def describe(self):
        return "shape"

class Circle(Shape):
    def __init__(self, radius):
        self.radius = radius

    def area(self):
        return 3.14 * self.radius ** 2

class Square(Shape):
    def __init__(self, side):
        self.side = side

    def area(self):
        return self.side * self.side
"#,
    );

    let analysis = analyze_project(dir.path(), &CompiledConfig::empty()).unwrap();
    assert_eq!(analysis.total_files, 1);
    assert_eq!(analysis.classes.len(), 3);

    let shape = analysis
        .classes
        .iter()
        .find(|c| c.class_name == "Shape")
        .unwrap();
    assert_eq!(shape.number_of_children, 2);
    assert_eq!(shape.depth_of_inheritance, 0);

    let circle = analysis
        .classes
        .iter()
        .find(|c| c.class_name == "Circle")
        .unwrap();
    assert_eq!(circle.parent_class_name, "Shape");
    assert_eq!(circle.depth_of_inheritance, 1);
    // area redeclared, describe surfaced from the parent
    assert_eq!(circle.methods.overridden.len(), 1);
    assert_eq!(circle.methods.inherited.len(), 1);
    // radius introduced in __init__
    assert_eq!(circle.attributes.own.len(), 1);

    let report = build_report(&analysis.classes);
    assert_eq!(report.max_number_of_children, 2);
    assert_eq!(report.max_depth_of_inheritance, 1);
    assert!(report.pof.is_finite());
}

#[test]
fn multiple_inheritance_fails_with_no_result() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "good.py", "class A:\n    pass\n");
    write_file(
        dir.path(),
        "bad.py",
        "class B:\n    pass\n\nclass C(A, B):\n    pass\n",
    );

    let err = analyze_project(dir.path(), &CompiledConfig::empty()).unwrap_err();
    assert!(err.to_string().contains("unsupported multiple inheritance"));
}

#[test]
fn vendored_directories_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "app.py", "class App:\n    pass\n");
    write_file(
        dir.path(),
        "venv/lib/site.py",
        "class Vendored:\n    pass\n",
    );
    write_file(
        dir.path(),
        "deps/site-packages/mod.py",
        "class AlsoVendored:\n    pass\n",
    );

    let analysis = analyze_project(dir.path(), &CompiledConfig::empty()).unwrap();
    assert_eq!(analysis.classes.len(), 1);
    assert_eq!(analysis.classes[0].class_name, "App");
}

#[test]
fn config_excludes_apply() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "app.py", "class App:\n    pass\n");
    write_file(dir.path(), "generated/models.py", "class Model:\n    pass\n");

    let config: MoodConfig = toml::from_str(
        r#"
        [analysis]
        exclude = ["*/generated/*"]
    "#,
    )
    .unwrap();
    let compiled = CompiledConfig::from_config(config).unwrap();

    let analysis = analyze_project(dir.path(), &compiled).unwrap();
    assert_eq!(analysis.classes.len(), 1);
    assert_eq!(analysis.classes[0].class_name, "App");
}

#[test]
fn cross_file_hierarchy_resolves_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    // b.py sorts after a.py, so the child is visited first and pulls the
    // parent in through an ancestor lookup.
    write_file(dir.path(), "a.py", "class Child(Base):\n    pass\n");
    write_file(dir.path(), "b.py", "class Base:\n    def run(self):\n        pass\n");

    let analysis = analyze_project(dir.path(), &CompiledConfig::empty()).unwrap();
    assert_eq!(analysis.classes.len(), 2);
    // parent registered first via the lookup, counted exactly one child
    assert_eq!(analysis.classes[0].class_name, "Base");
    assert_eq!(analysis.classes[0].number_of_children, 1);
    let child = &analysis.classes[1];
    assert_eq!(child.class_name, "Child");
    assert_eq!(child.methods.inherited.len(), 1);
}

#[test]
fn empty_project_reports_sentinels() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "empty.py", "x = 1\n");

    let analysis = analyze_project(dir.path(), &CompiledConfig::empty()).unwrap();
    assert!(analysis.classes.is_empty());

    let report = build_report(&analysis.classes);
    assert!(report.mif.is_nan());
    assert_eq!(report.max_number_of_children, 0);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["mif"].is_null());
}
