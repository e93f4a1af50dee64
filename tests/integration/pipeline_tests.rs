//! Pipeline integration tests
//!
//! Runs the full symbol collection, layout parsing and emission pipeline
//! against the sample module in tests/fixtures/app.

use aapt_lite::binding::{BindingKind, MapLayoutTypeStore};
use aapt_lite::config::Config;
use aapt_lite::discovery::{partition_layouts, FileFinder};
use aapt_lite::{AaptLiteCommand, AaptError, LayoutBindingsParser, ResourceKind, TypeDescriptor};
use std::fs;
use std::path::{Path, PathBuf};

const PACKAGE: &str = "com.example.sample";

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/app")
}

fn resource_files() -> Vec<PathBuf> {
    let config = Config::default();
    FileFinder::new(&config).find_resources(&[fixtures_path().join("res")])
}

fn command(output: &Path) -> AaptLiteCommand {
    let mut command = AaptLiteCommand::new(
        PACKAGE,
        resource_files(),
        output.join("r"),
        output.join("stubs"),
    );
    command.class_infos = vec![fixtures_path().join("deps/lib-binding_classes.json")];
    command.r_txts = vec![fixtures_path().join("deps/lib-R.txt")];
    command
}

fn read(path: PathBuf) -> String {
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e))
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_discovers_fixture_resources() {
    let files = resource_files();
    assert_eq!(files.len(), 8, "Unexpected files: {:?}", files);

    let layouts = partition_layouts(&files);
    assert_eq!(layouts.len(), 4);
    assert!(layouts[0].ends_with("res/layout/activity_main.xml"));
}

// ============================================================================
// Full pipeline
// ============================================================================

#[test]
fn test_pipeline_summary() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let summary = command(temp_dir.path()).run().expect("Pipeline failed");

    assert_eq!(summary.layouts, 3, "layout-land variant is folded into activity_main");
    assert_eq!(summary.bindables, 3);
    assert_eq!(summary.stubs, 3, "activity_main, view_header and missing_promo");
}

#[test]
fn test_pipeline_writes_r_class() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    command(temp_dir.path()).run().expect("Pipeline failed");

    let r_class = read(temp_dir.path().join("r/com/example/sample/R.java"));

    assert!(r_class.starts_with("package com.example.sample;\n\npublic final class R {\n"));
    for field in [
        "public static int app_name = 0;",
        "public static int Theme_Sample = 0;",
        "public static int ic_launcher = 0;",
        "public static int config = 0;",
        "public static int activity_main = 0;",
        "public static int submit_btn = 0;",
        "public static int land_only = 0;",
        "public static int rounded = 0;",
        "public static int night_surface = 0;",
        "public static int planets = 0;",
        "public static int[] ChipView = { 0, 0, 0, 0 };",
        "public static int ChipView_chipColor = 0;",
        "public static int ChipView_chipShape = 1;",
        "public static int ChipView_android_text = 2;",
        "public static int ChipView_chipStroke = 3;",
        "public static int chipStroke = 0;",
        "public static int[] LibCard = { 0, 0 };",
        "public static int LibCard_cardRadius = 0;",
        "public static int lib_name = 0;",
    ] {
        assert!(r_class.contains(field), "R.java is missing `{}`:\n{}", field, r_class);
    }
    assert_eq!(r_class.matches(" brand_primary ").count(), 1);
    assert!(!r_class.contains("text1"), "framework ids are not redeclared");
}

#[test]
fn test_pipeline_non_transitive_excludes_dependency_symbols() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut command = command(temp_dir.path());
    command.non_transitive = true;
    command.run().expect("Pipeline failed");

    let r_class = read(temp_dir.path().join("r/com/example/sample/R.java"));
    assert!(!r_class.contains("lib_name"));
    assert!(!r_class.contains("LibCard"));
    assert!(!r_class.contains("lib_footer_title"));
    assert!(r_class.contains("brand_primary"), "local symbols remain");
}

#[test]
fn test_pipeline_writes_br_class() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    command(temp_dir.path()).run().expect("Pipeline failed");

    let br = read(temp_dir.path().join("r/com/example/sample/BR.java"));
    assert_eq!(
        br,
        "package com.example.sample;

public class BR {
  public static final int _all = 0;
  public static int tags = 1;
  public static int title = 2;
  public static int user = 3;
}
"
    );
}

#[test]
fn test_pipeline_writes_binding_stubs() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    command(temp_dir.path()).run().expect("Pipeline failed");

    let stubs = temp_dir.path().join("stubs");
    assert!(stubs.join("androidx/databinding/DataBindingComponent.java").exists());
    assert!(stubs.join("com/example/sample/databinding/ViewHeaderBinding.java").exists());
    assert!(!stubs.join("com/example/sample/databinding/ItemPlainBinding.java").exists());

    let main = read(stubs.join("com/example/sample/databinding/ActivityMainBinding.java"));
    assert!(main.contains("public final com.example.sample.databinding.ViewHeaderBinding header;"));
    assert!(main.contains("public final com.example.lib.databinding.LibFooterBinding libFooter;"));
    assert!(main.contains("public final com.example.sample.databinding.MissingPromoBinding promo;"));
    assert!(main.contains("public final com.example.sample.widget.ChipView chip;"));
    assert!(main.contains("protected java.util.List<String> mTags;"));
    assert!(main.contains("public abstract void setUser(com.example.sample.model.User var1);"));
    assert!(!main.contains("mapFragment"), "fragment bindings are excluded");
    assert!(!main.contains("landOnly"), "only the first activity_main variant is used");

    let missing = read(stubs.join("com/example/sample/databinding/MissingPromoBinding.java"));
    assert!(missing.contains("public abstract class MissingPromoBinding extends androidx.databinding.ViewDataBinding"));
}

#[test]
fn test_pipeline_is_deterministic() {
    let first = tempfile::tempdir().expect("Failed to create temp dir");
    let second = tempfile::tempdir().expect("Failed to create temp dir");

    let mut reversed = command(second.path());
    reversed.resource_files.reverse();
    reversed.layout_files = partition_layouts(&resource_files());

    command(first.path()).run().expect("Pipeline failed");
    reversed.run().expect("Pipeline failed");

    for relative in [
        "r/com/example/sample/R.java",
        "r/com/example/sample/BR.java",
        "stubs/com/example/sample/databinding/ActivityMainBinding.java",
    ] {
        assert_eq!(
            read(first.path().join(relative)),
            read(second.path().join(relative)),
            "{} differs between runs",
            relative
        );
    }
}

// ============================================================================
// Layout parsing against the fixture stores
// ============================================================================

#[test]
fn test_fixture_include_resolution() {
    let layouts = partition_layouts(&resource_files());
    let local = MapLayoutTypeStore::local(PACKAGE, &layouts).unwrap();
    let deps =
        MapLayoutTypeStore::from_class_infos(&[fixtures_path().join("deps/lib-binding_classes.json")])
            .unwrap();

    let parser = LayoutBindingsParser::new(&local, &deps);
    let data = parser
        .parse_file(PACKAGE, &fixtures_path().join("res/layout/activity_main.xml"))
        .unwrap();

    let includes: Vec<(&str, &BindingKind)> = data
        .bindings
        .iter()
        .filter(|b| matches!(b.kind, BindingKind::IncludedLayout { .. }))
        .map(|b| (b.raw_name.as_str(), &b.kind))
        .collect();
    assert_eq!(includes.len(), 3);
    assert_eq!(data.missing_includes().collect::<Vec<_>>(), vec!["missing_promo"]);

    let user = &data.bindables[0];
    assert_eq!(user.raw_name, "user");
    assert_eq!(user.type_name, TypeDescriptor::named("com.example.sample.model.User"));
}

#[test]
fn test_malformed_layout_aborts_pipeline() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let layout = temp_dir.path().join("res/layout/broken.xml");
    fs::create_dir_all(layout.parent().unwrap()).unwrap();
    fs::write(
        &layout,
        r#"<layout><data><variable name="items" type="List&lt;String"/></data></layout>"#,
    )
    .unwrap();

    let command = AaptLiteCommand::new(
        PACKAGE,
        vec![layout],
        temp_dir.path().join("r"),
        temp_dir.path().join("stubs"),
    );
    let result = command.run();

    assert!(matches!(result, Err(AaptError::MalformedTypeExpression { .. })));
    assert!(!temp_dir.path().join("r").exists(), "no output after a fatal error");
}

#[test]
fn test_unknown_resource_directory_is_fatal() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file = temp_dir.path().join("res/bogus/thing.xml");
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(&file, "<thing/>").unwrap();

    let command = AaptLiteCommand::new(
        PACKAGE,
        vec![file],
        temp_dir.path().join("r"),
        temp_dir.path().join("stubs"),
    );
    assert!(matches!(command.run(), Err(AaptError::UnknownResourceKind(kind)) if kind == "bogus"));
    assert_eq!(ResourceKind::from_dir_name("layout-land").unwrap(), ResourceKind::Layout);
}
