//! Symbol table integration tests
//!
//! Covers the merge properties of the symbol table and the behavior of the
//! collector on real resource directories.

use aapt_lite::rclass::{ParserRegistry, ParserType, XmlEntry};
use aapt_lite::{
    AaptError, RClassGenerator, ResourceKind, ResourceSymbolCollector, SymbolEntry, SymbolTable,
};
use std::fs;
use std::path::{Path, PathBuf};

fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Every field of the table, values included.
fn fields(table: &SymbolTable) -> Vec<(ResourceKind, String, String, bool)> {
    table
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|e| (e.kind, e.name.clone(), e.value.clone(), e.is_array))
        .collect()
}

const LIB_R_TXT: &str = "int string lib_name 0x7f0e0001
int id lib_id 0x7f080001
int[] styleable LibView { 0x7f040001, 0x7f040002, 0x7f040003 }
int styleable LibView_a 0";

// ============================================================================
// Dependency symbol lines
// ============================================================================

#[test]
fn test_merging_a_line_twice_is_idempotent() {
    let line = "int string lib_name 0x7f0e0001";

    let mut once = SymbolTable::new();
    once.add_symbol_line(line).unwrap();

    let mut twice = SymbolTable::new();
    twice.add_symbol_line(line).unwrap();
    twice.add_symbol_line(line).unwrap();

    assert_eq!(once, twice);
    assert_eq!(twice.len(), 1);
}

#[test]
fn test_array_line_placeholders() {
    let mut table = SymbolTable::new();
    for line in LIB_R_TXT.lines() {
        table.add_symbol_line(line).unwrap();
    }

    let styleable = table.get(ResourceKind::Styleable, "LibView").unwrap();
    assert!(styleable.is_array);
    assert_eq!(styleable.value, "{ 0, 0, 0 }");

    let member = table.get(ResourceKind::Styleable, "LibView_a").unwrap();
    assert!(!member.is_array);
    assert_eq!(member.value, "0");
}

#[test]
fn test_malformed_symbol_lines() {
    let mut table = SymbolTable::new();
    assert!(matches!(
        table.add_symbol_line("int string"),
        Err(AaptError::MalformedSymbolLine(_))
    ));
    assert!(matches!(
        table.add_symbol_line("int widget thing 0x1"),
        Err(AaptError::UnknownResourceKind(kind)) if kind == "widget"
    ));
    assert!(table.is_empty());
}

#[test]
fn test_non_transitive_excludes_dependency_symbols() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let strings = write(
        temp_dir.path(),
        "res/values/strings.xml",
        r#"<resources><string name="app_name">App</string></resources>"#,
    );

    let transitive = ResourceSymbolCollector::new(false)
        .collect(&[strings.clone()], &lines(LIB_R_TXT))
        .unwrap();
    let non_transitive = ResourceSymbolCollector::new(true)
        .collect(&[strings], &lines(LIB_R_TXT))
        .unwrap();

    assert!(transitive.contains(ResourceKind::String, "lib_name"));
    assert!(transitive.contains(ResourceKind::Styleable, "LibView"));
    assert!(!non_transitive.contains(ResourceKind::String, "lib_name"));
    assert!(!non_transitive.contains(ResourceKind::Id, "lib_id"));
    assert_eq!(non_transitive.len(), 1);
}

// ============================================================================
// Local resources
// ============================================================================

#[test]
fn test_styleable_grouping() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let attrs = write(
        temp_dir.path(),
        "res/values/attrs.xml",
        r#"<resources>
    <declare-styleable name="Group">
        <attr name="A" format="string"/>
        <attr name="B">
            <flag name="bold" value="1"/>
        </attr>
    </declare-styleable>
    <string name="after_group">x</string>
</resources>"#,
    );

    let table = ResourceSymbolCollector::new(false).collect(&[attrs], &[]).unwrap();

    assert!(table.contains(ResourceKind::Styleable, "Group"));
    assert!(table.contains(ResourceKind::Attr, "A"));
    assert!(table.contains(ResourceKind::Attr, "B"));
    assert!(table.contains(ResourceKind::Id, "bold"));
    assert!(table.contains(ResourceKind::String, "after_group"));
    assert_eq!(
        table.members("Group").unwrap(),
        &["A".to_string(), "B".to_string()]
    );
}

#[test]
fn test_collection_is_order_independent() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let files = vec![
        write(
            temp_dir.path(),
            "res/values/strings.xml",
            r#"<resources><string name="shared">a</string><string name="one">b</string></resources>"#,
        ),
        write(
            temp_dir.path(),
            "res/values-de/strings.xml",
            r#"<resources><string name="shared">c</string><string name="two">d</string></resources>"#,
        ),
        write(
            temp_dir.path(),
            "res/layout/screen.xml",
            r#"<FrameLayout xmlns:android="http://schemas.android.com/apk/res/android">
    <TextView android:id="@+id/label"/>
</FrameLayout>"#,
        ),
        write(temp_dir.path(), "res/mipmap-xxhdpi/ic_launcher.png", ""),
    ];
    let mut reversed = files.clone();
    reversed.reverse();

    let collector = ResourceSymbolCollector::new(false);
    let forward = collector.collect(&files, &lines(LIB_R_TXT)).unwrap();
    let backward = collector.collect(&reversed, &lines(LIB_R_TXT)).unwrap();

    assert_eq!(forward, backward);
    assert_eq!(fields(&forward), fields(&backward));
    assert!(forward.contains(ResourceKind::Layout, "screen"));
    assert!(forward.contains(ResourceKind::Id, "label"));
    assert!(forward.contains(ResourceKind::Mipmap, "ic_launcher"));
    assert_eq!(forward.entries(ResourceKind::String).count(), 4);
}

#[test]
fn test_styleable_split_across_qualifiers_is_order_independent() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let files = vec![
        write(
            temp_dir.path(),
            "res/values/attrs.xml",
            r#"<resources><declare-styleable name="G"><attr name="a"/></declare-styleable></resources>"#,
        ),
        write(
            temp_dir.path(),
            "res/values-v21/attrs.xml",
            r#"<resources><declare-styleable name="G"><attr name="b"/><attr name="a"/></declare-styleable></resources>"#,
        ),
    ];
    let mut reversed = files.clone();
    reversed.reverse();

    let collector = ResourceSymbolCollector::new(false);
    let forward = collector.collect(&files, &[]).unwrap();
    let backward = collector.collect(&reversed, &[]).unwrap();
    assert_eq!(fields(&forward), fields(&backward));

    let generator = RClassGenerator::new(temp_dir.path().join("out"));
    let forward_source = generator.render("com.example", &forward).to_source();
    let backward_source = generator.render("com.example", &backward).to_source();
    assert_eq!(forward_source, backward_source);
    assert!(forward_source.contains("public static int[] G = { 0, 0 };"));
    assert!(forward_source.contains("public static int G_a = 0;"));
    assert!(forward_source.contains("public static int G_b = 1;"));
}

#[test]
fn test_malformed_values_file_is_fatal() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let broken = write(
        temp_dir.path(),
        "res/values/broken.xml",
        "<resources><string name=\"a\">x</color></resources>",
    );

    let result = ResourceSymbolCollector::new(false).collect(&[broken], &[]);
    assert!(matches!(result, Err(AaptError::ParseFailure { .. })));
}

#[test]
fn test_missing_parser_is_fatal() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let styles = write(
        temp_dir.path(),
        "res/values/styles.xml",
        r#"<resources><style name="Theme.App"/></resources>"#,
    );

    let collector = ResourceSymbolCollector::with_parsers(ParserRegistry::default(), false);

    assert!(matches!(
        collector.collect(&[styles], &[]),
        Err(AaptError::MissingParserImplementation(ParserType::Style))
    ));
}

#[test]
fn test_custom_parser_registration() {
    let mut registry = ParserRegistry::standard();
    registry.register(ParserType::Id, |entry: &XmlEntry| {
        let mut result = ParserRegistry::standard()
            .parse(ParserType::Default, entry)
            .unwrap();
        result.kind = ResourceKind::Id;
        result.entries = [SymbolEntry::new(ResourceKind::Id, format!("custom_{}", entry.name()))]
            .into_iter()
            .collect();
        result
    });

    let result = registry
        .parse(ParserType::Id, &XmlEntry::single("x", ResourceKind::Id))
        .unwrap();
    assert!(result.entries.contains(&SymbolEntry::new(ResourceKind::Id, "custom_x")));
}
