//! End-to-end tests: compile resource documents through the driver and
//! verify the descriptor forest, the generated source, and the staleness
//! behavior.

use std::fs;
use std::path::PathBuf;
use std::thread::sleep;
use std::time::Duration;

use tempfile::TempDir;

use restive_gen::driver;
use restive_gen::errors::CompilerError;
use restive_gen::resolver::TypeRegistry;

const WIDGET_DOC: &str = r#"{
    "name": "widget",
    "namespace": "com.example.widgets",
    "path": "/widgets",
    "schema": "com.example.widgets.Widget",
    "doc": "Widgets addressable by integer key.",
    "collection": {
        "identifier": {"name": "widgetId", "type": "long"},
        "supports": ["get", "create"],
        "finders": [{
            "name": "byOwner",
            "doc": "Finds widgets owned by one owner.",
            "parameters": [{"name": "owner", "type": "string"}]
        }],
        "entity": {"path": "/widgets/{widgetId}"}
    }
}"#;

const SHAPELESS_DOC: &str = r#"{
    "name": "mystery",
    "path": "/mystery"
}"#;

fn write_doc(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// The specified end-to-end scenario: a collection named `widget` with a
/// simple integer key, GET and CREATE, and one finder `byOwner` with a
/// required string parameter compiles to exactly one facade with three
/// factory operations and no others.
#[test]
fn widget_scenario_compiles_to_exact_operations() {
    let dir = TempDir::new().unwrap();
    let source = write_doc(&dir, "widget.restspec.json", WIDGET_DOC);
    let out = dir.path().join("out");

    let registry = TypeRegistry::new();
    let result = driver::run(&[source], &out, &registry, false).unwrap();

    assert!(result.diagnostics.is_empty());
    assert_eq!(result.facades.len(), 1);

    let facade = &result.facades[0];
    assert_eq!(facade.type_name, "WidgetBuilders");

    let factories: Vec<&str> = facade
        .builders
        .iter()
        .map(|b| b.factory_method.as_str())
        .collect();
    assert_eq!(factories, vec!["get", "create", "findByOwner"]);

    for builder in &facade.builders {
        assert_eq!(builder.key_type.full_path(), "i64");
    }

    let finder = facade.builder("findByOwner").unwrap();
    assert_eq!(finder.type_name, "WidgetFindByOwnerBuilder");
    assert_eq!(finder.query_params.len(), 1);
    let owner = &finder.query_params[0];
    assert_eq!(owner.method_name, "ownerParam");
    assert_eq!(owner.ty.full_path(), "String");
    assert!(!owner.optional);
}

#[test]
fn widget_scenario_renders_expected_source() {
    let dir = TempDir::new().unwrap();
    let source = write_doc(&dir, "widget.restspec.json", WIDGET_DOC);
    let out = dir.path().join("out");

    let registry = TypeRegistry::new();
    let result = driver::run(&[source], &out, &registry, false).unwrap();

    assert_eq!(result.target_files, vec![out.join("widget.rs")]);
    let code = fs::read_to_string(&result.target_files[0]).unwrap();

    assert!(code.contains("pub struct WidgetBuilders"));
    assert!(code.contains("pub fn get(&self) -> WidgetGetBuilder"));
    assert!(code.contains("pub fn create(&self) -> WidgetCreateBuilder"));
    assert!(code.contains("pub fn find_by_owner(&self) -> WidgetFindByOwnerBuilder"));
    assert!(code.contains("restive_client::GetRequestBuilder<i64, com::example::widgets::Widget>"));
    assert!(code.contains("pub fn owner_param(mut self, value: String) -> Self"));
    assert!(code.contains("req_param(\"owner\", value)"));
    // Docs flow through to the rendered source.
    assert!(code.contains("Finds widgets owned by one owner."));
}

/// A shapeless resource produces exactly one diagnostic naming it, and
/// sibling documents in the same batch still compile.
#[test]
fn shapeless_resource_fails_alone_in_batch() {
    let dir = TempDir::new().unwrap();
    write_doc(&dir, "a_mystery.restspec.json", SHAPELESS_DOC);
    write_doc(&dir, "widget.restspec.json", WIDGET_DOC);
    let out = dir.path().join("out");

    let registry = TypeRegistry::new();
    let result = driver::run(
        &[dir.path().to_path_buf()],
        &out,
        &registry,
        false,
    )
    .unwrap();

    assert_eq!(result.diagnostics.len(), 1);
    let diagnostic = &result.diagnostics[0];
    assert!(diagnostic.message.contains("unsupported resource shape"));
    assert!(diagnostic.message.contains("mystery"));

    assert_eq!(result.facades.len(), 1);
    assert_eq!(result.facades[0].resource_name, "widget");
}

#[test]
fn sole_failing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let source = write_doc(&dir, "mystery.restspec.json", SHAPELESS_DOC);
    let out = dir.path().join("out");

    let registry = TypeRegistry::new();
    match driver::run(&[source], &out, &registry, false) {
        Err(CompilerError::SoleInputFailed { message, .. }) => {
            assert!(message.contains("mystery"));
        }
        other => panic!("Expected SoleInputFailed, got: {:?}", other),
    }
}

#[test]
fn malformed_json_is_a_parse_diagnostic() {
    let dir = TempDir::new().unwrap();
    write_doc(&dir, "broken.restspec.json", "{ not json");
    write_doc(&dir, "widget.restspec.json", WIDGET_DOC);
    let out = dir.path().join("out");

    let registry = TypeRegistry::new();
    let result = driver::run(
        &[dir.path().to_path_buf()],
        &out,
        &registry,
        false,
    )
    .unwrap();

    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].message.contains("failed to parse"));
    assert!(result.diagnostics[0].path.contains("broken.restspec.json"));
    assert_eq!(result.facades.len(), 1);
}

/// Compiling the same input twice yields descriptor-equal output, and
/// the second run sees the targets as up to date.
#[test]
fn recompilation_is_idempotent_and_skips_emission() {
    let dir = TempDir::new().unwrap();
    let source = write_doc(&dir, "widget.restspec.json", WIDGET_DOC);
    let out = dir.path().join("out");

    let registry = TypeRegistry::new();
    let first = driver::run(&[source.clone()], &out, &registry, false).unwrap();
    assert_eq!(first.modified_files.len(), 1);

    let second = driver::run(&[source], &out, &registry, false).unwrap();
    assert!(second.modified_files.is_empty());
    assert_eq!(first.facades, second.facades);
    assert_eq!(first.target_files, second.target_files);
}

#[test]
fn touched_input_triggers_regeneration() {
    let dir = TempDir::new().unwrap();
    let source = write_doc(&dir, "widget.restspec.json", WIDGET_DOC);
    let out = dir.path().join("out");

    let registry = TypeRegistry::new();
    driver::run(&[source.clone()], &out, &registry, false).unwrap();

    sleep(Duration::from_millis(30));
    fs::write(&source, WIDGET_DOC).unwrap();

    let rerun = driver::run(&[source], &out, &registry, false).unwrap();
    assert_eq!(rerun.modified_files.len(), 1);
}

#[test]
fn dry_run_renders_without_writing() {
    let dir = TempDir::new().unwrap();
    let source = write_doc(&dir, "widget.restspec.json", WIDGET_DOC);
    let out = dir.path().join("out");

    let registry = TypeRegistry::new();
    let result = driver::run(&[source], &out, &registry, true).unwrap();

    assert_eq!(result.modified_files.len(), 1);
    assert!(!out.join("widget.rs").exists());
}

#[test]
fn directory_discovery_ignores_other_extensions() {
    let dir = TempDir::new().unwrap();
    write_doc(&dir, "widget.restspec.json", WIDGET_DOC);
    write_doc(&dir, "notes.txt", "not a resource");
    write_doc(&dir, "other.json", "{}");
    let out = dir.path().join("out");

    let registry = TypeRegistry::new();
    let result = driver::run(
        &[dir.path().to_path_buf()],
        &out,
        &registry,
        false,
    )
    .unwrap();

    assert_eq!(result.source_files.len(), 1);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn missing_source_path_is_an_error() {
    let registry = TypeRegistry::new();
    let missing = PathBuf::from("/no/such/path.restspec.json");

    match driver::run(&[missing], &PathBuf::from("/tmp/out"), &registry, true) {
        Err(CompilerError::SourceNotFound(path)) => {
            assert!(path.contains("no/such/path"));
        }
        other => panic!("Expected SourceNotFound, got: {:?}", other),
    }
}

#[test]
fn duplicate_resource_across_files_is_a_diagnostic() {
    let dir = TempDir::new().unwrap();
    write_doc(&dir, "a_widget.restspec.json", WIDGET_DOC);
    write_doc(&dir, "b_widget.restspec.json", WIDGET_DOC);
    let out = dir.path().join("out");

    let registry = TypeRegistry::new();
    let result = driver::run(
        &[dir.path().to_path_buf()],
        &out,
        &registry,
        false,
    )
    .unwrap();

    assert_eq!(result.facades.len(), 1);
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].message.contains("duplicate resource 'widget'"));
}
