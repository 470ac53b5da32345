//! End-to-end query execution tests
//!
//! Each test builds a small directory tree in a temp dir, runs a query
//! through `execute_query` and checks the rows.

use std::fs;
use std::path::Path;

use fsquery::executor::Options;
use fsquery::functions::Value;
use fsquery::{execute_query, ErrorKind, QueryContext};
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("Failed to write file");
}

/// root/{a.txt, b.log}
fn simple_tree() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_file(&dir.path().join("a.txt"), "alpha");
    write_file(&dir.path().join("b.log"), "bravo-log");
    dir
}

/// root/{a.txt, docs/{guide.md, notes.txt}, .git/{config}, z.log}
fn nested_tree() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path();
    write_file(&root.join("a.txt"), "1");
    fs::create_dir(root.join("docs")).unwrap();
    write_file(&root.join("docs").join("guide.md"), "22");
    write_file(&root.join("docs").join("notes.txt"), "333");
    fs::create_dir(root.join(".git")).unwrap();
    write_file(&root.join(".git").join("config"), "4444");
    write_file(&root.join("z.log"), "55555");
    dir
}

fn query_in(dir: &TempDir, template: &str) -> String {
    template.replace("ROOT", &dir.path().to_string_lossy())
}

fn run(dir: &TempDir, template: &str) -> Vec<Vec<String>> {
    run_with(dir, template, &Options::default())
}

fn run_with(dir: &TempDir, template: &str, options: &Options) -> Vec<Vec<String>> {
    let context = QueryContext::new();
    execute_query(&query_in(dir, template), &context, options)
        .expect("query failed")
        .to_strings()
}

fn first_column(rows: &[Vec<String>]) -> Vec<&str> {
    rows.iter().map(|row| row[0].as_str()).collect()
}

// =============================================================================
// Projection, filter and ordering
// =============================================================================

#[test]
fn test_order_by_extension() {
    let dir = simple_tree();
    let rows = run(&dir, "select lower(name), ext from ROOT order by 2");
    assert_eq!(
        rows,
        vec![
            vec!["b.log".to_string(), ".log".to_string()],
            vec!["a.txt".to_string(), ".txt".to_string()],
        ]
    );
}

#[test]
fn test_contains_filter() {
    let dir = simple_tree();
    let rows = run(&dir, "select name from ROOT where contains(lower(name), 'log')");
    assert_eq!(first_column(&rows), vec!["b.log"]);
}

#[test]
fn test_like_wildcard_filter() {
    let dir = nested_tree();
    let rows = run(&dir, "select name from ROOT where like(name, *.txt) order by 1");
    assert_eq!(first_column(&rows), vec!["a.txt", "notes.txt"]);
}

#[test]
fn test_limit_zero_returns_nothing() {
    let dir = simple_tree();
    assert!(run(&dir, "select name from ROOT limit 0").is_empty());
}

#[test]
fn test_multi_key_ordering_is_stable() {
    let dir = TempDir::new().unwrap();
    for (name, contents) in [("c.txt", "xx"), ("a.log", "xx"), ("b.txt", "x"), ("d.log", "x")] {
        write_file(&dir.path().join(name), contents);
    }

    let rows = run(&dir, "select name, size, ext from ROOT order by 2 desc, 3");
    assert_eq!(first_column(&rows), vec!["a.log", "c.txt", "d.log", "b.txt"]);

    // Equal keys keep traversal order.
    let rows = run(&dir, "select name, size from ROOT order by 2");
    assert_eq!(first_column(&rows), vec!["b.txt", "d.log", "a.log", "c.txt"]);
}

#[test]
fn test_size_ordering_with_limit() {
    let dir = nested_tree();
    let rows = run(
        &dir,
        "select name, size from ROOT where eq(isfile, true) order by 2 desc limit 2",
    );
    assert_eq!(first_column(&rows), vec!["z.log", "notes.txt"]);
}

// =============================================================================
// Traversal
// =============================================================================

#[test]
fn test_descendants_reported_before_directory() {
    let dir = nested_tree();
    let rows = run(&dir, "select name from ROOT");
    // .git is ignored by default but still reported itself
    assert_eq!(
        first_column(&rows),
        vec![".git", "a.txt", "guide.md", "notes.txt", "docs", "z.log"]
    );
}

#[test]
fn test_nested_traversal_disabled() {
    let dir = nested_tree();
    let options = Options::default().disable_nested_traversal();
    let rows = run_with(&dir, "select name from ROOT", &options);
    assert_eq!(first_column(&rows), vec![".git", "a.txt", "docs", "z.log"]);
}

#[test]
fn test_ignored_directory_still_reported() {
    let dir = nested_tree();
    let options = Options::default().ignore_directories(["docs"]);
    let rows = run_with(&dir, "select name from ROOT where eq(isdir, true)", &options);
    assert_eq!(first_column(&rows), vec![".git", "docs"]);

    let rows = run_with(&dir, "select name from ROOT", &options);
    assert!(!first_column(&rows).contains(&"guide.md"));
}

#[test]
fn test_empty_ignore_set_descends_everywhere() {
    let dir = nested_tree();
    let options = Options {
        traverse_nested: true,
        ignored_directory_names: Default::default(),
    };
    let rows = run_with(&dir, "select name from ROOT", &options);
    assert_eq!(
        first_column(&rows),
        vec!["config", ".git", "a.txt", "guide.md", "notes.txt", "docs", "z.log"]
    );
}

#[test]
fn test_short_circuit_keeps_first_rows() {
    let dir = nested_tree();
    let context = QueryContext::new();
    let rows = execute_query(&query_in(&dir, "select name from ROOT limit 3"), &context, &Options::default())
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows.to_strings().iter().map(|r| r[0].clone()).collect::<Vec<_>>(),
        vec![".git", "a.txt", "guide.md"]
    );
    // Stopped inside docs/, then stopped the root listing
    assert_eq!(rows.scanned_count(), 3);
}

#[test]
fn test_path_joins_without_double_separator() {
    let dir = simple_tree();
    let with_slash = format!("{}/", dir.path().to_string_lossy());
    let context = QueryContext::new();
    let rows = execute_query(
        &format!("select path from {} where eq(name, a.txt)", with_slash),
        &context,
        &Options::default(),
    )
    .unwrap();
    assert_eq!(rows.to_strings(), vec![vec![format!("{}a.txt", with_slash)]]);
}

// =============================================================================
// Aggregates
// =============================================================================

#[test]
fn test_all_aggregates_return_one_row() {
    let dir = nested_tree();
    let context = QueryContext::new();
    let rows = execute_query(
        &query_in(&dir, "select count(), sum(size), max(size) from ROOT where eq(isfile, true) limit 5"),
        &context,
        &Options::default(),
    )
    .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows.rows()[0].values(),
        &[Value::Int(4), Value::Float(11.0), Value::Int(5)]
    );
}

#[test]
fn test_aggregate_over_no_rows() {
    let dir = simple_tree();
    let rows = run(&dir, "select count(), avg(size) from ROOT where contains(name, nothing)");
    assert_eq!(rows, vec![vec!["0".to_string(), String::new()]]);
}

#[test]
fn test_aggregate_inside_expression() {
    let dir = simple_tree();
    let rows = run(&dir, "select concat(count(), '-files') from ROOT");
    assert_eq!(rows, vec![vec!["2-files".to_string()]]);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_unknown_function_anywhere() {
    let dir = simple_tree();
    let context = QueryContext::new();
    for template in [
        "select frobnicate(name) from ROOT",
        "select name from ROOT where frobnicate(name)",
        "select lower(frobnicate(name)) from ROOT",
    ] {
        let err = execute_query(&query_in(&dir, template), &context, &Options::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownFunction, "{}", template);
        assert!(err.to_string().contains("frobnicate"));
    }
}

#[test]
fn test_runtime_errors_abort_query() {
    let dir = simple_tree();
    let context = QueryContext::new();

    let err = execute_query(&query_in(&dir, "select div(size, 0) from ROOT"), &context, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Arithmetic);

    let err = execute_query(&query_in(&dir, "select add(name, 1) from ROOT"), &context, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);

    let err = execute_query(&query_in(&dir, "select lower() from ROOT"), &context, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Arity);
    assert!(err.to_string().contains("lower"));

    let err = execute_query(&query_in(&dir, "select substr(name, 3, 1) from ROOT"), &context, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);

    let err = execute_query(&query_in(&dir, "select substr(name, x) from ROOT"), &context, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn test_syntax_errors() {
    let dir = simple_tree();
    let context = QueryContext::new();
    for template in [
        "select name from ROOT order by 3",
        "select name from ROOT limit -2",
        "select name from ROOT where name",
        "select count() from ROOT where gt(count(), 1)",
        "select name from ROOT/missing",
        "select name from ROOT where lower(name)",
        "select name from ROOT where add(size, 1)",
    ] {
        let err = execute_query(&query_in(&dir, template), &context, &Options::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax, "{}", template);
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_io_error() {
    use std::os::unix::fs::PermissionsExt;

    let dir = simple_tree();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not restrict root.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let context = QueryContext::new();
    let result = execute_query(&query_in(&dir, "select name from ROOT"), &context, &Options::default());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Io);
}
