use decomment_core::{
    Dialect, DiscoveryConfig, StripOptions, discover, discover_from, process_files,
};
use std::error::Error;
use std::fs;
use std::path::Path;

type TestResult = Result<(), Box<dyn Error>>;

fn write(root: &Path, rel: &str, content: &str) -> TestResult {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn relatives(root: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let files = discover(root, &DiscoveryConfig::default(), &[], &[])?;
    Ok(files.into_iter().map(|f| f.relative).collect())
}

#[test]
fn discovery_applies_skip_rules() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "src/main.c", "int main(void) { return 0; }\n")?;
    write(root, "src/util.H", "// h\n")?;
    write(root, "src/view.m", "// m\n")?;
    write(root, "lib/core.jai", "x := 1; # c\n")?;
    write(root, "src/notes.txt", "// text\n")?;
    write(root, "docs/example.c", "// doc\n")?;
    write(root, "assets/gen.c", "// asset\n")?;
    write(root, "__jaicache__/a.jai", "# cached\n")?;
    write(root, ".hidden/x.c", "// hidden\n")?;
    write(root, "src/.dot.c", "// dotfile\n")?;
    write(root, "LICENSE", "# license\n")?;

    assert_eq!(
        relatives(root)?,
        vec!["lib/core.jai", "src/main.c", "src/util.H", "src/view.m"]
    );
    Ok(())
}

#[test]
fn header_rule_marks_check_files_only() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "test/lang/checks/add.jai", "# EXPECT: 3\nprint(1 + 2);\n")?;
    write(root, "test/lang/add.jai", "# EXPECT: 3\nprint(1 + 2);\n")?;
    write(root, "test/lang/checks/helper.c", "// c\n")?;

    let files = discover(root, &DiscoveryConfig::default(), &[], &[])?;
    let flags: Vec<(&str, Dialect, bool)> = files
        .iter()
        .map(|f| (f.relative.as_str(), f.dialect, f.preserve_header))
        .collect();
    assert_eq!(
        flags,
        vec![
            ("test/lang/add.jai", Dialect::Line, false),
            ("test/lang/checks/add.jai", Dialect::Line, true),
            ("test/lang/checks/helper.c", Dialect::CFamily, false),
        ]
    );
    Ok(())
}

#[test]
fn exclude_globs_filter_files() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "src/a.c", "// a\n")?;
    write(root, "vendor/b.c", "// b\n")?;

    let files = discover(
        root,
        &DiscoveryConfig::default(),
        &[],
        &["vendor/**".to_string()],
    )?;
    let rel: Vec<&str> = files.iter().map(|f| f.relative.as_str()).collect();
    assert_eq!(rel, vec!["src/a.c"]);
    Ok(())
}

#[test]
fn include_globs_restrict_to_matching_files() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "main.c", "// top\n")?;
    write(root, "src/a.c", "// a\n")?;
    write(root, "src/gen/b.c", "// b\n")?;

    let files = discover(root, &DiscoveryConfig::default(), &["src/**".to_string()], &[])?;
    let rel: Vec<&str> = files.iter().map(|f| f.relative.as_str()).collect();
    assert_eq!(rel, vec!["src/a.c", "src/gen/b.c"]);
    Ok(())
}

#[test]
fn exclude_wins_over_include() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "main.c", "// top\n")?;
    write(root, "src/a.c", "// a\n")?;
    write(root, "src/gen/b.c", "// b\n")?;

    let files = discover(
        root,
        &DiscoveryConfig::default(),
        &["src/**".to_string()],
        &["src/gen/**".to_string()],
    )?;
    let rel: Vec<&str> = files.iter().map(|f| f.relative.as_str()).collect();
    assert_eq!(rel, vec!["src/a.c"]);
    Ok(())
}

#[test]
fn single_file_keeps_header_rule_relative_to_base() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "test/lang/checks/a.jai", "# EXPECT: 1\nprint(1); # one\n")?;
    let file = root.join("test/lang/checks/a.jai");

    let files = discover_from(root, &file, &DiscoveryConfig::default(), &[], &[])?;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].relative, "test/lang/checks/a.jai");
    assert!(files[0].preserve_header);

    let results = process_files(&files, &StripOptions::default(), true);
    assert!(results[0].changed);
    assert_eq!(
        fs::read_to_string(&file)?,
        "# EXPECT: 1\nprint(1);\n"
    );
    Ok(())
}

#[test]
fn single_file_under_docs_is_skipped() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "docs/example.c", "// doc\n")?;
    let file = root.join("docs/example.c");

    let files = discover_from(root, &file, &DiscoveryConfig::default(), &[], &[])?;
    assert!(files.is_empty());
    Ok(())
}

#[test]
fn base_must_contain_root() -> TestResult {
    let a = tempfile::tempdir()?;
    let b = tempfile::tempdir()?;
    write(b.path(), "x.c", "// x\n")?;
    let result = discover_from(
        a.path(),
        &b.path().join("x.c"),
        &DiscoveryConfig::default(),
        &[],
        &[],
    );
    assert!(result.is_err());
    Ok(())
}

#[test]
fn dry_run_reports_without_writing() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    let original = "int x; // drop\n";
    write(root, "a.c", original)?;
    write(root, "b.c", "int y;\n")?;

    let files = discover(root, &DiscoveryConfig::default(), &[], &[])?;
    let results = process_files(&files, &StripOptions::default(), false);

    let changed: Vec<&str> = results
        .iter()
        .filter(|r| r.changed)
        .map(|r| r.relative.as_str())
        .collect();
    assert_eq!(changed, vec!["a.c"]);
    assert_eq!(fs::read_to_string(root.join("a.c"))?, original);
    Ok(())
}

#[test]
fn apply_rewrites_changed_files() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "a.c", "int x; // drop\n/* TODO keep */\n")?;
    write(
        root,
        "test/checks/t.jai",
        "# EXPECT: ok\nprint(\"ok\"); # say ok\n",
    )?;

    let files = discover(root, &DiscoveryConfig::default(), &[], &[])?;
    let results = process_files(&files, &StripOptions::default(), true);
    assert!(results.iter().all(|r| r.error.is_none() && r.changed));

    assert_eq!(
        fs::read_to_string(root.join("a.c"))?,
        "int x; \n/* TODO keep */\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("test/checks/t.jai"))?,
        "# EXPECT: ok\nprint(\"ok\");\n"
    );

    let again = process_files(&files, &StripOptions::default(), true);
    assert!(again.iter().all(|r| !r.changed));
    Ok(())
}

#[test]
fn undecodable_file_is_reported_and_left_alone() -> TestResult {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    let bytes = [b'/', b'/', 0xff, 0xfe, b'\n'];
    fs::write(root.join("bad.c"), bytes)?;

    let files = discover(root, &DiscoveryConfig::default(), &[], &[])?;
    let results = process_files(&files, &StripOptions::default(), true);
    assert_eq!(results.len(), 1);
    assert!(results[0].error.is_some());
    assert!(!results[0].changed);
    assert_eq!(fs::read(root.join("bad.c"))?, bytes);
    Ok(())
}

#[test]
fn missing_root_is_an_error() {
    let result = discover(
        Path::new("/definitely/not/here"),
        &DiscoveryConfig::default(),
        &[],
        &[],
    );
    assert!(result.is_err());
}
