use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_sprocdoc")));
    cmd.env_remove("RUST_LOG").env_remove("SPROCDOC_CONFIG");
    cmd
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Source directory holding the good fixtures plus any extra files.
fn source_dir(extra: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in ["LoginUser.sql", "GetAllUsers.sql"] {
        fs::copy(fixture_path(&format!("sql/{}", name)), dir.path().join(name)).unwrap();
    }
    for name in extra {
        fs::copy(fixture_path(name), dir.path().join(name)).unwrap();
    }
    dir
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

// -- generate: file mode --

#[test]
fn generate_writes_one_page_per_procedure() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["generate", "-o", out.path().to_str().unwrap()])
        .arg(fixture_path("sql"))
        .assert()
        .success();

    let page = read(&out.path().join("LoginUser.md"));
    assert!(page.starts_with("---\ntitle: \"LoginUser\"\n"));
    assert!(page.contains("params:\n  - \"@Email VARCHAR(100)\"\n  - \"@Hash CHAR(64)\"\n"));
    assert!(page.contains("refs:\n  - \"User\"\n  - \"UserDetails\"\n"));
    assert!(page.contains("createdby: \"dbadmin\"\n"));
    assert!(page.contains("- **@Email**: `VARCHAR(100)`, Default: `null`"));
    assert!(page.contains("## Returns\n- Id\n- Email\n- FirstName\n- LastName\n"));

    let all_users = read(&out.path().join("GetAllUsers.md"));
    assert!(all_users.contains("params: []\n"));
    assert!(all_users.contains("refs:\n  - \"User\"\n"));
}

#[test]
fn generated_sql_block_has_no_comments() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["generate", "-o", out.path().to_str().unwrap()])
        .arg(fixture_path("sql/LoginUser.sql"))
        .assert()
        .success();

    let page = read(&out.path().join("LoginUser.md"));
    let sql = page.split("~~~~sql\n").nth(1).unwrap();
    assert!(!sql.contains("-- Check if the email"));
    assert!(!sql.contains("start docs"));
    assert!(sql.contains("SET NOCOUNT ON;"));
    assert!(page.contains("~~~~cs\ncode coming soon...\n~~~~"));
}

#[test]
fn generate_is_deterministic() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    for out in [&first, &second] {
        cmd()
            .args(["generate", "-o", out.path().to_str().unwrap()])
            .arg(fixture_path("sql"))
            .assert()
            .success();
    }

    assert_eq!(
        read(&first.path().join("LoginUser.md")),
        read(&second.path().join("LoginUser.md"))
    );
}

#[test]
fn generate_creates_output_directory() {
    let out = TempDir::new().unwrap();
    let nested = out.path().join("src").join("content").join("docs");

    cmd()
        .args(["generate", "-o", nested.to_str().unwrap()])
        .arg(fixture_path("sql"))
        .assert()
        .success();

    assert!(nested.join("LoginUser.md").exists());
}

#[test]
fn generate_requires_output() {
    cmd()
        .arg("generate")
        .arg(fixture_path("sql"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output is required"));
}

// -- error policy --

#[test]
fn missing_docs_block_is_reported_and_skipped() {
    let src = source_dir(&["no_docs.sql"]);
    let out = TempDir::new().unwrap();

    cmd()
        .args(["generate", "-o", out.path().to_str().unwrap()])
        .arg(src.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("no_docs.sql"))
        .stderr(predicate::str::contains("docs block"));

    assert!(!out.path().join("DeleteUser.md").exists());
    assert!(out.path().join("LoginUser.md").exists());
    assert!(out.path().join("GetAllUsers.md").exists());
}

#[test]
fn malformed_json_is_reported() {
    let src = source_dir(&["bad_json.sql"]);
    let out = TempDir::new().unwrap();

    cmd()
        .args(["generate", "-o", out.path().to_str().unwrap()])
        .arg(src.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("bad_json.sql"))
        .stderr(predicate::str::contains("malformed docs block"));

    assert!(!out.path().join("UpdateUser.md").exists());
}

#[test]
fn fail_fast_aborts_batch() {
    let src = TempDir::new().unwrap();
    // Sorted order puts the bad file first.
    fs::copy(fixture_path("no_docs.sql"), src.path().join("a_no_docs.sql")).unwrap();
    fs::copy(fixture_path("sql/LoginUser.sql"), src.path().join("b_login.sql")).unwrap();
    let out = TempDir::new().unwrap();

    cmd()
        .args(["generate", "--fail-fast", "-o", out.path().to_str().unwrap()])
        .arg(src.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("a_no_docs.sql"));

    assert!(!out.path().join("LoginUser.md").exists());
}

#[test]
fn config_file_sets_halt_policy() {
    let src = source_dir(&["no_docs.sql"]);
    let out = TempDir::new().unwrap();
    let mut config = NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(config, "on_error = \"halt\"").unwrap();

    cmd()
        .args(["--config", config.path().to_str().unwrap()])
        .args(["generate", "-o", out.path().to_str().unwrap()])
        .arg(src.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("docs block"));
}

#[test]
fn config_file_supplies_directories() {
    let out = TempDir::new().unwrap();
    let mut config = NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(
        config,
        "source_dir = {:?}\noutput_dir = {:?}\nauthor = \"ops\"",
        fixture_path("sql"),
        out.path().to_str().unwrap()
    )
    .unwrap();

    cmd()
        .args(["--config", config.path().to_str().unwrap(), "generate"])
        .assert()
        .success();

    let page = read(&out.path().join("LoginUser.md"));
    assert!(page.contains("createdby: \"ops\"\n"));
}

#[test]
fn missing_config_file_fails() {
    cmd()
        .args(["--config", "/nonexistent/sprocdoc.toml", "generate"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

// -- generate: stdin mode --

#[test]
fn stdin_mode_prints_page() {
    let input = read(Path::new(&fixture_path("sql/LoginUser.sql")));
    let expected = read(Path::new(&fixture_path("LoginUser.expected.md")));

    let assert = cmd().arg("generate").write_stdin(input).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn file_mode_matches_stdin_mode() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["generate", "-o", out.path().to_str().unwrap()])
        .arg(fixture_path("sql/LoginUser.sql"))
        .assert()
        .success();

    assert_eq!(
        read(&out.path().join("LoginUser.md")),
        read(Path::new(&fixture_path("LoginUser.expected.md")))
    );
}

#[test]
fn stdin_mode_reports_failure() {
    let input = read(Path::new(&fixture_path("no_docs.sql")));

    cmd()
        .arg("generate")
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to extract stdin (docs block)"));
}

// -- output formats --

#[test]
fn json_format_feeds_viewer() {
    let docs = TempDir::new().unwrap();

    cmd()
        .args(["generate", "-f", "json", "-o", docs.path().to_str().unwrap()])
        .arg(fixture_path("sql"))
        .assert()
        .success();

    assert!(docs.path().join("LoginUser.json").exists());

    cmd()
        .args(["view", "--catalog", docs.path().to_str().unwrap()])
        .args(["--select", "LoginUser"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>LoginUser</h1>"))
        .stdout(predicate::str::contains("<li>UserDetails</li>"))
        .stdout(predicate::str::contains("<li><span>GetAllUsers</span></li>"));
}

#[test]
fn html_format() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["generate", "-f", "html", "-o", out.path().to_str().unwrap()])
        .arg(fixture_path("sql/LoginUser.sql"))
        .assert()
        .success();

    let page = read(&out.path().join("LoginUser.html"));
    assert!(page.contains("<!DOCTYPE html>"));
}

#[test]
fn invalid_format_fails() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["generate", "-f", "xml", "-o", out.path().to_str().unwrap()])
        .arg(fixture_path("sql"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

// -- view --

#[test]
fn view_site_skips_path_like_names() {
    let work = TempDir::new().unwrap();
    let catalog = work.path().join("catalog.json");
    fs::write(
        &catalog,
        r#"[{"Name": "../escaped", "Desc": "x"}, {"Name": "LoginUser", "Desc": "y"}]"#,
    )
    .unwrap();
    let site = work.path().join("site");

    cmd()
        .args(["view", "--catalog", catalog.to_str().unwrap()])
        .args(["--site", site.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("../escaped"));

    assert!(!work.path().join("escaped.html").exists());
    assert!(site.join("LoginUser.html").exists());
    assert!(!read(&site.join("index.html")).contains("href=\"../escaped.html\""));
}

#[test]
fn view_builtin_catalog_with_selection() {
    cmd()
        .args(["view", "--select", "LoginUser"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<span class=\"active\">LoginUser</span>"))
        .stdout(predicate::str::contains("href=").not())
        .stdout(predicate::str::contains("<code class=\"language-sql\">@Email VARCHAR(100)\n@Hash CHAR(64)</code>"))
        .stdout(predicate::str::contains("<li>[dbo].[UserDetails]</li>"))
        .stdout(predicate::str::contains("loading....").not());
}

#[test]
fn view_unknown_selection_shows_loading() {
    cmd()
        .args(["view", "--select", "NoSuchProcedure"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>loading....</p>"))
        .stderr(predicate::str::contains("NoSuchProcedure"));
}

#[test]
fn view_missing_catalog_shows_error_state() {
    cmd()
        .args(["view", "--catalog", "/nonexistent/catalog.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to load procedures"));
}

#[test]
fn view_site_writes_all_pages() {
    let site = TempDir::new().unwrap();

    cmd()
        .args(["view", "--site", site.path().to_str().unwrap()])
        .assert()
        .success();

    assert!(read(&site.path().join("index.html")).contains("loading...."));
    let login = read(&site.path().join("LoginUser.html"));
    assert!(login.contains("<h1>LoginUser</h1>"));
    assert!(login.contains("<a href=\"LoginUser.html\" class=\"active\">LoginUser</a>"));
    assert!(login.contains("<a href=\"DeleteUser.html\">DeleteUser</a>"));
    assert!(site.path().join("LogUserAction.html").exists());
}

#[test]
fn view_output_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("catalog.html");

    cmd()
        .args(["view", "-s", "DeleteUser", "-o", out.to_str().unwrap()])
        .assert()
        .success();

    assert!(read(&out).contains("<h1>DeleteUser</h1>"));
}
