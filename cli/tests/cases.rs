use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn bin() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_customblocks"));
    command.arg("--no-color");
    command
}

fn cases_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("cases")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("cannot write scratch file");
    path
}

#[test]
fn fixture_cases_pass() {
    let output = bin()
        .arg("test")
        .arg(cases_dir())
        .output()
        .expect("cannot run binary");
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("0 failed"));
}

#[test]
fn fixture_category_filter() {
    let output = bin()
        .args(["test", "--category", "generators"])
        .arg(cases_dir())
        .output()
        .expect("cannot run binary");
    let log = stderr(&output);
    assert!(output.status.success(), "{}", log);
    assert!(log.contains("youtube flags"));
    assert!(!log.contains("nested blocks keep their own bodies"));
}

#[test]
fn failing_fixture_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "wrong.test.md",
        "---\nexpect_html = \"<p>nope</p>\"\n---\nyes\n",
    );
    let output = bin().arg("test").arg(dir.path()).output().expect("cannot run binary");
    assert!(!output.status.success());
    let log = stderr(&output);
    assert!(log.contains("FAIL"));
    assert!(log.contains("html mismatch"));
}

#[test]
fn render_is_the_default_subcommand() {
    let dir = tempfile::tempdir().expect("tempdir");
    let doc = write(dir.path(), "doc.md", "::: note\n    Hello\n");
    let output = bin().arg(&doc).output().expect("cannot run binary");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "<div class=\"admonition note\">\n\
         <div class=\"admonition-title\">Note</div>\n\
         <p>Hello</p>\n\
         </div>\n"
    );
}

#[test]
fn render_with_config_and_output_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let doc = write(dir.path(), "doc.md", "::: note\n");
    let config = write(dir.path(), "blocks.toml", "[generators]\nnote = \"\"\n");
    let html = dir.path().join("doc.html");
    let output = bin()
        .arg("render")
        .arg(&doc)
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&html)
        .output()
        .expect("cannot run binary");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        std::fs::read_to_string(&html).expect("output written"),
        "<div class=\"note\"></div>\n"
    );
}

#[test]
fn warnings_go_to_stderr() {
    let dir = tempfile::tempdir().expect("tempdir");
    let doc = write(dir.path(), "doc.md", "::: youtube\n");
    let output = bin().arg("render").arg(&doc).output().expect("cannot run binary");
    assert!(output.status.success());
    assert!(stderr(&output).contains("In block 'youtube', missing mandatory attribute 'id'"));

    let denied = bin()
        .args(["render", "--deny-warnings"])
        .arg(&doc)
        .output()
        .expect("cannot run binary");
    assert!(!denied.status.success());
    assert!(stdout(&denied).is_empty());
}

#[test]
fn list_types() {
    let output = bin()
        .args(["render", "--list-types"])
        .output()
        .expect("cannot run binary");
    assert!(output.status.success(), "{}", stderr(&output));
    let listed = stdout(&output);
    assert!(listed.lines().any(|line| line == "youtube"));
    assert!(listed.lines().any(|line| line == "note"));
}

#[test]
fn invalid_config_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let doc = write(dir.path(), "doc.md", "text\n");
    let config = write(dir.path(), "bad.toml", "renderers = 1\n");
    let output = bin()
        .arg("render")
        .arg(&doc)
        .arg("--config")
        .arg(&config)
        .output()
        .expect("cannot run binary");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid config"));
}
