use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn copydoc() -> Command {
    Command::cargo_bin("copydoc").unwrap()
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "app.json",
        r#"{"window": {"navigationBarTitleText": "记账助手"}}"#,
    );
    write(dir.path(), "project.config.json", r#"{"appid": "wx0123", "libVersion": "3.0.0"}"#);
    write(dir.path(), "package.json", r#"{"name": "ledger", "version": "1.4.0", "author": "张三"}"#);
    write(dir.path(), "README.md", "# 记账助手\n\n## 功能特性\n\n- 账单录入\n- 统计报表\n\n## 安装\n");
    write(dir.path(), "app.js", "App({})\n");
    write(dir.path(), "pages/index/index.js", "Page({\n  data: {}\n})\n");
    write(dir.path(), "node_modules/dep/index.js", "module.exports = 1\n");
    dir
}

#[test]
fn missing_project_path_exits_with_one() {
    copydoc().assert().code(1);
}

#[test]
fn generates_all_documents_into_default_directory() {
    let project = sample_project();

    copydoc().arg(project.path()).assert().success();

    let out = project.path().join("copyright_docs");
    for name in [
        "source_code.md",
        "user_manual.md",
        "design_document.md",
        "application_form.md",
    ] {
        assert!(out.join(name).is_file(), "missing {name}");
    }
    let listing = fs::read_to_string(out.join("source_code.md")).unwrap();
    assert!(listing.starts_with("# 记账助手 源代码"));
    assert!(listing.contains("### app.js (1 行)"));
    assert!(!listing.contains("node_modules"));

    let form = fs::read_to_string(out.join("application_form.md")).unwrap();
    assert!(form.contains("| 小程序 AppID | wx0123 |"));
    assert!(form.contains("| 版本号 | 1.4.0 |"));
}

#[test]
fn explicit_output_directory_is_created() {
    let project = sample_project();
    let out = TempDir::new().unwrap();
    let target = out.path().join("filings/2024");

    copydoc()
        .arg(project.path())
        .arg(&target)
        .arg("--quiet")
        .assert()
        .success()
        .stdout("");

    assert!(target.join("user_manual.md").is_file());
    assert!(!project.path().join("copyright_docs").exists());
}

#[test]
fn malformed_manifest_is_fatal() {
    let project = sample_project();
    write(project.path(), "package.json", "{ broken");

    copydoc().arg(project.path()).arg("-q").assert().code(1);
}

#[test]
fn nonexistent_project_root_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    copydoc()
        .arg(dir.path().join("does-not-exist"))
        .assert()
        .code(2);
}
