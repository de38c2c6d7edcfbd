use crate::config::{Config, OutputConfig};
use crate::context::ProjectContext;
use crate::error::{AppError, Result};
use chrono::NaiveDate;
use log;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod application_form;
pub mod design_document;
pub mod source_listing;
pub mod user_manual;

pub const PLACEHOLDER: &str = "（请填写）";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    SourceListing,
    UserManual,
    DesignDocument,
    ApplicationForm,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::SourceListing,
        DocumentKind::UserManual,
        DocumentKind::DesignDocument,
        DocumentKind::ApplicationForm,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::SourceListing => "源代码文档",
            DocumentKind::UserManual => "用户手册",
            DocumentKind::DesignDocument => "设计说明书",
            DocumentKind::ApplicationForm => "登记申请表",
        }
    }

    pub fn file_name(self, output: &OutputConfig) -> &str {
        match self {
            DocumentKind::SourceListing => &output.source_listing,
            DocumentKind::UserManual => &output.user_manual,
            DocumentKind::DesignDocument => &output.design_document,
            DocumentKind::ApplicationForm => &output.application_form,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDocument {
    pub kind: DocumentKind,
    pub path: PathBuf,
    pub bytes: usize,
}

pub fn render_document(
    kind: DocumentKind,
    context: &ProjectContext,
    config: &Config,
    date: NaiveDate,
) -> Result<String> {
    match kind {
        DocumentKind::SourceListing => Ok(source_listing::render(context, &config.pagination, date)),
        DocumentKind::UserManual => user_manual::render(context, date),
        DocumentKind::DesignDocument => design_document::render(context, date),
        DocumentKind::ApplicationForm => application_form::render(context, config, date),
    }
}

pub fn generate_document(
    kind: DocumentKind,
    context: &ProjectContext,
    config: &Config,
    date: NaiveDate,
    path: &Path,
) -> Result<GeneratedDocument> {
    log::debug!("Rendering {:?}...", kind);
    let content = render_document(kind, context, config, date)?;
    write_document(path, &content)?;
    log::info!("{:?} written to {}", kind, path.display());
    Ok(GeneratedDocument {
        kind,
        path: path.to_path_buf(),
        bytes: content.len(),
    })
}

/// Renders and writes all four documents into `output_dir` using the
/// file names from `[output]`. `on_generated` runs after each write.
pub fn generate_all<F>(
    context: &ProjectContext,
    config: &Config,
    output_dir: &Path,
    date: NaiveDate,
    mut on_generated: F,
) -> Result<Vec<GeneratedDocument>>
where
    F: FnMut(&GeneratedDocument),
{
    let mut generated = Vec::with_capacity(DocumentKind::ALL.len());
    for kind in DocumentKind::ALL {
        let path = output_dir.join(kind.file_name(&config.output));
        let document = generate_document(kind, context, config, date, &path)?;
        on_generated(&document);
        generated.push(document);
    }
    Ok(generated)
}

pub fn write_document(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AppError::DirCreation {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let mut file = File::create(path).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    file.write_all(content.as_bytes())
        .map_err(|e| AppError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
}

pub(crate) fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        PLACEHOLDER
    } else {
        value
    }
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Forward-slash form of a relative path, independent of the host OS.
pub(crate) fn display_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub(crate) fn join_or_placeholder(items: &[String], separator: &str) -> String {
    if items.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        items.join(separator)
    }
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or_default()
}

pub(crate) fn fence_language(path: &Path) -> &'static str {
    match extension(path) {
        "js" => "javascript",
        "ts" => "typescript",
        "wxml" => "xml",
        "wxss" => "css",
        "json" => "json",
        "py" => "python",
        "java" => "java",
        "go" => "go",
        "rs" => "rust",
        _ => "",
    }
}

pub(crate) fn language_name(path: &Path) -> Option<&'static str> {
    match extension(path) {
        "js" => Some("JavaScript"),
        "ts" => Some("TypeScript"),
        "wxml" => Some("WXML"),
        "wxss" => Some("WXSS"),
        "json" => Some("JSON"),
        "py" => Some("Python"),
        "java" => Some("Java"),
        "go" => Some("Go"),
        "rs" => Some("Rust"),
        _ => None,
    }
}

/// Distinct programming languages in first-seen file order.
pub(crate) fn languages(files: &[PathBuf]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for name in files.iter().filter_map(|p| language_name(p)) {
        if !seen.iter().any(|s| s == name) {
            seen.push(name.to_string());
        }
    }
    seen
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::metadata::ProjectMetadata;
    use std::fs;
    use tempfile::TempDir;

    pub fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    pub fn context_with_files(dir: &TempDir, files: &[(&str, String)]) -> ProjectContext {
        for (rel, content) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        ProjectContext {
            project_root: dir.path().to_path_buf(),
            metadata: ProjectMetadata {
                name: "记账助手".to_string(),
                version: "1.2.0".to_string(),
                description: "个人记账小程序".to_string(),
                author: "张三".to_string(),
                project_type: "微信小程序".to_string(),
                platform: "微信小程序平台".to_string(),
                tech_stack: vec!["微信小程序原生框架".to_string()],
                features: vec!["账单录入".to_string(), "统计报表".to_string()],
                ..ProjectMetadata::default()
            },
            code_files: files.iter().map(|(rel, _)| PathBuf::from(rel)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn generate_all_writes_four_documents() {
        let dir = TempDir::new().unwrap();
        let ctx = context_with_files(&dir, &[("app.js", "App({})\n".to_string())]);
        let out_dir = dir.path().join("nested/out");

        let mut reported = Vec::new();
        let docs = generate_all(&ctx, &Config::default(), &out_dir, sample_date(), |doc| {
            reported.push(doc.kind)
        })
        .unwrap();
        assert_eq!(docs.len(), 4);
        assert_eq!(reported, DocumentKind::ALL.to_vec());
        for doc in &docs {
            let written = fs::read_to_string(&doc.path).unwrap();
            assert_eq!(written.len(), doc.bytes);
        }
        assert!(out_dir.join("source_code.md").is_file());
        assert!(out_dir.join("application_form.md").is_file());
    }

    #[test]
    fn generation_is_idempotent_for_same_date() {
        let dir = TempDir::new().unwrap();
        let ctx = context_with_files(
            &dir,
            &[
                ("app.js", "App({})\n".to_string()),
                ("utils/util.js", "module.exports = {}\n".to_string()),
            ],
        );
        let out_dir = dir.path().join("out");
        let config = Config::default();

        let first: Vec<String> = generate_all(&ctx, &config, &out_dir, sample_date(), |_| {})
            .unwrap()
            .iter()
            .map(|d| fs::read_to_string(&d.path).unwrap())
            .collect();
        let second: Vec<String> = generate_all(&ctx, &config, &out_dir, sample_date(), |_| {})
            .unwrap()
            .iter()
            .map(|d| fs::read_to_string(&d.path).unwrap())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn write_document_overwrites_existing_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/doc.md");
        write_document(&path, "first version, longer").unwrap();
        write_document(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "second");
    }

    #[test]
    fn languages_are_distinct_in_file_order() {
        let files = vec![
            PathBuf::from("app.js"),
            PathBuf::from("pages/a.wxml"),
            PathBuf::from("utils/b.js"),
            PathBuf::from("app.json"),
        ];
        assert_eq!(languages(&files), vec!["JavaScript", "WXML", "JSON"]);
    }

    #[test]
    fn display_path_uses_forward_slashes() {
        let path: PathBuf = ["pages", "index", "index.js"].iter().collect();
        assert_eq!(display_path(&path), "pages/index/index.js");
    }
}
