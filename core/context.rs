use crate::error::{AppError, Result};
use crate::gather;
use crate::metadata::ProjectMetadata;
use log;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything the document writers need: extracted metadata plus the
/// priority-ordered list of code files, both relative to `project_root`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    pub project_root: PathBuf,
    pub metadata: ProjectMetadata,
    pub code_files: Vec<PathBuf>,
}

impl ProjectContext {
    pub fn build(project_root: &Path) -> Result<Self> {
        log::debug!("Analyzing project metadata...");
        let mut metadata = ProjectMetadata::from_project(project_root)?;
        log::debug!("Metadata extracted: name={:?}", metadata.name);

        log::debug!("Collecting code files...");
        let code_files = gather::collect_code_files(project_root);
        metadata.structure = gather::build_tree_from_paths(&code_files);
        log::debug!("Directory structure built.");

        Ok(ProjectContext {
            project_root: project_root.to_path_buf(),
            metadata,
            code_files,
        })
    }

    pub fn read_code_file(&self, relative_path: &Path) -> Result<String> {
        let full_path = self.project_root.join(relative_path);
        fs::read_to_string(&full_path).map_err(|e| AppError::FileRead {
            path: full_path,
            source: e,
        })
    }

    /// Total line count over all code files; unreadable files are left out.
    pub fn count_code_lines(&self) -> usize {
        self.code_files
            .iter()
            .filter_map(|path| match self.read_code_file(path) {
                Ok(content) => Some(content.lines().count()),
                Err(e) => {
                    log::trace!("Skipping file in line count: {}", e);
                    None
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gather::TreeEntry;
    use tempfile::TempDir;

    #[test]
    fn build_collects_metadata_files_and_structure() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "demo"}"#).unwrap();
        fs::create_dir_all(dir.path().join("utils")).unwrap();
        fs::write(dir.path().join("utils/a.js"), "1\n2\n3\n").unwrap();
        fs::write(dir.path().join("app.js"), "App({})\n").unwrap();

        let ctx = ProjectContext::build(dir.path()).unwrap();
        assert_eq!(ctx.metadata.name, "demo");
        assert_eq!(
            ctx.code_files,
            vec![
                PathBuf::from("app.js"),
                PathBuf::from("utils").join("a.js"),
                PathBuf::from("package.json"),
            ]
        );
        assert!(matches!(
            ctx.metadata.structure.get("utils"),
            Some(TreeEntry::Dir(children)) if children.contains_key("a.js")
        ));
    }

    #[test]
    fn line_count_skips_unreadable_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), "1\n2\n").unwrap();
        fs::write(dir.path().join("b.js"), "1\n2\n3").unwrap();
        fs::write(dir.path().join("bin.js"), [0xff_u8, 0xfe, 0x00]).unwrap();

        let mut ctx = ProjectContext::build(dir.path()).unwrap();
        ctx.code_files.push(PathBuf::from("missing.js"));
        assert_eq!(ctx.count_code_lines(), 5);
    }
}
