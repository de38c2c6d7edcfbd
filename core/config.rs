use crate::error::{AppError, Result};
use log;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_DIR: &str = ".copydoc";
pub const DEFAULT_CONFIG_FILENAME: &str = "copydoc.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "copyright_docs";
pub const DEFAULT_LINES_PER_PAGE: usize = 50;
pub const DEFAULT_TOTAL_PAGES: usize = 60;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub owner: OwnerInfo,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PaginationConfig {
    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: usize,
    #[serde(default = "default_total_pages")]
    pub total_pages: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_source_listing")]
    pub source_listing: String,
    #[serde(default = "default_user_manual")]
    pub user_manual: String,
    #[serde(default = "default_design_document")]
    pub design_document: String,
    #[serde(default = "default_application_form")]
    pub application_form: String,
}

/// Rights-holder record printed on the application form. Any field left
/// unset is rendered as a fill-in placeholder.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OwnerInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub id_type: Option<String>,
    #[serde(default)]
    pub id_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

fn default_lines_per_page() -> usize {
    DEFAULT_LINES_PER_PAGE
}
fn default_total_pages() -> usize {
    DEFAULT_TOTAL_PAGES
}
fn default_source_listing() -> String {
    "source_code.md".to_string()
}
fn default_user_manual() -> String {
    "user_manual.md".to_string()
}
fn default_design_document() -> String {
    "design_document.md".to_string()
}
fn default_application_form() -> String {
    "application_form.md".to_string()
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            lines_per_page: default_lines_per_page(),
            total_pages: default_total_pages(),
        }
    }
}
impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            source_listing: default_source_listing(),
            user_manual: default_user_manual(),
            design_document: default_design_document(),
            application_form: default_application_form(),
        }
    }
}

impl Config {
    pub fn determine_project_root(cli_project_root: &Path) -> Result<PathBuf> {
        cli_project_root.canonicalize().map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to canonicalize project root '{}': {}",
                    cli_project_root.display(),
                    e
                ),
            ))
        })
    }

    pub fn default_output_dir(project_root: &Path) -> PathBuf {
        project_root.join(DEFAULT_OUTPUT_DIR)
    }

    pub fn resolve_config_path(project_root: &Path) -> Option<PathBuf> {
        let default_path = project_root
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILENAME);
        if default_path.is_file() {
            log::debug!("Using config file: {}", default_path.display());
            Some(default_path)
        } else {
            log::debug!("No config file found at: {}", default_path.display());
            None
        }
    }

    /// Loads the project's config file when one exists, built-in defaults otherwise.
    pub fn load_for_project(project_root: &Path) -> Result<Self> {
        match Self::resolve_config_path(project_root) {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        log::info!("Loading configuration from: {}", config_path.display());
        let toml_content = fs::read_to_string(config_path).map_err(|e| AppError::FileRead {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        let config = toml::from_str::<Config>(&toml_content).map_err(|e| {
            AppError::TomlParse(format!(
                "Error parsing config file '{}': {}. Check TOML syntax and structure.",
                config_path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pagination.lines_per_page == 0 {
            return Err(AppError::InvalidArgument(
                "[pagination].lines_per_page must be greater than 0".to_string(),
            ));
        }
        if self.pagination.total_pages == 0 {
            return Err(AppError::InvalidArgument(
                "[pagination].total_pages must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) {
        let config_dir = dir.path().join(DEFAULT_CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(DEFAULT_CONFIG_FILENAME), body).unwrap();
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_for_project(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pagination.lines_per_page, 50);
        assert_eq!(config.pagination.total_pages, 60);
        assert_eq!(config.output.source_listing, "source_code.md");
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            "[pagination]\nlines_per_page = 30\n\n[owner]\nname = \"Acme Ltd.\"\n",
        );
        let config = Config::load_for_project(dir.path()).unwrap();
        assert_eq!(config.pagination.lines_per_page, 30);
        assert_eq!(config.pagination.total_pages, DEFAULT_TOTAL_PAGES);
        assert_eq!(config.owner.name.as_deref(), Some("Acme Ltd."));
        assert!(config.owner.phone.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[pagination]\nlines = 30\n");
        let err = Config::load_for_project(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::TomlParse(_)));
    }

    #[test]
    fn zero_page_budget_is_invalid() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[pagination]\ntotal_pages = 0\n");
        let err = Config::load_for_project(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }
}
