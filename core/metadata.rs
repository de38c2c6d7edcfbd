use crate::error::{AppError, Result};
use crate::gather::DirectoryTree;
use log;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const APP_MANIFEST: &str = "app.json";
pub const PROJECT_CONFIG: &str = "project.config.json";
pub const PACKAGE_MANIFEST: &str = "package.json";
pub const README: &str = "README.md";

const MINIPROGRAM_TYPE: &str = "微信小程序";
const MINIPROGRAM_PLATFORM: &str = "微信小程序平台";
const MINIPROGRAM_STACK: &str = "微信小程序原生框架";
const NODE_STACK: &str = "Node.js";
const DEFAULT_VERSION: &str = "1.0.0";

const FEATURE_HEADING_MARKERS: [&str; 2] = ["功能特性", "Features"];
const FEATURE_BULLETS: [char; 2] = ['-', '✅'];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub platform: String,
    pub tech_stack: Vec<String>,
    pub features: Vec<String>,
    pub structure: DirectoryTree,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lib_version: Option<String>,
}

impl ProjectMetadata {
    /// Merges every recognised manifest under `project_root`. The directory
    /// structure is filled in separately once the code files are known.
    pub fn from_project(project_root: &Path) -> Result<Self> {
        let mut meta = ProjectMetadata::default();

        if let Some(app) = read_json(&project_root.join(APP_MANIFEST))? {
            meta.apply_app_manifest(&app);
        }
        if let Some(project_config) = read_json(&project_root.join(PROJECT_CONFIG))? {
            meta.apply_project_config(&project_config);
        }
        if let Some(package) = read_json(&project_root.join(PACKAGE_MANIFEST))? {
            meta.apply_package_manifest(&package);
        }
        if let Some(readme) = read_optional(&project_root.join(README))? {
            meta.features = extract_features(&readme);
            log::debug!("Extracted {} features from README.", meta.features.len());
        }

        Ok(meta)
    }

    pub fn apply_app_manifest(&mut self, app: &Value) {
        self.name = app
            .pointer("/window/navigationBarTitleText")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.project_type = MINIPROGRAM_TYPE.to_string();
        self.platform = MINIPROGRAM_PLATFORM.to_string();
        self.tech_stack = vec![MINIPROGRAM_STACK.to_string()];
    }

    pub fn apply_project_config(&mut self, project_config: &Value) {
        self.appid = Some(string_field(project_config, "appid").unwrap_or_default());
        self.lib_version = Some(string_field(project_config, "libVersion").unwrap_or_default());
    }

    pub fn apply_package_manifest(&mut self, package: &Value) {
        if self.name.is_empty() {
            self.name = string_field(package, "name").unwrap_or_default();
        }
        self.version = string_field(package, "version").unwrap_or_else(|| DEFAULT_VERSION.to_string());
        self.description = string_field(package, "description").unwrap_or_default();
        self.author = match package.get("author") {
            Some(Value::String(author)) => author.clone(),
            Some(person @ Value::Object(_)) => string_field(person, "name").unwrap_or_default(),
            _ => String::new(),
        };
        if self.tech_stack.is_empty() {
            self.tech_stack = vec![NODE_STACK.to_string()];
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("Optional input not present: {}", path.display());
            Ok(None)
        }
        Err(e) => Err(AppError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn read_json(path: &Path) -> Result<Option<Value>> {
    let Some(content) = read_optional(path)? else {
        return Ok(None);
    };
    log::debug!("Reading manifest: {}", path.display());
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| AppError::JsonParse {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Scrapes the bullet list under the README's features heading.
pub fn extract_features(readme: &str) -> Vec<String> {
    let mut features = Vec::new();
    let mut in_features = false;

    for line in readme.lines() {
        if FEATURE_HEADING_MARKERS.iter().any(|m| line.contains(m)) {
            in_features = true;
            continue;
        }
        if !in_features {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.starts_with("##") && !line.contains(FEATURE_HEADING_MARKERS[0]) {
            break;
        }
        if let Some(rest) = trimmed.strip_prefix(FEATURE_BULLETS) {
            let feature = rest.trim_start();
            if !feature.is_empty() {
                features.push(feature.to_string());
            }
        }
    }
    features
}
