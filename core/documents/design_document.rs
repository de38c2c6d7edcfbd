use super::{PLACEHOLDER, format_date, join_or_placeholder, or_placeholder};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::gather;
use crate::templates::{self, TemplateVars};
use chrono::NaiveDate;

const TEMPLATE: &str = "design_document";

pub fn render(context: &ProjectContext, date: NaiveDate) -> Result<String> {
    let meta = &context.metadata;
    let root_label = context
        .project_root
        .file_name()
        .map_or_else(|| ".".to_string(), |n| format!("{}/", n.to_string_lossy()));

    let mut vars = TemplateVars::new();
    vars.insert("name", or_placeholder(&meta.name).to_string());
    vars.insert("version", or_placeholder(&meta.version).to_string());
    vars.insert("date", format_date(date));
    vars.insert("description", or_placeholder(&meta.description).to_string());
    vars.insert("project_type", or_placeholder(&meta.project_type).to_string());
    vars.insert("platform", or_placeholder(&meta.platform).to_string());
    vars.insert("tech_stack", join_or_placeholder(&meta.tech_stack, "、"));
    vars.insert("feature_list", requirement_list(&meta.features));
    vars.insert("file_count", context.code_files.len().to_string());
    vars.insert("structure", gather::render_tree(&meta.structure, &root_label));
    templates::render_template(TEMPLATE, &vars)
}

fn requirement_list(features: &[String]) -> String {
    if features.is_empty() {
        return format!("1. {}", PLACEHOLDER);
    }
    features
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{}. {}", i + 1, f))
        .collect::<Vec<_>>()
        .join("\n")
}
