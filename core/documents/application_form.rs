use super::{format_date, join_or_placeholder, languages, or_placeholder};
use crate::config::Config;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::templates::{self, TemplateVars};
use chrono::NaiveDate;
use log;

const TEMPLATE: &str = "application_form";

pub fn render(context: &ProjectContext, config: &Config, date: NaiveDate) -> Result<String> {
    let meta = &context.metadata;
    let owner = &config.owner;

    let total_lines = context.count_code_lines();
    log::debug!("Counted {} code lines for the application form.", total_lines);

    let mut vars = TemplateVars::new();
    let mut cell = |key: &'static str, value: &str| {
        vars.insert(key, table_cell(or_placeholder(value)));
    };
    cell("name", &meta.name);
    cell("version", &meta.version);
    cell("project_type", &meta.project_type);
    cell("platform", &meta.platform);
    cell("description", &meta.description);
    cell("author", &meta.author);
    cell("appid", meta.appid.as_deref().unwrap_or_default());
    cell("lib_version", meta.lib_version.as_deref().unwrap_or_default());
    cell("owner_name", owner.name.as_deref().unwrap_or_default());
    cell("owner_category", owner.category.as_deref().unwrap_or_default());
    cell("owner_id_type", owner.id_type.as_deref().unwrap_or_default());
    cell("owner_id_number", owner.id_number.as_deref().unwrap_or_default());
    cell("owner_address", owner.address.as_deref().unwrap_or_default());
    cell("owner_contact", owner.contact.as_deref().unwrap_or_default());
    cell("owner_phone", owner.phone.as_deref().unwrap_or_default());
    cell("owner_email", owner.email.as_deref().unwrap_or_default());

    vars.insert("date", format_date(date));
    vars.insert("tech_stack", table_cell(&join_or_placeholder(&meta.tech_stack, "、")));
    vars.insert(
        "languages",
        table_cell(&join_or_placeholder(&languages(&context.code_files), "、")),
    );
    vars.insert("features", table_cell(&join_or_placeholder(&meta.features, "；")));
    vars.insert("file_count", context.code_files.len().to_string());
    vars.insert("total_lines", total_lines.to_string());
    vars.insert("lines_per_page", config.pagination.lines_per_page.to_string());
    vars.insert("total_pages", config.pagination.total_pages.to_string());
    templates::render_template(TEMPLATE, &vars)
}

fn table_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}
