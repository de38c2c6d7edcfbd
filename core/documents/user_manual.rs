use super::{PLACEHOLDER, format_date, join_or_placeholder, or_placeholder};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::templates::{self, TemplateVars};
use chrono::NaiveDate;

const TEMPLATE: &str = "user_manual";
const MAX_WALKTHROUGHS: usize = 5;
const WALKTHROUGH_STEPS: [&str; 3] = [
    "在软件主界面中找到对应的功能入口并点击进入。",
    "根据页面提示输入或选择相关信息。",
    "确认提交后查看操作结果，系统将给出相应提示。",
];

pub fn render(context: &ProjectContext, date: NaiveDate) -> Result<String> {
    let meta = &context.metadata;
    let mut vars = TemplateVars::new();
    vars.insert("name", or_placeholder(&meta.name).to_string());
    vars.insert("version", or_placeholder(&meta.version).to_string());
    vars.insert("date", format_date(date));
    vars.insert("description", or_placeholder(&meta.description).to_string());
    vars.insert("platform", or_placeholder(&meta.platform).to_string());
    vars.insert("project_type", or_placeholder(&meta.project_type).to_string());
    vars.insert("tech_stack", join_or_placeholder(&meta.tech_stack, "、"));
    vars.insert("author", or_placeholder(&meta.author).to_string());
    vars.insert("feature_list", feature_list(&meta.features));
    vars.insert("feature_sections", feature_sections(&meta.features));
    templates::render_template(TEMPLATE, &vars)
}

fn feature_list(features: &[String]) -> String {
    if features.is_empty() {
        return format!("- {}", PLACEHOLDER);
    }
    features
        .iter()
        .map(|f| format!("- {}", f))
        .collect::<Vec<_>>()
        .join("\n")
}

fn feature_sections(features: &[String]) -> String {
    if features.is_empty() {
        return format!("{}（请补充主要功能的操作说明）", PLACEHOLDER);
    }
    features
        .iter()
        .take(MAX_WALKTHROUGHS)
        .enumerate()
        .map(|(i, feature)| {
            let steps = WALKTHROUGH_STEPS
                .iter()
                .enumerate()
                .map(|(n, step)| format!("{}. {}", n + 1, step))
                .collect::<Vec<_>>()
                .join("\n");
            format!("### 4.{} {}\n\n{}", i + 1, feature, steps)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
