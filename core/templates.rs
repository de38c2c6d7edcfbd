use crate::error::{AppError, Result};
use indexmap::IndexMap;
use log;
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "../data/templates/"]
#[prefix = "templates/"]
struct TemplateAssets;

pub type TemplateVars = IndexMap<&'static str, String>;

pub fn get_template_content(template_stem: &str) -> Result<String> {
    let file_path = format!("templates/{}.md", template_stem);
    log::trace!("Loading embedded template: {}", file_path);
    let asset = TemplateAssets::get(&file_path).ok_or_else(|| {
        AppError::TemplateLoading(format!("Template not found in embed: {}", file_path))
    })?;
    let content = std::str::from_utf8(asset.data.as_ref())?;
    Ok(content.to_string())
}

/// Substitutes every `{{key}}` in `template`. A placeholder without a
/// matching variable is an error.
pub fn render(template: &str, vars: &TemplateVars) -> Result<String> {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        rendered.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let end = after_open.find("}}").ok_or_else(|| {
            AppError::TemplateRender(format!("Unterminated placeholder near {:?}", &rest[start..]))
        })?;
        let key = after_open[..end].trim();
        let value = vars.get(key).ok_or_else(|| {
            AppError::TemplateRender(format!("Unresolved placeholder {{{{{}}}}}", key))
        })?;
        rendered.push_str(value);
        rest = &after_open[end + 2..];
    }
    rendered.push_str(rest);
    Ok(rendered)
}

pub fn render_template(template_stem: &str, vars: &TemplateVars) -> Result<String> {
    let template = get_template_content(template_stem)?;
    render(&template, vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_all_occurrences() {
        let mut vars = TemplateVars::new();
        vars.insert("name", "Demo".to_string());
        vars.insert("version", "1.2.0".to_string());
        let out = render("# {{name}} v{{version}}\n{{name}}\n", &vars).unwrap();
        assert_eq!(out, "# Demo v1.2.0\nDemo\n");
    }

    #[test]
    fn unresolved_placeholder_is_reported() {
        let err = render("hello {{missing}} world", &TemplateVars::new()).unwrap_err();
        match err {
            AppError::TemplateRender(msg) => assert!(msg.contains("{{missing}}")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let mut vars = TemplateVars::new();
        vars.insert("feature", "literal {{braces}}".to_string());
        assert_eq!(render("- {{feature}}", &vars).unwrap(), "- literal {{braces}}");
    }

    #[test]
    fn unknown_template_fails_to_load() {
        let err = get_template_content("does_not_exist").unwrap_err();
        assert!(matches!(err, AppError::TemplateLoading(_)));
    }

    #[test]
    fn bundled_templates_are_embedded() {
        for stem in ["user_manual", "design_document", "application_form"] {
            assert!(get_template_content(stem).unwrap().contains("{{name}}"));
        }
    }
}
