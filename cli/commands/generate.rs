use crate::cli_args::Cli;
use crate::output;
use anyhow::{Context, Result};
use colored::Colorize;
use log;
use copydoc_core::{self as core, Config, ProjectContext};

pub fn handle_generate_command(args: &Cli, quiet: bool) -> Result<()> {
    let project_root = Config::determine_project_root(&args.project_path)
        .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| Config::default_output_dir(&project_root));
    log::debug!("Output directory: {}", output_dir.display());

    let config = Config::load_for_project(&project_root).context("Failed to load configuration")?;

    if !quiet {
        println!(
            "{} Analyzing project: {}",
            "🔍".cyan(),
            project_root.display().to_string().blue()
        );
    }
    let context =
        ProjectContext::build(&project_root).context("Failed to analyze project metadata")?;
    if !quiet {
        println!(
            "{} Found {} code files for {}",
            "📂".cyan(),
            context.code_files.len(),
            if context.metadata.name.is_empty() {
                "(unnamed project)".to_string()
            } else {
                context.metadata.name.clone()
            }
        );
    }

    let date = chrono::Local::now().date_naive();
    let generated = core::generate_all(&context, &config, &output_dir, date, |document| {
        if !quiet {
            println!(
                "{} {} saved to: {}",
                "✅".green(),
                document.kind.label(),
                document.path.display().to_string().blue()
            );
        }
    })
    .context("Failed to generate copyright documents")?;

    if !quiet {
        output::print_summary_table(&generated, &output_dir)?;
    }
    Ok(())
}
