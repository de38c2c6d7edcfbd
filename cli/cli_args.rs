use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate software-copyright filing documents for a project.",
    long_about = "copydoc analyzes a project's manifests, README and source tree and writes \nfour Markdown documents: source listing, user manual, design document and \nregistration application form.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  copydoc ./my-miniprogram\n  copydoc ./my-miniprogram ./out -v",
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(help = "Project root directory to analyze.", value_name = "PROJECT_PATH")]
    pub project_path: PathBuf,

    #[arg(
        help = "Directory for the generated documents (default: <PROJECT_PATH>/copyright_docs).",
        value_name = "OUTPUT_DIR"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence progress messages and warnings."
    )]
    pub quiet: bool,
}
