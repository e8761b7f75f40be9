//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Resolve internal links of rich-text XML documents
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (site mapping and site base URLs)
    #[arg(short = 'C', long, global = true, default_value = "rtelink.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Repository fixture with locations and content items
    #[arg(short = 'R', long, global = true, default_value = "repository.toml", value_hint = clap::ValueHint::FilePath)]
    pub repository: PathBuf,

    /// Name of the site handling the request
    #[arg(short, long, global = true)]
    pub site: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve the links of a rich-text XML document
    #[command(visible_alias = "c")]
    Convert {
        #[command(flatten)]
        args: ConvertArgs,
    },

    /// Resolve single link targets and print the result
    #[command(visible_alias = "r")]
    Resolve {
        /// Link targets, e.g. `location://42#intro`
        #[arg(required = true)]
        hrefs: Vec<String>,
    },
}

/// Convert command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Input document. Use `-` to read from stdin.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
