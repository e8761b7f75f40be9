//! rtelink - resolve internal links of rich-text XML documents.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    rtelink::logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Convert { args } => cli::convert::run_convert(&cli, args),
        Commands::Resolve { hrefs } => cli::convert::run_resolve(&cli, hrefs),
    }
}
