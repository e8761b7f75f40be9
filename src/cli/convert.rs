//! `convert` and `resolve` commands.

use anyhow::{Context, Result};
use rtelink::{
    ConsoleLogger, LinkConfig, LinkConverter, MemoryRepository, SiteRouter, StaticSiteContext, log,
};
use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use super::{Cli, ConvertArgs};

/// Everything a converter borrows, loaded from the CLI paths.
pub struct Session {
    config: LinkConfig,
    repository: MemoryRepository,
    router: SiteRouter,
    site: StaticSiteContext,
}

impl Session {
    pub fn load(cli: &Cli) -> Result<Self> {
        let config = LinkConfig::from_path(&cli.config)
            .with_context(|| format!("Failed to load config `{}`", cli.config.display()))?;
        let repository = MemoryRepository::from_path(&cli.repository).with_context(|| {
            format!("Failed to load repository `{}`", cli.repository.display())
        })?;
        let router = SiteRouter::from_config(&config)?;

        let site = match &cli.site {
            Some(name) => {
                if !router.has_site(name) {
                    log!("warning"; "site `{}` has no base_url in {}", name, cli.config.display());
                }
                StaticSiteContext::new(name.as_str())
            }
            None => StaticSiteContext::none(),
        };

        Ok(Self {
            config,
            repository,
            router,
            site,
        })
    }

    pub fn converter(&self) -> Result<LinkConverter<'_>> {
        let converter = LinkConverter::new(
            &self.repository,
            &self.repository,
            &self.router,
            &self.site,
            &self.config,
        )?;
        Ok(converter.with_logger(&ConsoleLogger))
    }
}

/// Resolve the links of one document.
pub fn run_convert(cli: &Cli, args: &ConvertArgs) -> Result<()> {
    match &args.output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to write `{}`", path.display()))?;
            convert_to(cli, args, &mut file)?;
            log!("convert"; "wrote {}", path.display());
        }
        None => convert_to(cli, args, &mut io::stdout().lock())?,
    }
    Ok(())
}

/// Convert `args.input` and write only the resulting document to `out`.
fn convert_to(cli: &Cli, args: &ConvertArgs, out: &mut impl Write) -> Result<()> {
    let session = Session::load(cli)?;
    let converter = session.converter()?;

    let input = read_input(&args.input)?;
    let output = converter
        .convert_str(&input)
        .with_context(|| format!("Failed to convert `{}`", args.input.display()))?;

    out.write_all(output.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Print `href -> resolved` for each target.
pub fn run_resolve(cli: &Cli, hrefs: &[String]) -> Result<()> {
    let session = Session::load(cli)?;
    let converter = session.converter()?;

    for href in hrefs {
        let resolved = converter.resolve_href(href)?;
        println!("{href} -> {resolved}");
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read `{}`", path.display()))
}
