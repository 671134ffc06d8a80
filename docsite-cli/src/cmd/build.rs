use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use docsite_core::build_site;
use tracing::info;

use crate::config::DocsiteConfig;

pub fn make_subcommand() -> Command {
    super::add_site_args(Command::new("build"))
        .about("Render every document to static HTML")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory for generated site [default: ./out]"),
        )
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let config = DocsiteConfig::load(args)?;

    let report = build_site(
        &config.site,
        &config.source_dir(),
        &config.output_dir(),
        &config.theme_dir(),
    )?;

    info!(
        pages = report.pages,
        "Site built successfully in {}",
        report.output_dir.display()
    );

    Ok(())
}
