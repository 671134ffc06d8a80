use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use docsite_server::{DocServer, DocServerConfig};

use crate::config::DocsiteConfig;

pub fn make_subcommand() -> Command {
    super::add_site_args(Command::new("serve"))
        .about("Serve documents, rendering each request from disk")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .value_parser(clap::value_parser!(u16))
                .help("Port to serve on [default: 3000]"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Host to bind to [default: 127.0.0.1]"),
        )
        .arg(
            Arg::new("open")
                .long("open")
                .help("Open browser automatically")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-reload")
                .long("no-reload")
                .help("Disable live reload")
                .action(ArgAction::SetTrue),
        )
}

pub async fn execute(args: &ArgMatches) -> Result<()> {
    let config = DocsiteConfig::load(args)?;

    let server = DocServer::new(DocServerConfig {
        host: config.build.host.clone(),
        port: config.build.port,
        source_dir: config.source_dir(),
        theme_dir: config.theme_dir(),
        open: config.build.open,
        live_reload: config.build.reload,
        site: config.site.clone(),
        ..DocServerConfig::default()
    });

    server.run().await
}
