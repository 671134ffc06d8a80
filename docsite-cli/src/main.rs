mod cmd;
mod config;
mod logging;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};

fn cli() -> Command {
    Command::new("docsite")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render a directory of markdown course notes as a documentation site")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v debug, -vv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(cmd::build::make_subcommand())
        .subcommand(cmd::serve::make_subcommand())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    logging::init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("build", args)) => cmd::build::execute(args),
        Some(("serve", args)) => cmd::serve::execute(args).await,
        _ => unreachable!("clap requires a subcommand"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn test_serve_flags_parse() {
        let matches = cli()
            .try_get_matches_from(["docsite", "-v", "serve", "--port", "4000", "--no-reload"])
            .unwrap();

        assert_eq!(matches.get_count("verbose"), 1);
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "serve");
        assert_eq!(args.get_one::<u16>("port"), Some(&4000));
        assert!(args.get_flag("no-reload"));
    }

    #[test]
    fn test_build_rejects_serve_flags() {
        assert!(
            cli()
                .try_get_matches_from(["docsite", "build", "--port", "4000"])
                .is_err()
        );
    }
}
