pub mod build;
pub mod serve;

use clap::{Arg, Command};

/// Arguments shared by `build` and `serve`.
pub fn add_site_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("source")
                .short('s')
                .long("source")
                .value_name("DIR")
                .help("Content root containing markdown files [default: ./courses]"),
        )
        .arg(
            Arg::new("theme")
                .short('t')
                .long("theme")
                .value_name("DIR")
                .help("Theme directory overriding the built-in templates [default: ./theme]"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file [default: ./docsite.toml]"),
        )
}
