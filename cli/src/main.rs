mod commands;
mod terminal;

use commands::{CommandLine, Commands, host, hosts, plugins, preferences};
use nessusfile_common::config::Config;
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet)?;

    let cfg = Config {
        quiet: commands.quiet,
        no_banner: commands.no_banner,
    };

    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command {
        Commands::Hosts { file } => hosts::hosts(&file, &cfg),
        Commands::Host {
            file,
            name,
            min_severity,
        } => host::host(&file, &name, min_severity, &cfg),
        Commands::Plugins { file, min_severity } => plugins::plugins(&file, min_severity, &cfg),
        Commands::Preferences { file } => preferences::preferences(&file, &cfg),
    }
}
