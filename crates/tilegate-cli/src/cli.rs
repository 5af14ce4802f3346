use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tilegate",
    about = "tilegate: byte-range aware tile proxy",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start serving objects over HTTP
    Serve(ServeArgs),
    /// Load and validate a configuration file, then print the effective settings
    CheckConfig(CheckConfigArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on (overrides the config file)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Serve files below this directory (overrides the config file's store)
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// Route prefix for objects (overrides the config file)
    #[arg(long)]
    pub prefix: Option<String>,
}

#[derive(Args)]
pub struct CheckConfigArgs {
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_serve_overrides() {
        let cli = Cli::parse_from([
            "tilegate", "serve", "--bind", "0.0.0.0:9000", "--root", "/srv/tiles", "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.bind.unwrap().port(), 9000);
                assert_eq!(args.root.unwrap(), PathBuf::from("/srv/tiles"));
                assert!(args.config.is_none());
            }
            Command::CheckConfig(_) => panic!("expected serve"),
        }
    }

    #[test]
    fn parse_check_config() {
        let cli = Cli::parse_from(["tilegate", "check-config", "tilegate.toml"]);
        assert!(matches!(cli.command, Command::CheckConfig(a) if a.config == PathBuf::from("tilegate.toml")));
    }
}
