use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "listkeeper")]
#[command(version)]
#[command(about = "A session-backed todo list web server")]
#[command(long_about = "
listkeeper serves a small web application for keeping todo lists. Every
visitor gets their own lists, stored in a cookie-identified session.

Configuration is read from listkeeper.{toml,yaml,yml,json} in the user
configuration directory and the current directory, then from LISTKEEPER_*
environment variables, then from command line flags.

Example usage:
  listkeeper serve                        # Serve on 127.0.0.1:4567
  listkeeper serve --port 8080            # Serve on another port
  listkeeper --debug serve                # Serve with debug logging
  listkeeper config                       # Show the resolved configuration
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web server until interrupted
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,

        /// Extra configuration file, merged over discovered ones
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Print the resolved configuration as YAML
    Config {
        /// Extra configuration file, merged over discovered ones
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "listkeeper",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--debug",
        ])
        .unwrap();

        assert!(cli.debug);
        match cli.command {
            Commands::Serve { host, port, config } => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
                assert!(config.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_config_command() {
        let cli = Cli::try_parse_from(["listkeeper", "--quiet", "config", "-c", "x.toml"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Config { config: Some(path) } if path == PathBuf::from("x.toml")
        ));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["listkeeper"]).is_err());
        assert!(Cli::try_parse_from(["listkeeper", "serve", "--port", "abc"]).is_err());
    }
}
