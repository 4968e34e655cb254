//! CLI module for the user admin server

pub mod serve;

use clap::{Parser, Subcommand};

/// User admin - server-rendered user management pages
#[derive(Parser)]
#[command(name = "user-admin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve(serve::ServeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["user-admin"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_serve_with_config() {
        let cli = Cli::try_parse_from(["user-admin", "serve", "--config", "prod.toml"]).unwrap();

        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.config.as_deref(), Some(std::path::Path::new("prod.toml")))
            }
            None => panic!("expected serve"),
        }
    }
}
