use clap::{Parser, Subcommand};

/// Job queue dashboard: JSON API over the `jobs` table plus a static UI
#[derive(Debug, Parser)]
#[command(name = "jobdash", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Bootstrap the schema, then serve HTTP (default)
    Serve,
    /// Create the schema and seed demo rows if the table is empty, then exit
    Bootstrap,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::try_parse_from(["jobdash"]).unwrap();
        assert_eq!(cli.command(), Command::Serve);
    }

    #[test]
    fn bootstrap_subcommand_parses() {
        let cli = Cli::try_parse_from(["jobdash", "bootstrap"]).unwrap();
        assert_eq!(cli.command(), Command::Bootstrap);
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["jobdash", "migrate"]).is_err());
    }
}
