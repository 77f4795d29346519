//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};

/// gitty - Git policy CLI to enforce team workflows
#[derive(Parser, Debug)]
#[command(name = "gitty")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors (command output is still printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show gitty version information
    Version(VersionArgs),

    /// Check for updates and update gitty to the latest version
    Update(UpdateArgs),
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Check for updates only
    #[arg(long)]
    pub check: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Release index to query instead of the configured one
    #[arg(long, value_name = "URL")]
    pub index_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_flags() {
        let cli = Cli::try_parse_from([
            "gitty",
            "update",
            "--check",
            "-y",
            "--index-url",
            "http://localhost:8080/latest",
        ])
        .unwrap();

        match cli.command {
            Commands::Update(args) => {
                assert!(args.check);
                assert!(args.yes);
                assert_eq!(
                    args.index_url.as_deref(),
                    Some("http://localhost:8080/latest")
                );
            }
            other => panic!("Expected update command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_verbosity_after_subcommand() {
        let cli = Cli::try_parse_from(["gitty", "version", "-vv", "--json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
        assert!(matches!(cli.command, Commands::Version(VersionArgs { json: true })));
    }

    #[test]
    fn test_quiet_help_describes_log_level() {
        let cmd = Cli::command();
        let quiet = cmd
            .get_arguments()
            .find(|arg| arg.get_id() == "quiet")
            .unwrap();
        let help = quiet.get_help().unwrap().to_string();
        assert!(help.starts_with("Only log errors"), "help was {:?}", help);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["gitty"]).is_err());
    }
}
