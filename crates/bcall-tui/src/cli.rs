//! CLI argument parsing for bcall-tui.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bcall-tui")]
#[command(about = "Keyboard-first bookmark picker for a notes vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Vault root (overrides the configured one)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Config file (defaults to the XDG config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (logs to the temp dir as bcall-tui.log)
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Paged picker with shortcut keys (default)
    Caller,

    /// Fuzzy search over bookmarks
    Search,

    /// Print the bookmarks file
    Dump {
        /// Copy to the clipboard instead of printing
        #[arg(long)]
        copy: bool,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Change one setting, e.g. `caller.backKey Delete`
    Set { field: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_command() {
        let cli = Cli::try_parse_from(["bcall-tui"]).unwrap();
        assert_eq!(cli.command, None);
        assert!(!cli.debug);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["bcall-tui", "search", "--vault", "/notes", "--debug"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Search));
        assert_eq!(cli.vault, Some(PathBuf::from("/notes")));
        assert!(cli.debug);
    }

    #[test]
    fn test_config_set() {
        let cli =
            Cli::try_parse_from(["bcall-tui", "config", "set", "caller.backKey", "Delete"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Set {
                    field: "caller.backKey".into(),
                    value: "Delete".into(),
                }
            })
        );
    }

    #[test]
    fn test_dump_copy() {
        let cli = Cli::try_parse_from(["bcall-tui", "dump", "--copy"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Dump { copy: true }));
    }
}
