use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pcltoggle::error::Result;
use pcltoggle::result::ToggleMode;

#[derive(Parser)]
#[command(
    name = "pcltoggle",
    about = "Enable or disable Xamarin PCL profiles by renaming their metadata files",
    version
)]
pub struct Cli {
    /// SDK root to operate on (overrides PCLTOGGLE_ROOT and the config file)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Clone, Copy)]
pub struct RunArgs {
    /// List what would be renamed without touching anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show whether profiles can currently be enabled or disabled
    Status,

    /// Rename Xamarin.*.xml to Xamarin.*.xml.disabled
    Disable(RunArgs),

    /// Rename Xamarin.*.xml.disabled back to Xamarin.*.xml
    Enable(RunArgs),

    /// Run the given mode ("enable" or "disable")
    Toggle {
        /// Mode to run
        mode: String,

        #[command(flatten)]
        run: RunArgs,
    },
}

impl Command {
    /// The requested mode and run flags, or `None` for `status`.
    pub fn run_target(&self) -> Option<(Result<ToggleMode>, RunArgs)> {
        match self {
            Command::Status => None,
            Command::Disable(run) => Some((Ok(ToggleMode::Disable), *run)),
            Command::Enable(run) => Some((Ok(ToggleMode::Enable), *run)),
            Command::Toggle { mode, run } => Some((mode.parse(), *run)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pcltoggle", "disable", "--root", "/sdk", "--dry-run"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/sdk")));
        let (mode, run) = cli.command.run_target().unwrap();
        assert_eq!(mode.unwrap(), ToggleMode::Disable);
        assert!(run.dry_run);
    }

    #[test]
    fn toggle_mode_is_validated_by_parse() {
        let cli = Cli::try_parse_from(["pcltoggle", "toggle", "sideways"]).unwrap();
        let (mode, _) = cli.command.run_target().unwrap();
        assert!(mode.is_err());
    }

    #[test]
    fn status_has_no_run_target() {
        let cli = Cli::try_parse_from(["pcltoggle", "status"]).unwrap();
        assert!(cli.command.run_target().is_none());
    }
}
