//! CLI argument definitions for regionsync.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format selection for `check`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// One readable line per violation.
    Human,
    /// One JSON object per violation and line.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// One readable line per violation.
    Human,
    /// One JSON object per violation and line.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto if stdout_is_terminal => ResolvedOutputFormat::Human,
            Self::Auto | Self::Json => ResolvedOutputFormat::Json,
            Self::Human => ResolvedOutputFormat::Human,
        }
    }
}

/// Checks that C# methods and properties sit in correctly named regions.
///
/// Configuration flags (`--config-path`, `--log-filter`, `--log-format`,
/// `--line-ending`) go before the subcommand.
#[derive(Parser, Debug)]
#[command(name = "regionsync", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Reports members that are not wrapped in their canonical region.
    Check {
        /// Controls how violations are rendered.
        #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
        output: OutputFormat,
        /// Files or directories to check; directories are searched for `*.cs`.
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },
    /// Wraps or renames regions in place.
    Fix {
        /// Reports what would change without writing any file.
        #[arg(long)]
        dry_run: bool,
        /// Files or directories to fix; directories are searched for `*.cs`.
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OutputFormat::Auto, true, ResolvedOutputFormat::Human)]
    #[case(OutputFormat::Auto, false, ResolvedOutputFormat::Json)]
    #[case(OutputFormat::Human, false, ResolvedOutputFormat::Human)]
    #[case(OutputFormat::Json, true, ResolvedOutputFormat::Json)]
    fn output_format_resolution(
        #[case] format: OutputFormat,
        #[case] terminal: bool,
        #[case] expected: ResolvedOutputFormat,
    ) {
        assert_eq!(format.resolve(terminal), expected);
    }

    #[test]
    fn fix_accepts_dry_run_and_several_paths() {
        let cli = Cli::try_parse_from(["regionsync", "fix", "--dry-run", "a.cs", "src"])
            .expect("parse");
        match cli.command {
            CliCommand::Fix { dry_run, paths } => {
                assert!(dry_run);
                assert_eq!(paths, [PathBuf::from("a.cs"), PathBuf::from("src")]);
            }
            CliCommand::Check { .. } => panic!("expected fix"),
        }
    }

    #[test]
    fn check_requires_a_path() {
        assert!(Cli::try_parse_from(["regionsync", "check"]).is_err());
    }
}
