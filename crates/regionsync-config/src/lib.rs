//! Shared configuration for the regionsync tools.
//!
//! Values are layered by `ortho_config`: built-in defaults, then a TOML file
//! (`--config-path` or `REGIONSYNC_CONFIG_PATH`), then `REGIONSYNC_*`
//! environment variables, then command-line flags.

mod defaults;
mod line_ending;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, default_line_ending, default_log_filter, default_log_filter_string,
    default_log_format,
};
pub use line_ending::{LineEndingPolicy, LineEndingPolicyParseError};
pub use logging::{LogFormat, LogFormatParseError};

/// Command-line flags understood by the configuration loader.
///
/// Flags must precede the subcommand; everything from the first other token
/// onwards belongs to the command parser.
pub const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--line-ending",
];

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "REGIONSYNC")]
pub struct Config {
    /// `tracing` filter directive for diagnostics on stderr.
    #[serde(default = "default_log_filter_string")]
    log_filter: String,
    /// Output format for diagnostics on stderr.
    #[serde(default = "default_log_format")]
    log_format: LogFormat,
    /// Terminator written after inserted markers.
    #[serde(default = "default_line_ending")]
    line_ending: LineEndingPolicy,
}

impl Config {
    /// Returns the `tracing` filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the line ending policy for fixes.
    #[must_use]
    pub const fn line_ending(&self) -> LineEndingPolicy {
        self.line_ending
    }

    /// Returns a copy with the line ending policy replaced.
    #[must_use]
    pub const fn with_line_ending(mut self, line_ending: LineEndingPolicy) -> Self {
        self.line_ending = line_ending;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            line_ending: default_line_ending(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("COMPACT", LogFormat::Compact)]
    fn log_format_parses_case_insensitively(#[case] input: &str, #[case] expected: LogFormat) {
        assert_eq!(LogFormat::from_str(input).expect("parse"), expected);
    }

    #[rstest]
    #[case("auto", LineEndingPolicy::Auto)]
    #[case("lf", LineEndingPolicy::Lf)]
    #[case("CrLf", LineEndingPolicy::Crlf)]
    fn line_ending_policy_parses_case_insensitively(
        #[case] input: &str,
        #[case] expected: LineEndingPolicy,
    ) {
        assert_eq!(LineEndingPolicy::from_str(input).expect("parse"), expected);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(LineEndingPolicy::from_str("cr").is_err());
    }

    #[test]
    fn policies_display_in_snake_case() {
        assert_eq!(LineEndingPolicy::Crlf.to_string(), "crlf");
        assert_eq!(LogFormat::Compact.to_string(), "compact");
    }

    #[test]
    fn defaults_are_quiet_and_follow_the_source() {
        let config = Config::default();
        assert_eq!(config.log_filter(), "warn");
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert_eq!(config.line_ending(), LineEndingPolicy::Auto);
        let forced = config.with_line_ending(LineEndingPolicy::Lf);
        assert_eq!(forced.line_ending(), LineEndingPolicy::Lf);
    }
}
