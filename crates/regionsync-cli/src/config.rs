//! Configuration loading helpers for the regionsync CLI.
//!
//! Leading configuration flags are split off for `ortho_config` so the
//! subcommand parser only sees the command tokens.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig;

use regionsync_config::{CONFIG_CLI_FLAGS, Config, LineEndingPolicy};
use regionsync_engine::SyncOptions;
use regionsync_syntax::LineEnding;

use crate::errors::AppError;

pub(crate) trait ConfigLoader {
    /// Loads configuration for the CLI.
    ///
    /// # Flag Ordering
    ///
    /// Configuration flags (listed in `CONFIG_CLI_FLAGS`) must appear before
    /// the subcommand. Later occurrences reach the subcommand parser, which
    /// rejects them.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, Copy)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

impl OrthoConfigLoader {
    fn process_config_flag(argument: &OsStr) -> FlagAction {
        let argument_text = argument.to_string_lossy();
        if !argument_text.starts_with("--") {
            return FlagAction::Skip;
        }

        let (flag, has_inline_value) = argument_text
            .split_once('=')
            .map_or((argument_text.as_ref(), false), |(flag, _)| (flag, true));

        if CONFIG_CLI_FLAGS.contains(&flag) {
            return FlagAction::Include {
                needs_value: !has_inline_value,
            };
        }

        FlagAction::Skip
    }
}

pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut consumed = 0usize;
    let mut pending_value = false;

    for argument in rest {
        if pending_value {
            config_arguments.push(argument.clone());
            consumed += 1;
            pending_value = false;
            continue;
        }

        match OrthoConfigLoader::process_config_flag(argument.as_os_str()) {
            FlagAction::Include { needs_value } => {
                config_arguments.push(argument.clone());
                consumed += 1;
                pending_value = needs_value;
            }
            FlagAction::Skip => break,
        }
    }

    ConfigArgumentSplit {
        config_arguments,
        command_start: consumed + 1,
    }
}

/// Translates the configured line ending policy for the engine.
pub(crate) const fn sync_options(config: &Config) -> SyncOptions {
    let line_ending = match config.line_ending() {
        LineEndingPolicy::Auto => None,
        LineEndingPolicy::Lf => Some(LineEnding::Lf),
        LineEndingPolicy::Crlf => Some(LineEnding::CrLf),
    };
    SyncOptions::new().with_line_ending(line_ending)
}
