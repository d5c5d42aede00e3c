//! Command-line runtime for regionsync.
//!
//! The runtime owns argument parsing, configuration bootstrapping and the
//! `check` / `fix` commands. It is exercised both from the binary entrypoint
//! and from tests where configuration loading and IO streams can be
//! substituted.
//!
//! Exit codes: `0` success, `1` violations found by `check`, `2` errors.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use regionsync_config::Config;
use regionsync_engine::{Diagnostic, FileDiagnostic, FileFix, RegionLint};
use serde::Serialize;
use tracing::info;

mod cli;
mod config;
mod discovery;
mod errors;
mod telemetry;

use cli::{Cli, CliCommand};
pub use cli::{OutputFormat, ResolvedOutputFormat};
use config::{ConfigArgumentSplit, split_config_arguments, sync_options};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
use discovery::collect_sources;
use errors::AppError;

/// Exit code reported by `check` when violations were found.
const EXIT_VIOLATIONS: u8 = 1;
/// Exit code reported for usage, configuration and IO failures.
const EXIT_ERROR: u8 = 2;

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E, stdout_is_terminal: bool) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }

    pub(crate) const fn stdout_is_terminal(&self) -> bool {
        self.stdout_is_terminal
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E, stdout_is_terminal: bool) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr, stdout_is_terminal);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
#[must_use]
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner { io, loader }.run(args)
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    args.first()
        .into_iter()
        .chain(args.get(split.command_start..).unwrap_or_default())
        .cloned()
        .collect()
}

struct CliRunner<'a, 'io, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'io, W, E>,
    loader: &'a L,
}

impl<W, E, L> CliRunner<'_, '_, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);
        let cli_arguments = prepare_cli_arguments(&args, &split);

        let cli = match Cli::try_parse_from(cli_arguments) {
            Ok(cli) => cli,
            // Help and version requests render to stdout and succeed.
            Err(error) if !error.use_stderr() => {
                let _ = write!(self.io.stdout, "{error}");
                return ExitCode::SUCCESS;
            }
            Err(error) => return self.fail(&AppError::CliUsage(error)),
        };

        let result = self
            .loader
            .load(&split.config_arguments)
            .and_then(|config| {
                telemetry::initialise(&config)?;
                Ok(config)
            })
            .and_then(|config| self.execute(cli.command, &config));

        match result {
            Ok(exit_code) => exit_code,
            Err(error) => self.fail(&error),
        }
    }

    fn fail(&mut self, error: &AppError) -> ExitCode {
        let _ = writeln!(self.io.stderr, "{error}");
        ExitCode::from(EXIT_ERROR)
    }

    fn execute(&mut self, command: CliCommand, config: &Config) -> Result<ExitCode, AppError> {
        let lint = RegionLint::with_options(sync_options(config));
        match command {
            CliCommand::Check { output, paths } => {
                let format = output.resolve(self.io.stdout_is_terminal());
                self.check(&lint, &paths, format)
            }
            CliCommand::Fix { dry_run, paths } => self.fix(&lint, &paths, dry_run),
        }
    }

    fn check(
        &mut self,
        lint: &RegionLint,
        paths: &[PathBuf],
        format: ResolvedOutputFormat,
    ) -> Result<ExitCode, AppError> {
        let sources = collect_sources(paths)?;
        let mut violations = 0usize;
        for path in &sources {
            let content = read_source(path)?;
            let diagnostics = lint
                .check_file(path, &content)
                .map_err(|source| AppError::Region {
                    path: path.clone(),
                    source,
                })?;
            violations += diagnostics.len();
            for diagnostic in &diagnostics {
                render_diagnostic(&mut *self.io.stdout, diagnostic, format)?;
            }
        }
        info!(files = sources.len(), violations, "check finished");

        if violations == 0 {
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::from(EXIT_VIOLATIONS))
        }
    }

    fn fix(
        &mut self,
        lint: &RegionLint,
        paths: &[PathBuf],
        dry_run: bool,
    ) -> Result<ExitCode, AppError> {
        let sources = collect_sources(paths)?;
        let mut changed = 0usize;
        for path in &sources {
            let content = read_source(path)?;
            let fixed = lint
                .fix_file(path, &content)
                .map_err(|source| AppError::Region {
                    path: path.clone(),
                    source,
                })?;
            for failure in &fixed.failures {
                writeln!(self.io.stderr, "{}: skipped: {failure}", path.display())?;
            }
            if !fixed.has_changes() {
                continue;
            }
            changed += 1;
            if dry_run {
                writeln!(
                    self.io.stdout,
                    "would fix {}: {}",
                    path.display(),
                    summarise(&fixed)
                )?;
            } else {
                fs::write(path, &fixed.text).map_err(|source| AppError::WriteSource {
                    path: path.clone(),
                    source,
                })?;
                writeln!(self.io.stdout, "fixed {}: {}", path.display(), summarise(&fixed))?;
            }
        }
        info!(files = sources.len(), changed, dry_run, "fix finished");
        Ok(ExitCode::SUCCESS)
    }
}

fn read_source(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::ReadSource {
        path: path.to_path_buf(),
        source,
    })
}

/// One line of `check --output json`.
#[derive(Serialize)]
struct DiagnosticRecord<'a> {
    path: String,
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
}

fn render_diagnostic<W: Write>(
    out: &mut W,
    entry: &FileDiagnostic,
    format: ResolvedOutputFormat,
) -> Result<(), AppError> {
    match format {
        ResolvedOutputFormat::Human => writeln!(out, "{entry}")?,
        ResolvedOutputFormat::Json => {
            let record = DiagnosticRecord {
                path: entry.path.display().to_string(),
                diagnostic: &entry.diagnostic,
            };
            serde_json::to_writer(&mut *out, &record).map_err(AppError::SerialiseDiagnostic)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn summarise(fixed: &FileFix) -> String {
    let mut parts = Vec::with_capacity(2);
    if !fixed.renamed.is_empty() {
        parts.push(format!("renamed {}", fixed.renamed.join(", ")));
    }
    if !fixed.inserted.is_empty() {
        parts.push(format!("inserted {}", fixed.inserted.join(", ")));
    }
    parts.join("; ")
}

#[cfg(test)]
mod tests;
