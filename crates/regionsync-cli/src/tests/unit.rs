use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use insta::assert_snapshot;
use regionsync_config::{Config, LineEndingPolicy};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use crate::errors::AppError;
use crate::{ConfigLoader, IoStreams, run_with_loader};

const UNWRAPPED: &str = "class Widget\n{\n    public void Run() { }\n}\n";
const WRAPPED: &str = "class Widget\n{\n    #region +Run\n    public void Run() { }\n    #endregion\n}\n";

struct StaticLoader(Config);

impl ConfigLoader for StaticLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.0.clone())
    }
}

struct Outcome {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

fn run_cli(loader: &StaticLoader, args: &[&str]) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit = {
        let mut io = IoStreams::new(&mut stdout, &mut stderr, false);
        let argv = std::iter::once("regionsync")
            .chain(args.iter().copied())
            .map(OsString::from);
        run_with_loader(argv, &mut io, loader)
    };
    Outcome {
        exit,
        stdout: String::from_utf8(stdout).expect("utf8 stdout"),
        stderr: String::from_utf8(stderr).expect("utf8 stderr"),
    }
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf8 path")
}

/// Replaces the temporary directory in `output` so snapshots stay stable.
fn masked(output: &str, root: &Path) -> String {
    output.trim_end().replace(path_arg(root), "<tmp>")
}

#[fixture]
fn loader() -> StaticLoader {
    StaticLoader(Config::default())
}

#[fixture]
fn workspace() -> TempDir {
    TempDir::new().expect("temp dir")
}

#[rstest]
fn clean_sources_pass_check(loader: StaticLoader, workspace: TempDir) {
    fs::write(workspace.path().join("Widget.cs"), WRAPPED).expect("write");
    let outcome = run_cli(&loader, &["check", path_arg(workspace.path())]);
    assert_eq!(outcome.exit, ExitCode::SUCCESS, "{}", outcome.stderr);
    assert!(outcome.stdout.is_empty());
}

#[rstest]
fn violations_are_listed_for_humans(loader: StaticLoader, workspace: TempDir) {
    let file = workspace.path().join("Widget.cs");
    fs::write(&file, UNWRAPPED).expect("write");
    let outcome = run_cli(&loader, &["check", "--output", "human", path_arg(&file)]);
    assert_eq!(outcome.exit, ExitCode::from(1));
    assert_snapshot!(
        masked(&outcome.stdout, workspace.path()),
        @"<tmp>/Widget.cs:3:17: warning[RegionTogether]: 'Run' is not wrapped in a region; expected '#region +Run'"
    );
}

#[rstest]
fn redirected_output_defaults_to_json_lines(loader: StaticLoader, workspace: TempDir) {
    let file = workspace.path().join("Widget.cs");
    fs::write(&file, UNWRAPPED).expect("write");
    let outcome = run_cli(&loader, &["check", path_arg(&file)]);
    assert_eq!(outcome.exit, ExitCode::from(1));

    assert_eq!(outcome.stdout.lines().count(), 1);
    assert_snapshot!(
        masked(&outcome.stdout, workspace.path()),
        @r#"{"path":"<tmp>/Widget.cs","id":"RegionTogether","category":"Comment","severity":"warning","identifier":"Run","expected":"+Run","found":null,"line":3,"column":17}"#
    );
}

#[rstest]
fn fix_rewrites_files_in_place(loader: StaticLoader, workspace: TempDir) {
    let file = workspace.path().join("Widget.cs");
    fs::write(&file, UNWRAPPED).expect("write");
    let outcome = run_cli(&loader, &["fix", path_arg(workspace.path())]);
    assert_eq!(outcome.exit, ExitCode::SUCCESS, "{}", outcome.stderr);
    assert_snapshot!(masked(&outcome.stdout, workspace.path()), @"fixed <tmp>/Widget.cs: inserted Run");
    assert_eq!(fs::read_to_string(&file).expect("read"), WRAPPED);

    let recheck = run_cli(&loader, &["check", path_arg(&file)]);
    assert_eq!(recheck.exit, ExitCode::SUCCESS);
}

#[rstest]
fn dry_run_leaves_files_alone(loader: StaticLoader, workspace: TempDir) {
    let file = workspace.path().join("Widget.cs");
    let stale = WRAPPED.replace("+Run", "Run");
    fs::write(&file, &stale).expect("write");
    let outcome = run_cli(&loader, &["fix", "--dry-run", path_arg(&file)]);
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_snapshot!(masked(&outcome.stdout, workspace.path()), @"would fix <tmp>/Widget.cs: renamed Run");
    assert_eq!(fs::read_to_string(&file).expect("read"), stale);
}

#[rstest]
fn configured_line_ending_reaches_inserted_markers(workspace: TempDir) {
    let loader = StaticLoader(Config::default().with_line_ending(LineEndingPolicy::Crlf));
    let file = workspace.path().join("Widget.cs");
    fs::write(&file, UNWRAPPED).expect("write");
    let outcome = run_cli(&loader, &["fix", path_arg(&file)]);
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(
        fs::read_to_string(&file).expect("read"),
        "class Widget\n{\n    #region +Run\r\n    public void Run() { }\n    #endregion\r\n}\n"
    );
}

#[rstest]
fn missing_path_is_an_error(loader: StaticLoader, workspace: TempDir) {
    let missing = workspace.path().join("Gone.cs");
    let outcome = run_cli(&loader, &["check", path_arg(&missing)]);
    assert_eq!(outcome.exit, ExitCode::from(2));
    assert!(outcome.stderr.starts_with("cannot access"), "{}", outcome.stderr);
}

#[rstest]
#[case(&[])]
#[case(&["check"])]
#[case(&["lint", "src"])]
fn usage_errors_exit_with_two(loader: StaticLoader, #[case] args: &[&str]) {
    let outcome = run_cli(&loader, args);
    assert_eq!(outcome.exit, ExitCode::from(2));
    assert!(!outcome.stderr.is_empty());
}

#[rstest]
fn help_goes_to_stdout(loader: StaticLoader) {
    let outcome = run_cli(&loader, &["--help"]);
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("check"));
    assert!(outcome.stdout.contains("fix"));
}
