//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Command running `subcommand` against the build fixture.
pub fn fixture_cmd(subcommand: &str) -> Command {
  let mut cmd = cargo_bin_cmd!("rulebind");
  cmd.arg(subcommand).arg(fixture_path("build.json"));
  cmd
}

/// Run `cmd` with JSON output and parse stdout.
pub fn json_output(mut cmd: Command) -> serde_json::Value {
  let output = cmd.arg("--output").arg("json").output().unwrap();
  assert!(
    output.status.success(),
    "command failed: {}",
    String::from_utf8_lossy(&output.stderr)
  );
  serde_json::from_slice(&output.stdout).unwrap()
}
