//! Command execution primitives with consistent error handling.

use std::path::Path;
use std::process::Command;

/// Run a command in a directory, returning `None` on any failure.
///
/// Useful when command failure is expected/acceptable (e.g., querying a
/// branch outside a checkout). Missing executable, non-zero exit, and empty
/// output all collapse to `None`.
pub fn run_in_optional(dir: &Path, program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() {
        None
    } else {
        Some(stdout)
    }
}
