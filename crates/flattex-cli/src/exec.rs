//! Subprocess invocation helpers.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::debug;

/// Run `program` with `args` in `cwd` and return its trimmed stdout.
///
/// A non-zero exit status is fatal; stderr is folded into the error message.
/// There are no retries anywhere in the workflow, so every caller treats a
/// failure here as terminal.
pub fn capture(program: &str, args: &[&str], cwd: &Path) -> Result<String> {
    debug!(program, ?args, "running command");
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .with_context(|| format!("failed to run {}", program))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "{} {} failed ({}): {}",
            program,
            args.join(" "),
            output.status,
            stderr.trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
