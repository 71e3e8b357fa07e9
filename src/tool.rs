//! Thin wrappers around external command-line tools.

use std::ffi::OsStr;
use std::process::{Command, Stdio};

use crate::foundation::error::{ShortsError, ShortsResult};

/// `true` when `program -version` runs and exits successfully.
pub fn is_available(program: &str) -> bool {
    Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Run `program` to completion, returning its stdout.
///
/// Spawn failures and non-zero exits become [`ShortsError::ExternalTool`] carrying the trimmed
/// stderr.
pub fn run<I, S>(program: &str, args: I) -> ShortsResult<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    tracing::debug!(?cmd, "running external tool");

    let out = cmd.output().map_err(|e| {
        ShortsError::external_tool(format!(
            "failed to spawn {program} (is it installed and on PATH?): {e}"
        ))
    })?;
    if !out.status.success() {
        return Err(ShortsError::external_tool(format!(
            "{program} exited with status {}: {}",
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}

#[cfg(test)]
#[path = "../tests/unit/tool.rs"]
mod tests;
