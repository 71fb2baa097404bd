use super::error::{GitError, Result};
use std::path::Path;
use std::process::Command;

/// Runs an executable to completion and returns its standard output
///
/// On failure the returned [`GitError::CommandFailed`] carries whatever the
/// process printed, so callers can still show partial output.
pub trait CommandRunner: Send + Sync + std::fmt::Debug {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<String>;
}

/// Runs commands as blocking child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<String> {
        let failed = |reason: String, output: String| GitError::CommandFailed {
            program: program.to_string(),
            args: args.join(" "),
            reason,
            output,
        };

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| failed(e.to_string(), String::new()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let mut captured = stdout;
            captured.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(failed(output.status.to_string(), captured));
        }

        Ok(stdout)
    }
}
