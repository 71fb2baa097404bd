use super::entry::FileEntry;
use super::error::Result;
use super::parser::parse_short_status;
use super::repository::Repository;
use super::runner::CommandRunner;
use super::status::StatusProvider;
use std::sync::Arc;
use tracing::{debug, warn};

/// Returned by [`short_status`] when the git invocation fails
pub const PLACEHOLDER: &str = "?";

/// Untracked option used by the process backend
pub const UNTRACKED_ALL: &str = "--untracked-files=all";

/// Run `git status <untracked_option> --short` in the working tree
///
/// This is a best-effort probe: if git cannot be run the failure is logged
/// and [`PLACEHOLDER`] is returned instead of an error.
pub fn short_status(
    runner: &dyn CommandRunner,
    program: &str,
    repo: &Repository,
    untracked_option: &str,
) -> String {
    let args = ["status", untracked_option, "--short"];
    match runner.run(repo.path(), program, &args) {
        Ok(out) => out,
        Err(e) => {
            warn!(repo = %repo.path().display(), error = %e, "short status failed");
            PLACEHOLDER.to_string()
        }
    }
}

/// Status backend that shells out to the git executable
#[derive(Debug, Clone)]
pub struct ProcessStatus {
    runner: Arc<dyn CommandRunner>,
    program: String,
    untracked_option: String,
}

impl ProcessStatus {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            program: "git".to_string(),
            untracked_option: UNTRACKED_ALL.to_string(),
        }
    }

    /// Use a different git executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Pass a different `--untracked-files` option
    pub fn with_untracked_option(mut self, option: impl Into<String>) -> Self {
        self.untracked_option = option.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl StatusProvider for ProcessStatus {
    fn compute_status(&self, repo: &Repository) -> Result<Vec<FileEntry>> {
        let text = short_status(
            self.runner.as_ref(),
            &self.program,
            repo,
            &self.untracked_option,
        );
        let entries = parse_short_status(repo.path(), &text);
        debug!(count = entries.len(), "parsed short status");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::error::GitError;
    use std::path::Path;
    use std::sync::Mutex;

    /// Records invocations and replays a canned response
    #[derive(Debug)]
    struct FakeRunner {
        response: std::result::Result<String, String>,
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl FakeRunner {
        fn ok(out: &str) -> Self {
            Self {
                response: Ok(out.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(output: &str) -> Self {
            Self {
                response: Err(output.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, _dir: &Path, program: &str, args: &[&str]) -> Result<String> {
            self.calls.lock().unwrap().push((
                program.to_string(),
                args.iter().map(|a| a.to_string()).collect(),
            ));
            match &self.response {
                Ok(out) => Ok(out.clone()),
                Err(output) => Err(GitError::CommandFailed {
                    program: program.to_string(),
                    args: args.join(" "),
                    reason: "exit status: 128".to_string(),
                    output: output.clone(),
                }),
            }
        }
    }

    fn repo() -> Repository {
        Repository::at("/repo").unwrap()
    }

    #[test]
    fn test_short_status_arguments() {
        let runner = FakeRunner::ok("");
        short_status(&runner, "git", &repo(), "--untracked-files=no");

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "git");
        assert_eq!(calls[0].1, vec!["status", "--untracked-files=no", "--short"]);
    }

    #[test]
    fn test_short_status_failure_returns_placeholder() {
        let runner = FakeRunner::failing("fatal: not a git repository");
        let out = short_status(&runner, "git", &repo(), UNTRACKED_ALL);
        assert_eq!(out, PLACEHOLDER);
    }

    #[test]
    fn test_provider_uses_untracked_all() {
        let runner = Arc::new(FakeRunner::ok(" M a.txt\n"));
        let provider = ProcessStatus::new(runner.clone());

        let entries = provider.compute_status(&repo()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].abs_path, Path::new("/repo/a.txt"));

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls[0].1, vec!["status", UNTRACKED_ALL, "--short"]);
    }

    #[test]
    fn test_provider_degrades_to_empty_on_failure() {
        let provider = ProcessStatus::new(Arc::new(FakeRunner::failing("")));
        let entries = provider.compute_status(&repo()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_custom_program() {
        let runner = Arc::new(FakeRunner::ok(""));
        let provider = ProcessStatus::new(runner.clone()).with_program("/usr/local/bin/git");
        provider.compute_status(&repo()).unwrap();

        assert_eq!(provider.program(), "/usr/local/bin/git");
        assert_eq!(runner.calls.lock().unwrap()[0].0, "/usr/local/bin/git");
    }
}
