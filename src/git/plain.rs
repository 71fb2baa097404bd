use super::error::{GitError, Result};
use super::repository::Repository;
use super::runner::CommandRunner;
use tracing::warn;

/// Replace every newline-then-carriage-return pair, and any lone carriage
/// return, with a single newline
///
/// Note the order: a conventional `\r\n` becomes `\n\n`.
pub fn normalize_line_endings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\n' if chars.peek() == Some(&'\r') => {
                chars.next();
                out.push('\n');
            }
            '\r' => out.push('\n'),
            _ => out.push(c),
        }
    }
    out
}

/// Run a bare `git status` and return its human-readable report
///
/// On failure the error still carries the captured text, normalized the same
/// way, so callers can display whatever git printed.
pub fn plain_status(
    runner: &dyn CommandRunner,
    program: &str,
    repo: &Repository,
) -> Result<String> {
    match runner.run(repo.path(), program, &["status"]) {
        Ok(out) => Ok(normalize_line_endings(&out)),
        Err(GitError::CommandFailed {
            program,
            args,
            reason,
            output,
        }) => {
            warn!(repo = %repo.path().display(), %reason, "plain status failed");
            Err(GitError::CommandFailed {
                program,
                args,
                reason,
                output: normalize_line_endings(&output),
            })
        }
        Err(e) => {
            warn!(repo = %repo.path().display(), error = %e, "plain status failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[derive(Debug)]
    struct CannedRunner(std::result::Result<&'static str, &'static str>);

    impl CommandRunner for CannedRunner {
        fn run(&self, _dir: &Path, program: &str, args: &[&str]) -> Result<String> {
            assert_eq!(args, ["status"]);
            match self.0 {
                Ok(out) => Ok(out.to_string()),
                Err(out) => Err(GitError::CommandFailed {
                    program: program.to_string(),
                    args: args.join(" "),
                    reason: "exit status: 128".to_string(),
                    output: out.to_string(),
                }),
            }
        }
    }

    fn repo() -> Repository {
        Repository::at("/repo").unwrap()
    }

    #[test]
    fn test_normalize_newline_carriage_return() {
        assert_eq!(normalize_line_endings("a\n\rb\n\r"), "a\nb\n");
    }

    #[test]
    fn test_normalize_lone_carriage_return() {
        assert_eq!(
            normalize_line_endings("Refreshing 50%\rRefreshing 100%\n"),
            "Refreshing 50%\nRefreshing 100%\n"
        );
    }

    #[test]
    fn test_normalize_crlf_is_not_collapsed() {
        assert_eq!(normalize_line_endings("a\r\nb"), "a\n\nb");
    }

    #[test]
    fn test_normalize_plain_text_untouched() {
        let text = "On branch main\nnothing to commit, working tree clean\n";
        assert_eq!(normalize_line_endings(text), text);
    }

    #[test]
    fn test_plain_status_success() {
        let runner = CannedRunner(Ok("On branch main\n\rclean\n"));
        let text = plain_status(&runner, "git", &repo()).unwrap();
        assert_eq!(text, "On branch main\nclean\n");
    }

    #[test]
    fn test_plain_status_failure_keeps_output() {
        let runner = CannedRunner(Err("fatal: not a git repository\n\r"));
        let err = plain_status(&runner, "git", &repo()).unwrap_err();

        assert_eq!(err.captured_output(), Some("fatal: not a git repository\n"));
    }

    #[test]
    fn test_plain_status_failure_with_no_output() {
        let runner = CannedRunner(Err(""));
        let err = plain_status(&runner, "git", &repo()).unwrap_err();
        assert_eq!(err.captured_output(), Some(""));
    }
}
