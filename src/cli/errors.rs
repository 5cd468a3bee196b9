//! Failure rendering shared by argument parsing and command execution

use clap::error::ErrorKind;

use malha_core::error::{ExitCode, MalhaError};

use crate::cli::{Cli, OutputFormat};

/// Translate a clap failure into malha's taxonomy.
///
/// `None` for help and version output, which clap prints and exits on itself.
pub fn from_clap(err: &clap::Error) -> Option<MalhaError> {
    let message = clap_message(err);
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => None,
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::ArgumentConflict
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::MissingSubcommand
        | ErrorKind::NoEquals
        | ErrorKind::TooManyValues
        | ErrorKind::TooFewValues
        | ErrorKind::WrongNumberOfValues => Some(MalhaError::UsageError(message)),
        _ => Some(MalhaError::Other(message)),
    }
}

/// First line of clap's rendering without the `error: ` lead
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

/// Where a failure goes: a JSON envelope, a one-line message, or nowhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorReporter {
    json: bool,
    quiet: bool,
}

impl ErrorReporter {
    pub fn for_cli(cli: &Cli) -> Self {
        Self {
            json: cli.format == OutputFormat::Json,
            quiet: cli.quiet,
        }
    }

    /// Reporter for a command line clap could not parse; only `--format`
    /// is looked at
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut json = false;
        let mut expect_format = false;
        for arg in args {
            let arg = arg.as_ref();
            if expect_format {
                json = arg == "json";
                expect_format = false;
            } else if arg == "--format" {
                expect_format = true;
            } else if let Some(value) = arg.strip_prefix("--format=") {
                json = value == "json";
            }
        }
        Self { json, quiet: false }
    }

    pub fn wants_json(&self) -> bool {
        self.json
    }

    /// Text to put on stderr, if any
    pub fn render(&self, err: &MalhaError) -> Option<String> {
        if self.json {
            Some(err.to_json().to_string())
        } else if self.quiet {
            None
        } else {
            Some(format!("error: {err}"))
        }
    }

    /// Print the failure and hand back the process exit code
    pub fn report(&self, err: &MalhaError) -> ExitCode {
        if let Some(line) = self.render(err) {
            eprintln!("{line}");
        }
        err.exit_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse_failure(args: &[&str]) -> clap::Error {
        Cli::try_parse_from(args).unwrap_err()
    }

    #[test]
    fn test_bad_values_are_usage_errors() {
        let err = parse_failure(&["malha", "path", "e.csv", "a", "b", "--algorithm", "astar"]);
        let mapped = from_clap(&err).unwrap();
        assert_eq!(mapped.exit_code(), ExitCode::Usage);
        assert_eq!(mapped.error_type(), "usage_error");
        assert!(!mapped.to_string().contains('\n'));

        let missing = parse_failure(&["malha", "traverse", "e.csv"]);
        assert_eq!(from_clap(&missing).unwrap().exit_code(), ExitCode::Usage);
    }

    #[test]
    fn test_help_is_not_an_error() {
        let err = parse_failure(&["malha", "--help"]);
        assert!(from_clap(&err).is_none());
    }

    #[test]
    fn test_reporter_reads_format_from_raw_args() {
        assert!(ErrorReporter::from_args(["batch", "--format", "json"]).wants_json());
        assert!(ErrorReporter::from_args(["--format=json", "path"]).wants_json());
        assert!(!ErrorReporter::from_args(["--format", "human"]).wants_json());
        assert!(!ErrorReporter::from_args(["path", "json"]).wants_json());
    }

    #[test]
    fn test_render_follows_format_and_quiet() {
        let err = MalhaError::node_not_found("olinda");
        let human = ErrorReporter {
            json: false,
            quiet: false,
        };
        assert_eq!(
            human.render(&err).as_deref(),
            Some("error: node not found: olinda")
        );

        let quiet = ErrorReporter {
            json: false,
            quiet: true,
        };
        assert_eq!(quiet.render(&err), None);

        let json = ErrorReporter {
            json: true,
            quiet: true,
        };
        let rendered = json.render(&err).unwrap();
        let envelope: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(envelope["error"]["type"], "node_not_found");
        assert_eq!(envelope["error"]["code"], 3);
    }
}
