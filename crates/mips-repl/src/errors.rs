use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that end a REPL session.
///
/// Instruction errors never show up here; they are reported to the user and
/// the session goes on.
#[derive(Debug, Error)]
pub enum ReplError {
    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// The script file could not be opened.
    #[error("failed to open script {}: {source}", path.display())]
    Script {
        /// Path given on the command line.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use super::ReplError;

    #[test]
    fn script_error_names_the_path() {
        let error = ReplError::Script {
            path: PathBuf::from("prog.s"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };

        assert_eq!(error.to_string(), "failed to open script prog.s: missing");
    }

    #[test]
    fn io_errors_convert() {
        let error: ReplError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();

        assert!(matches!(error, ReplError::Io(_)));
    }
}
