//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::FileNotFound { .. } => crate::exitcode::NOINPUT,
                    ApplicationError::Domain(DomainError::Parse { .. })
                    | ApplicationError::Domain(DomainError::EmptyOutline(_)) => {
                        crate::exitcode::DATAERR
                    }
                    ApplicationError::Write { .. } => crate::exitcode::CANTCREAT,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::Render { .. } => crate::exitcode::SOFTWARE,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "gone")
    }

    #[test]
    fn given_missing_input_when_mapping_exit_code_then_noinput() {
        let err = CliError::from(ApplicationError::FileNotFound {
            path: PathBuf::from("data/outline.json"),
            source: io_err(),
        });
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn given_parse_error_when_mapping_exit_code_then_dataerr() {
        let err = CliError::from(ApplicationError::Domain(DomainError::Parse {
            path: PathBuf::from("x.json"),
            message: "invalid type".into(),
        }));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_write_error_when_mapping_exit_code_then_cantcreat() {
        let err = CliError::from(ApplicationError::Write {
            path: PathBuf::from("/nope/out.pdf"),
            source: io_err(),
        });
        assert_eq!(err.exit_code(), crate::exitcode::CANTCREAT);
    }

    #[test]
    fn given_any_error_when_mapping_exit_code_then_non_zero() {
        let errors = [
            CliError::InvalidArgs("x".into()),
            CliError::Infra(InfraError::io("stdout", io_err())),
            CliError::from(ApplicationError::Config { message: "x".into() }),
            CliError::from(ApplicationError::Render { message: "x".into() }),
        ];
        for err in errors {
            assert_ne!(err.exit_code(), crate::exitcode::OK);
        }
    }
}
