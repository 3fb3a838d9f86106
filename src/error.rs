use miette::Diagnostic;
use thiserror::Error;

/// Main error type for tilepack operations
#[derive(Error, Diagnostic, Debug)]
pub enum PackError {
    #[error("IO error: {0}")]
    #[diagnostic(code(tilepack::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tilepack::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(tilepack::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(tilepack::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, PackError>;
