use miette::Diagnostic;
use thiserror::Error;

/// Main error type for tint operations
#[derive(Error, Diagnostic, Debug)]
pub enum TintError {
    #[error("IO error: {0}")]
    #[diagnostic(code(tint::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tint::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Could not load image: {message}")]
    #[diagnostic(code(tint::load))]
    Load {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(tint::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(tint::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Export error: {message}")]
    #[diagnostic(code(tint::export))]
    Export {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, TintError>;
