use thiserror::Error;

/// Errors from the outer surface (the CLI and file handling). Shortening
/// itself never fails; malformed path data degrades, it doesn't error.
#[derive(Debug, Error)]
pub enum WhittleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
