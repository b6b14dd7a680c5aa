use thiserror::Error;

/// Errors surfaced by backends and configuration loading.
///
/// Engine operations never propagate these to callers: per the
/// no-throw contract, the dispatcher and classifier absorb backend
/// errors into boolean outcomes and categories. The error type exists
/// for the backend trait seams and the config loader.
#[derive(Debug, Error)]
pub enum Error {
    /// The backend could not locate the window at all.
    #[error("window unreachable: {0}")]
    Unreachable(String),

    /// The backend found the window but the command was rejected.
    #[error("backend rejected command: {0}")]
    Backend(String),

    /// The scripting channel failed to execute.
    #[error("script execution failed: {0}")]
    Script(String),

    #[error("could not determine the configuration directory")]
    NoConfigDir,

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
