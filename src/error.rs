// Error types shared by the navigation core.
// Nothing here is fatal: callers log and absorb NavError, the desktop shell
// stringifies everything at the command boundary.

use thiserror::Error;

/// The only failure a navigation transition can report.
/// State is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("unknown view: {0}")]
    UnknownView(String),
    #[error("unknown tab: {0}")]
    UnknownTab(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no views configured")]
    Empty,
    #[error("duplicate view id: {0}")]
    DuplicateView(String),
    #[error("default view '{0}' is not configured")]
    UnknownDefault(String),
    #[error("'{source_key}' points at unknown view '{view}'")]
    UnknownTarget { source_key: String, view: String },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all fields.")]
    MissingFields(Vec<&'static str>),
}
