use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("unknown sort field: {0}")]
    UnknownSortField(String),

    #[error("page_size must be greater than zero (got {0})")]
    InvalidPageSize(i64),
}

impl CatalogError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        CatalogError::Storage(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to resolve the configuration directory")]
    NoProjectDirs,

    #[error("configuration error: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
