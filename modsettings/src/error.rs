//! Error types and result definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by descriptor construction, the page registry and the
/// persistence layer.
#[derive(Debug, Error)]
pub enum Error {
    /// An accessor's value type does not match what the control needs.
    #[error("accessor `{accessor}` is {actual}, expected {expected}")]
    TypeMismatch {
        accessor: String,
        expected: String,
        actual: String,
    },

    /// A page was registered after the registry was finalized.
    #[error("registry is frozen, cannot register page `{page}`")]
    RegistryFrozen { page: String },

    /// Two value-bearing controls on one page share an accessor name.
    #[error("page `{page}` binds accessor `{accessor}` more than once")]
    DuplicateAccessor { page: String, accessor: String },

    /// An accessor was applied to a host object of another type.
    #[error("accessor `{accessor}` expects a host of type {expected}")]
    HostMismatch {
        accessor: String,
        expected: &'static str,
    },

    /// No page at this index.
    #[error("no page at index {index}")]
    UnknownPage { index: usize },

    /// A persistence operation ran before the page's category was created.
    #[error("no preference category for page `{page}`")]
    MissingCategory { page: String },

    /// Reading or writing a preference file failed.
    #[error("preference file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A preference file could not be parsed.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A category could not be serialized.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
}

impl Error {
    pub(crate) fn type_mismatch(
        accessor: &str,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Error::TypeMismatch {
            accessor: accessor.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
