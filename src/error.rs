//! Error types for a resolution run.
//!
//! Every variant of [`ResolveError`] is fatal: the walker stops at the first
//! one and the CLI exits non-zero. An unresolvable version is not an error,
//! it surfaces as [`crate::walker::Event::Unresolved`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single HTTP GET.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Connection, DNS, TLS, timeout or body read failure.
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },
}

impl TransportError {
    pub fn url(&self) -> &str {
        match self {
            TransportError::Status { url, .. } | TransportError::Network { url, .. } => url,
        }
    }
}

/// Fatal failure while resolving one coordinate.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Every candidate repository rejected or failed the binary fetch.
    #[error("{coordinate} not found in {tried} repositories (last error: {source})")]
    NotFound {
        coordinate: String,
        tried: usize,
        #[source]
        source: TransportError,
    },

    /// The repository list was empty.
    #[error("no repositories configured")]
    NoRepositories,

    /// The descriptor could not be fetched from the repository that served the binary.
    #[error("cannot fetch descriptor {url}: {source}")]
    DescriptorFetch {
        url: String,
        #[source]
        source: TransportError,
    },

    /// The descriptor document is malformed.
    #[error("cannot parse descriptor {url}: {message}")]
    DescriptorParse { url: String, message: String },

    /// The downloaded artifact could not be read back for hashing.
    #[error("cannot checksum '{}': {source}", path.display())]
    ChecksumIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The downloaded artifact could not be written to the scratch directory.
    #[error("cannot write '{}': {source}", path.display())]
    Scratch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("resolution cancelled")]
    Cancelled,

    #[error("resolution deadline of {secs}s exceeded")]
    DeadlineExceeded { secs: u64 },
}

/// Errors loading [`crate::config::Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot build HTTP client: {0}")]
    Client(String),
}
