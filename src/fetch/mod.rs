//! Repository access: binaries with first-match fallback, descriptors from
//! the repository that served the binary.

mod memory;
mod transport;

pub use memory::MemoryTransport;
pub use transport::{ReqwestTransport, Transport};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::coord::Coordinate;
use crate::descriptor::{parse_descriptor, Descriptor};
use crate::error::{ResolveError, TransportError};

/// A binary artifact persisted to the scratch directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedArtifact {
    /// Scratch file holding the downloaded bytes.
    pub path: PathBuf,
    /// Base URL of the repository that served it.
    pub repository: String,
    /// Full download URL.
    pub url: String,
}

/// A parsed descriptor and the URL it came from.
#[derive(Clone, Debug)]
pub struct FetchedDescriptor {
    pub descriptor: Descriptor,
    pub url: String,
}

pub struct Fetcher<T> {
    transport: T,
    repositories: Vec<String>,
    scratch_dir: PathBuf,
    binary_extension: String,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(
        transport: T,
        repositories: &[String],
        scratch_dir: &Path,
        binary_extension: &str,
    ) -> Self {
        Self {
            transport,
            repositories: repositories
                .iter()
                .map(|r| r.trim_end_matches('/').to_string())
                .collect(),
            scratch_dir: scratch_dir.to_path_buf(),
            binary_extension: binary_extension.to_string(),
        }
    }

    /// Download the binary from the first repository that has it and write it
    /// to `<scratch>/<artifact>-<version>.<ext>`.
    ///
    /// Later repositories are not tried once one succeeds.
    pub fn fetch_artifact(&self, coord: &Coordinate) -> Result<FetchedArtifact, ResolveError> {
        let rel = coord.artifact_path(&self.binary_extension);
        let mut last_error: Option<TransportError> = None;

        for repository in &self.repositories {
            let url = format!("{}{}", repository, rel);
            debug!(%url, "trying repository");
            match self.transport.get(&url) {
                Ok(bytes) => {
                    let path = self.scratch_dir.join(coord.file_name(&self.binary_extension));
                    std::fs::write(&path, &bytes).map_err(|source| ResolveError::Scratch {
                        path: path.clone(),
                        source,
                    })?;
                    debug!(%url, bytes = bytes.len(), "downloaded");
                    return Ok(FetchedArtifact {
                        path,
                        repository: repository.clone(),
                        url,
                    });
                }
                Err(e) => {
                    debug!(error = %e, "not available");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(source) => Err(ResolveError::NotFound {
                coordinate: coord.to_string(),
                tried: self.repositories.len(),
                source,
            }),
            None => Err(ResolveError::NoRepositories),
        }
    }

    /// Fetch and parse the descriptor from `repository` only.
    pub fn fetch_descriptor(
        &self,
        coord: &Coordinate,
        repository: &str,
    ) -> Result<FetchedDescriptor, ResolveError> {
        let url = format!("{}{}", repository, coord.descriptor_path());
        let bytes = self
            .transport
            .get(&url)
            .map_err(|source| ResolveError::DescriptorFetch {
                url: url.clone(),
                source,
            })?;
        let descriptor = parse_descriptor(&bytes).map_err(|e| ResolveError::DescriptorParse {
            url: url.clone(),
            message: e.to_string(),
        })?;
        Ok(FetchedDescriptor { descriptor, url })
    }
}
