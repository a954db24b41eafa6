//! Artifact coordinates and their repository paths.
//!
//! Layout (Maven 2 repository):
//! ```text
//! /<group with '.' -> '/'>/<artifact>/<version>/<artifact>-<version>.<ext>
//! ```

use std::fmt;

/// Extension of the descriptor document next to every binary.
pub const DESCRIPTOR_EXTENSION: &str = "pom";

/// A `group:artifact:version` triple plus the chain of parents that led to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
    /// Declared scope (`compile`, `test`, `runtime`, ...), if any.
    pub scope: Option<String>,
    /// Display strings of every ancestor, root first. Diagnostics only.
    pub ancestry: Vec<String>,
}

impl Coordinate {
    pub fn new(group: &str, artifact: &str, version: &str) -> Self {
        Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
            version: version.to_string(),
            scope: None,
            ancestry: Vec::new(),
        }
    }

    /// Version-insensitive identity used by the visited set.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }

    /// `<artifact>-<version>.<ext>`
    pub fn file_name(&self, ext: &str) -> String {
        format!("{}-{}.{}", self.artifact, self.version, ext)
    }

    /// Repository-relative path of the binary artifact, with a leading `/`.
    pub fn artifact_path(&self, ext: &str) -> String {
        format!("{}/{}", self.directory(), self.file_name(ext))
    }

    /// Repository-relative path of the descriptor, with a leading `/`.
    pub fn descriptor_path(&self) -> String {
        self.artifact_path(DESCRIPTOR_EXTENSION)
    }

    /// A dependency of `self`; its ancestry is ours plus ourselves.
    pub fn child(&self, group: &str, artifact: &str, version: &str, scope: Option<&str>) -> Self {
        let mut ancestry = self.ancestry.clone();
        ancestry.push(self.to_string());
        Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
            version: version.to_string(),
            scope: scope.map(str::to_string),
            ancestry,
        }
    }

    fn directory(&self) -> String {
        format!(
            "/{}/{}/{}",
            self.group.replace('.', "/"),
            self.artifact,
            self.version
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}
