use crate::coord::Coordinate;
use crate::descriptor::{DeclaredDependency, Descriptor};

/// A coordinate that was fetched, hashed and expanded.
#[derive(Clone, Debug)]
pub struct ResolvedArtifact {
    pub coordinate: Coordinate,
    pub descriptor: Descriptor,
    /// Lowercase hex SHA-256 of the binary.
    pub sha256: String,
    /// Base URL of the repository that served both binary and descriptor.
    pub repository: String,
    pub artifact_url: String,
    pub descriptor_url: String,
}

/// One step of a resolution run, in depth-first declaration order.
#[derive(Clone, Debug)]
pub enum Event {
    Resolved(ResolvedArtifact),
    /// Declared with an excluded scope (`test`, `runtime`, ...).
    SkippedScope {
        dependency: DeclaredDependency,
        parent: String,
    },
    /// Belongs to a group the platform already provides.
    SkippedExcluded {
        dependency: DeclaredDependency,
        parent: String,
    },
    /// `group:artifact` was already claimed earlier in the run, at any version.
    AlreadyVisited {
        dependency: DeclaredDependency,
        version: String,
        parent: String,
    },
    /// The declared version resolved to nothing; the branch is pruned.
    Unresolved {
        dependency: DeclaredDependency,
        parent: String,
    },
}

/// Counters for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub resolved: usize,
    pub skipped_scope: usize,
    pub skipped_excluded: usize,
    pub already_visited: usize,
    pub unresolved: usize,
}

impl WalkStats {
    pub(super) fn record(&mut self, event: &Event) {
        match event {
            Event::Resolved(_) => self.resolved += 1,
            Event::SkippedScope { .. } => self.skipped_scope += 1,
            Event::SkippedExcluded { .. } => self.skipped_excluded += 1,
            Event::AlreadyVisited { .. } => self.already_visited += 1,
            Event::Unresolved { .. } => self.unresolved += 1,
        }
    }
}
