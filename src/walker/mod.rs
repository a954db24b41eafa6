//! The resolution walk.
//!
//! Starting from a root coordinate, every declared dependency is filtered by
//! scope and group, its version placeholder resolved against the declaring
//! descriptor, deduplicated by `group:artifact` and expanded depth-first in
//! declaration order. The first version to claim a `group:artifact` key wins
//! for the rest of the run; there is no conflict arbitration.
//!
//! The walk is an explicit stack of frames (descriptor + cursor) exposed as an
//! iterator of [`Event`]s. Any fetch failure is yielded once as an error and
//! ends the iteration.

mod event;

pub use event::{Event, ResolvedArtifact, WalkStats};

use std::collections::HashSet;
use std::iter::FusedIterator;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::checksum::sha256_file;
use crate::config::Settings;
use crate::coord::Coordinate;
use crate::descriptor::{resolve_version, Descriptor};
use crate::error::ResolveError;
use crate::fetch::{Fetcher, Transport};

/// Cooperative cancellation, checked before every fetch.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct Walker<T> {
    fetcher: Fetcher<T>,
    settings: Settings,
    cancel: CancelToken,
}

impl<T: Transport> Walker<T> {
    /// Downloaded binaries are written to `scratch_dir`, which must exist.
    pub fn new(transport: T, settings: Settings, scratch_dir: &Path) -> Self {
        let fetcher = Fetcher::new(
            transport,
            &settings.repositories,
            scratch_dir,
            &settings.binary_extension,
        );
        Self {
            fetcher,
            settings,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Start a run. Each call gets a fresh visited set.
    pub fn walk(&self, root: Coordinate) -> Walk<'_, T> {
        Walk {
            walker: self,
            root: Some(root),
            visited: HashSet::new(),
            stack: Vec::new(),
            started: Instant::now(),
            stats: WalkStats::default(),
            done: false,
        }
    }

    /// Run to completion, returning every resolved artifact in order.
    pub fn resolve(&self, root: Coordinate) -> Result<Vec<ResolvedArtifact>, ResolveError> {
        let mut resolved = Vec::new();
        for event in self.walk(root) {
            if let Event::Resolved(artifact) = event? {
                resolved.push(artifact);
            }
        }
        Ok(resolved)
    }
}

/// A coordinate whose dependencies are still being visited.
struct Frame {
    coordinate: Coordinate,
    descriptor: Descriptor,
    next: usize,
}

/// One resolution run. Not restartable; ends after the first error.
pub struct Walk<'a, T> {
    walker: &'a Walker<T>,
    root: Option<Coordinate>,
    /// `group:artifact` keys claimed so far. Never shrinks.
    visited: HashSet<String>,
    stack: Vec<Frame>,
    started: Instant,
    stats: WalkStats,
    done: bool,
}

impl<T: Transport> Walk<'_, T> {
    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    pub fn is_visited(&self, key: &str) -> bool {
        self.visited.contains(key)
    }

    fn step(&mut self) -> Option<Result<Event, ResolveError>> {
        if let Some(root) = self.root.take() {
            self.visited.insert(root.key());
            return Some(self.expand(root));
        }

        loop {
            let frame = self.stack.last_mut()?;
            let Some(dep) = frame.descriptor.dependencies.get(frame.next).cloned() else {
                self.stack.pop();
                continue;
            };
            frame.next += 1;
            let version = resolve_version(&dep.version, &frame.descriptor);
            let parent = frame.coordinate.clone();

            let settings = &self.walker.settings;
            if settings.is_excluded_scope(dep.scope()) {
                debug!(dependency = %dep.key(), scope = %dep.scope, %parent, "skipping scope");
                return Some(Ok(Event::SkippedScope {
                    dependency: dep,
                    parent: parent.to_string(),
                }));
            }
            if settings.is_excluded_group(&dep.group_id) {
                debug!(dependency = %dep.key(), %parent, "skipping platform group");
                return Some(Ok(Event::SkippedExcluded {
                    dependency: dep,
                    parent: parent.to_string(),
                }));
            }
            if self.visited.contains(&dep.key()) {
                debug!(dependency = %dep.key(), %version, %parent, "already visited");
                return Some(Ok(Event::AlreadyVisited {
                    dependency: dep,
                    version,
                    parent: parent.to_string(),
                }));
            }
            if version.is_empty() {
                warn!(
                    dependency = %dep.key(),
                    declared = %dep.version,
                    %parent,
                    "unable to resolve version"
                );
                return Some(Ok(Event::Unresolved {
                    dependency: dep,
                    parent: parent.to_string(),
                }));
            }

            self.visited.insert(dep.key());
            let child = parent.child(&dep.group_id, &dep.artifact_id, &version, dep.scope());
            return Some(self.expand(child));
        }
    }

    /// Fetch, hash and push `coord`, yielding its `Resolved` event.
    fn expand(&mut self, coord: Coordinate) -> Result<Event, ResolveError> {
        self.check_budget()?;

        let fetcher = &self.walker.fetcher;
        let artifact = fetcher.fetch_artifact(&coord)?;
        self.check_budget()?;
        let fetched = fetcher.fetch_descriptor(&coord, &artifact.repository)?;
        let sha256 = sha256_file(&artifact.path).map_err(|source| ResolveError::ChecksumIo {
            path: artifact.path.clone(),
            source,
        })?;

        info!(
            coordinate = %coord,
            repository = %artifact.repository,
            depth = self.stack.len(),
            "resolved"
        );

        self.stack.push(Frame {
            coordinate: coord.clone(),
            descriptor: fetched.descriptor.clone(),
            next: 0,
        });

        Ok(Event::Resolved(ResolvedArtifact {
            coordinate: coord,
            descriptor: fetched.descriptor,
            sha256,
            repository: artifact.repository,
            artifact_url: artifact.url,
            descriptor_url: fetched.url,
        }))
    }

    fn check_budget(&self) -> Result<(), ResolveError> {
        if self.walker.cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }
        if let Some(limit) = self.walker.settings.deadline() {
            if self.started.elapsed() >= limit {
                return Err(ResolveError::DeadlineExceeded {
                    secs: limit.as_secs(),
                });
            }
        }
        Ok(())
    }
}

impl<T: Transport> Iterator for Walk<'_, T> {
    type Item = Result<Event, ResolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.step();
        match &item {
            Some(Ok(event)) => self.stats.record(event),
            Some(Err(_)) | None => self.done = true,
        }
        item
    }
}

impl<T: Transport> FusedIterator for Walk<'_, T> {}
