//! Transitive dependency walker for Maven repositories.
//!
//! Given a root `group:artifact:version` and an ordered list of repositories,
//! resolves every compile-time dependency reachable through the artifacts'
//! descriptors and renders one buildpack `[[metadata.dependencies]]` entry per
//! artifact (CPE, PURL, SHA-256, license, download URL).
//!
//! The pieces, leaf first:
//!   - [`coord`]: coordinates and repository paths.
//!   - [`descriptor`]: POM parsing and `${...}` placeholder resolution.
//!   - [`fetch`]: transports and first-match repository fallback.
//!   - [`checksum`]: SHA-256 of downloaded binaries.
//!   - [`walker`]: the depth-first walk, as an iterator of events.
//!   - [`emit`]: rendering events as buildpack metadata.

pub mod checksum;
pub mod config;
pub mod coord;
pub mod descriptor;
pub mod emit;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod walker;

pub use config::Settings;
pub use coord::Coordinate;
pub use error::{ConfigError, ResolveError, TransportError};
pub use walker::{CancelToken, Event, ResolvedArtifact, WalkStats, Walker};
