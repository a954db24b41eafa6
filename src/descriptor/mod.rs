//! Parsed package descriptors (POM documents).
//!
//! Only the fields the resolver needs are kept:
//!
//! | field | document path |
//! |---|---|
//! | `name` | `name` |
//! | `artifact_id` | `artifactId` |
//! | `group_id` / `parent_group_id` | `groupId` / `parent.groupId` |
//! | `version` / `parent_version` | `version` / `parent.version` |
//! | `dependencies` | `dependencies.dependency[]` |
//! | `properties` | `properties.*` |
//! | `license_name` / `license_url` | `licenses.license.name` / `.url` |

mod parse;
mod properties;

pub use parse::{parse_descriptor, ParseError};
pub use properties::{is_placeholder, resolve_version, Properties, PROJECT_VERSION};

// ─── Data Types ────────────────────────────────────────────────────

/// A dependency exactly as declared, before any placeholder resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclaredDependency {
    pub group_id: String,
    pub artifact_id: String,
    /// Concrete version or a `${...}` placeholder.
    pub version: String,
    /// Empty when the document declares none.
    pub scope: String,
}

impl DeclaredDependency {
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// Scope, or `None` when the document leaves it implicit.
    pub fn scope(&self) -> Option<&str> {
        if self.scope.is_empty() {
            None
        } else {
            Some(&self.scope)
        }
    }
}

/// Package metadata for one coordinate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub name: String,
    pub artifact_id: String,
    pub group_id: String,
    pub parent_group_id: String,
    pub version: String,
    pub parent_version: String,
    pub dependencies: Vec<DeclaredDependency>,
    pub properties: Properties,
    pub license_name: String,
    pub license_url: String,
}

impl Descriptor {
    /// `groupId`, inherited from the parent when the document omits it.
    pub fn effective_group_id(&self) -> &str {
        if self.group_id.is_empty() {
            &self.parent_group_id
        } else {
            &self.group_id
        }
    }

    /// `version`, inherited from the parent when the document omits it.
    pub fn effective_version(&self) -> &str {
        if self.version.is_empty() {
            &self.parent_version
        } else {
            &self.version
        }
    }

    /// Declared license, if the name is non-empty.
    pub fn license(&self) -> Option<(&str, Option<&str>)> {
        if self.license_name.is_empty() {
            return None;
        }
        let url = if self.license_url.is_empty() {
            None
        } else {
            Some(self.license_url.as_str())
        };
        Some((self.license_name.as_str(), url))
    }
}
