//! Run configuration.
//!
//! Priority, lowest first:
//! 1. built-in defaults
//! 2. a TOML file (`--config <path>` or `$DEPWALK_CONFIG`)
//! 3. `$DEPWALK_REPOSITORY` (comma separated base URLs)
//! 4. command-line flags, applied by the CLI
//!
//! ```toml
//! repositories = ["https://repo1.maven.org/maven2"]
//! excluded_scopes = ["test", "runtime"]
//! excluded_groups = ["javax.servlet"]
//! timeout_secs = 30
//! deadline_secs = 600
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_REPOSITORY: &str = "https://repo1.maven.org/maven2";

pub const CONFIG_ENV: &str = "DEPWALK_CONFIG";
pub const REPOSITORY_ENV: &str = "DEPWALK_REPOSITORY";

/// Groups provided by the runtime platform (servlet, mail and web
/// framework containers); never fetched.
pub const DEFAULT_EXCLUDED_GROUPS: &[&str] = &[
    "javax.servlet",
    "jakarta.servlet",
    "javax.mail",
    "jakarta.mail",
    "com.sun.mail",
    "org.springframework",
    "org.springframework.boot",
];

pub const DEFAULT_EXCLUDED_SCOPES: &[&str] = &["test", "runtime"];

pub const DEFAULT_STACKS: &[&str] = &[
    "io.buildpacks.stacks.bionic",
    "io.buildpacks.stacks.tiny",
    "*",
];

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Candidate repository base URLs, tried in order.
    pub repositories: Vec<String>,
    pub excluded_scopes: BTreeSet<String>,
    pub excluded_groups: BTreeSet<String>,
    /// Stack ids written into every stanza.
    pub stacks: Vec<String>,
    /// Extension of the binary artifact next to each descriptor.
    pub binary_extension: String,
    /// Per-request HTTP timeout.
    pub timeout_secs: u64,
    /// Wall-clock budget for a whole run; unlimited when absent.
    pub deadline_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repositories: vec![DEFAULT_REPOSITORY.to_string()],
            excluded_scopes: to_set(DEFAULT_EXCLUDED_SCOPES),
            excluded_groups: to_set(DEFAULT_EXCLUDED_GROUPS),
            stacks: DEFAULT_STACKS.iter().map(|s| s.to_string()).collect(),
            binary_extension: "jar".to_string(),
            timeout_secs: 30,
            deadline_secs: None,
            user_agent: format!("depwalk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Settings {
    /// Defaults, then the config file (explicit path or `$DEPWALK_CONFIG`),
    /// then `$DEPWALK_REPOSITORY`.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

        let mut settings = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Ok(value) = std::env::var(REPOSITORY_ENV) {
            let repos = split_list(&value);
            if !repos.is_empty() {
                settings.repositories = repos;
            }
        }

        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Replace the repository list when `repos` is non-empty.
    pub fn with_repositories(mut self, repos: Vec<String>) -> Self {
        if !repos.is_empty() {
            self.repositories = repos;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }

    pub fn is_excluded_scope(&self, scope: Option<&str>) -> bool {
        scope.is_some_and(|s| self.excluded_scopes.contains(s))
    }

    pub fn is_excluded_group(&self, group: &str) -> bool {
        self.excluded_groups.contains(group)
    }
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.repositories, vec![DEFAULT_REPOSITORY]);
        assert!(s.is_excluded_scope(Some("test")));
        assert!(s.is_excluded_scope(Some("runtime")));
        assert!(!s.is_excluded_scope(Some("compile")));
        assert!(!s.is_excluded_scope(None));
        assert!(s.is_excluded_group("javax.servlet"));
        assert!(!s.is_excluded_group("com.example"));
        assert_eq!(s.binary_extension, "jar");
        assert_eq!(s.deadline(), None);
    }

    #[test]
    fn test_from_toml_partial_keeps_defaults() {
        let s = Settings::from_toml(
            r#"
repositories = ["https://a.example/maven", "https://b.example/maven"]
deadline_secs = 120
"#,
        )
        .unwrap();
        assert_eq!(s.repositories.len(), 2);
        assert_eq!(s.deadline(), Some(Duration::from_secs(120)));
        assert_eq!(s.excluded_scopes, Settings::default().excluded_scopes);
        assert_eq!(s.stacks, Settings::default().stacks);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        assert!(Settings::from_toml("repository = \"x\"").is_err());
    }

    #[test]
    fn test_from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depwalk.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"").unwrap();
        let err = Settings::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("depwalk.toml"));

        let missing = Settings::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }

    #[test]
    fn test_with_repositories_ignores_empty() {
        let s = Settings::default().with_repositories(Vec::new());
        assert_eq!(s.repositories, vec![DEFAULT_REPOSITORY]);
        let s = s.with_repositories(vec!["https://mirror.example".to_string()]);
        assert_eq!(s.repositories, vec!["https://mirror.example"]);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" a , ,b,"), vec!["a", "b"]);
        assert!(split_list("").is_empty());
    }
}
