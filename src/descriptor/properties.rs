use super::Descriptor;

/// Self-referential placeholder for the descriptor's own version.
pub const PROJECT_VERSION: &str = "${project.version}";

const PLACEHOLDER_PREFIX: &str = "${";

/// `<properties>` of one descriptor, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Look up a `${name}` token. The first declaration wins; absent names
    /// yield the empty string.
    pub fn find(&self, token: &str) -> &str {
        let Some(name) = placeholder_name(token) else {
            return "";
        };
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn is_placeholder(token: &str) -> bool {
    token.starts_with(PLACEHOLDER_PREFIX)
}

fn placeholder_name(token: &str) -> Option<&str> {
    token.strip_prefix(PLACEHOLDER_PREFIX)?.strip_suffix('}')
}

/// Resolve a declared version against the descriptor that declared it.
///
/// Concrete versions pass through, `${project.version}` becomes the
/// descriptor's effective version and any other placeholder is looked up in
/// its properties. An empty result marks the dependency as unresolvable.
pub fn resolve_version(token: &str, descriptor: &Descriptor) -> String {
    if !is_placeholder(token) {
        return token.to_string();
    }
    if token == PROJECT_VERSION {
        return descriptor.effective_version().to_string();
    }
    descriptor.properties.find(token).to_string()
}
