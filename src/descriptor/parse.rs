use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use super::{DeclaredDependency, Descriptor, Properties};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document has no root element")]
    Empty,

    #[error("unclosed element <{0}>")]
    Unclosed(String),
}

/// Parse a descriptor document.
///
/// The root element name is not checked; fields are matched by their path
/// below it. Unknown elements are ignored. When several `<license>` entries
/// are present the first one is used.
pub fn parse_descriptor(bytes: &[u8]) -> Result<Descriptor, ParseError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut descriptor = Descriptor::default();
    let mut properties: Vec<(String, String)> = Vec::new();
    let mut current_dep: Option<DeclaredDependency> = None;
    let mut license_seen = false;
    let mut root: Option<String> = None;

    // Element names from the root down, excluding the root itself.
    let mut path: Vec<String> = Vec::new();
    let mut depth = 0usize;
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if depth == 0 {
                    root = Some(local_name(&e));
                } else {
                    path.push(local_name(&e));
                }
                depth += 1;
                text.clear();
                if is_path(&path, &["dependencies", "dependency"]) {
                    current_dep = Some(DeclaredDependency::default());
                }
            }
            Event::Empty(e) if depth == 0 => root = Some(local_name(&e)),
            Event::Empty(e) => {
                path.push(local_name(&e));
                text.clear();
                if is_path(&path, &["dependencies", "dependency"]) {
                    current_dep = Some(DeclaredDependency::default());
                }
                close_element(
                    &path,
                    "",
                    &mut descriptor,
                    &mut properties,
                    &mut current_dep,
                    &mut license_seen,
                );
                path.pop();
            }
            Event::Text(t) => {
                text.push_str(&t.unescape()?);
            }
            Event::CData(c) => {
                text.push_str(&String::from_utf8_lossy(&c));
            }
            Event::End(_) if depth <= 1 => depth = 0,
            Event::End(_) => {
                depth -= 1;
                close_element(
                    &path,
                    text.trim(),
                    &mut descriptor,
                    &mut properties,
                    &mut current_dep,
                    &mut license_seen,
                );
                path.pop();
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let Some(root) = root else {
        return Err(ParseError::Empty);
    };
    if depth > 0 {
        return Err(ParseError::Unclosed(path.last().cloned().unwrap_or(root)));
    }

    descriptor.properties = Properties::new(properties);
    Ok(descriptor)
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn is_path(path: &[String], expected: &[&str]) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(a, b)| a == b)
}

/// Store the text of the element at `path`, which is about to close.
fn close_element(
    path: &[String],
    value: &str,
    descriptor: &mut Descriptor,
    properties: &mut Vec<(String, String)>,
    current_dep: &mut Option<DeclaredDependency>,
    license_seen: &mut bool,
) {
    let parts: Vec<&str> = path.iter().map(String::as_str).collect();
    match parts.as_slice() {
        ["name"] => descriptor.name = value.to_string(),
        ["artifactId"] => descriptor.artifact_id = value.to_string(),
        ["groupId"] => descriptor.group_id = value.to_string(),
        ["version"] => descriptor.version = value.to_string(),
        ["parent", "groupId"] => descriptor.parent_group_id = value.to_string(),
        ["parent", "version"] => descriptor.parent_version = value.to_string(),
        ["properties", name] => properties.push((name.to_string(), value.to_string())),
        ["dependencies", "dependency", field] => {
            if let Some(dep) = current_dep.as_mut() {
                match *field {
                    "groupId" => dep.group_id = value.to_string(),
                    "artifactId" => dep.artifact_id = value.to_string(),
                    "version" => dep.version = value.to_string(),
                    "scope" => dep.scope = value.to_string(),
                    _ => {}
                }
            }
        }
        ["dependencies", "dependency"] => {
            // Entries without an artifactId name nothing fetchable.
            if let Some(dep) = current_dep.take().filter(|d| !d.artifact_id.is_empty()) {
                descriptor.dependencies.push(dep);
            }
        }
        ["licenses", "license", field] if !*license_seen => match *field {
            "name" => descriptor.license_name = value.to_string(),
            "url" => descriptor.license_url = value.to_string(),
            _ => {}
        },
        ["licenses", "license"] => *license_seen = true,
        _ => {}
    }
}
