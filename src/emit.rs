//! Buildpack metadata rendering.
//!
//! Each resolved artifact becomes one `[[metadata.dependencies]]` table,
//! preceded by `#` comment lines naming the descriptor it came from and the
//! chain of parents that pulled it in. Unresolvable dependencies are reported
//! as comments; skipped ones produce no output.

use std::io::{self, Write};

use crate::walker::{Event, ResolvedArtifact};

pub struct Emitter<W> {
    out: W,
    stacks: Vec<String>,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W, stacks: &[String]) -> Self {
        Self {
            out,
            stacks: stacks.to_vec(),
        }
    }

    pub fn emit(&mut self, event: &Event) -> io::Result<()> {
        match event {
            Event::Resolved(artifact) => self.emit_resolved(artifact),
            Event::Unresolved { dependency, parent } => writeln!(
                self.out,
                "# unable to add {}:{}:{} (required by {})",
                dependency.group_id, dependency.artifact_id, dependency.version, parent
            ),
            Event::SkippedScope { .. }
            | Event::SkippedExcluded { .. }
            | Event::AlreadyVisited { .. } => Ok(()),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit_resolved(&mut self, artifact: &ResolvedArtifact) -> io::Result<()> {
        let d = &artifact.descriptor;
        let c = &artifact.coordinate;
        let group = or_else(d.effective_group_id(), &c.group);
        let id = or_else(&d.artifact_id, &c.artifact);
        let version = or_else(d.effective_version(), &c.version);

        writeln!(self.out, "# from {}", artifact.descriptor_url)?;
        if !c.ancestry.is_empty() {
            writeln!(self.out, "# via {}", c.ancestry.join(" -> "))?;
        }

        let stacks: Vec<String> = self.stacks.iter().map(|s| toml_string(s)).collect();
        let out = &mut self.out;
        writeln!(out, "  [[metadata.dependencies]]")?;
        writeln!(
            out,
            "    cpes = [{}]",
            toml_string(&format!("cpe:2.3:a:{group}:{id}:{version}:*:*:*:*:*:*:*"))
        )?;
        writeln!(out, "    id = {}", toml_string(id))?;
        writeln!(out, "    name = {}", toml_string(&d.name))?;
        writeln!(out, "    purl = {}", toml_string(&format!("pkg:generic/{id}@{version}")))?;
        writeln!(out, "    sha256 = {}", toml_string(&artifact.sha256))?;
        writeln!(out, "    stacks = [{}]", stacks.join(", "))?;
        writeln!(out, "    uri = {}", toml_string(&artifact.artifact_url))?;
        writeln!(out, "    version = {}", toml_string(version))?;
        writeln!(out)?;

        if let Some((name, url)) = d.license() {
            writeln!(out, "    [[metadata.dependencies.licenses]]")?;
            writeln!(out, "      type = {}", toml_string(name))?;
            if let Some(url) = url {
                writeln!(out, "      uri = {}", toml_string(url))?;
            }
        }
        writeln!(out)
    }
}

fn or_else<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// A TOML string value, quoted and escaped.
fn toml_string(s: &str) -> String {
    toml::Value::String(s.to_owned()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::coord::Coordinate;
    use crate::descriptor::{DeclaredDependency, Descriptor};

    fn artifact(license: Option<(&str, &str)>) -> ResolvedArtifact {
        let root = Coordinate::new("com.example", "lib", "1.0.0");
        let coordinate = root.child("com.example", "util", "1.0.0", None);
        let (license_name, license_url) = license.unwrap_or(("", ""));
        ResolvedArtifact {
            coordinate,
            descriptor: Descriptor {
                name: "Example Util".to_string(),
                artifact_id: "util".to_string(),
                parent_group_id: "com.example".to_string(),
                version: "1.0.0".to_string(),
                license_name: license_name.to_string(),
                license_url: license_url.to_string(),
                ..Default::default()
            },
            sha256: "ab".repeat(32),
            repository: "https://repo1.maven.org/maven2".to_string(),
            artifact_url: "https://repo1.maven.org/maven2/com/example/util/1.0.0/util-1.0.0.jar"
                .to_string(),
            descriptor_url: "https://repo1.maven.org/maven2/com/example/util/1.0.0/util-1.0.0.pom"
                .to_string(),
        }
    }

    fn render(event: &Event) -> String {
        let mut emitter = Emitter::new(Vec::new(), &Settings::default().stacks);
        emitter.emit(event).unwrap();
        String::from_utf8(emitter.into_inner()).unwrap()
    }

    #[test]
    fn test_emit_resolved_with_license() {
        let out = render(&Event::Resolved(artifact(Some((
            "Apache License, Version 2.0",
            "https://www.apache.org/licenses/LICENSE-2.0.txt",
        )))));
        insta::assert_snapshot!("resolved_with_license", out);
    }

    #[test]
    fn test_emit_resolved_without_license() {
        let out = render(&Event::Resolved(artifact(None)));
        assert!(!out.contains("licenses"));
        assert!(out.contains("    cpes = [\"cpe:2.3:a:com.example:util:1.0.0:*:*:*:*:*:*:*\"]\n"));
        assert!(out.ends_with("    version = \"1.0.0\"\n\n\n"));
    }

    #[test]
    fn test_emit_license_without_url() {
        let out = render(&Event::Resolved(artifact(Some(("MIT", "")))));
        assert!(out.contains("      type = \"MIT\"\n"));
        assert!(!out.contains("      uri ="));
    }

    #[test]
    fn test_emit_root_has_no_via_line() {
        let mut a = artifact(None);
        a.coordinate.ancestry.clear();
        let out = render(&Event::Resolved(a));
        assert!(out.starts_with("# from https://"));
        assert!(!out.contains("# via"));
    }

    #[test]
    fn test_emit_unresolved_comment() {
        let out = render(&Event::Unresolved {
            dependency: DeclaredDependency {
                group_id: "org.other".to_string(),
                artifact_id: "core".to_string(),
                version: "${core.version}".to_string(),
                scope: String::new(),
            },
            parent: "com.example:lib:1.0.0".to_string(),
        });
        assert_eq!(
            out,
            "# unable to add org.other:core:${core.version} (required by com.example:lib:1.0.0)\n"
        );
    }

    #[test]
    fn test_emit_skips_are_silent() {
        let dependency = DeclaredDependency {
            group_id: "junit".to_string(),
            artifact_id: "junit".to_string(),
            version: "4.13.2".to_string(),
            scope: "test".to_string(),
        };
        let out = render(&Event::SkippedScope {
            dependency,
            parent: "com.example:lib:1.0.0".to_string(),
        });
        assert!(out.is_empty());
    }

    #[test]
    fn test_emit_falls_back_to_coordinate() {
        let mut a = artifact(None);
        a.descriptor.artifact_id.clear();
        a.descriptor.parent_group_id.clear();
        a.descriptor.version.clear();
        let out = render(&Event::Resolved(a));
        assert!(out.contains("    id = \"util\"\n"));
        assert!(out.contains("    purl = \"pkg:generic/util@1.0.0\"\n"));
    }

    #[test]
    fn test_emit_escapes_string_values() {
        let mut a = artifact(Some(("MIT", "")));
        a.descriptor.name = r#"Say "hi" \ there"#.to_string();
        let out = render(&Event::Resolved(a));

        let table: toml::Table = toml::from_str(&out).unwrap();
        let dep = &table["metadata"]["dependencies"][0];
        assert_eq!(dep["name"].as_str(), Some(r#"Say "hi" \ there"#));
        assert_eq!(dep["id"].as_str(), Some("util"));
        assert_eq!(dep["licenses"][0]["type"].as_str(), Some("MIT"));
        assert_eq!(dep["stacks"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_toml_string_plain() {
        assert_eq!(toml_string("plain"), "\"plain\"");
        assert_eq!(toml_string("*"), "\"*\"");
    }
}
