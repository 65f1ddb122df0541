//! pom.xml reader
//!
//! Handles:
//! - The project's own groupId, falling back to the parent's
//! - `<properties>` name/value pairs
//! - `<dependencyManagement>` dependencies
//! - `<build><pluginManagement>` plugins, defaulting their groupId to
//!   `org.apache.maven.plugins`
//!
//! The reader walks start and end tags and tracks the element path. It does
//! not validate the document beyond requiring tags to be balanced.

use super::{BomDocument, EntryKind, ManagedEntry};
use crate::error::BomError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static CDATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").unwrap());

// Start, end or empty element tag; declarations and processing instructions never match
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<(/?)([A-Za-z_][\w.\-:]*)(?:\s[^>]*?)?\s*(/?)>"#).unwrap());

const DEFAULT_PLUGIN_GROUP_ID: &str = "org.apache.maven.plugins";

const DEPENDENCY_PATH: [&str; 4] = [
    "project",
    "dependencyManagement",
    "dependencies",
    "dependency",
];

const PLUGIN_PATH: [&str; 5] = ["project", "build", "pluginManagement", "plugins", "plugin"];

#[derive(Debug)]
struct EntryBuilder {
    kind: EntryKind,
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
}

impl EntryBuilder {
    fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            group_id: None,
            artifact_id: None,
            version: None,
        }
    }

    fn build(self) -> Option<ManagedEntry> {
        let group_id = match (self.kind, self.group_id) {
            (_, Some(group_id)) => group_id,
            (EntryKind::Plugin, None) => DEFAULT_PLUGIN_GROUP_ID.to_string(),
            (EntryKind::Dependency, None) => return None,
        };
        Some(ManagedEntry {
            kind: self.kind,
            group_id,
            artifact_id: self.artifact_id?,
            version: self.version,
        })
    }
}

#[derive(Debug, Default)]
struct PomReader {
    group_id: Option<String>,
    parent_group_id: Option<String>,
    properties: Vec<(String, String)>,
    entries: Vec<ManagedEntry>,
    current: Option<EntryBuilder>,
    saw_project: bool,
}

impl PomReader {
    fn open(&mut self, path: &[&str]) {
        if path == ["project"] {
            self.saw_project = true;
        } else if path == DEPENDENCY_PATH {
            self.current = Some(EntryBuilder::new(EntryKind::Dependency));
        } else if path == PLUGIN_PATH {
            self.current = Some(EntryBuilder::new(EntryKind::Plugin));
        }
    }

    fn leaf(&mut self, path: &[&str], text: &str) {
        let text = text.trim();
        match path {
            ["project", "groupId"] => self.group_id = Some(text.to_string()),
            ["project", "parent", "groupId"] => self.parent_group_id = Some(text.to_string()),
            ["project", "properties", name] => {
                self.properties.push((name.to_string(), text.to_string()));
            }
            [entry @ .., field] if entry == DEPENDENCY_PATH || entry == PLUGIN_PATH => {
                if let Some(current) = self.current.as_mut() {
                    let value = Some(text.to_string());
                    match *field {
                        "groupId" => current.group_id = value,
                        "artifactId" => current.artifact_id = value,
                        "version" => current.version = value,
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, path: &[&str]) {
        if path == DEPENDENCY_PATH || path == PLUGIN_PATH {
            if let Some(entry) = self.current.take().and_then(EntryBuilder::build) {
                self.entries.push(entry);
            }
        }
    }

    fn finish(self) -> BomDocument {
        BomDocument {
            group_id: self.group_id.or(self.parent_group_id),
            properties: self.properties,
            entries: self.entries,
        }
    }
}

/// Parse pom.xml content; `path` is only used in error messages
pub fn parse_pom(content: &str, path: &Path) -> Result<BomDocument, BomError> {
    let content = COMMENT_RE.replace_all(content, "");
    let content = CDATA_RE.replace_all(&content, "$1");

    let mut reader = PomReader::default();
    let mut stack: Vec<&str> = Vec::new();
    let mut text_start = 0;

    for caps in TAG_RE.captures_iter(&content) {
        let (Some(tag), Some(name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        let name = name.as_str();
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let empty = caps.get(3).is_some_and(|m| !m.as_str().is_empty());

        if closing {
            if stack.last() != Some(&name) {
                return Err(BomError::parse_error(
                    path,
                    format!("unexpected closing tag </{}>", name),
                ));
            }
            reader.leaf(&stack, &content[text_start..tag.start()]);
            reader.close(&stack);
            stack.pop();
        } else {
            stack.push(name);
            reader.open(&stack);
            if empty {
                reader.leaf(&stack, "");
                reader.close(&stack);
                stack.pop();
            }
        }
        text_start = tag.end();
    }

    if let Some(unclosed) = stack.last() {
        return Err(BomError::parse_error(
            path,
            format!("element <{}> is not closed", unclosed),
        ));
    }
    if !reader.saw_project {
        return Err(BomError::parse_error(path, "no <project> element"));
    }

    Ok(reader.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <parent>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-parent</artifactId>
    </parent>
    <groupId>io.spring.platform</groupId>
    <artifactId>platform-bom</artifactId>
    <properties>
        <netty.version>4.1.42.Final</netty.version>
        <!-- <ignored.version>1.0</ignored.version> -->
        <jackson.version>${jackson-bom.version}</jackson.version>
        <jackson-bom.version>2.10.0</jackson-bom.version>
        <empty.version/>
    </properties>
    <dependencyManagement>
        <dependencies>
            <dependency>
                <groupId>io.netty</groupId>
                <artifactId>netty-codec</artifactId>
                <version>${netty.version}</version>
                <exclusions>
                    <exclusion>
                        <groupId>commons-logging</groupId>
                        <artifactId>commons-logging</artifactId>
                    </exclusion>
                </exclusions>
            </dependency>
            <dependency>
                <groupId>io.spring.platform</groupId>
                <artifactId>platform-core</artifactId>
                <version>${project.version}</version>
            </dependency>
        </dependencies>
    </dependencyManagement>
    <dependencies>
        <dependency>
            <groupId>junit</groupId>
            <artifactId>junit</artifactId>
            <version>4.12</version>
        </dependency>
    </dependencies>
    <build>
        <pluginManagement>
            <plugins>
                <plugin>
                    <artifactId>maven-surefire-plugin</artifactId>
                    <version>${surefire.version}</version>
                </plugin>
            </plugins>
        </pluginManagement>
    </build>
</project>
"#;

    fn parse(content: &str) -> Result<BomDocument, BomError> {
        parse_pom(content, Path::new("pom.xml"))
    }

    #[test]
    fn test_parse_group_id() {
        let document = parse(POM).unwrap();
        assert_eq!(document.group_id.as_deref(), Some("io.spring.platform"));
    }

    #[test]
    fn test_parse_group_id_falls_back_to_parent() {
        let document = parse(
            "<project><parent><groupId>org.example</groupId></parent><artifactId>a</artifactId></project>",
        )
        .unwrap();
        assert_eq!(document.group_id.as_deref(), Some("org.example"));
    }

    #[test]
    fn test_parse_properties() {
        let document = parse(POM).unwrap();
        assert_eq!(
            document.properties,
            vec![
                ("netty.version".to_string(), "4.1.42.Final".to_string()),
                (
                    "jackson.version".to_string(),
                    "${jackson-bom.version}".to_string()
                ),
                ("jackson-bom.version".to_string(), "2.10.0".to_string()),
                ("empty.version".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_parse_managed_dependencies() {
        let document = parse(POM).unwrap();
        let dependencies: Vec<&ManagedEntry> = document
            .entries
            .iter()
            .filter(|e| e.kind == EntryKind::Dependency)
            .collect();
        assert_eq!(dependencies.len(), 2);
        assert_eq!(dependencies[0].group_id, "io.netty");
        assert_eq!(dependencies[0].artifact_id, "netty-codec");
        assert_eq!(dependencies[0].version.as_deref(), Some("${netty.version}"));
        assert_eq!(dependencies[1].artifact_id, "platform-core");
    }

    #[test]
    fn test_parse_ignores_unmanaged_dependencies() {
        let document = parse(POM).unwrap();
        assert!(document.entries.iter().all(|e| e.artifact_id != "junit"));
    }

    #[test]
    fn test_parse_managed_plugins() {
        let document = parse(POM).unwrap();
        let plugin = document
            .entries
            .iter()
            .find(|e| e.kind == EntryKind::Plugin)
            .unwrap();
        assert_eq!(plugin.group_id, "org.apache.maven.plugins");
        assert_eq!(plugin.artifact_id, "maven-surefire-plugin");
        assert_eq!(plugin.version.as_deref(), Some("${surefire.version}"));
    }

    #[test]
    fn test_parse_cdata_value() {
        let document =
            parse("<project><properties><a.version><![CDATA[1.0]]></a.version></properties></project>")
                .unwrap();
        assert_eq!(document.properties[0].1, "1.0");
    }

    #[test]
    fn test_parse_unbalanced_tags() {
        assert!(matches!(
            parse("<project><properties></project>"),
            Err(BomError::ParseError { .. })
        ));
        assert!(matches!(
            parse("<project><properties>"),
            Err(BomError::ParseError { .. })
        ));
    }

    #[test]
    fn test_parse_requires_project() {
        assert!(matches!(
            parse("<settings></settings>"),
            Err(BomError::ParseError { .. })
        ));
    }
}
