//! `pom.xml` parsing
//!
//! Only the parts of the model the analysis needs are read: coordinates,
//! the parent reference, properties, modules, direct dependencies and build
//! plugins with their executions. Profiles, `dependencyManagement` and
//! `pluginManagement` are ignored.

use crate::core::constants::DEFAULT_PLUGIN_GROUP;
use crate::core::errors::WorkspaceError;
use crate::model::{DependencyDecl, ExecutionDecl, PluginDecl, PluginKey};
use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Contents of one POM before inheritance is applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPom {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub parent_group_id: Option<String>,
    pub parent_version: Option<String>,
    pub properties: BTreeMap<String, String>,
    pub modules: Vec<String>,
    pub dependencies: Vec<DependencyDecl>,
    pub plugins: Vec<PluginDecl>,
}

static PROPERTY_REFERENCE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z0-9_.\-]+)\}"));

impl RawPom {
    /// Own groupId, else the parent's
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id.as_deref().or(self.parent_group_id.as_deref())
    }

    pub fn effective_version(&self) -> Option<&str> {
        self.version.as_deref().or(self.parent_version.as_deref())
    }

    /// Value of `${name}`: project coordinates first, then `<properties>`
    fn property(&self, name: &str) -> Option<String> {
        let value = match name {
            "project.groupId" | "pom.groupId" | "groupId" | "project.parent.groupId" => {
                self.effective_group_id()
            }
            "project.artifactId" | "pom.artifactId" | "artifactId" => self.artifact_id.as_deref(),
            "project.version" | "pom.version" | "version" | "project.parent.version" => {
                self.effective_version()
            }
            "project.packaging" => self.packaging.as_deref(),
            _ => self.properties.get(name).map(String::as_str),
        };
        value.map(str::to_string)
    }

    /// Replace every resolvable `${...}` reference in `value`; unknown
    /// references are kept verbatim
    pub fn interpolate(&self, value: &str) -> String {
        let pattern = match &*PROPERTY_REFERENCE {
            Ok(pattern) => pattern,
            Err(_) => return value.to_string(),
        };
        pattern
            .replace_all(value, |caps: &Captures| {
                self.property(&caps[1])
                    .filter(|resolved| !resolved.contains("${"))
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Interpolate coordinates, plugin configuration and execution phases
    pub fn resolve_properties(&mut self) {
        let resolver = self.clone();
        for dep in &mut self.dependencies {
            dep.group_id = resolver.interpolate(&dep.group_id);
            dep.artifact_id = resolver.interpolate(&dep.artifact_id);
        }
        for plugin in &mut self.plugins {
            plugin.key.group_id = resolver.interpolate(&plugin.key.group_id);
            plugin.key.artifact_id = resolver.interpolate(&plugin.key.artifact_id);
            for value in plugin.configuration.values_mut() {
                *value = resolver.interpolate(value);
            }
            for execution in &mut plugin.executions {
                if let Some(phase) = execution.phase.as_mut() {
                    *phase = resolver.interpolate(phase);
                }
                for value in execution.configuration.values_mut() {
                    *value = resolver.interpolate(value);
                }
            }
        }
    }
}

#[derive(Default)]
struct PluginBuilder {
    group_id: Option<String>,
    artifact_id: String,
    version: Option<String>,
    configuration: BTreeMap<String, String>,
    executions: Vec<ExecutionDecl>,
}

impl PluginBuilder {
    fn build(self) -> Option<PluginDecl> {
        if self.artifact_id.is_empty() {
            return None;
        }
        let group_id = self
            .group_id
            .unwrap_or_else(|| DEFAULT_PLUGIN_GROUP.to_string());
        Some(PluginDecl {
            key: PluginKey::new(group_id, self.artifact_id),
            version: self.version,
            configuration: self.configuration,
            executions: self.executions,
        })
    }
}

const PROJECT: &[&str] = &["project"];
const PARENT: &[&str] = &["project", "parent"];
const PROPERTIES: &[&str] = &["project", "properties"];
const MODULES: &[&str] = &["project", "modules"];
const DEPENDENCY: &[&str] = &["project", "dependencies", "dependency"];
const PLUGIN: &[&str] = &["project", "build", "plugins", "plugin"];
const PLUGIN_CONFIGURATION: &[&str] = &["project", "build", "plugins", "plugin", "configuration"];
const EXECUTION: &[&str] = &["project", "build", "plugins", "plugin", "executions", "execution"];
const EXECUTION_GOALS: &[&str] = &[
    "project", "build", "plugins", "plugin", "executions", "execution", "goals",
];
const EXECUTION_CONFIGURATION: &[&str] = &[
    "project", "build", "plugins", "plugin", "executions", "execution", "configuration",
];

/// True when `path` is `prefix` followed by exactly `extra` more elements
fn under(path: &[String], prefix: &[&str], extra: usize) -> bool {
    path.len() == prefix.len() + extra
        && path.iter().zip(prefix).all(|(element, expected)| element == expected)
}

/// Read and parse the POM at `path`
pub fn read_pom(path: &Path) -> Result<RawPom, WorkspaceError> {
    let content = fs::read_to_string(path).map_err(|source| WorkspaceError::PomRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_pom(&content, path)
}

/// Parse POM `content`; `path` is only used in errors
pub fn parse_pom(content: &str, path: &Path) -> Result<RawPom, WorkspaceError> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut pom = RawPom::default();
    let mut buf = Vec::new();
    let mut element_path: Vec<String> = Vec::new();
    let mut dependency: Option<DependencyDecl> = None;
    let mut plugin: Option<PluginBuilder> = None;
    let mut execution: Option<ExecutionDecl> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                element_path.push(name);

                if under(&element_path, DEPENDENCY, 0) {
                    dependency = Some(DependencyDecl {
                        group_id: String::new(),
                        artifact_id: String::new(),
                        scope: None,
                    });
                } else if under(&element_path, PLUGIN, 0) {
                    plugin = Some(PluginBuilder::default());
                } else if under(&element_path, EXECUTION, 0) {
                    execution = Some(ExecutionDecl::default());
                }
            }
            Ok(Event::End(_)) => {
                if under(&element_path, DEPENDENCY, 0) {
                    if let Some(dep) = dependency.take() {
                        if !dep.group_id.is_empty() && !dep.artifact_id.is_empty() {
                            pom.dependencies.push(dep);
                        }
                    }
                } else if under(&element_path, PLUGIN, 0) {
                    if let Some(decl) = plugin.take().and_then(PluginBuilder::build) {
                        pom.plugins.push(decl);
                    }
                } else if under(&element_path, EXECUTION, 0) {
                    if let (Some(mut exec), Some(builder)) = (execution.take(), plugin.as_mut()) {
                        if exec.id.is_empty() {
                            exec.id = "default".to_string();
                        }
                        builder.executions.push(exec);
                    }
                }
                element_path.pop();
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| parse_error(path, &reader, err))?
                    .trim()
                    .to_string();
                let leaf = element_path.last().cloned().unwrap_or_default();

                if under(&element_path, PROJECT, 1) {
                    match leaf.as_str() {
                        "groupId" => pom.group_id = Some(text),
                        "artifactId" => pom.artifact_id = Some(text),
                        "version" => pom.version = Some(text),
                        "packaging" => pom.packaging = Some(text),
                        _ => {}
                    }
                } else if under(&element_path, PARENT, 1) {
                    match leaf.as_str() {
                        "groupId" => pom.parent_group_id = Some(text),
                        "version" => pom.parent_version = Some(text),
                        _ => {}
                    }
                } else if under(&element_path, PROPERTIES, 1) {
                    pom.properties.insert(leaf, text);
                } else if under(&element_path, MODULES, 1) && leaf == "module" {
                    pom.modules.push(text);
                } else if under(&element_path, DEPENDENCY, 1) {
                    if let Some(dep) = dependency.as_mut() {
                        match leaf.as_str() {
                            "groupId" => dep.group_id = text,
                            "artifactId" => dep.artifact_id = text,
                            "scope" => dep.scope = Some(text),
                            _ => {}
                        }
                    }
                } else if under(&element_path, PLUGIN, 1) {
                    if let Some(builder) = plugin.as_mut() {
                        match leaf.as_str() {
                            "groupId" => builder.group_id = Some(text),
                            "artifactId" => builder.artifact_id = text,
                            "version" => builder.version = Some(text),
                            _ => {}
                        }
                    }
                } else if under(&element_path, PLUGIN_CONFIGURATION, 1) {
                    if let Some(builder) = plugin.as_mut() {
                        builder.configuration.insert(leaf, text);
                    }
                } else if under(&element_path, EXECUTION, 1) {
                    if let Some(exec) = execution.as_mut() {
                        match leaf.as_str() {
                            "id" => exec.id = text,
                            "phase" => exec.phase = Some(text),
                            _ => {}
                        }
                    }
                } else if under(&element_path, EXECUTION_GOALS, 1) && leaf == "goal" {
                    if let Some(exec) = execution.as_mut() {
                        exec.goals.push(text);
                    }
                } else if under(&element_path, EXECUTION_CONFIGURATION, 1) {
                    if let Some(exec) = execution.as_mut() {
                        exec.configuration.insert(leaf, text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error(path, &reader, e)),
            _ => {}
        }
        buf.clear();
    }

    pom.resolve_properties();
    Ok(pom)
}

fn parse_error(path: &Path, reader: &Reader<&[u8]>, err: quick_xml::Error) -> WorkspaceError {
    WorkspaceError::PomParse {
        path: path.to_path_buf(),
        message: format!("{} at byte {}", err, reader.buffer_position()),
    }
}
