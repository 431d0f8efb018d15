#![allow(dead_code)]

use reactor_graph::build_tool::{BuildTool, MavenModelTool};
use reactor_graph::model::{
    ExecutionPlan, LifecycleRegistry, MojoDescriptor, PluginKey, Project,
};
use reactor_graph::BuildToolError;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Shared test utilities for on-disk reactors and instrumented build tools
pub mod test_helpers {
    use super::*;

    /// Write `<dir>/pom.xml` wrapping `body` in a `<project>` element
    pub fn write_pom(dir: &Path, body: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(
            dir.join("pom.xml"),
            format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                 <project xmlns=\"http://maven.apache.org/POM/4.0.0\">\n\
                 <modelVersion>4.0.0</modelVersion>\n{body}\n</project>\n"
            ),
        )
        .unwrap();
    }

    /// Compiler plugin with an explicit `compile` execution bound to `compile`
    pub const COMPILER_EXECUTION: &str = "<build><plugins><plugin>\
        <artifactId>maven-compiler-plugin</artifactId>\
        <executions><execution><id>default-compile</id><phase>compile</phase>\
        <goals><goal>compile</goal></goals></execution></executions>\
        </plugin></plugins></build>";

    /// Aggregator with modules `a` and `b`, where `b` depends on `a`
    pub fn two_module_reactor() -> TempDir {
        two_module_reactor_in(&std::env::temp_dir())
    }

    /// [`two_module_reactor`] created under `parent`
    pub fn two_module_reactor_in(parent: &Path) -> TempDir {
        let temp = TempDir::new_in(parent).unwrap();
        let root = temp.path();
        write_pom(
            root,
            "<groupId>com.acme</groupId><artifactId>parent</artifactId><version>1.0.0</version>\
             <packaging>pom</packaging><modules><module>a</module><module>b</module></modules>",
        );
        write_pom(
            &root.join("a"),
            &format!("<parent><groupId>com.acme</groupId><artifactId>parent</artifactId>\
                      <version>1.0.0</version></parent><artifactId>a</artifactId>{COMPILER_EXECUTION}"),
        );
        write_pom(
            &root.join("b"),
            &format!("<parent><groupId>com.acme</groupId><artifactId>parent</artifactId>\
                      <version>1.0.0</version></parent><artifactId>b</artifactId>\
                      <dependencies><dependency><groupId>com.acme</groupId><artifactId>a</artifactId>\
                      </dependency><dependency><groupId>org.slf4j</groupId>\
                      <artifactId>slf4j-api</artifactId></dependency></dependencies>\
                      {COMPILER_EXECUTION}"),
        );
        temp
    }
}

/// Offline Maven model that panics whenever it is asked about one project
pub struct PanickingTool {
    inner: MavenModelTool,
    victim: String,
}

impl PanickingTool {
    pub fn new(victim: &str) -> Self {
        Self {
            inner: MavenModelTool::new(),
            victim: victim.to_string(),
        }
    }
}

impl BuildTool for PanickingTool {
    fn lifecycles(&self) -> &LifecycleRegistry {
        self.inner.lifecycles()
    }

    fn calculate_execution_plan(
        &self,
        project: &Project,
        phase: &str,
    ) -> Result<ExecutionPlan, BuildToolError> {
        if project.key.artifact_id == self.victim {
            panic!("simulated adapter crash for {}", project.key);
        }
        self.inner.calculate_execution_plan(project, phase)
    }

    fn describe_goal(
        &self,
        project: &Project,
        plugin: &PluginKey,
        goal: &str,
    ) -> Result<Option<MojoDescriptor>, BuildToolError> {
        self.inner.describe_goal(project, plugin, goal)
    }
}

/// Offline Maven model that counts plan materializations
pub struct CountingTool {
    inner: MavenModelTool,
    pub plans: AtomicUsize,
}

impl CountingTool {
    pub fn new() -> Self {
        Self {
            inner: MavenModelTool::new(),
            plans: AtomicUsize::new(0),
        }
    }

    pub fn plan_count(&self) -> usize {
        self.plans.load(Ordering::SeqCst)
    }
}

impl BuildTool for CountingTool {
    fn lifecycles(&self) -> &LifecycleRegistry {
        self.inner.lifecycles()
    }

    fn calculate_execution_plan(
        &self,
        project: &Project,
        phase: &str,
    ) -> Result<ExecutionPlan, BuildToolError> {
        self.plans.fetch_add(1, Ordering::SeqCst);
        self.inner.calculate_execution_plan(project, phase)
    }

    fn describe_goal(
        &self,
        project: &Project,
        plugin: &PluginKey,
        goal: &str,
    ) -> Result<Option<MojoDescriptor>, BuildToolError> {
        self.inner.describe_goal(project, plugin, goal)
    }
}
