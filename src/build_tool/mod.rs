//! Capability interface over the external build tool
//!
//! The engine never inspects plugins directly: every question about lifecycle
//! bindings or goal parameters goes through [`BuildTool`]. The one shipped
//! adapter, [`maven::MavenModelTool`], answers them from the project model.

pub mod maven;

use crate::core::errors::BuildToolError;
use crate::model::{ExecutionPlan, LifecycleRegistry, MojoDescriptor, PluginKey, Project};

pub use maven::MavenModelTool;

pub trait BuildTool: Send + Sync {
    /// Lifecycles and their ordered phases
    fn lifecycles(&self) -> &LifecycleRegistry;

    /// Goal invocations that running `phase` on `project` would perform,
    /// covering every phase of the owning lifecycle up to and including `phase`.
    ///
    /// This may block; callers must not hold locks across it.
    fn calculate_execution_plan(
        &self,
        project: &Project,
        phase: &str,
    ) -> Result<ExecutionPlan, BuildToolError>;

    /// Declared parameters and default phase of `plugin:goal`.
    ///
    /// Returns `Ok(None)` when the plugin itself is unknown.
    fn describe_goal(
        &self,
        project: &Project,
        plugin: &PluginKey,
        goal: &str,
    ) -> Result<Option<MojoDescriptor>, BuildToolError>;
}
