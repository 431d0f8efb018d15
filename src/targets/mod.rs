//! Target generation, dependency edges and grouping for one project

pub mod dependency;
pub mod generation;
pub mod groups;
pub mod naming;

pub use dependency::TargetDependencyService;
pub use generation::TargetGenerationService;
pub use groups::TargetGroupService;
