//! Workspace loading from Maven POM files

pub mod pom;
pub mod workspace;

pub use pom::{parse_pom, read_pom, RawPom};
pub use workspace::{load_workspace, WorkspaceLoader};
