/// Shared constants for lifecycle names, phase sets and target descriptors.
///
/// Lifecycle identifiers of the external build tool
pub mod lifecycles {
    pub const DEFAULT: &str = "default";
    pub const CLEAN: &str = "clean";
    pub const SITE: &str = "site";
}

/// Configuration file names used in workspace loading and output records
pub mod config_files {
    pub const POM_XML: &str = "pom.xml";
}

/// Default plugin groupId when a POM omits it
pub const DEFAULT_PLUGIN_GROUP: &str = "org.apache.maven.plugins";

/// Phases whose execution plans are materialized for every project signature
pub const ESSENTIAL_PHASES: &[&str] = &[
    "validate", "compile", "test", "package", "verify", "install", "deploy", "clean", "site",
];

/// Phases that always receive a phase-level target
pub const STANDARD_PHASES: &[&str] = &[
    "clean", "validate", "compile", "test", "package", "verify", "install", "deploy", "site",
];

pub const DEFAULT_EXECUTOR: &str = "@nx/run-commands:run-commands";
pub const DEFAULT_COMMAND: &str = "mvn";
pub const DEFAULT_TECHNOLOGY: &str = "maven";
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Token the project root is written as when no workspace root is known
pub const PROJECT_ROOT_TOKEN: &str = "{projectRoot}";
