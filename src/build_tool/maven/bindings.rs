//! Default lifecycle bindings per packaging type

use crate::core::constants::lifecycles;

/// A goal bound to a phase without any `<execution>` declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultBinding {
    pub phase: &'static str,
    pub group_id: &'static str,
    pub artifact_id: &'static str,
    pub goal: &'static str,
}

const MAVEN: &str = "org.apache.maven.plugins";
const QUARKUS: &str = "io.quarkus";

const fn bind(
    phase: &'static str,
    artifact_id: &'static str,
    goal: &'static str,
) -> DefaultBinding {
    DefaultBinding {
        phase,
        group_id: MAVEN,
        artifact_id,
        goal,
    }
}

const CLEAN: &[DefaultBinding] = &[bind("clean", "maven-clean-plugin", "clean")];

const SITE: &[DefaultBinding] = &[
    bind("site", "maven-site-plugin", "site"),
    bind("site-deploy", "maven-site-plugin", "deploy"),
];

const JAR: &[DefaultBinding] = &[
    bind("process-resources", "maven-resources-plugin", "resources"),
    bind("compile", "maven-compiler-plugin", "compile"),
    bind("process-test-resources", "maven-resources-plugin", "testResources"),
    bind("test-compile", "maven-compiler-plugin", "testCompile"),
    bind("test", "maven-surefire-plugin", "test"),
    bind("package", "maven-jar-plugin", "jar"),
    bind("install", "maven-install-plugin", "install"),
    bind("deploy", "maven-deploy-plugin", "deploy"),
];

const WAR: &[DefaultBinding] = &[
    bind("process-resources", "maven-resources-plugin", "resources"),
    bind("compile", "maven-compiler-plugin", "compile"),
    bind("process-test-resources", "maven-resources-plugin", "testResources"),
    bind("test-compile", "maven-compiler-plugin", "testCompile"),
    bind("test", "maven-surefire-plugin", "test"),
    bind("package", "maven-war-plugin", "war"),
    bind("install", "maven-install-plugin", "install"),
    bind("deploy", "maven-deploy-plugin", "deploy"),
];

const EAR: &[DefaultBinding] = &[
    bind("generate-resources", "maven-ear-plugin", "generate-application-xml"),
    bind("process-resources", "maven-resources-plugin", "resources"),
    bind("package", "maven-ear-plugin", "ear"),
    bind("install", "maven-install-plugin", "install"),
    bind("deploy", "maven-deploy-plugin", "deploy"),
];

const POM: &[DefaultBinding] = &[
    bind("install", "maven-install-plugin", "install"),
    bind("deploy", "maven-deploy-plugin", "deploy"),
];

const MAVEN_PLUGIN: &[DefaultBinding] = &[
    bind("generate-resources", "maven-plugin-plugin", "descriptor"),
    bind("process-resources", "maven-resources-plugin", "resources"),
    bind("compile", "maven-compiler-plugin", "compile"),
    bind("process-test-resources", "maven-resources-plugin", "testResources"),
    bind("test-compile", "maven-compiler-plugin", "testCompile"),
    bind("test", "maven-surefire-plugin", "test"),
    bind("package", "maven-jar-plugin", "jar"),
    bind("package", "maven-plugin-plugin", "addPluginArtifactMetadata"),
    bind("install", "maven-install-plugin", "install"),
    bind("deploy", "maven-deploy-plugin", "deploy"),
];

const QUARKUS_APP: &[DefaultBinding] = &[
    bind("process-resources", "maven-resources-plugin", "resources"),
    bind("compile", "maven-compiler-plugin", "compile"),
    bind("process-test-resources", "maven-resources-plugin", "testResources"),
    bind("test-compile", "maven-compiler-plugin", "testCompile"),
    bind("test", "maven-surefire-plugin", "test"),
    bind("package", "maven-jar-plugin", "jar"),
    DefaultBinding {
        phase: "package",
        group_id: QUARKUS,
        artifact_id: "quarkus-maven-plugin",
        goal: "build",
    },
    bind("install", "maven-install-plugin", "install"),
    bind("deploy", "maven-deploy-plugin", "deploy"),
];

/// Bindings the given lifecycle contributes for `packaging`.
///
/// Unknown packaging types fall back to the `jar` bindings.
pub fn default_bindings(lifecycle: &str, packaging: &str) -> &'static [DefaultBinding] {
    match lifecycle {
        lifecycles::CLEAN => CLEAN,
        lifecycles::SITE => SITE,
        lifecycles::DEFAULT => match packaging {
            "pom" => POM,
            "war" => WAR,
            "ear" => EAR,
            "maven-plugin" => MAVEN_PLUGIN,
            "quarkus" => QUARKUS_APP,
            _ => JAR,
        },
        _ => &[],
    }
}
