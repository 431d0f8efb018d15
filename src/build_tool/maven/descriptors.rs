//! Goal descriptors for the well-known plugins
//!
//! Keyed by plugin artifactId; the groupId is not consulted, so forks published
//! under another group resolve to the same descriptors.

use crate::model::{MojoDescriptor, ParameterDescriptor};
use once_cell::sync::Lazy;
use std::collections::HashMap;

const FILE: &str = "java.io.File";
const STRING: &str = "java.lang.String";
const BOOLEAN: &str = "boolean";
const LIST: &str = "java.util.List";

fn param(name: &str, type_name: &str, description: &str) -> ParameterDescriptor {
    ParameterDescriptor::new(name, type_name, description)
}

fn goal(name: &str, phase: Option<&str>, description: &str) -> MojoDescriptor {
    MojoDescriptor::new(name, phase, description)
}

pub struct DescriptorCatalog {
    plugins: HashMap<&'static str, Vec<MojoDescriptor>>,
}

impl DescriptorCatalog {
    pub fn standard() -> &'static DescriptorCatalog {
        &STANDARD
    }

    pub fn knows_plugin(&self, artifact_id: &str) -> bool {
        self.plugins.contains_key(artifact_id)
    }

    pub fn lookup(&self, artifact_id: &str, goal: &str) -> Option<&MojoDescriptor> {
        self.plugins
            .get(artifact_id)?
            .iter()
            .find(|descriptor| descriptor.goal == goal)
    }

    pub fn default_phase(&self, artifact_id: &str, goal: &str) -> Option<&str> {
        self.lookup(artifact_id, goal)?.default_phase.as_deref()
    }
}

static STANDARD: Lazy<DescriptorCatalog> = Lazy::new(|| {
    let mut plugins: HashMap<&'static str, Vec<MojoDescriptor>> = HashMap::new();

    plugins.insert(
        "maven-compiler-plugin",
        vec![
            goal("compile", Some("compile"), "Compiles application sources")
                .with_parameter(param(
                    "compileSourceRoots",
                    LIST,
                    "The source directories containing the sources to be compiled.",
                ))
                .with_parameter(
                    param("outputDirectory", FILE, "The directory for compiled classes.")
                        .with_default("${project.build.outputDirectory}"),
                )
                .with_parameter(param(
                    "generatedSourcesDirectory",
                    FILE,
                    "Specify where to place generated source files created by annotation processing.",
                ))
                .with_parameter(param("release", STRING, "The -release argument for the Java compiler.")),
            goal("testCompile", Some("test-compile"), "Compiles application test sources")
                .with_parameter(param(
                    "testCompileSourceRoots",
                    LIST,
                    "The source directories containing the test-source to be compiled.",
                ))
                .with_parameter(
                    param("outputDirectory", FILE, "The directory where compiled test classes go.")
                        .with_default("${project.build.testOutputDirectory}"),
                )
                .with_parameter(param(
                    "skip",
                    BOOLEAN,
                    "Set this to true to bypass compilation of test sources.",
                )),
        ],
    );

    plugins.insert(
        "maven-surefire-plugin",
        vec![goal("test", Some("test"), "Run tests using Surefire")
            .with_parameter(param(
                "testClassesDirectory",
                FILE,
                "The directory containing generated test classes of the project being tested.",
            ))
            .with_parameter(
                param("reportsDirectory", FILE, "Base directory where all reports are written to.")
                    .with_default("${project.build.directory}/surefire-reports"),
            )
            .with_parameter(param("skipTests", BOOLEAN, "Set this to true to skip running tests."))
            .with_parameter(param(
                "includes",
                LIST,
                "A list of elements specifying the tests (by pattern) that should be included in testing.",
            ))],
    );

    plugins.insert(
        "maven-failsafe-plugin",
        vec![
            goal("integration-test", Some("integration-test"), "Run integration tests using Surefire")
                .with_parameter(param(
                    "testClassesDirectory",
                    FILE,
                    "The directory containing generated test classes of the project being tested.",
                ))
                .with_parameter(
                    param("reportsDirectory", FILE, "Base directory where all reports are written to.")
                        .with_default("${project.build.directory}/failsafe-reports"),
                ),
            goal("verify", Some("verify"), "Verify integration tests ran using Surefire")
                .with_parameter(param(
                    "summaryFile",
                    FILE,
                    "The summary file to read integration test results from.",
                )),
        ],
    );

    plugins.insert(
        "maven-resources-plugin",
        vec![
            goal("resources", Some("process-resources"), "Copy resources for the main source code to the main output directory")
                .with_parameter(param("resources", LIST, "The list of resources we want to transfer."))
                .with_parameter(
                    param("outputDirectory", FILE, "The output directory into which to copy the resources.")
                        .with_default("${project.build.outputDirectory}"),
                )
                .with_parameter(param("encoding", STRING, "The character encoding to use when reading and writing filtered resources.")),
            goal("testResources", Some("process-test-resources"), "Copy resources for the test source code to the test output directory")
                .with_parameter(param("resources", LIST, "The list of resources we want to transfer."))
                .with_parameter(
                    param("outputDirectory", FILE, "The output directory into which to copy the resources.")
                        .with_default("${project.build.testOutputDirectory}"),
                ),
            goal("copy-resources", None, "Copy resources of the configured plugin attribute resources")
                .with_parameter(param("resources", LIST, "A list of resources to be copied."))
                .with_parameter(param("outputDirectory", FILE, "The output directory into which to copy the resources.")),
        ],
    );

    plugins.insert(
        "maven-jar-plugin",
        vec![
            goal("jar", Some("package"), "Build a JAR from the current project")
                .with_parameter(
                    param(
                        "classesDirectory",
                        FILE,
                        "Directory containing the classes and resource files that should be packaged into the JAR.",
                    )
                    .with_default("${project.build.outputDirectory}"),
                )
                .with_parameter(
                    param("outputDirectory", FILE, "Directory containing the generated JAR.")
                        .with_default("${project.build.directory}"),
                )
                .with_parameter(param("finalName", STRING, "Name of the generated JAR.")),
            goal("test-jar", Some("package"), "Build a JAR of the test classes for the current project")
                .with_parameter(param(
                    "testClassesDirectory",
                    FILE,
                    "Directory containing the test classes and resource files that should be packaged into the JAR.",
                )),
        ],
    );

    plugins.insert(
        "maven-war-plugin",
        vec![goal("war", Some("package"), "Build a WAR file")
            .with_parameter(param(
                "warSourceDirectory",
                FILE,
                "Single directory for extra files to include in the WAR.",
            ))
            .with_parameter(param("webappDirectory", FILE, "The directory where the webapp is built."))
            .with_parameter(
                param("outputDirectory", FILE, "The directory for the generated WAR.")
                    .with_default("${project.build.directory}"),
            )],
    );

    plugins.insert(
        "maven-ear-plugin",
        vec![
            goal("ear", Some("package"), "Builds J2EE Enterprise Archive (EAR) files")
                .with_parameter(param("earSourceDirectory", FILE, "Single directory for extra files to include in the EAR."))
                .with_parameter(param("outputDirectory", FILE, "The directory for the generated EAR.")),
            goal("generate-application-xml", Some("generate-resources"), "Generates the EAR deployment descriptor file(s)")
                .with_parameter(param("generatedDescriptorLocation", FILE, "Directory where the deployment descriptor file(s) will be generated.")),
        ],
    );

    plugins.insert(
        "maven-install-plugin",
        vec![goal("install", Some("install"), "Installs the project's main artifact in the local repository")
            .with_parameter(param("installAtEnd", BOOLEAN, "Whether every project should be installed during its own install-phase or at the end of the multimodule build."))],
    );

    plugins.insert(
        "maven-deploy-plugin",
        vec![goal("deploy", Some("deploy"), "Deploys an artifact to remote repository")
            .with_parameter(param("altDeploymentRepository", STRING, "Specifies an alternative repository to which the project artifacts should be deployed."))
            .with_parameter(param("skip", BOOLEAN, "Set this to true to bypass artifact deploy."))],
    );

    plugins.insert(
        "maven-clean-plugin",
        vec![goal("clean", Some("clean"), "Cleans up generated files")
            .with_parameter(
                param("directory", FILE, "This is where build results go.")
                    .with_default("${project.build.directory}"),
            )
            .with_parameter(param("filesets", LIST, "The list of file sets to delete, in addition to the default directories."))],
    );

    plugins.insert(
        "maven-site-plugin",
        vec![
            goal("site", Some("site"), "Generates the site for a single project")
                .with_parameter(
                    param("outputDirectory", FILE, "Directory where the generated project documentation will be put.")
                        .with_default("${project.reporting.outputDirectory}"),
                )
                .with_parameter(param("siteDirectory", FILE, "Directory containing the site.xml file and the source for hand written docs.")),
            goal("deploy", Some("site-deploy"), "Deploys the generated site using supported protocols")
                .with_parameter(param("inputDirectory", FILE, "Directory containing the generated project sites and report distributions.")),
        ],
    );

    plugins.insert(
        "maven-javadoc-plugin",
        vec![
            goal("javadoc", None, "Generates documentation for the Java code using the standard Javadoc tool")
                .with_parameter(param("sourcepath", STRING, "Specifies the source paths where the subpackages are located."))
                .with_parameter(param("reportOutputDirectory", FILE, "Specifies the destination directory where javadoc saves the generated HTML files.")),
            goal("jar", Some("package"), "Bundles the Javadoc documentation for main Java code in a JAR")
                .with_parameter(param("jarOutputDirectory", FILE, "Specifies the directory where the generated jar file will be put.")),
        ],
    );

    plugins.insert(
        "maven-source-plugin",
        vec![
            goal("jar", Some("package"), "Bundle the main sources of the project into a jar archive")
                .with_parameter(param("outputDirectory", FILE, "The directory where the generated archive file will be put.")),
            goal("jar-no-fork", Some("package"), "Bundle the main sources of the project into a jar archive without forking")
                .with_parameter(param("outputDirectory", FILE, "The directory where the generated archive file will be put.")),
        ],
    );

    plugins.insert(
        "maven-enforcer-plugin",
        vec![goal("enforce", Some("validate"), "Executes the configured rules")
            .with_parameter(param("rules", LIST, "Array of objects that implement the EnforcerRule interface to execute."))
            .with_parameter(param("skip", BOOLEAN, "Flag to easily skip all checks."))],
    );

    plugins.insert(
        "maven-plugin-plugin",
        vec![
            goal("descriptor", Some("generate-resources"), "Generate a plugin descriptor")
                .with_parameter(param("outputDirectory", FILE, "The directory where the generated plugin.xml file will be put.")),
            goal("addPluginArtifactMetadata", Some("package"), "Inject plugin metadata into the artifact"),
        ],
    );

    plugins.insert(
        "quarkus-maven-plugin",
        vec![
            goal("build", Some("package"), "Builds the Quarkus application")
                .with_parameter(
                    param("outputDirectory", FILE, "The directory for the generated application.")
                        .with_default("${project.build.directory}"),
                )
                .with_parameter(param("finalName", STRING, "The final name of the generated artifact.")),
            goal("dev", None, "Starts the application in development mode with live reload")
                .with_parameter(param("sourceDir", FILE, "The directory for the application source files."))
                .with_parameter(param("buildDir", FILE, "The directory for compiled classes and generated files.")),
            goal("generate-code", Some("generate-sources"), "Generate sources from extension code generators")
                .with_parameter(param("generatedSourcesDirectory", FILE, "The directory where generated sources are written.")),
        ],
    );

    plugins.insert(
        "spring-boot-maven-plugin",
        vec![
            goal("run", None, "Run an application in place")
                .with_parameter(param("classesDirectory", FILE, "Directory containing the classes and resource files that should be used to run the application."))
                .with_parameter(param("addResources", BOOLEAN, "Add maven resources to the classpath directly.")),
            goal("repackage", Some("package"), "Repackage existing JAR and WAR archives so that they can be executed")
                .with_parameter(param("outputDirectory", FILE, "Directory containing the generated archive."))
                .with_parameter(param("classifier", STRING, "Classifier to add to the repackaged archive.")),
            goal("build-info", Some("generate-resources"), "Generate a build-info.properties file")
                .with_parameter(param("outputFile", FILE, "The location of the generated build-info.properties file.")),
        ],
    );

    DescriptorCatalog { plugins }
});
