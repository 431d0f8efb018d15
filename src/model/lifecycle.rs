//! Lifecycles and the registry that orders their phases

use crate::core::constants::lifecycles;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named, ordered sequence of phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    pub id: String,
    pub phases: Vec<String>,
}

impl Lifecycle {
    pub fn new(id: &str, phases: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            phases: phases.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn position(&self, phase: &str) -> Option<usize> {
        self.phases.iter().position(|p| p == phase)
    }

    pub fn contains(&self, phase: &str) -> bool {
        self.position(phase).is_some()
    }

    /// Phases up to and including `phase`, in lifecycle order
    pub fn phases_through(&self, phase: &str) -> Option<&[String]> {
        self.position(phase).map(|idx| &self.phases[..=idx])
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

const CLEAN_PHASES: &[&str] = &["pre-clean", "clean", "post-clean"];

const DEFAULT_PHASES: &[&str] = &[
    "validate",
    "initialize",
    "generate-sources",
    "process-sources",
    "generate-resources",
    "process-resources",
    "compile",
    "process-classes",
    "generate-test-sources",
    "process-test-sources",
    "generate-test-resources",
    "process-test-resources",
    "test-compile",
    "process-test-classes",
    "test",
    "prepare-package",
    "package",
    "pre-integration-test",
    "integration-test",
    "post-integration-test",
    "verify",
    "install",
    "deploy",
];

const SITE_PHASES: &[&str] = &["pre-site", "site", "post-site", "site-deploy"];

/// Read-only set of lifecycles known to the build tool
#[derive(Debug, Clone)]
pub struct LifecycleRegistry {
    lifecycles: Vec<Lifecycle>,
    by_phase: HashMap<String, (usize, usize)>,
}

impl LifecycleRegistry {
    pub fn new(lifecycles: Vec<Lifecycle>) -> Self {
        let mut by_phase = HashMap::new();
        for (lifecycle_idx, lifecycle) in lifecycles.iter().enumerate() {
            for (phase_idx, phase) in lifecycle.phases.iter().enumerate() {
                by_phase
                    .entry(phase.clone())
                    .or_insert((lifecycle_idx, phase_idx));
            }
        }
        Self {
            lifecycles,
            by_phase,
        }
    }

    /// The three standard Maven lifecycles in `clean`, `default`, `site` order
    pub fn maven() -> Self {
        Self::new(vec![
            Lifecycle::new(lifecycles::CLEAN, CLEAN_PHASES),
            Lifecycle::new(lifecycles::DEFAULT, DEFAULT_PHASES),
            Lifecycle::new(lifecycles::SITE, SITE_PHASES),
        ])
    }

    pub fn lifecycles(&self) -> &[Lifecycle] {
        &self.lifecycles
    }

    pub fn get(&self, id: &str) -> Option<&Lifecycle> {
        self.lifecycles.iter().find(|l| l.id == id)
    }

    pub fn lifecycle_for_phase(&self, phase: &str) -> Option<&Lifecycle> {
        self.by_phase
            .get(phase)
            .map(|(lifecycle_idx, _)| &self.lifecycles[*lifecycle_idx])
    }

    pub fn position(&self, phase: &str) -> Option<usize> {
        self.by_phase.get(phase).map(|(_, phase_idx)| *phase_idx)
    }

    pub fn contains(&self, phase: &str) -> bool {
        self.by_phase.contains_key(phase)
    }

    /// Phases of one lifecycle; empty for an unknown id
    pub fn phases_for_lifecycle(&self, id: &str) -> Vec<String> {
        self.get(id).map(|l| l.phases.clone()).unwrap_or_default()
    }

    /// Every phase of every lifecycle, in registry order
    pub fn all_phases(&self) -> Vec<String> {
        self.lifecycles
            .iter()
            .flat_map(|l| l.phases.iter().cloned())
            .collect()
    }

    /// Index of `phase` in [`Self::all_phases`]
    pub fn global_order(&self, phase: &str) -> Option<usize> {
        let (lifecycle_idx, phase_idx) = *self.by_phase.get(phase)?;
        let offset: usize = self.lifecycles[..lifecycle_idx]
            .iter()
            .map(Lifecycle::len)
            .sum();
        Some(offset + phase_idx)
    }

    /// The phase right before `phase` in its lifecycle
    pub fn preceding_phase(&self, phase: &str) -> Option<&str> {
        let (lifecycle_idx, phase_idx) = *self.by_phase.get(phase)?;
        if phase_idx == 0 {
            return None;
        }
        Some(self.lifecycles[lifecycle_idx].phases[phase_idx - 1].as_str())
    }
}

impl Default for LifecycleRegistry {
    fn default() -> Self {
        Self::maven()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maven_registry_layout() {
        let registry = LifecycleRegistry::maven();

        assert_eq!(registry.phases_for_lifecycle("clean").len(), 3);
        assert_eq!(registry.phases_for_lifecycle("default").len(), 23);
        assert_eq!(registry.phases_for_lifecycle("site").len(), 4);
        assert_eq!(registry.all_phases().len(), 30);
        assert!(registry.phases_for_lifecycle("nope").is_empty());

        assert_eq!(registry.position("test"), Some(14));
        assert_eq!(
            registry.lifecycle_for_phase("site-deploy").map(|l| l.id.as_str()),
            Some("site")
        );
        assert!(registry.lifecycle_for_phase("frobnicate").is_none());
    }

    #[test]
    fn test_global_order_and_preceding() {
        let registry = LifecycleRegistry::maven();

        assert_eq!(registry.global_order("pre-clean"), Some(0));
        assert_eq!(registry.global_order("validate"), Some(3));
        assert_eq!(registry.global_order("site"), Some(27));

        assert_eq!(registry.preceding_phase("compile"), Some("process-resources"));
        assert_eq!(registry.preceding_phase("validate"), None);
        assert_eq!(registry.preceding_phase("post-clean"), Some("clean"));
    }

    #[test]
    fn test_phases_through() {
        let registry = LifecycleRegistry::maven();
        let default = registry.get("default").unwrap();
        let through = default.phases_through("compile").unwrap();
        assert_eq!(through.first().map(String::as_str), Some("validate"));
        assert_eq!(through.last().map(String::as_str), Some("compile"));
        assert_eq!(through.len(), 7);
    }
}
