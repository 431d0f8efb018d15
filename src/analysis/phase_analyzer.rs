//! Semantic classification of lifecycle phases
//!
//! A phase is classified from three independent signals: substrings of its
//! name, its relative position in the owning lifecycle, and which lifecycle
//! owns it. Results are cached by phase name.

use crate::core::cache::{AnalysisCache, CacheStats};
use crate::core::constants::lifecycles;
use crate::model::{GoalBehavior, LifecycleRegistry, PhaseAnalysis, PhaseCategory};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Substring rules; every matching rule contributes its categories
const LEXICAL_RULES: &[(&str, &[PhaseCategory])] = &[
    ("source", &[PhaseCategory::SourceProcessing]),
    ("compile", &[PhaseCategory::Compilation]),
    ("test", &[PhaseCategory::TestRelated]),
    ("resource", &[PhaseCategory::ResourceProcessing]),
    ("generate", &[PhaseCategory::Generation]),
    ("process", &[PhaseCategory::Processing]),
    ("package", &[PhaseCategory::Packaging]),
    ("verify", &[PhaseCategory::Verification]),
    ("install", &[PhaseCategory::Installation]),
    ("deploy", &[PhaseCategory::Deployment]),
    ("validate", &[PhaseCategory::Validation]),
    ("integration", &[PhaseCategory::Integration, PhaseCategory::TestRelated]),
];

pub struct LifecyclePhaseAnalyzer {
    registry: LifecycleRegistry,
    cache: AnalysisCache<String, PhaseAnalysis>,
}

impl LifecyclePhaseAnalyzer {
    pub fn new(registry: LifecycleRegistry) -> Self {
        Self {
            registry,
            cache: AnalysisCache::new("phase-analysis"),
        }
    }

    pub fn registry(&self) -> &LifecycleRegistry {
        &self.registry
    }

    /// Classify `phase`. Unknown phases yield empty categories, never an error.
    pub fn analyze_phase(&self, phase: &str) -> Arc<PhaseAnalysis> {
        self.cache
            .get_or_compute(&phase.to_string(), || self.classify(phase))
    }

    /// Behavior implied by the phase alone
    pub fn to_goal_behavior(&self, phase: &str) -> GoalBehavior {
        let analysis = self.analyze_phase(phase);
        let mut behavior = GoalBehavior::new();

        if analysis.has(PhaseCategory::SourceProcessing) || analysis.has(PhaseCategory::Compilation)
        {
            behavior.processes_sources = true;
        }
        if analysis.has(PhaseCategory::TestRelated) {
            // Test phases compile test sources.
            behavior.test_related = true;
            behavior.processes_sources = true;
        }
        if analysis.has(PhaseCategory::ResourceProcessing) {
            behavior.needs_resources = true;
        }

        behavior
    }

    /// Classify every phase the registry knows about
    pub fn warm(&self) {
        for phase in self.registry.all_phases() {
            self.analyze_phase(&phase);
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn classify(&self, phase: &str) -> PhaseAnalysis {
        let Some(lifecycle) = self.registry.lifecycle_for_phase(phase) else {
            return PhaseAnalysis::unknown(phase);
        };
        let position = lifecycle.position(phase);

        let lowered = phase.to_lowercase();
        let mut categories: BTreeSet<PhaseCategory> = LEXICAL_RULES
            .iter()
            .filter(|(needle, _)| lowered.contains(needle))
            .flat_map(|(_, categories)| categories.iter().copied())
            .collect();

        if let Some(idx) = position {
            categories.insert(position_bucket(idx, lifecycle.len()));
        }

        match lifecycle.id.as_str() {
            lifecycles::CLEAN => {
                categories.insert(PhaseCategory::Cleanup);
            }
            lifecycles::SITE => {
                categories.insert(PhaseCategory::Documentation);
            }
            lifecycles::DEFAULT => {
                categories.insert(PhaseCategory::Build);
            }
            _ => {}
        }

        PhaseAnalysis {
            phase: phase.to_string(),
            lifecycle: Some(lifecycle.id.clone()),
            position,
            categories,
        }
    }
}

/// EARLY/MIDDLE/LATE third of a lifecycle of `len` phases
fn position_bucket(idx: usize, len: usize) -> PhaseCategory {
    if idx * 3 < len {
        PhaseCategory::EarlyPhase
    } else if idx * 3 < len * 2 {
        PhaseCategory::MiddlePhase
    } else {
        PhaseCategory::LatePhase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn analyzer() -> LifecyclePhaseAnalyzer {
        LifecyclePhaseAnalyzer::new(LifecycleRegistry::maven())
    }

    #[test_case("validate", PhaseCategory::Validation ; "validate")]
    #[test_case("generate-sources", PhaseCategory::SourceProcessing ; "generate sources")]
    #[test_case("generate-sources", PhaseCategory::Generation ; "generate sources generation")]
    #[test_case("process-test-resources", PhaseCategory::ResourceProcessing ; "test resources")]
    #[test_case("process-test-resources", PhaseCategory::TestRelated ; "test resources test")]
    #[test_case("test-compile", PhaseCategory::Compilation ; "test compile")]
    #[test_case("integration-test", PhaseCategory::Integration ; "integration")]
    #[test_case("package", PhaseCategory::Packaging ; "package")]
    #[test_case("deploy", PhaseCategory::LatePhase ; "deploy is late")]
    #[test_case("test", PhaseCategory::MiddlePhase ; "test is middle")]
    #[test_case("initialize", PhaseCategory::EarlyPhase ; "initialize is early")]
    #[test_case("pre-clean", PhaseCategory::Cleanup ; "clean lifecycle")]
    #[test_case("site-deploy", PhaseCategory::Documentation ; "site lifecycle")]
    #[test_case("compile", PhaseCategory::Build ; "default lifecycle")]
    fn test_phase_has_category(phase: &str, category: PhaseCategory) {
        assert!(analyzer().analyze_phase(phase).has(category));
    }

    #[test]
    fn test_test_phase_behavior() {
        let analyzer = analyzer();
        let analysis = analyzer.analyze_phase("test");

        assert_eq!(analysis.lifecycle.as_deref(), Some("default"));
        assert_eq!(analysis.position, Some(14));

        let behavior = analyzer.to_goal_behavior("test");
        assert!(behavior.test_related);
        assert!(behavior.processes_sources);
        assert!(!behavior.needs_resources);
    }

    #[test]
    fn test_unknown_phase_is_empty_not_error() {
        let analysis = analyzer().analyze_phase("frobnicate");
        assert_eq!(analysis.position_index(), -1);
        assert!(analysis.lifecycle.is_none());
        assert!(analysis.categories.is_empty());
        assert!(analyzer().to_goal_behavior("frobnicate").is_empty());
    }

    #[test]
    fn test_results_are_cached_by_name() {
        let analyzer = analyzer();
        let first = analyzer.analyze_phase("compile");
        let second = analyzer.analyze_phase("compile");
        assert!(Arc::ptr_eq(&first, &second));

        analyzer.warm();
        assert_eq!(analyzer.cache_stats().entries, 30);
    }

    #[test]
    fn test_position_buckets() {
        assert_eq!(position_bucket(0, 3), PhaseCategory::EarlyPhase);
        assert_eq!(position_bucket(1, 3), PhaseCategory::MiddlePhase);
        assert_eq!(position_bucket(2, 3), PhaseCategory::LatePhase);
        assert_eq!(position_bucket(7, 23), PhaseCategory::EarlyPhase);
        assert_eq!(position_bucket(8, 23), PhaseCategory::MiddlePhase);
        assert_eq!(position_bucket(16, 23), PhaseCategory::LatePhase);
    }
}
