//! Result classification
//!
//! The exit code is authoritative: a non-zero (or missing, when the process
//! died from a signal) exit code is an internal error whatever the engine left
//! on disk.

use planmodel::PlanGenerationStatus;
use tracing::debug;

/// Map a finished run onto a terminal status
pub fn classify(exit_code: Option<i32>, has_plan: bool, has_quality_metrics: bool, optimal: bool) -> PlanGenerationStatus {
    let status = match (exit_code, has_plan) {
        (Some(0), false) => PlanGenerationStatus::UnsolvableProven,
        (Some(0), true) if has_quality_metrics && optimal => PlanGenerationStatus::SolvedOptimally,
        (Some(0), true) => PlanGenerationStatus::SolvedSatisficing,
        _ => PlanGenerationStatus::InternalError,
    };
    debug!(?exit_code, has_plan, has_quality_metrics, optimal, %status, "classify: done");
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classification_table() {
        use PlanGenerationStatus::*;

        assert_eq!(classify(Some(1), true, true, true), InternalError);
        assert_eq!(classify(None, false, false, false), InternalError);
        assert_eq!(classify(Some(0), false, true, true), UnsolvableProven);
        assert_eq!(classify(Some(0), true, false, true), SolvedSatisficing);
        assert_eq!(classify(Some(0), true, true, false), SolvedSatisficing);
        assert_eq!(classify(Some(0), true, true, true), SolvedOptimally);
    }

    proptest! {
        #[test]
        fn prop_nonzero_exit_is_internal_error(code in any::<i32>().prop_filter("non-zero", |c| *c != 0),
                                               plan in any::<bool>(), metric in any::<bool>(), optimal in any::<bool>()) {
            prop_assert_eq!(classify(Some(code), plan, metric, optimal), PlanGenerationStatus::InternalError);
        }

        #[test]
        fn prop_never_intermediate(code in proptest::option::of(any::<i32>()),
                                   plan in any::<bool>(), metric in any::<bool>(), optimal in any::<bool>()) {
            prop_assert!(classify(code, plan, metric, optimal).is_terminal());
        }
    }
}
