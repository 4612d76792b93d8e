//! Capability declarations per variant

use planmodel::{Feature, ProblemKind};

use crate::variant::Variant;

/// Features the satisficing configurations accept
pub const SATISFICING_FEATURES: &[Feature] = &[
    Feature::ContinuousNumbers,
    Feature::DiscreteNumbers,
    Feature::FlatTyping,
    Feature::HierarchicalTyping,
    Feature::NumericFluents,
    Feature::NegativeConditions,
    Feature::DisjunctiveConditions,
    Feature::ExistentialConditions,
    Feature::UniversalConditions,
    Feature::Equality,
    Feature::IncreaseEffects,
    Feature::DecreaseEffects,
    Feature::ConditionalEffects,
    Feature::StaticFluentsInNumericAssignments,
    Feature::FluentsInNumericAssignments,
    Feature::ActionsCost,
    Feature::PlanLength,
    Feature::FinalValue,
    Feature::StaticFluentsInActionsCost,
    Feature::FluentsInActionsCost,
];

/// Features the optimal configurations accept
///
/// Strict subset of [`SATISFICING_FEATURES`]: no conditional effects, no
/// fluent-dependent numeric assignments or costs, no final-value objectives.
pub const OPTIMAL_FEATURES: &[Feature] = &[
    Feature::ContinuousNumbers,
    Feature::DiscreteNumbers,
    Feature::FlatTyping,
    Feature::HierarchicalTyping,
    Feature::NumericFluents,
    Feature::NegativeConditions,
    Feature::DisjunctiveConditions,
    Feature::ExistentialConditions,
    Feature::UniversalConditions,
    Feature::Equality,
    Feature::IncreaseEffects,
    Feature::DecreaseEffects,
    Feature::StaticFluentsInNumericAssignments,
    Feature::ActionsCost,
    Feature::PlanLength,
    Feature::StaticFluentsInActionsCost,
];

/// The kind a variant declares it can handle
pub fn supported_kind(variant: Variant) -> ProblemKind {
    variant.spec().features.iter().copied().collect()
}

/// Whether `kind` is within what `variant` declares
pub fn supports(variant: Variant, kind: &ProblemKind) -> bool {
    kind.is_subset_of(&supported_kind(variant))
}

/// Features of `kind` the variant rejects, empty when supported
pub fn unsupported_features(variant: Variant, kind: &ProblemKind) -> Vec<Feature> {
    kind.difference(&supported_kind(variant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_optimal_is_subset_of_satisficing() {
        assert!(supported_kind(Variant::Opt).is_subset_of(&supported_kind(Variant::Sat)));
        assert!(supported_kind(Variant::OptBlind).is_subset_of(&supported_kind(Variant::Sat)));
        assert_eq!(supported_kind(Variant::Anytime), supported_kind(Variant::Sat));
    }

    #[test]
    fn test_optimal_rejects_unbounded_effects() {
        let kind = ProblemKind::new()
            .with(Feature::NumericFluents)
            .with(Feature::FluentsInNumericAssignments);

        assert!(supports(Variant::Sat, &kind));
        assert!(!supports(Variant::Opt, &kind));
        assert_eq!(
            unsupported_features(Variant::Opt, &kind),
            vec![Feature::FluentsInNumericAssignments]
        );
    }

    #[test]
    fn test_nobody_supports_object_fluents() {
        let kind = ProblemKind::new().with(Feature::ObjectFluents);
        for variant in Variant::ALL {
            assert!(!supports(variant, &kind), "{} should reject OBJECT_FLUENTS", variant);
        }
    }

    #[test]
    fn test_empty_kind_always_supported() {
        for variant in Variant::ALL {
            assert!(supports(variant, &ProblemKind::new()));
        }
    }

    proptest! {
        #[test]
        fn prop_optimal_support_implies_satisficing(idx in proptest::collection::vec(0usize..Feature::ALL.len(), 0..8)) {
            let kind: ProblemKind = idx.iter().map(|i| Feature::ALL[*i]).collect();
            if supports(Variant::Opt, &kind) {
                prop_assert!(supports(Variant::Sat, &kind));
            }
            if supports(Variant::OptBlind, &kind) {
                prop_assert!(supports(Variant::Sat, &kind));
            }
        }
    }
}
