//! Problem kinds - the feature sets a problem uses and an engine accepts

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading feature names
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KindError {
    #[error("Unknown problem feature: {0}")]
    UnknownFeature(String),
}

/// Grouping of features, mirroring how a problem kind is described
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureCategory {
    Numbers,
    Typing,
    FluentsType,
    ConditionsKind,
    EffectsKind,
    QualityMetrics,
    ActionsCostKind,
}

/// A single planning problem feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    ContinuousNumbers,
    DiscreteNumbers,
    FlatTyping,
    HierarchicalTyping,
    NumericFluents,
    ObjectFluents,
    NegativeConditions,
    DisjunctiveConditions,
    ExistentialConditions,
    UniversalConditions,
    Equality,
    ConditionalEffects,
    IncreaseEffects,
    DecreaseEffects,
    StaticFluentsInNumericAssignments,
    FluentsInNumericAssignments,
    ActionsCost,
    PlanLength,
    FinalValue,
    StaticFluentsInActionsCost,
    FluentsInActionsCost,
}

impl Feature {
    /// Every feature, in declaration order
    pub const ALL: [Feature; 21] = [
        Feature::ContinuousNumbers,
        Feature::DiscreteNumbers,
        Feature::FlatTyping,
        Feature::HierarchicalTyping,
        Feature::NumericFluents,
        Feature::ObjectFluents,
        Feature::NegativeConditions,
        Feature::DisjunctiveConditions,
        Feature::ExistentialConditions,
        Feature::UniversalConditions,
        Feature::Equality,
        Feature::ConditionalEffects,
        Feature::IncreaseEffects,
        Feature::DecreaseEffects,
        Feature::StaticFluentsInNumericAssignments,
        Feature::FluentsInNumericAssignments,
        Feature::ActionsCost,
        Feature::PlanLength,
        Feature::FinalValue,
        Feature::StaticFluentsInActionsCost,
        Feature::FluentsInActionsCost,
    ];

    /// Category this feature belongs to
    pub fn category(&self) -> FeatureCategory {
        match self {
            Feature::ContinuousNumbers | Feature::DiscreteNumbers => FeatureCategory::Numbers,
            Feature::FlatTyping | Feature::HierarchicalTyping => FeatureCategory::Typing,
            Feature::NumericFluents | Feature::ObjectFluents => FeatureCategory::FluentsType,
            Feature::NegativeConditions
            | Feature::DisjunctiveConditions
            | Feature::ExistentialConditions
            | Feature::UniversalConditions
            | Feature::Equality => FeatureCategory::ConditionsKind,
            Feature::ConditionalEffects
            | Feature::IncreaseEffects
            | Feature::DecreaseEffects
            | Feature::StaticFluentsInNumericAssignments
            | Feature::FluentsInNumericAssignments => FeatureCategory::EffectsKind,
            Feature::ActionsCost | Feature::PlanLength | Feature::FinalValue => FeatureCategory::QualityMetrics,
            Feature::StaticFluentsInActionsCost | Feature::FluentsInActionsCost => FeatureCategory::ActionsCostKind,
        }
    }

    /// Canonical upper-case name, e.g. `NUMERIC_FLUENTS`
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::ContinuousNumbers => "CONTINUOUS_NUMBERS",
            Feature::DiscreteNumbers => "DISCRETE_NUMBERS",
            Feature::FlatTyping => "FLAT_TYPING",
            Feature::HierarchicalTyping => "HIERARCHICAL_TYPING",
            Feature::NumericFluents => "NUMERIC_FLUENTS",
            Feature::ObjectFluents => "OBJECT_FLUENTS",
            Feature::NegativeConditions => "NEGATIVE_CONDITIONS",
            Feature::DisjunctiveConditions => "DISJUNCTIVE_CONDITIONS",
            Feature::ExistentialConditions => "EXISTENTIAL_CONDITIONS",
            Feature::UniversalConditions => "UNIVERSAL_CONDITIONS",
            Feature::Equality => "EQUALITY",
            Feature::ConditionalEffects => "CONDITIONAL_EFFECTS",
            Feature::IncreaseEffects => "INCREASE_EFFECTS",
            Feature::DecreaseEffects => "DECREASE_EFFECTS",
            Feature::StaticFluentsInNumericAssignments => "STATIC_FLUENTS_IN_NUMERIC_ASSIGNMENTS",
            Feature::FluentsInNumericAssignments => "FLUENTS_IN_NUMERIC_ASSIGNMENTS",
            Feature::ActionsCost => "ACTIONS_COST",
            Feature::PlanLength => "PLAN_LENGTH",
            Feature::FinalValue => "FINAL_VALUE",
            Feature::StaticFluentsInActionsCost => "STATIC_FLUENTS_IN_ACTIONS_COST",
            Feature::FluentsInActionsCost => "FLUENTS_IN_ACTIONS_COST",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = KindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase().replace('-', "_");
        Feature::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| KindError::UnknownFeature(s.to_string()))
    }
}

/// The set of features a problem uses, or an engine accepts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemKind {
    features: BTreeSet<Feature>,
}

impl ProblemKind {
    /// Create an empty kind
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }

    /// Insert a feature
    pub fn set(&mut self, feature: Feature) {
        self.features.insert(feature);
    }

    /// Remove a feature
    pub fn unset(&mut self, feature: Feature) {
        self.features.remove(&feature);
    }

    /// Check whether a feature is present
    pub fn has(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    /// True when every feature of `self` is also in `other`
    pub fn is_subset_of(&self, other: &ProblemKind) -> bool {
        self.features.is_subset(&other.features)
    }

    /// Features present in either kind
    pub fn union(&self, other: &ProblemKind) -> ProblemKind {
        ProblemKind {
            features: self.features.union(&other.features).copied().collect(),
        }
    }

    /// Features of `self` missing from `other`
    pub fn difference(&self, other: &ProblemKind) -> Vec<Feature> {
        self.features.difference(&other.features).copied().collect()
    }

    /// Features in a given category
    pub fn in_category(&self, category: FeatureCategory) -> impl Iterator<Item = Feature> + '_ {
        self.features.iter().copied().filter(move |f| f.category() == category)
    }

    pub fn features(&self) -> impl Iterator<Item = Feature> + '_ {
        self.features.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FromIterator<Feature> for ProblemKind {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.features.iter().map(Feature::as_str).collect();
        write!(f, "{}", names.join(", "))
    }
}
