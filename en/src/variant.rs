//! Engine variants
//!
//! Each variant is a tag plus a declarative record: the flags it forces on the
//! command line, the capability set it declares and whether it claims
//! optimality or streams intermediate plans.

use std::fmt;
use std::str::FromStr;

use planmodel::{Credits, Feature};
use serde::{Deserialize, Serialize};

use crate::capabilities::{OPTIMAL_FEATURES, SATISFICING_FEATURES};

/// Named ENHSP configuration used when no search parameters are given
pub const DEFAULT_SAT_CONFIGURATION: &str = "sat-hmrp";

/// Credits shared by all variants
pub static CREDITS: Credits = Credits {
    name: "ENHSP",
    author: "Enrico Scala",
    contact: "enrico.scala@unibs.it",
    website: "https://gitlab.com/enricos83/ENHSP-Public",
    license: "GPL-3.0",
    short_description: "Expressive Numeric Heuristic Search Planner",
    long_description: "ENHSP is a heuristic search planner for numeric planning problems. It supports \
                       satisficing and optimal planning over linear and non-linear numeric conditions \
                       and effects, and can run in anytime mode to stream improving plans.",
};

/// Declarative record for one variant
#[derive(Debug)]
pub struct VariantSpec {
    /// Registry name of the engine
    pub engine_name: &'static str,

    /// Flags that replace any user search parameters; empty means user
    /// parameters (or the default configuration) apply
    pub forced_flags: &'static [&'static str],

    /// Flags appended after the search parameters
    pub trailing_flags: &'static [&'static str],

    /// Capability set
    pub features: &'static [Feature],

    /// Solved results with a quality metric are optimal
    pub optimal: bool,

    /// Streams intermediate plans
    pub anytime: bool,
}

static SAT: VariantSpec = VariantSpec {
    engine_name: "enhsp",
    forced_flags: &[],
    trailing_flags: &[],
    features: SATISFICING_FEATURES,
    optimal: false,
    anytime: false,
};

static OPT: VariantSpec = VariantSpec {
    engine_name: "enhsp-opt",
    forced_flags: &["-s", "WAStar", "-h", "hrmax"],
    trailing_flags: &[],
    features: OPTIMAL_FEATURES,
    optimal: true,
    anytime: false,
};

static OPT_BLIND: VariantSpec = VariantSpec {
    engine_name: "enhsp-opt-blind",
    forced_flags: &["-s", "WAStar", "-h", "blind"],
    trailing_flags: &[],
    features: OPTIMAL_FEATURES,
    optimal: true,
    anytime: false,
};

static ANYTIME: VariantSpec = VariantSpec {
    engine_name: "enhsp-anytime",
    forced_flags: &[],
    trailing_flags: &["-anytime"],
    features: SATISFICING_FEATURES,
    optimal: false,
    anytime: true,
};

/// The closed set of ENHSP configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    #[default]
    Sat,
    Opt,
    OptBlind,
    Anytime,
}

impl Variant {
    pub const ALL: [Variant; 4] = [Variant::Sat, Variant::Opt, Variant::OptBlind, Variant::Anytime];

    pub fn spec(&self) -> &'static VariantSpec {
        match self {
            Variant::Sat => &SAT,
            Variant::Opt => &OPT,
            Variant::OptBlind => &OPT_BLIND,
            Variant::Anytime => &ANYTIME,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Variant::Sat => "SAT",
            Variant::Opt => "OPT",
            Variant::OptBlind => "OPT-BLIND",
            Variant::Anytime => "ANYTIME",
        }
    }

    pub fn engine_name(&self) -> &'static str {
        self.spec().engine_name
    }

    pub fn is_optimal(&self) -> bool {
        self.spec().optimal
    }

    pub fn is_anytime(&self) -> bool {
        self.spec().anytime
    }

    /// Look a variant up by its registry name
    pub fn from_engine_name(name: &str) -> Option<Variant> {
        Variant::ALL.into_iter().find(|v| v.engine_name() == name)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase().replace('_', "-");
        Variant::ALL
            .into_iter()
            .find(|v| v.tag() == wanted)
            .or_else(|| Variant::from_engine_name(s.trim()))
            .ok_or_else(|| format!("Unknown variant '{}' (expected one of: SAT, OPT, OPT-BLIND, ANYTIME)", s))
    }
}
