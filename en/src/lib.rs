//! ENHSP - numeric planner adapter
//!
//! Runs the Java-based ENHSP planner as an external process and adapts it to
//! the `planmodel` engine traits: it materialises the problem's PDDL, builds
//! the command line for the selected variant, runs the process, parses the
//! plan it prints and classifies the outcome.
//!
//! # Variants
//!
//! - `SAT` - satisficing search, user-configurable (`enhsp`)
//! - `OPT` - `WAStar` + `hrmax`, optimal (`enhsp-opt`)
//! - `OPT-BLIND` - `WAStar` + blind heuristic, optimal (`enhsp-opt-blind`)
//! - `ANYTIME` - streams improving plans (`enhsp-anytime`)
//!
//! # Example
//!
//! ```ignore
//! use enhsp::{Enhsp, Launcher, Variant};
//! use planmodel::Problem;
//!
//! let problem = Problem::load("robot.yml")?;
//! let engine = Enhsp::new(Variant::Sat, Launcher::java("java", &[], "enhsp.jar".as_ref()));
//! let result = engine.solve(&problem).await?;
//! println!("{}: {:?}", result.status, result.plan);
//! ```

pub mod capabilities;
pub mod classify;
pub mod cli;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod java;
pub mod parser;
pub mod runner;
pub mod scanner;
pub mod variant;
pub mod workspace;

pub use classify::classify;
pub use command::{Launcher, PlanFiles, SearchParams};
pub use config::Config;
pub use engine::Enhsp;
pub use error::{EngineError, ParseError};
pub use runner::{AnytimeRun, EngineOutput};
pub use scanner::PlanScanner;
pub use variant::{Variant, VariantSpec};
pub use workspace::Workspace;
