//! Native build support.
//!
//! The package manager resolves and builds third-party packages; this module
//! stages the results into one flat tree for the installer's own build.

pub mod aggregate;
pub mod env;
pub mod graph;
pub mod recipe;
pub mod staging;

pub use aggregate::{import_dependencies, AggregationReport, AggregationWarning, Phase};
pub use env::{BuildEnv, EnvScope};
pub use graph::{DependencyGraph, DependencyRef};
pub use recipe::Recipe;
pub use staging::StagingTree;
