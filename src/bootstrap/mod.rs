// src/bootstrap/mod.rs

//! Post-generation bootstrap of a rendered project.
//!
//! - [`plan`] builds the ordered list of steps (git setup, install, export,
//!   commit, release) from the configuration.
//! - [`driver`] runs that list strictly in order through a step executor.
//! - [`naming`] checks the generated module name before anything runs.

pub mod driver;
pub mod naming;
pub mod plan;

pub use driver::{Bootstrap, BootstrapSummary, StepReport};
pub use naming::validate_module_name;
pub use plan::{Step, build_plan, default_plan};
