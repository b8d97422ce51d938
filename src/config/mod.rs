// src/config/mod.rs

//! Configuration loading and validation for postgen.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk and layer CLI overrides (`loader.rs`).
//! - Validate names, addresses and step commands (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    ConfigOverrides, PYPI_TOKEN_ENV, default_config_path, load_and_validate, load_from_path,
    load_or_default,
};
pub use model::{
    BehaviourSection, ConfigFile, GitSection, InstallSection, ProjectSection, RawConfigFile,
    ReleaseSection, StepConfig,
};
