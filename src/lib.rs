// src/lib.rs - Library interface for internal module access

pub mod axis_names;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod data_output;
pub mod dataset;
pub mod error;
pub mod plot_framework;
pub mod plot_functions;
pub mod types;

/// Release version, preferring a git-derived semver when the build provides one.
pub fn crate_version() -> &'static str {
    option_env!("VERGEN_GIT_SEMVER").unwrap_or(env!("CARGO_PKG_VERSION"))
}
