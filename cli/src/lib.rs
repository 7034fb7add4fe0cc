//! Command-line front end for Mercator.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Errors surfaced to the user
//! - [`run`] - Command execution against a data source

pub mod cli;
pub mod error;
pub mod run;

pub use cli::{Cli, Command};
pub use error::{CliError, Result};
pub use run::{exit_code_for_run_result, run};
