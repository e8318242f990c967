//! Interfaces between `spindet` and its users: command-line arguments and YAML input files.

use anyhow;

pub mod cli;
pub mod input;

/// Trait for handling an input specification.
pub trait InputHandle {
    /// Handles the input specification and runs appropriate calculations.
    fn handle(&self) -> Result<(), anyhow::Error>;
}
