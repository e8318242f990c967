//! Drivers to carry out `spindet` functionalities.

use anyhow;

pub mod excitation_analysis;

// =================
// Trait definitions
// =================

/// Trait defining behaviours of `spindet` drivers.
pub trait SpinDetDriver {
    /// The type of the successful outcome when executing the driver.
    type Outcome;

    /// Executes the driver and stores the result internally.
    fn run(&mut self) -> Result<(), anyhow::Error>;

    /// Returns the result of the driver execution.
    fn result(&self) -> Result<&Self::Outcome, anyhow::Error>;
}
