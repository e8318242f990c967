//! Nice `spindet` output formatting.

use std::fmt;

const SPINDET_BANNER_LENGTH: usize = 88;

/// Logs a warning to the `spindet-output` logger.
macro_rules! spindet_warn {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::warn!(target: "spindet-output", $fmt, $($($arg)*)?); }
}

/// Logs a main output line to the `spindet-output` logger.
macro_rules! spindet_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "spindet-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {spindet_output, spindet_warn};

/// Logs a nicely formatted section title to the `spindet-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(SPINDET_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    spindet_output!("┌──{bar}──┐");
    spindet_output!("│§ {title:^length$} §│");
    spindet_output!("└──{bar}──┘");
}

/// Writes a nicely formatted subtitle.
pub(crate) fn write_subtitle(f: &mut fmt::Formatter<'_>, subtitle: &str) -> fmt::Result {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    writeln!(f, "{subtitle}")?;
    writeln!(f, "{bar}")?;
    Ok(())
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// A trait for logging `spindet` outputs nicely.
pub(crate) trait SpinDetOutput: fmt::Debug + fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            spindet_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> SpinDetOutput for T where T: fmt::Debug + fmt::Display {}
