//! Driver for comparing pairs of determinants channel by channel.

use std::fmt;
use std::path::PathBuf;

use anyhow::{self, format_err, Context};
use derive_builder::Builder;
use itertools::Itertools;
use log;
use serde::{Deserialize, Serialize};

use crate::determinant::{Determinant, Spin};
use crate::drivers::SpinDetDriver;
use crate::io::format::{
    log_title, nice_bool, spindet_output, spindet_warn, write_subtitle, SpinDetOutput,
};
use crate::io::{write_spindet_binary, SpinDetFileType};
use crate::spindet::{OrbitalIndex, Phase, SpinDeterminantAlgebra};


// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

fn default_true() -> bool {
    true
}

/// A structure containing control parameters for excitation analysis.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct ExcitationAnalysisParams {
    /// Boolean indicating if phases are to be computed for channels separated by single or double
    /// excitations.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub compute_phases: bool,

    /// Boolean indicating if the holes and particles of every channel are to be written out.
    #[builder(default = "false")]
    #[serde(default)]
    pub write_holes_particles: bool,

    /// Optional name (without extensions) for saving the analysis results as a binary file of
    /// type [`SpinDetFileType::Exc`]. If `None`, the results will not be saved.
    #[builder(default = "None")]
    #[serde(default)]
    pub result_save_name: Option<PathBuf>,
}

impl ExcitationAnalysisParams {
    /// Returns a builder to construct a [`ExcitationAnalysisParams`] structure.
    pub fn builder() -> ExcitationAnalysisParamsBuilder {
        ExcitationAnalysisParamsBuilder::default()
    }
}

impl Default for ExcitationAnalysisParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to construct a default `ExcitationAnalysisParams`.")
    }
}

impl fmt::Display for ExcitationAnalysisParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Compute phases: {}", nice_bool(self.compute_phases))?;
        writeln!(
            f,
            "Write holes and particles: {}",
            nice_bool(self.write_holes_particles)
        )?;
        if let Some(name) = self.result_save_name.as_ref() {
            writeln!(f, "Save results to: {}", name.display())?;
        }
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Result
// ------

/// A structure containing the comparison of one spin channel of two determinants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelComparison {
    /// The spin channel compared.
    pub spin: Spin,

    /// The excitation degree separating the two channels.
    pub degree: usize,

    /// The orbitals occupied in the source channel only.
    pub holes: Vec<OrbitalIndex>,

    /// The orbitals occupied in the target channel only.
    pub particles: Vec<OrbitalIndex>,

    /// The phase of the excitation, available only when the channels are identical or differ by
    /// a single or a double excitation and phases have been requested.
    pub phase: Option<Phase>,
}

/// A structure containing the comparison of two determinants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairComparison {
    /// The source determinant, formatted.
    pub source: String,

    /// The target determinant, formatted.
    pub target: String,

    /// The comparison of the $`\alpha`$ channels.
    pub alpha: ChannelComparison,

    /// The comparison of the $`\beta`$ channels.
    pub beta: ChannelComparison,
}

impl PairComparison {
    /// Returns the excitation degrees `(up, dn)` of the pair.
    pub fn exc_degree(&self) -> (usize, usize) {
        (self.alpha.degree, self.beta.degree)
    }

    /// Returns the overall phase of the pair, which is the product of the channel phases, if
    /// both are available.
    pub fn phase(&self) -> Option<Phase> {
        Some(self.alpha.phase? * self.beta.phase?)
    }
}

/// A structure to contain excitation-analysis results.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct ExcitationAnalysisResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: ExcitationAnalysisParams,

    /// The comparisons, in the order the determinant pairs were given.
    pub comparisons: Vec<PairComparison>,
}

impl ExcitationAnalysisResult {
    /// Returns a builder to construct a [`ExcitationAnalysisResult`] structure.
    fn builder() -> ExcitationAnalysisResultBuilder {
        ExcitationAnalysisResultBuilder::default()
    }

    /// Writes the holes and particles of every pair in a nicely formatted table.
    fn write_holes_particles(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtitle(f, "Holes and particles")?;
        writeln!(f)?;
        let fmt_indices = |indices: &[OrbitalIndex]| {
            if indices.is_empty() {
                "--".to_string()
            } else {
                indices.iter().join(" ")
            }
        };
        let rows = self
            .comparisons
            .iter()
            .enumerate()
            .flat_map(|(i, comp)| {
                [&comp.alpha, &comp.beta].into_iter().map(move |chan| {
                    (
                        i,
                        chan.spin,
                        fmt_indices(&chan.holes),
                        fmt_indices(&chan.particles),
                    )
                })
            })
            .collect_vec();
        let holes_width = rows
            .iter()
            .map(|(_, _, holes, _)| holes.chars().count())
            .chain([5])
            .max()
            .unwrap_or(5);
        let particles_width = rows
            .iter()
            .map(|(_, _, _, particles)| particles.chars().count())
            .chain([9])
            .max()
            .unwrap_or(9);
        let table_width = 14 + holes_width + particles_width;
        writeln!(f, "{}", "┈".repeat(table_width))?;
        writeln!(
            f,
            " {:>3}  {:>4}  {:<holes_width$}  {:<particles_width$}",
            "#", "Spin", "Holes", "Particles"
        )?;
        writeln!(f, "{}", "┈".repeat(table_width))?;
        for (i, spin, holes, particles) in rows.iter() {
            writeln!(
                f,
                " {i:>3}  {:>4}  {holes:<holes_width$}  {particles:<particles_width$}",
                spin.to_string()
            )?;
        }
        writeln!(f, "{}", "┈".repeat(table_width))?;
        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for ExcitationAnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtitle(f, "Excitation degrees and phases")?;
        writeln!(f)?;
        let fmt_phase = |phase: Option<Phase>| {
            phase
                .map(|ph| ph.to_string())
                .unwrap_or_else(|| "--".to_string())
        };
        let source_width = self
            .comparisons
            .iter()
            .map(|comp| comp.source.chars().count())
            .chain([6])
            .max()
            .unwrap_or(6);
        let target_width = self
            .comparisons
            .iter()
            .map(|comp| comp.target.chars().count())
            .chain([6])
            .max()
            .unwrap_or(6);
        let table_width = 46 + source_width + target_width;
        writeln!(f, "{}", "┈".repeat(table_width))?;
        writeln!(
            f,
            " {:>3}  {:<source_width$}  {:<target_width$}  {:>5}  {:>5}  {:>5}  {:>5}  {:>5}",
            "#", "Source", "Target", "Deg α", "Deg β", "Ph α", "Ph β", "Phase"
        )?;
        writeln!(f, "{}", "┈".repeat(table_width))?;
        for (i, comp) in self.comparisons.iter().enumerate() {
            writeln!(
                f,
                " {i:>3}  {:<source_width$}  {:<target_width$}  {:>5}  {:>5}  {:>5}  {:>5}  {:>5}",
                comp.source,
                comp.target,
                comp.alpha.degree,
                comp.beta.degree,
                fmt_phase(comp.alpha.phase),
                fmt_phase(comp.beta.phase),
                fmt_phase(comp.phase()),
            )?;
        }
        writeln!(f, "{}", "┈".repeat(table_width))?;
        writeln!(f)?;

        if self.parameters.write_holes_particles {
            self.write_holes_particles(f)?;
        }
        Ok(())
    }
}

// ------
// Driver
// ------

/// A driver for comparing pairs of determinants: excitation degrees, holes, particles and phases.
#[derive(Clone, Builder)]
pub struct ExcitationAnalysisDriver<'a, D>
where
    D: SpinDeterminantAlgebra + fmt::Display,
{
    /// The control parameters for excitation analysis.
    parameters: &'a ExcitationAnalysisParams,

    /// The `(source, target)` determinant pairs to be compared.
    pairs: &'a [(Determinant<D>, Determinant<D>)],

    /// The result of the excitation analysis.
    #[builder(setter(skip), default = "None")]
    result: Option<ExcitationAnalysisResult>,
}

impl<'a, D> ExcitationAnalysisDriver<'a, D>
where
    D: SpinDeterminantAlgebra + fmt::Display,
{
    /// Returns a builder to construct a [`ExcitationAnalysisDriver`] structure.
    pub fn builder() -> ExcitationAnalysisDriverBuilder<'a, D> {
        ExcitationAnalysisDriverBuilder::default()
    }

    /// Compares channel `spin` of `source` and `target`.
    fn compare_channel(
        &self,
        source: &Determinant<D>,
        target: &Determinant<D>,
        spin: Spin,
    ) -> Result<ChannelComparison, anyhow::Error> {
        let analysis = source.analyse(target, spin);
        let holes = analysis.holes().occupied_indices();
        let particles = analysis.particles().occupied_indices();
        if holes.len() != particles.len() {
            spindet_warn!(
                "The {spin} channels of {source} and {target} hold different numbers of electrons."
            );
        }
        // Holes and particles come in increasing order, as in `Determinant::double_exc`.
        let source_channel = source.channel(spin);
        let phase = if self.parameters.compute_phases {
            match (holes.as_slice(), particles.as_slice()) {
                ([], []) => Some(Phase::Positive),
                (&[hole], &[particle]) => Some(source_channel.phase_single(hole, particle)?),
                (&[h1, h2], &[p1, p2]) => Some(source_channel.phase_double(h1, p1, h2, p2)?),
                _ => None,
            }
        } else {
            None
        };
        Ok(ChannelComparison {
            spin,
            degree: analysis.degree(),
            holes,
            particles,
            phase,
        })
    }

    /// Executes excitation analysis.
    fn analyse_excitations(&mut self) -> Result<(), anyhow::Error> {
        log_title("Excitation Analysis");
        spindet_output!("");
        let params = self.parameters;
        params.log_output_display();

        let comparisons = self
            .pairs
            .iter()
            .enumerate()
            .map(|(i, (source, target))| {
                log::debug!("Comparing determinant pair {i}: {source} vs. {target}");
                Ok::<_, anyhow::Error>(PairComparison {
                    source: source.to_string(),
                    target: target.to_string(),
                    alpha: self.compare_channel(source, target, Spin::Alpha)?,
                    beta: self.compare_channel(source, target, Spin::Beta)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| "Unable to compare the determinant pairs")?;

        let result = ExcitationAnalysisResult::builder()
            .parameters(params.clone())
            .comparisons(comparisons)
            .build()
            .map_err(|err| format_err!(err))?;
        result.log_output_display();

        // Save excitation-analysis result, if requested
        if let Some(name) = params.result_save_name.as_ref() {
            write_spindet_binary(name, SpinDetFileType::Exc, &result)?;
            spindet_output!(
                "Excitation-analysis results saved as {}.{}.",
                name.display(),
                SpinDetFileType::Exc.ext()
            );
            spindet_output!("");
        }
        self.result = Some(result);
        Ok(())
    }
}

impl<D> SpinDetDriver for ExcitationAnalysisDriver<'_, D>
where
    D: SpinDeterminantAlgebra + fmt::Display,
{
    type Outcome = ExcitationAnalysisResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No excitation-analysis results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.analyse_excitations()
    }
}
