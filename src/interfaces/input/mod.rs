//! `spindet` input files.

use anyhow::{self, format_err, Context};
use serde::{Deserialize, Serialize};

use crate::determinant::{Determinant, Spin};
use crate::drivers::excitation_analysis::{ExcitationAnalysisDriver, ExcitationAnalysisParams};
use crate::drivers::SpinDetDriver;
use crate::excitation::Excitation;
use crate::interfaces::InputHandle;
use crate::io::format::spindet_output;
use crate::spindet::kind::{SpinDetKind, SpinDetRepresentation};
use crate::spindet::OrbitalIndex;


// ==================
// Struct definitions
// ==================

/// A serialisable/deserialisable structure specifying a determinant by the orbitals occupied in
/// each of its two spin channels.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeterminantOccupations {
    /// The occupied $`\alpha`$ orbitals, in strictly increasing order.
    #[serde(default)]
    pub alpha: Vec<OrbitalIndex>,

    /// The occupied $`\beta`$ orbitals, in strictly increasing order.
    #[serde(default)]
    pub beta: Vec<OrbitalIndex>,
}

impl DeterminantOccupations {
    /// Builds the determinant described by these occupations.
    ///
    /// # Arguments
    ///
    /// * `representation` - The representation of the two spin determinants.
    pub fn to_determinant(
        &self,
        representation: SpinDetRepresentation,
    ) -> Result<Determinant<SpinDetKind>, anyhow::Error> {
        let alpha = SpinDetKind::from_indices(representation, &self.alpha)
            .with_context(|| format!("Invalid α occupation {:?}", self.alpha))?;
        let beta = SpinDetKind::from_indices(representation, &self.beta)
            .with_context(|| format!("Invalid β occupation {:?}", self.beta))?;
        Ok(Determinant::new(alpha, beta))
    }
}

/// A serialisable/deserialisable enumerated type representing the possible ways to specify the
/// target determinant of a pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PairTarget {
    /// Variant for a target given by the excitations, all in one spin channel, that take the
    /// source determinant to it. The excitations are applied in order.
    Excitations {
        spin: Spin,
        excitations: Vec<Excitation>,
    },

    /// Variant for a target given explicitly by its occupations.
    Occupations(DeterminantOccupations),
}

/// A serialisable/deserialisable structure specifying one pair of determinants to be compared.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeterminantPair {
    /// The source determinant.
    pub source: DeterminantOccupations,

    /// The target determinant.
    pub target: PairTarget,
}

impl DeterminantPair {
    /// Builds the `(source, target)` determinant pair.
    pub fn to_determinants(
        &self,
        representation: SpinDetRepresentation,
    ) -> Result<(Determinant<SpinDetKind>, Determinant<SpinDetKind>), anyhow::Error> {
        let source = self.source.to_determinant(representation)?;
        let target = match &self.target {
            PairTarget::Occupations(occ) => occ.to_determinant(representation)?,
            PairTarget::Excitations { spin, excitations } => {
                source.excite(*spin, excitations)?
            }
        };
        Ok((source, target))
    }
}

/// A structure containing `spindet` input parameters which can be serialised into and
/// deserialised from a YAML input file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Input {
    /// The representation used for all spin determinants.
    ///
    /// # Default
    ///
    /// If not specified, [`SpinDetRepresentation::Sparse`] is used.
    #[serde(default)]
    pub representation: SpinDetRepresentation,

    /// The control parameters for excitation analysis.
    #[serde(default)]
    pub excitation_analysis: ExcitationAnalysisParams,

    /// The determinant pairs to be compared.
    #[serde(default)]
    pub pairs: Vec<DeterminantPair>,
}

impl Input {
    /// Builds all determinant pairs specified in this input.
    pub fn determinant_pairs(
        &self,
    ) -> Result<Vec<(Determinant<SpinDetKind>, Determinant<SpinDetKind>)>, anyhow::Error> {
        self.pairs
            .iter()
            .enumerate()
            .map(|(i, pair)| {
                pair.to_determinants(self.representation)
                    .with_context(|| format!("Unable to construct determinant pair {i}"))
            })
            .collect()
    }
}

impl InputHandle for Input {
    /// Handles the main input structure.
    fn handle(&self) -> Result<(), anyhow::Error> {
        spindet_output!("Spin-determinant representation: {}", self.representation);
        spindet_output!("Number of determinant pairs: {}", self.pairs.len());
        spindet_output!("");
        let pairs = self.determinant_pairs()?;
        let mut driver = ExcitationAnalysisDriver::<SpinDetKind>::builder()
            .parameters(&self.excitation_analysis)
            .pairs(&pairs)
            .build()
            .map_err(|err| format_err!(err))?;
        driver
            .run()
            .with_context(|| "Excitation analysis failed")?;
        let result = driver.result()?;
        log::debug!(
            "Excitation analysis completed for {} determinant pair(s).",
            result.comparisons.len()
        );
        Ok(())
    }
}
