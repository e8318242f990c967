//! Fixed-width spin determinants stored as 64-bit occupation masks.

use std::fmt;

use anyhow::{self, ensure};
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::spindet::sparse::SparseSpinDet;
use crate::spindet::{validate_single_excitation, OrbitalIndex, Phase, SpinDeterminantAlgebra};

#[cfg(test)]
#[path = "bitmask_tests.rs"]
mod bitmask_tests;

/// The number of orbitals a [`BitmaskSpinDet`] can describe.
pub const BITMASK_WIDTH: OrbitalIndex = u64::BITS;

/// A structure to manage spin determinants as 64-bit occupation masks, where bit $`i`$ is set if
/// and only if orbital $`i`$ is occupied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BitmaskSpinDet {
    /// The occupation mask.
    bits: u64,
}

impl BitmaskSpinDet {
    /// Constructs a spin determinant directly from an occupation mask.
    pub fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Constructs a spin determinant from a list of occupied orbitals, in any order.
    ///
    /// # Errors
    ///
    /// Errors if any orbital index does not fit in the mask.
    pub fn from_indices(indices: &[OrbitalIndex]) -> Result<Self, anyhow::Error> {
        indices.iter().try_fold(Self::default(), |det, &idx| {
            check_domain(idx)?;
            Ok(Self::from_bits(det.bits | (1u64 << idx)))
        })
    }

    /// Returns the occupation mask.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Returns the occupied orbitals in increasing order.
    pub fn occupied(&self) -> Vec<OrbitalIndex> {
        self.bits
            .view_bits::<Lsb0>()
            .iter_ones()
            .map(|idx| idx as OrbitalIndex)
            .collect()
    }
}

/// Checks that orbital `idx` can be represented in a [`BitmaskSpinDet`].
fn check_domain(idx: OrbitalIndex) -> Result<(), anyhow::Error> {
    ensure!(
        idx < BITMASK_WIDTH,
        "Orbital index {idx} exceeds the {BITMASK_WIDTH}-orbital capacity of a bitmask spin determinant."
    );
    Ok(())
}

impl SpinDeterminantAlgebra for BitmaskSpinDet {
    fn xor(&self, other: &Self) -> Self {
        Self::from_bits(self.bits ^ other.bits)
    }

    fn and(&self, other: &Self) -> Self {
        Self::from_bits(self.bits & other.bits)
    }

    fn or(&self, other: &Self) -> Self {
        Self::from_bits(self.bits | other.bits)
    }

    fn popcount(&self) -> usize {
        self.bits.count_ones() as usize
    }

    fn contains(&self, idx: OrbitalIndex) -> bool {
        idx < BITMASK_WIDTH && self.bits & (1u64 << idx) != 0
    }

    fn occupied_indices(&self) -> Vec<OrbitalIndex> {
        self.occupied()
    }

    fn apply_single_excitation(
        &mut self,
        hole: OrbitalIndex,
        particle: OrbitalIndex,
    ) -> Result<(), anyhow::Error> {
        check_domain(hole)?;
        check_domain(particle)?;
        validate_single_excitation(|idx| self.contains(idx), hole, particle)?;
        self.bits ^= (1u64 << hole) | (1u64 << particle);
        Ok(())
    }

    fn phase_single(
        &self,
        hole: OrbitalIndex,
        particle: OrbitalIndex,
    ) -> Result<Phase, anyhow::Error> {
        check_domain(hole)?;
        check_domain(particle)?;
        validate_single_excitation(|idx| self.contains(idx), hole, particle)?;
        let (lo, hi) = (hole.min(particle), hole.max(particle));
        // lo < hi <= 63, so neither shift overflows.
        let between = (u64::MAX << (lo + 1)) & ((1u64 << hi) - 1);
        Ok(Phase::from_parity((self.bits & between).count_ones() as usize))
    }
}

/// Computes the excitation degrees separating determinant $`I`$ from determinant $`J`$ in each of
/// the two spin channels.
///
/// # Arguments
///
/// * `alpha_i` - The $`\alpha`$ occupation mask of $`I`$.
/// * `beta_i` - The $`\beta`$ occupation mask of $`I`$.
/// * `alpha_j` - The $`\alpha`$ occupation mask of $`J`$.
/// * `beta_j` - The $`\beta`$ occupation mask of $`J`$.
///
/// # Returns
///
/// The pair `(up, dn)` of $`\alpha`$ and $`\beta`$ excitation degrees.
pub fn exc_degree_bitmask(alpha_i: u64, beta_i: u64, alpha_j: u64, beta_j: u64) -> (usize, usize) {
    (
        BitmaskSpinDet::from_bits(alpha_i).exc_degree(&BitmaskSpinDet::from_bits(alpha_j)),
        BitmaskSpinDet::from_bits(beta_i).exc_degree(&BitmaskSpinDet::from_bits(beta_j)),
    )
}

// -----------
// Conversions
// -----------

impl From<&BitmaskSpinDet> for SparseSpinDet {
    fn from(det: &BitmaskSpinDet) -> Self {
        // Set bits are enumerated in increasing order.
        SparseSpinDet::from_unsorted(det.occupied())
    }
}

impl TryFrom<&SparseSpinDet> for BitmaskSpinDet {
    type Error = anyhow::Error;

    fn try_from(det: &SparseSpinDet) -> Result<Self, Self::Error> {
        Self::from_indices(det.occupied())
    }
}

impl fmt::Display for BitmaskSpinDet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.bits)
    }
}
