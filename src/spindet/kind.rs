//! Spin determinants whose representation is chosen at runtime.

use std::fmt;

use anyhow;
use serde::{Deserialize, Serialize};

use crate::spindet::bitmask::BitmaskSpinDet;
use crate::spindet::sparse::SparseSpinDet;
use crate::spindet::{OrbitalIndex, Phase, SpinDeterminantAlgebra};

#[cfg(test)]
#[path = "kind_tests.rs"]
mod kind_tests;

/// An enumerated type for the available spin-determinant representations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinDetRepresentation {
    /// Variant for sorted sequences of occupied orbitals, with no bound on the orbital count.
    #[default]
    Sparse,

    /// Variant for 64-bit occupation masks.
    Bitmask,
}

impl fmt::Display for SpinDetRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinDetRepresentation::Sparse => write!(f, "sparse set"),
            SpinDetRepresentation::Bitmask => write!(f, "64-bit mask"),
        }
    }
}

/// An enumerated type wrapping a spin determinant in one of the available representations.
///
/// Combining a [`SpinDetKind::Sparse`] with a [`SpinDetKind::Bitmask`] promotes the bitmask
/// operand to the sparse form, so the set operations remain total.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpinDetKind {
    /// Variant for sparse-set determinants.
    Sparse(SparseSpinDet),

    /// Variant for bitmask determinants.
    Bitmask(BitmaskSpinDet),
}

impl SpinDetKind {
    /// Constructs a spin determinant in the requested representation from a strictly increasing
    /// list of occupied orbitals.
    ///
    /// # Errors
    ///
    /// Errors if `occupied` is not strictly increasing, or if it does not fit in the requested
    /// representation.
    pub fn from_indices(
        representation: SpinDetRepresentation,
        occupied: &[OrbitalIndex],
    ) -> Result<Self, anyhow::Error> {
        let sparse = SparseSpinDet::new(occupied)?;
        match representation {
            SpinDetRepresentation::Sparse => Ok(SpinDetKind::Sparse(sparse)),
            SpinDetRepresentation::Bitmask => {
                Ok(SpinDetKind::Bitmask(BitmaskSpinDet::try_from(&sparse)?))
            }
        }
    }

    /// Returns the representation of this determinant.
    pub fn representation(&self) -> SpinDetRepresentation {
        match self {
            SpinDetKind::Sparse(_) => SpinDetRepresentation::Sparse,
            SpinDetKind::Bitmask(_) => SpinDetRepresentation::Bitmask,
        }
    }

    /// Returns the occupied orbitals in increasing order.
    pub fn occupied(&self) -> Vec<OrbitalIndex> {
        match self {
            SpinDetKind::Sparse(det) => det.occupied().to_vec(),
            SpinDetKind::Bitmask(det) => det.occupied(),
        }
    }

    /// Returns a sparse-set copy of this determinant.
    pub fn to_sparse(&self) -> SparseSpinDet {
        match self {
            SpinDetKind::Sparse(det) => det.clone(),
            SpinDetKind::Bitmask(det) => SparseSpinDet::from(det),
        }
    }

    /// Combines two determinants with `op`, promoting to the sparse form when their
    /// representations differ.
    fn combine<FS, FB>(&self, other: &Self, sparse_op: FS, bitmask_op: FB) -> Self
    where
        FS: Fn(&SparseSpinDet, &SparseSpinDet) -> SparseSpinDet,
        FB: Fn(&BitmaskSpinDet, &BitmaskSpinDet) -> BitmaskSpinDet,
    {
        match (self, other) {
            (SpinDetKind::Sparse(a), SpinDetKind::Sparse(b)) => SpinDetKind::Sparse(sparse_op(a, b)),
            (SpinDetKind::Bitmask(a), SpinDetKind::Bitmask(b)) => {
                SpinDetKind::Bitmask(bitmask_op(a, b))
            }
            _ => {
                log::debug!("Promoting a bitmask spin determinant to the sparse representation.");
                SpinDetKind::Sparse(sparse_op(&self.to_sparse(), &other.to_sparse()))
            }
        }
    }
}

impl SpinDeterminantAlgebra for SpinDetKind {
    fn xor(&self, other: &Self) -> Self {
        self.combine(other, SparseSpinDet::xor, BitmaskSpinDet::xor)
    }

    fn and(&self, other: &Self) -> Self {
        self.combine(other, SparseSpinDet::and, BitmaskSpinDet::and)
    }

    fn or(&self, other: &Self) -> Self {
        self.combine(other, SparseSpinDet::or, BitmaskSpinDet::or)
    }

    fn popcount(&self) -> usize {
        match self {
            SpinDetKind::Sparse(det) => det.popcount(),
            SpinDetKind::Bitmask(det) => det.popcount(),
        }
    }

    fn contains(&self, idx: OrbitalIndex) -> bool {
        match self {
            SpinDetKind::Sparse(det) => det.contains(idx),
            SpinDetKind::Bitmask(det) => det.contains(idx),
        }
    }

    fn occupied_indices(&self) -> Vec<OrbitalIndex> {
        self.occupied()
    }

    fn apply_single_excitation(
        &mut self,
        hole: OrbitalIndex,
        particle: OrbitalIndex,
    ) -> Result<(), anyhow::Error> {
        match self {
            SpinDetKind::Sparse(det) => det.apply_single_excitation(hole, particle),
            SpinDetKind::Bitmask(det) => det.apply_single_excitation(hole, particle),
        }
    }

    fn phase_single(
        &self,
        hole: OrbitalIndex,
        particle: OrbitalIndex,
    ) -> Result<Phase, anyhow::Error> {
        match self {
            SpinDetKind::Sparse(det) => det.phase_single(hole, particle),
            SpinDetKind::Bitmask(det) => det.phase_single(hole, particle),
        }
    }
}

impl From<SparseSpinDet> for SpinDetKind {
    fn from(det: SparseSpinDet) -> Self {
        SpinDetKind::Sparse(det)
    }
}

impl From<BitmaskSpinDet> for SpinDetKind {
    fn from(det: BitmaskSpinDet) -> Self {
        SpinDetKind::Bitmask(det)
    }
}

impl fmt::Display for SpinDetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinDetKind::Sparse(det) => write!(f, "{det}"),
            SpinDetKind::Bitmask(det) => write!(f, "{}", SparseSpinDet::from(det)),
        }
    }
}
