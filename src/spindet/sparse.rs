//! Sparse-set spin determinants stored as strictly increasing sequences of orbital indices.

use std::cmp::Ordering;
use std::fmt;

use anyhow::{self, format_err};
use derive_builder::Builder;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::spindet::{validate_single_excitation, OrbitalIndex, Phase, SpinDeterminantAlgebra};

#[cfg(test)]
#[path = "sparse_tests.rs"]
mod sparse_tests;

// ==================
// Struct definitions
// ==================

/// A structure to manage spin determinants as sorted sets of occupied orbital indices.
///
/// The occupied indices are always strictly increasing. This is checked when the determinant is
/// built and preserved by every operation thereafter.
#[derive(Builder, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(try_from = "Vec<OrbitalIndex>", into = "Vec<OrbitalIndex>")]
pub struct SparseSpinDet {
    /// The occupied orbital indices in strictly increasing order.
    #[builder(setter(custom))]
    occupied: Vec<OrbitalIndex>,
}

impl SparseSpinDetBuilder {
    pub fn occupied(&mut self, occ: &[OrbitalIndex]) -> &mut Self {
        self.occupied = Some(occ.to_vec());
        self
    }

    fn validate(&self) -> Result<(), String> {
        let occupied = self
            .occupied
            .as_ref()
            .ok_or("No occupied orbitals found.".to_string())?;
        match occupied.iter().tuple_windows().find(|(a, b)| a >= b) {
            Some((a, b)) => Err(format!(
                "The occupied orbitals {occupied:?} are not strictly increasing: {a} is followed by {b}."
            )),
            None => Ok(()),
        }
    }
}

impl SparseSpinDet {
    /// Returns a builder to construct a new [`SparseSpinDet`].
    pub fn builder() -> SparseSpinDetBuilder {
        SparseSpinDetBuilder::default()
    }

    /// Constructs a spin determinant from a strictly increasing list of occupied orbitals.
    ///
    /// # Errors
    ///
    /// Errors if `occupied` is not strictly increasing.
    pub fn new(occupied: &[OrbitalIndex]) -> Result<Self, anyhow::Error> {
        Self::builder()
            .occupied(occupied)
            .build()
            .map_err(|err| format_err!(err))
    }

    /// Constructs the spin determinant with no occupied orbitals.
    pub fn empty() -> Self {
        Self {
            occupied: Vec::new(),
        }
    }

    /// Constructs a spin determinant from an arbitrary collection of orbital indices, which are
    /// sorted and deduplicated.
    pub fn from_unsorted<I: IntoIterator<Item = OrbitalIndex>>(indices: I) -> Self {
        let mut occupied = indices.into_iter().collect_vec();
        occupied.sort_unstable();
        occupied.dedup();
        Self { occupied }
    }

    /// Returns the occupied orbital indices in increasing order.
    pub fn occupied(&self) -> &[OrbitalIndex] {
        &self.occupied
    }

    /// Returns the number of occupied orbitals.
    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    /// Returns `true` if no orbitals are occupied.
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Returns an iterator over the occupied orbitals in increasing order.
    pub fn iter(&self) -> std::slice::Iter<'_, OrbitalIndex> {
        self.occupied.iter()
    }

    /// Returns the number of occupied orbitals strictly less than `idx`, which is also the
    /// position `idx` has, or would have, in the sequence.
    fn rank(&self, idx: OrbitalIndex) -> usize {
        self.occupied.partition_point(|&occ| occ < idx)
    }
}

// ---------------
// Merge algorithm
// ---------------

/// Enumerated type for the three sorted-set combinators.
#[derive(Clone, Copy, Debug)]
enum SetOperation {
    SymmetricDifference,
    Intersection,
    Union,
}

impl SetOperation {
    /// Whether an element present only in one operand is kept.
    fn keeps_exclusive(self) -> bool {
        matches!(self, SetOperation::SymmetricDifference | SetOperation::Union)
    }

    /// Whether an element present in both operands is kept.
    fn keeps_common(self) -> bool {
        matches!(self, SetOperation::Intersection | SetOperation::Union)
    }
}

/// Combines two strictly increasing sequences in a single pass with two cursors.
fn merge_sorted(a: &[OrbitalIndex], b: &[OrbitalIndex], op: SetOperation) -> Vec<OrbitalIndex> {
    let capacity = match op {
        SetOperation::Intersection => a.len().min(b.len()),
        SetOperation::SymmetricDifference | SetOperation::Union => a.len() + b.len(),
    };
    let mut res = Vec::with_capacity(capacity);
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                if op.keeps_exclusive() {
                    res.push(a[i]);
                }
                i += 1;
            }
            Ordering::Greater => {
                if op.keeps_exclusive() {
                    res.push(b[j]);
                }
                j += 1;
            }
            Ordering::Equal => {
                if op.keeps_common() {
                    res.push(a[i]);
                }
                i += 1;
                j += 1;
            }
        }
    }
    if op.keeps_exclusive() {
        res.extend_from_slice(&a[i..]);
        res.extend_from_slice(&b[j..]);
    }
    res
}

// -----------------------
// SpinDeterminantAlgebra
// -----------------------

impl SpinDeterminantAlgebra for SparseSpinDet {
    fn xor(&self, other: &Self) -> Self {
        Self {
            occupied: merge_sorted(
                &self.occupied,
                &other.occupied,
                SetOperation::SymmetricDifference,
            ),
        }
    }

    fn and(&self, other: &Self) -> Self {
        Self {
            occupied: merge_sorted(&self.occupied, &other.occupied, SetOperation::Intersection),
        }
    }

    fn or(&self, other: &Self) -> Self {
        Self {
            occupied: merge_sorted(&self.occupied, &other.occupied, SetOperation::Union),
        }
    }

    fn popcount(&self) -> usize {
        self.occupied.len()
    }

    fn contains(&self, idx: OrbitalIndex) -> bool {
        self.occupied.binary_search(&idx).is_ok()
    }

    fn occupied_indices(&self) -> Vec<OrbitalIndex> {
        self.occupied.clone()
    }

    /// Moves `hole` to `particle` by rotating the elements lying between the position of `hole`
    /// and the insertion point of `particle` by one slot, so the sequence never has to be
    /// re-sorted.
    fn apply_single_excitation(
        &mut self,
        hole: OrbitalIndex,
        particle: OrbitalIndex,
    ) -> Result<(), anyhow::Error> {
        validate_single_excitation(|idx| self.contains(idx), hole, particle)?;
        let hole_pos = self.rank(hole);
        let particle_pos = self.rank(particle);
        if hole < particle {
            // particle_pos > hole_pos since hole is occupied and smaller than particle.
            self.occupied[hole_pos..particle_pos].rotate_left(1);
            self.occupied[particle_pos - 1] = particle;
        } else {
            self.occupied[particle_pos..=hole_pos].rotate_right(1);
            self.occupied[particle_pos] = particle;
        }
        Ok(())
    }

    fn phase_single(
        &self,
        hole: OrbitalIndex,
        particle: OrbitalIndex,
    ) -> Result<Phase, anyhow::Error> {
        validate_single_excitation(|idx| self.contains(idx), hole, particle)?;
        let (lo, hi) = (hole.min(particle), hole.max(particle));
        let n_between = self.rank(hi) - self.occupied.partition_point(|&occ| occ <= lo);
        Ok(Phase::from_parity(n_between))
    }
}

// -----------
// Conversions
// -----------

impl TryFrom<Vec<OrbitalIndex>> for SparseSpinDet {
    type Error = anyhow::Error;

    fn try_from(occupied: Vec<OrbitalIndex>) -> Result<Self, Self::Error> {
        Self::new(&occupied)
    }
}

impl From<SparseSpinDet> for Vec<OrbitalIndex> {
    fn from(det: SparseSpinDet) -> Self {
        det.occupied
    }
}

impl FromIterator<OrbitalIndex> for SparseSpinDet {
    fn from_iter<I: IntoIterator<Item = OrbitalIndex>>(iter: I) -> Self {
        Self::from_unsorted(iter)
    }
}

impl<'a> IntoIterator for &'a SparseSpinDet {
    type Item = &'a OrbitalIndex;
    type IntoIter = std::slice::Iter<'a, OrbitalIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.occupied.iter()
    }
}

impl Default for SparseSpinDet {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for SparseSpinDet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}⟩", self.occupied.iter().join(" "))
    }
}
