//! Spin determinants and the set algebra they support.
//!
//! A spin determinant is the set of orbitals occupied by the electrons of one spin channel. Two
//! representations are provided:
//! - [`sparse::SparseSpinDet`], a strictly increasing sequence of orbital indices with no bound
//!   on the number of orbitals, and
//! - [`bitmask::BitmaskSpinDet`], a 64-bit occupation mask for orbital spaces that fit in a
//!   single machine word.
//!
//! Both implement [`SpinDeterminantAlgebra`], and [`kind::SpinDetKind`] wraps either of them when
//! the representation is only known at runtime.

use std::fmt;
use std::iter::Product;
use std::ops::{Mul, Neg};

use anyhow::{self, ensure};
use num_traits::{Inv, One};
use serde::{Deserialize, Serialize};

pub mod bitmask;
pub mod kind;
mod ops;
pub mod sparse;


#[cfg(test)]
#[path = "spindet_proptests.rs"]
mod spindet_proptests;

/// The type of the index labelling a single spin-orbital within one spin channel.
pub type OrbitalIndex = u32;

// =================
// Trait definitions
// =================

/// Trait defining the algebra shared by all spin-determinant representations.
///
/// The combinators ([`Self::xor`], [`Self::and`], [`Self::or`]) never mutate their operands and
/// are total. The excitation mutators and the phase functions validate their preconditions
/// before doing anything, so that a rejected call leaves the determinant untouched.
pub trait SpinDeterminantAlgebra: Clone + fmt::Debug + PartialEq + Sized {
    /// Returns the symmetric difference of `self` and `other`.
    fn xor(&self, other: &Self) -> Self;

    /// Returns the intersection of `self` and `other`.
    fn and(&self, other: &Self) -> Self;

    /// Returns the union of `self` and `other`.
    fn or(&self, other: &Self) -> Self;

    /// Returns the number of occupied orbitals.
    fn popcount(&self) -> usize;

    /// Returns `true` if orbital `idx` is occupied.
    fn contains(&self, idx: OrbitalIndex) -> bool;

    /// Returns the occupied orbitals in increasing order.
    fn occupied_indices(&self) -> Vec<OrbitalIndex>;

    /// Moves the occupation at `hole` to `particle` in place.
    ///
    /// # Arguments
    ///
    /// * `hole` - The occupied orbital to be vacated.
    /// * `particle` - The unoccupied orbital to be filled.
    ///
    /// # Errors
    ///
    /// Errors if `hole` is not occupied, if `particle` is already occupied, or if either index
    /// lies outside the orbital space of the representation. `self` is unchanged on error.
    fn apply_single_excitation(
        &mut self,
        hole: OrbitalIndex,
        particle: OrbitalIndex,
    ) -> Result<(), anyhow::Error>;

    /// Computes the fermionic phase of moving the occupation at `hole` to `particle`.
    ///
    /// The phase is $`(-1)^k`$ where $`k`$ is the number of occupied orbitals lying strictly
    /// between `hole` and `particle` in `self`, which is taken as the pre-excitation determinant.
    ///
    /// # Errors
    ///
    /// Errors if `hole` is not occupied or if `particle` is already occupied.
    fn phase_single(&self, hole: OrbitalIndex, particle: OrbitalIndex)
        -> Result<Phase, anyhow::Error>;

    /// Returns the number of substitutions separating `self` from `other`, *i.e.* half the size of
    /// their symmetric difference.
    fn exc_degree(&self, other: &Self) -> usize {
        self.xor(other).popcount() / 2
    }

    /// Returns the orbitals occupied in `self` but not in `other`.
    fn holes(&self, other: &Self) -> Self {
        self.and(&self.xor(other))
    }

    /// Returns the orbitals occupied in `other` but not in `self`.
    fn particles(&self, other: &Self) -> Self {
        other.and(&self.xor(other))
    }

    /// Returns the holes and the particles of `self` relative to `other`, computing their
    /// symmetric difference only once.
    fn holes_and_particles(&self, other: &Self) -> (Self, Self) {
        let diff = self.xor(other);
        (self.and(&diff), other.and(&diff))
    }

    /// Applies the two single excitations `h1 → p1` then `h2 → p2` in place. The second
    /// excitation sees the determinant as left by the first one.
    ///
    /// # Errors
    ///
    /// Errors if either single excitation is invalid on the state it applies to. Both steps are
    /// validated before anything is mutated, so `self` is unchanged on error.
    fn apply_double_excitation(
        &mut self,
        h1: OrbitalIndex,
        p1: OrbitalIndex,
        h2: OrbitalIndex,
        p2: OrbitalIndex,
    ) -> Result<(), anyhow::Error> {
        validate_single_excitation(|idx| self.contains(idx), h1, p1)?;
        // Occupancy after the first step, without touching `self`.
        let occupied_after = |idx: OrbitalIndex| idx == p1 || (idx != h1 && self.contains(idx));
        validate_single_excitation(occupied_after, h2, p2)?;
        // Representation-specific checks (e.g. orbital range) only surface when applying, so
        // both steps are carried out on a copy first.
        let mut excited = self.clone();
        excited.apply_single_excitation(h1, p1)?;
        excited.apply_single_excitation(h2, p2)?;
        *self = excited;
        Ok(())
    }

    /// Computes the fermionic phase of the double excitation `(h1 → p1, h2 → p2)` on `self`.
    ///
    /// The two single phases are evaluated on `self` and multiplied, then the sign is flipped
    /// once if `h2 < p1` and once more if `p2 < h1`. This equals the sign of applying the two
    /// single excitations one after the other whenever `h1 < h2` and `p1 < p2`.
    ///
    /// # Errors
    ///
    /// Errors if a hole is unoccupied, a particle is occupied, or the two holes or the two
    /// particles coincide.
    fn phase_double(
        &self,
        h1: OrbitalIndex,
        p1: OrbitalIndex,
        h2: OrbitalIndex,
        p2: OrbitalIndex,
    ) -> Result<Phase, anyhow::Error> {
        ensure!(h1 != h2, "The two holes of a double excitation must differ, but both are {h1}.");
        ensure!(
            p1 != p2,
            "The two particles of a double excitation must differ, but both are {p1}."
        );
        let mut phase = self.phase_single(h1, p1)? * self.phase_single(h2, p2)?;
        if h2 < p1 {
            phase = -phase;
        }
        if p2 < h1 {
            phase = -phase;
        }
        Ok(phase)
    }
}

/// Checks that `hole → particle` is a valid single excitation of a determinant whose occupancy is
/// described by `occupied`.
pub(crate) fn validate_single_excitation<F>(
    occupied: F,
    hole: OrbitalIndex,
    particle: OrbitalIndex,
) -> Result<(), anyhow::Error>
where
    F: Fn(OrbitalIndex) -> bool,
{
    ensure!(
        hole != particle,
        "Hole and particle coincide at orbital {hole}."
    );
    ensure!(occupied(hole), "Hole orbital {hole} is not occupied.");
    ensure!(
        !occupied(particle),
        "Particle orbital {particle} is already occupied."
    );
    Ok(())
}

// ================
// Enum definitions
// ================

/// An enumerated type for the fermionic sign picked up when creation and annihilation operators
/// are reordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Variant for the sign $`+1`$.
    Positive,

    /// Variant for the sign $`-1`$.
    Negative,
}

impl Phase {
    /// Returns the phase $`(-1)^k`$.
    pub fn from_parity(k: usize) -> Self {
        if k % 2 == 0 {
            Phase::Positive
        } else {
            Phase::Negative
        }
    }

    /// Returns the phase as a signed integer.
    pub fn to_i32(self) -> i32 {
        match self {
            Phase::Positive => 1,
            Phase::Negative => -1,
        }
    }
}

impl From<Phase> for i32 {
    fn from(phase: Phase) -> Self {
        phase.to_i32()
    }
}

impl From<Phase> for f64 {
    fn from(phase: Phase) -> Self {
        f64::from(phase.to_i32())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Positive => write!(f, "+1"),
            Phase::Negative => write!(f, "-1"),
        }
    }
}

// ---
// Mul
// ---
impl Mul for Phase {
    type Output = Phase;

    fn mul(self, rhs: Self) -> Self::Output {
        if self == rhs {
            Phase::Positive
        } else {
            Phase::Negative
        }
    }
}

impl Mul<&'_ Phase> for &Phase {
    type Output = Phase;

    fn mul(self, rhs: &Phase) -> Self::Output {
        *self * *rhs
    }
}

// ---
// Neg
// ---
impl Neg for Phase {
    type Output = Phase;

    fn neg(self) -> Self::Output {
        match self {
            Phase::Positive => Phase::Negative,
            Phase::Negative => Phase::Positive,
        }
    }
}

// ---
// Inv
// ---
impl Inv for Phase {
    type Output = Phase;

    fn inv(self) -> Self::Output {
        self
    }
}

// ---
// One
// ---
impl One for Phase {
    fn one() -> Self {
        Phase::Positive
    }
}

impl Product for Phase {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Phase::one(), |acc, phase| acc * phase)
    }
}
