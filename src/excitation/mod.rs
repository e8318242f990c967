//! Excitation descriptors and the comparison of two spin determinants.

use std::fmt;

use anyhow;
use serde::{Deserialize, Serialize};

use crate::spindet::{OrbitalIndex, Phase, SpinDeterminantAlgebra};

#[cfg(test)]
#[path = "excitation_tests.rs"]
mod excitation_tests;

// ==================
// Struct definitions
// ==================

/// A structure describing the substitution of one occupied orbital by an unoccupied one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Excitation {
    /// The orbital vacated by the excitation.
    pub hole: OrbitalIndex,

    /// The orbital filled by the excitation.
    pub particle: OrbitalIndex,
}

impl Excitation {
    /// Constructs the excitation `hole → particle`.
    pub fn new(hole: OrbitalIndex, particle: OrbitalIndex) -> Self {
        Self { hole, particle }
    }

    /// Returns the excitation undoing this one.
    pub fn reversed(&self) -> Self {
        Self::new(self.particle, self.hole)
    }

    /// Applies this excitation to `det` in place.
    pub fn apply_to<D: SpinDeterminantAlgebra>(&self, det: &mut D) -> Result<(), anyhow::Error> {
        det.apply_single_excitation(self.hole, self.particle)
    }

    /// Computes the phase of this excitation acting on `det`.
    pub fn phase_on<D: SpinDeterminantAlgebra>(&self, det: &D) -> Result<Phase, anyhow::Error> {
        det.phase_single(self.hole, self.particle)
    }
}

impl fmt::Display for Excitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.hole, self.particle)
    }
}

/// A structure describing two single excitations applied one after the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoubleExcitation {
    /// The excitation applied first.
    pub first: Excitation,

    /// The excitation applied second.
    pub second: Excitation,
}

impl DoubleExcitation {
    /// Constructs the double excitation `(h1 → p1, h2 → p2)`.
    pub fn new(h1: OrbitalIndex, p1: OrbitalIndex, h2: OrbitalIndex, p2: OrbitalIndex) -> Self {
        Self {
            first: Excitation::new(h1, p1),
            second: Excitation::new(h2, p2),
        }
    }

    /// Returns the double excitation undoing this one: each single excitation reversed, applied
    /// in the opposite order.
    pub fn reversed(&self) -> Self {
        Self {
            first: self.second.reversed(),
            second: self.first.reversed(),
        }
    }

    /// Applies this double excitation to `det` in place.
    pub fn apply_to<D: SpinDeterminantAlgebra>(&self, det: &mut D) -> Result<(), anyhow::Error> {
        det.apply_double_excitation(
            self.first.hole,
            self.first.particle,
            self.second.hole,
            self.second.particle,
        )
    }

    /// Computes the phase of this double excitation acting on `det`.
    pub fn phase_on<D: SpinDeterminantAlgebra>(&self, det: &D) -> Result<Phase, anyhow::Error> {
        det.phase_double(
            self.first.hole,
            self.first.particle,
            self.second.hole,
            self.second.particle,
        )
    }
}

impl fmt::Display for DoubleExcitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// A structure containing the holes and particles separating a source determinant from a target
/// determinant of the same spin channel, obtained from a single symmetric difference.
#[derive(Clone, Debug, PartialEq)]
pub struct ExcitationAnalysis<D>
where
    D: SpinDeterminantAlgebra,
{
    /// The excitation degree.
    degree: usize,

    /// The orbitals occupied in the source but not in the target.
    holes: D,

    /// The orbitals occupied in the target but not in the source.
    particles: D,
}

impl<D> ExcitationAnalysis<D>
where
    D: SpinDeterminantAlgebra,
{
    /// Compares `source` with `target`.
    pub fn new(source: &D, target: &D) -> Self {
        let (holes, particles) = source.holes_and_particles(target);
        // Holes and particles partition the symmetric difference.
        let degree = (holes.popcount() + particles.popcount()) / 2;
        Self {
            degree,
            holes,
            particles,
        }
    }

    /// Returns the excitation degree.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the holes.
    pub fn holes(&self) -> &D {
        &self.holes
    }

    /// Returns the particles.
    pub fn particles(&self) -> &D {
        &self.particles
    }
}
