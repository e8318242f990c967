//! Determinants made of one spin determinant per spin channel.

use std::fmt;

use anyhow::{self, ensure, Context};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::excitation::{Excitation, ExcitationAnalysis};
use crate::spindet::{OrbitalIndex, Phase, SpinDeterminantAlgebra};


/// An enumerated type for the two spin channels of a determinant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spin {
    /// Variant for the $`\alpha`$ (spin-up) channel.
    Alpha,

    /// Variant for the $`\beta`$ (spin-down) channel.
    Beta,
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spin::Alpha => write!(f, "α"),
            Spin::Beta => write!(f, "β"),
        }
    }
}

/// A structure to manage determinants built from an $`\alpha`$ and a $`\beta`$ spin determinant
/// in the same representation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Determinant<D>
where
    D: SpinDeterminantAlgebra,
{
    /// The $`\alpha`$ spin determinant.
    pub alpha: D,

    /// The $`\beta`$ spin determinant.
    pub beta: D,
}

impl<D> Determinant<D>
where
    D: SpinDeterminantAlgebra,
{
    /// Constructs a determinant from its two spin channels.
    pub fn new(alpha: D, beta: D) -> Self {
        Self { alpha, beta }
    }

    /// Returns the spin determinant of channel `spin`.
    pub fn channel(&self, spin: Spin) -> &D {
        match spin {
            Spin::Alpha => &self.alpha,
            Spin::Beta => &self.beta,
        }
    }

    /// Returns a mutable reference to the spin determinant of channel `spin`.
    fn channel_mut(&mut self, spin: Spin) -> &mut D {
        match spin {
            Spin::Alpha => &mut self.alpha,
            Spin::Beta => &mut self.beta,
        }
    }

    /// Returns the excitation degrees `(up, dn)` separating `self` from `other` in the
    /// $`\alpha`$ and $`\beta`$ channels.
    pub fn exc_degree(&self, other: &Self) -> (usize, usize) {
        (
            self.alpha.exc_degree(&other.alpha),
            self.beta.exc_degree(&other.beta),
        )
    }

    /// Returns `true` if `self` and `other` differ by a single or a double excitation overall,
    /// counting both spin channels.
    pub fn is_connected(&self, other: &Self) -> bool {
        let (up, dn) = self.exc_degree(other);
        matches!(up + dn, 1 | 2)
    }

    /// Generates every determinant connected to `self` within the first `n_orb` orbitals of each
    /// spin channel.
    ///
    /// These are, in order: the $`\alpha`$ and $`\beta`$ single excitations, the same-spin
    /// double excitations in each channel, and the opposite-spin double excitations pairing one
    /// $`\alpha`$ with one $`\beta`$ single excitation.
    ///
    /// # Errors
    ///
    /// Errors if `self` occupies an orbital at or beyond `n_orb`, or if an excited spin
    /// determinant cannot be held by the representation.
    pub fn connected_determinants(&self, n_orb: OrbitalIndex) -> Result<Vec<Self>, anyhow::Error> {
        let alpha_singles = single_excitations(&self.alpha, n_orb)
            .with_context(|| "Unable to generate the α single excitations")?;
        let beta_singles = single_excitations(&self.beta, n_orb)
            .with_context(|| "Unable to generate the β single excitations")?;
        let alpha_doubles = double_excitations(&self.alpha, n_orb)
            .with_context(|| "Unable to generate the α double excitations")?;
        let beta_doubles = double_excitations(&self.beta, n_orb)
            .with_context(|| "Unable to generate the β double excitations")?;

        let connected = alpha_singles
            .iter()
            .chain(alpha_doubles.iter())
            .map(|alpha| Self::new(alpha.clone(), self.beta.clone()))
            .chain(
                beta_singles
                    .iter()
                    .chain(beta_doubles.iter())
                    .map(|beta| Self::new(self.alpha.clone(), beta.clone())),
            )
            .chain(
                alpha_singles
                    .iter()
                    .cartesian_product(beta_singles.iter())
                    .map(|(alpha, beta)| Self::new(alpha.clone(), beta.clone())),
            )
            .collect_vec();
        Ok(connected)
    }

    /// Compares channel `spin` of `self` with that of `other`.
    pub fn analyse(&self, other: &Self, spin: Spin) -> ExcitationAnalysis<D> {
        ExcitationAnalysis::new(self.channel(spin), other.channel(spin))
    }

    /// Identifies the single excitation in channel `spin` taking `self` to `other`.
    ///
    /// # Returns
    ///
    /// The phase of the excitation on `self`, the hole, and the particle.
    ///
    /// # Errors
    ///
    /// Errors if the two channels do not differ by exactly one hole and one particle.
    pub fn single_exc(
        &self,
        other: &Self,
        spin: Spin,
    ) -> Result<(Phase, OrbitalIndex, OrbitalIndex), anyhow::Error> {
        let analysis = self.analyse(other, spin);
        let holes = analysis.holes().occupied_indices();
        let particles = analysis.particles().occupied_indices();
        ensure!(
            holes.len() == 1 && particles.len() == 1,
            "The {spin} channels differ by holes {holes:?} and particles {particles:?}, not by a single excitation."
        );
        let (hole, particle) = (holes[0], particles[0]);
        let phase = self
            .channel(spin)
            .phase_single(hole, particle)
            .with_context(|| format!("Unable to compute the phase of the {spin} excitation {hole} → {particle}"))?;
        Ok((phase, hole, particle))
    }

    /// Identifies the double excitation in channel `spin` taking `self` to `other`.
    ///
    /// # Returns
    ///
    /// The phase of the excitation on `self`, the holes in increasing order, and the particles
    /// in increasing order.
    ///
    /// # Errors
    ///
    /// Errors if the two channels do not differ by exactly two holes and two particles.
    #[allow(clippy::type_complexity)]
    pub fn double_exc(
        &self,
        other: &Self,
        spin: Spin,
    ) -> Result<(Phase, (OrbitalIndex, OrbitalIndex), (OrbitalIndex, OrbitalIndex)), anyhow::Error>
    {
        let analysis = self.analyse(other, spin);
        let holes = analysis.holes().occupied_indices();
        let particles = analysis.particles().occupied_indices();
        ensure!(
            holes.len() == 2 && particles.len() == 2,
            "The {spin} channels differ by holes {holes:?} and particles {particles:?}, not by a double excitation."
        );
        let (h1, h2) = (holes[0], holes[1]);
        let (p1, p2) = (particles[0], particles[1]);
        let phase = self
            .channel(spin)
            .phase_double(h1, p1, h2, p2)
            .with_context(|| {
                format!("Unable to compute the phase of the {spin} double excitation ({h1} → {p1}, {h2} → {p2})")
            })?;
        Ok((phase, (h1, h2), (p1, p2)))
    }

    /// Returns a copy of `self` with `excitations` applied, in order, to channel `spin`.
    ///
    /// # Errors
    ///
    /// Errors if any of the excitations is invalid on the state it applies to. `self` is never
    /// modified.
    pub fn excite(&self, spin: Spin, excitations: &[Excitation]) -> Result<Self, anyhow::Error> {
        let mut excited = self.clone();
        excitations.iter().try_for_each(|exc| {
            exc.apply_to(excited.channel_mut(spin))
                .with_context(|| format!("Unable to apply the {spin} excitation {exc}"))
        })?;
        Ok(excited)
    }
}

/// Generates the space connected to a set of determinants within the first `n_orb` orbitals of
/// each spin channel.
///
/// Determinants already in `dets` are left out, and so is every determinant connected to an
/// earlier member of `dets` than the one it is generated from, so that each connected
/// determinant appears once.
///
/// # Errors
///
/// Errors if the connected determinants of any member of `dets` cannot be generated.
pub fn connected_space<D>(
    dets: &[Determinant<D>],
    n_orb: OrbitalIndex,
) -> Result<Vec<Determinant<D>>, anyhow::Error>
where
    D: SpinDeterminantAlgebra,
{
    dets.iter()
        .enumerate()
        .map(|(i, det)| {
            let connected = det
                .connected_determinants(n_orb)
                .with_context(|| format!("Unable to generate the determinants connected to determinant {i}"))?;
            Ok::<_, anyhow::Error>(connected
                .into_iter()
                .filter(|conn| !dets.contains(conn))
                .filter(|conn| !dets[..i].iter().any(|prev| conn.is_connected(prev)))
                .collect_vec())
        })
        .flatten_ok()
        .collect()
}

/// Returns all spin determinants obtained from `spindet` by one single excitation into the first
/// `n_orb` orbitals, ordered by hole then by particle.
fn single_excitations<D>(spindet: &D, n_orb: OrbitalIndex) -> Result<Vec<D>, anyhow::Error>
where
    D: SpinDeterminantAlgebra,
{
    let (holes, virtuals) = split_orbital_space(spindet, n_orb)?;
    holes
        .into_iter()
        .cartesian_product(virtuals)
        .map(|(hole, particle)| {
            let mut excited = spindet.clone();
            excited.apply_single_excitation(hole, particle)?;
            Ok::<_, anyhow::Error>(excited)
        })
        .collect()
}

/// Returns all spin determinants obtained from `spindet` by one double excitation into the first
/// `n_orb` orbitals, each pair of holes and each pair of particles taken once.
fn double_excitations<D>(spindet: &D, n_orb: OrbitalIndex) -> Result<Vec<D>, anyhow::Error>
where
    D: SpinDeterminantAlgebra,
{
    let (holes, virtuals) = split_orbital_space(spindet, n_orb)?;
    holes
        .into_iter()
        .tuple_combinations::<(_, _)>()
        .cartesian_product(virtuals.into_iter().tuple_combinations::<(_, _)>().collect_vec())
        .map(|((h1, h2), (p1, p2))| {
            let mut excited = spindet.clone();
            excited.apply_double_excitation(h1, p1, h2, p2)?;
            Ok::<_, anyhow::Error>(excited)
        })
        .collect()
}

/// Splits the first `n_orb` orbitals into those occupied in `spindet` and those that are not.
fn split_orbital_space<D>(
    spindet: &D,
    n_orb: OrbitalIndex,
) -> Result<(Vec<OrbitalIndex>, Vec<OrbitalIndex>), anyhow::Error>
where
    D: SpinDeterminantAlgebra,
{
    let holes = spindet.occupied_indices();
    if let Some(&last) = holes.last() {
        ensure!(
            last < n_orb,
            "Orbital {last} is occupied but lies outside the {n_orb} orbitals considered."
        );
    }
    let virtuals = (0..n_orb).filter(|&idx| !spindet.contains(idx)).collect_vec();
    Ok((holes, virtuals))
}

impl<D> fmt::Display for Determinant<D>
where
    D: SpinDeterminantAlgebra + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "α: {}, β: {}", self.alpha, self.beta)
    }
}
