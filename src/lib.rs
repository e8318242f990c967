//! # spindet: spin-determinant algebra for configuration interaction
//!
//! `spindet` provides the bit-level algebra on Slater determinants needed by configuration
//! interaction codes, with the following capabilities:
//! - set operations (symmetric difference, intersection, union) and population counts on spin
//!   determinants,
//! - excitation degrees, holes and particles between two determinants,
//! - in-place single and double excitations, and
//! - fermionic phases of single and double excitations
//!
//! for the following representations of a spin determinant:
//! - sorted sequences of occupied orbitals ([`spindet::sparse::SparseSpinDet`]), and
//! - 64-bit occupation masks ([`spindet::bitmask::BitmaskSpinDet`]).
//!
//! Both representations implement [`spindet::SpinDeterminantAlgebra`]. Determinants with an
//! $`\alpha`$ and a $`\beta`$ channel are described by [`determinant::Determinant`], and pairs
//! of determinants can be compared in batches through
//! [`drivers::excitation_analysis::ExcitationAnalysisDriver`].
//!
//! ## Examples and usage
//!
//! For most items (structs, enums, functions, and traits), their usages are illustrated in test
//! functions.
//!
//! The `spindet` binary reads a YAML input file listing determinant pairs and writes the
//! excitation analysis of every pair:
//!
//! ```text
//! spindet --config input.yml --output analysis
//! ```

pub mod determinant;
pub mod drivers;
pub mod excitation;
pub mod interfaces;
pub mod io;
pub mod spindet;
