use itertools::Itertools;
use proptest::prelude::*;

use crate::spindet::bitmask::{BitmaskSpinDet, BITMASK_WIDTH};
use crate::spindet::sparse::SparseSpinDet;
use crate::spindet::{OrbitalIndex, Phase, SpinDeterminantAlgebra};

/// Strictly increasing occupations that also fit in a bitmask.
fn arb_occupied() -> impl Strategy<Value = Vec<OrbitalIndex>> {
    proptest::collection::btree_set(0..BITMASK_WIDTH, 0..24)
        .prop_map(|set| set.into_iter().collect_vec())
}

fn arb_sparse() -> impl Strategy<Value = SparseSpinDet> {
    arb_occupied().prop_map(|occ| SparseSpinDet::new(&occ).unwrap())
}

/// A determinant together with a valid single excitation on it.
fn arb_single() -> impl Strategy<Value = (SparseSpinDet, OrbitalIndex, OrbitalIndex)> {
    proptest::collection::btree_set(0..BITMASK_WIDTH, 1..24).prop_flat_map(|set| {
        let occ = set.iter().copied().collect_vec();
        let virt = (0..BITMASK_WIDTH).filter(|i| !set.contains(i)).collect_vec();
        (
            Just(SparseSpinDet::new(&occ).unwrap()),
            proptest::sample::select(occ),
            proptest::sample::select(virt),
        )
    })
}

/// A determinant together with a double excitation with ordered holes and ordered particles.
fn arb_ordered_double(
) -> impl Strategy<Value = (SparseSpinDet, (OrbitalIndex, OrbitalIndex), (OrbitalIndex, OrbitalIndex))>
{
    proptest::collection::btree_set(0..BITMASK_WIDTH, 2..24).prop_flat_map(|set| {
        let occ = set.iter().copied().collect_vec();
        let virt = (0..BITMASK_WIDTH).filter(|i| !set.contains(i)).collect_vec();
        (
            Just(SparseSpinDet::new(&occ).unwrap()),
            proptest::sample::subsequence(occ, 2).prop_map(|hs| (hs[0], hs[1])),
            proptest::sample::subsequence(virt, 2).prop_map(|ps| (ps[0], ps[1])),
        )
    })
}

fn is_strictly_increasing(occ: &[OrbitalIndex]) -> bool {
    occ.iter().tuple_windows().all(|(a, b)| a < b)
}

proptest! {
    #[test]
    fn combinators_sorted_with_consistent_sizes(a in arb_sparse(), b in arb_sparse()) {
        let (x, n, o) = (a.xor(&b), a.and(&b), a.or(&b));
        prop_assert!(is_strictly_increasing(x.occupied()));
        prop_assert!(is_strictly_increasing(n.occupied()));
        prop_assert!(is_strictly_increasing(o.occupied()));
        prop_assert_eq!(o.popcount(), a.popcount() + b.popcount() - n.popcount());
        prop_assert_eq!(x.popcount(), a.popcount() + b.popcount() - 2 * n.popcount());
    }

    #[test]
    fn combinators_on_self(a in arb_sparse()) {
        prop_assert!(a.xor(&a).is_empty());
        prop_assert_eq!(a.and(&a), a.clone());
        prop_assert_eq!(a.or(&a), a.clone());
        prop_assert_eq!(a.exc_degree(&a), 0);
    }

    #[test]
    fn exc_degree_symmetric(a in arb_sparse(), b in arb_sparse()) {
        prop_assert_eq!(a.exc_degree(&b), b.exc_degree(&a));
    }

    #[test]
    fn holes_particles_partition_xor(a in arb_sparse(), b in arb_sparse()) {
        let holes = a.holes(&b);
        let particles = a.particles(&b);
        prop_assert_eq!(holes.or(&particles), a.xor(&b));
        prop_assert!(holes.and(&particles).is_empty());
    }

    #[test]
    fn bitmask_agrees_with_sparse(a in arb_occupied(), b in arb_occupied()) {
        let (sa, sb) = (SparseSpinDet::new(&a).unwrap(), SparseSpinDet::new(&b).unwrap());
        let (ba, bb) = (
            BitmaskSpinDet::from_indices(&a).unwrap(),
            BitmaskSpinDet::from_indices(&b).unwrap(),
        );
        prop_assert_eq!(ba.xor(&bb).occupied(), sa.xor(&sb).occupied().to_vec());
        prop_assert_eq!(ba.and(&bb).occupied(), sa.and(&sb).occupied().to_vec());
        prop_assert_eq!(ba.or(&bb).occupied(), sa.or(&sb).occupied().to_vec());
        prop_assert_eq!(ba.popcount(), sa.popcount());
        prop_assert_eq!(ba.exc_degree(&bb), sa.exc_degree(&sb));
    }

    #[test]
    fn single_excitation_moves_one_orbital((det, hole, particle) in arb_single()) {
        let mut excited = det.clone();
        excited.apply_single_excitation(hole, particle).unwrap();
        prop_assert!(is_strictly_increasing(excited.occupied()));
        let expected = SparseSpinDet::from_unsorted(
            det.iter().copied().filter(|&i| i != hole).chain([particle]),
        );
        prop_assert_eq!(&excited, &expected);
        prop_assert_eq!(det.exc_degree(&excited), 1);
        let (holes, particles) = det.holes_and_particles(&excited);
        prop_assert_eq!(holes.occupied().to_vec(), vec![hole]);
        prop_assert_eq!(particles.occupied().to_vec(), vec![particle]);

        let mut bitmask = BitmaskSpinDet::try_from(&det).unwrap();
        bitmask.apply_single_excitation(hole, particle).unwrap();
        prop_assert_eq!(bitmask.occupied(), excited.occupied().to_vec());
    }

    #[test]
    fn single_excitation_round_trip((det, hole, particle) in arb_single()) {
        let forward = det.phase_single(hole, particle).unwrap();
        let mut excited = det.clone();
        excited.apply_single_excitation(hole, particle).unwrap();
        let backward = excited.phase_single(particle, hole).unwrap();
        excited.apply_single_excitation(particle, hole).unwrap();
        prop_assert_eq!(&excited, &det);
        prop_assert_eq!(forward * backward, Phase::Positive);

        let bitmask = BitmaskSpinDet::try_from(&det).unwrap();
        prop_assert_eq!(bitmask.phase_single(hole, particle).unwrap(), forward);
    }

    #[test]
    fn double_excitation_round_trip((det, (h1, h2), (p1, p2)) in arb_ordered_double()) {
        let mut excited = det.clone();
        excited.apply_double_excitation(h1, p1, h2, p2).unwrap();
        prop_assert!(is_strictly_increasing(excited.occupied()));
        prop_assert_eq!(det.exc_degree(&excited), 2);
        excited.apply_double_excitation(p2, h2, p1, h1).unwrap();
        prop_assert_eq!(&excited, &det);
    }

    #[test]
    fn double_phase_matches_sequential((det, (h1, h2), (p1, p2)) in arb_ordered_double()) {
        let mut step = det.clone();
        let first = step.phase_single(h1, p1).unwrap();
        step.apply_single_excitation(h1, p1).unwrap();
        let second = step.phase_single(h2, p2).unwrap();
        prop_assert_eq!(det.phase_double(h1, p1, h2, p2).unwrap(), first * second);

        let bitmask = BitmaskSpinDet::try_from(&det).unwrap();
        prop_assert_eq!(
            bitmask.phase_double(h1, p1, h2, p2).unwrap(),
            det.phase_double(h1, p1, h2, p2).unwrap()
        );
    }

    #[test]
    fn rejected_excitation_leaves_determinant_unchanged(
        det in arb_sparse(),
        hole in 0..BITMASK_WIDTH + 8,
        particle in 0..BITMASK_WIDTH + 8,
    ) {
        let mut target = det.clone();
        let valid = hole != particle && det.contains(hole) && !det.contains(particle);
        prop_assert_eq!(target.apply_single_excitation(hole, particle).is_ok(), valid);
        if !valid {
            prop_assert_eq!(&target, &det);
        }
    }
}
