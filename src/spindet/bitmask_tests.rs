use crate::spindet::bitmask::{exc_degree_bitmask, BitmaskSpinDet, BITMASK_WIDTH};
use crate::spindet::sparse::SparseSpinDet;
use crate::spindet::{Phase, SpinDeterminantAlgebra};

#[test]
fn test_bitmask_construction() {
    let det = BitmaskSpinDet::from_indices(&[0, 2, 3]).unwrap();
    assert_eq!(det.bits(), 0b1101);
    assert_eq!(det.occupied(), vec![0, 2, 3]);
    assert_eq!(det, BitmaskSpinDet::from_bits(0b1101));
    assert_eq!(det.to_string(), "0b1101");

    // Order is irrelevant for masks.
    assert_eq!(BitmaskSpinDet::from_indices(&[3, 0, 2]).unwrap(), det);

    let top = BitmaskSpinDet::from_indices(&[BITMASK_WIDTH - 1]).unwrap();
    assert_eq!(top.bits(), 1u64 << 63);
    assert!(BitmaskSpinDet::from_indices(&[BITMASK_WIDTH]).is_err());
    assert!(BitmaskSpinDet::from_indices(&[1, 200]).is_err());
}

#[test]
fn test_bitmask_set_operations() {
    let a = BitmaskSpinDet::from_bits(0b0011);
    let b = BitmaskSpinDet::from_bits(0b0011);
    let c = BitmaskSpinDet::from_bits(0b1100);

    assert_eq!(a.xor(&b).bits(), 0);
    assert_eq!(a.and(&b).bits(), 0b0011);
    assert_eq!(a.or(&b).bits(), 0b0011);

    assert_eq!(a.xor(&c).bits(), 0b1111);
    assert_eq!(a.and(&c).bits(), 0);
    assert_eq!(a.or(&c).bits(), 0b1111);

    assert_eq!(BitmaskSpinDet::from_bits(u64::MAX).popcount(), 64);
    assert_eq!(BitmaskSpinDet::default().popcount(), 0);
}

#[test]
fn test_bitmask_single_excitation() {
    let mut det = BitmaskSpinDet::from_indices(&[0, 2, 3, 6, 7, 8]).unwrap();
    det.apply_single_excitation(0, 1).unwrap();
    assert_eq!(det.occupied(), vec![1, 2, 3, 6, 7, 8]);
    det.apply_single_excitation(8, 63).unwrap();
    assert_eq!(det.occupied(), vec![1, 2, 3, 6, 7, 63]);

    let original = det;
    assert!(det.apply_single_excitation(63, 64).is_err());
    assert!(det.apply_single_excitation(4, 5).is_err());
    assert!(det.apply_single_excitation(1, 2).is_err());
    assert_eq!(det, original);
}

#[test]
fn test_bitmask_phase_single() {
    let det = BitmaskSpinDet::from_indices(&[0, 1, 8]).unwrap();
    assert_eq!(det.phase_single(1, 17).unwrap(), Phase::Negative);
    assert_eq!(det.phase_single(0, 5).unwrap(), Phase::Negative);
    assert_eq!(det.phase_single(8, 2).unwrap(), Phase::Positive);

    // Extreme ends of the mask
    let det = BitmaskSpinDet::from_indices(&[0, 30, 40]).unwrap();
    assert_eq!(det.phase_single(0, 63).unwrap(), Phase::Positive);
    assert_eq!(det.phase_single(40, 63).unwrap(), Phase::Positive);
    assert_eq!(det.phase_single(30, 63).unwrap(), Phase::Negative);
    assert!(det.phase_single(0, 64).is_err());
}

#[test]
fn test_bitmask_exc_degree() {
    // α: {1, 2} → {1, 3}; β: {1, 2} → {5, 7}
    let alpha_i = 0b0110;
    let alpha_j = 0b1010;
    let beta_i = 0b0000_0110;
    let beta_j = 0b1010_0000;
    assert_eq!(exc_degree_bitmask(alpha_i, beta_i, alpha_j, beta_j), (1, 2));
    assert_eq!(exc_degree_bitmask(alpha_j, beta_j, alpha_i, beta_i), (1, 2));
    assert_eq!(exc_degree_bitmask(alpha_i, beta_i, alpha_i, beta_i), (0, 0));
}

#[test]
fn test_bitmask_sparse_conversions() {
    let sparse = SparseSpinDet::new(&[0, 5, 63]).unwrap();
    let bitmask = BitmaskSpinDet::try_from(&sparse).unwrap();
    assert_eq!(bitmask.bits(), 1 | (1 << 5) | (1 << 63));
    assert_eq!(SparseSpinDet::from(&bitmask), sparse);

    let too_wide = SparseSpinDet::new(&[0, 64]).unwrap();
    assert!(BitmaskSpinDet::try_from(&too_wide).is_err());
}
