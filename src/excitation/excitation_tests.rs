use crate::excitation::{DoubleExcitation, Excitation, ExcitationAnalysis};
use crate::spindet::bitmask::BitmaskSpinDet;
use crate::spindet::sparse::SparseSpinDet;
use crate::spindet::{Phase, SpinDeterminantAlgebra};

#[test]
fn test_excitation_single() {
    let exc = Excitation::new(1, 17);
    assert_eq!(exc.to_string(), "1 → 17");
    assert_eq!(exc.reversed(), Excitation::new(17, 1));

    let mut det = SparseSpinDet::new(&[0, 1, 8]).unwrap();
    assert_eq!(exc.phase_on(&det).unwrap(), Phase::Negative);
    exc.apply_to(&mut det).unwrap();
    assert_eq!(det.occupied(), &[0, 8, 17]);
    assert_eq!(exc.reversed().phase_on(&det).unwrap(), Phase::Negative);
    exc.reversed().apply_to(&mut det).unwrap();
    assert_eq!(det.occupied(), &[0, 1, 8]);
    assert!(exc.reversed().apply_to(&mut det).is_err());
}

#[test]
fn test_excitation_double() {
    let exc = DoubleExcitation::new(2, 4, 3, 5);
    assert_eq!(exc.to_string(), "(2 → 4, 3 → 5)");
    assert_eq!(exc.reversed(), DoubleExcitation::new(5, 3, 4, 2));

    let original = BitmaskSpinDet::from_indices(&[0, 1, 2, 3]).unwrap();
    let mut det = original;
    exc.apply_to(&mut det).unwrap();
    assert_eq!(det.occupied(), vec![0, 1, 4, 5]);
    exc.reversed().apply_to(&mut det).unwrap();
    assert_eq!(det, original);

    let full = SparseSpinDet::new(&(0..=8).collect::<Vec<u32>>()).unwrap();
    assert_eq!(
        DoubleExcitation::new(2, 11, 3, 12).phase_on(&full).unwrap(),
        Phase::Positive
    );
    assert_eq!(
        DoubleExcitation::new(2, 11, 8, 17).phase_on(&full).unwrap(),
        Phase::Negative
    );
}

#[test]
fn test_excitation_analysis() {
    let src = SparseSpinDet::new(&[0, 1, 2, 3]).unwrap();
    let tgt = SparseSpinDet::new(&[0, 1, 2, 4]).unwrap();
    let analysis = ExcitationAnalysis::new(&src, &tgt);
    assert_eq!(analysis.degree(), 1);
    assert_eq!(analysis.holes().occupied(), &[3]);
    assert_eq!(analysis.particles().occupied(), &[4]);

    let analysis = ExcitationAnalysis::new(&src, &src);
    assert_eq!(analysis.degree(), 0);
    assert!(analysis.holes().is_empty());
    assert!(analysis.particles().is_empty());

    // Different electron counts
    let tgt = SparseSpinDet::new(&[0, 5, 6, 7, 9]).unwrap();
    let analysis = ExcitationAnalysis::new(&src, &tgt);
    assert_eq!(analysis.holes().occupied(), &[1, 2, 3]);
    assert_eq!(analysis.particles().occupied(), &[5, 6, 7, 9]);
    assert_eq!(analysis.degree(), src.exc_degree(&tgt));
    assert_eq!(analysis.degree(), 3);
}
