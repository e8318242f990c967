use std::env;
use std::fs;

use crate::determinant::Determinant;
use crate::interfaces::input::Input;
use crate::io::{read_spindet_binary, read_spindet_yaml, write_spindet_binary, SpinDetFileType};
use crate::spindet::bitmask::BitmaskSpinDet;
use crate::spindet::kind::{SpinDetKind, SpinDetRepresentation};
use crate::spindet::sparse::SparseSpinDet;

#[test]
fn test_io_binary() {
    let name = env::temp_dir().join(format!("spindet_io_binary_{}", std::process::id()));
    let det = Determinant::new(
        SpinDetKind::from(SparseSpinDet::new(&[0, 3, 90]).unwrap()),
        SpinDetKind::from(BitmaskSpinDet::from_indices(&[1, 63]).unwrap()),
    );
    write_spindet_binary(&name, SpinDetFileType::Exc, &det).unwrap();
    let read: Determinant<SpinDetKind> = read_spindet_binary(&name, SpinDetFileType::Exc).unwrap();
    assert_eq!(read, det);

    let mut path = name.clone();
    path.set_extension("spindet.exc");
    assert!(path.exists());
    fs::remove_file(path).unwrap();

    assert!(read_spindet_binary::<Determinant<SpinDetKind>, _>(
        env::temp_dir().join("spindet_io_missing"),
        SpinDetFileType::Exc
    )
    .is_err());
}

#[test]
fn test_io_yaml() {
    let path = env::temp_dir().join(format!("spindet_io_yaml_{}.yml", std::process::id()));
    let mut inp = serde_yaml::from_str::<Input>("representation: bitmask").unwrap();
    inp.excitation_analysis.write_holes_particles = true;
    fs::write(&path, serde_yaml::to_string(&inp).unwrap()).unwrap();

    let read = read_spindet_yaml::<Input, _>(&path).unwrap();
    assert_eq!(read.representation, SpinDetRepresentation::Bitmask);
    assert!(read.excitation_analysis.write_holes_particles);
    assert!(read.pairs.is_empty());
    fs::remove_file(path).unwrap();
}
