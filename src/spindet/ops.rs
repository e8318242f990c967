//! Bitwise operator overloads forwarding to [`SpinDeterminantAlgebra`].

use std::ops::{BitAnd, BitOr, BitXor};

use duplicate::duplicate_item;

use crate::spindet::bitmask::BitmaskSpinDet;
use crate::spindet::kind::SpinDetKind;
use crate::spindet::sparse::SparseSpinDet;
use crate::spindet::SpinDeterminantAlgebra;

#[duplicate_item(
    det_               op_       op_fn_    alg_fn_;
    [SparseSpinDet]    [BitXor]  [bitxor]  [xor];
    [SparseSpinDet]    [BitAnd]  [bitand]  [and];
    [SparseSpinDet]    [BitOr]   [bitor]   [or];
    [BitmaskSpinDet]   [BitXor]  [bitxor]  [xor];
    [BitmaskSpinDet]   [BitAnd]  [bitand]  [and];
    [BitmaskSpinDet]   [BitOr]   [bitor]   [or];
    [SpinDetKind]      [BitXor]  [bitxor]  [xor];
    [SpinDetKind]      [BitAnd]  [bitand]  [and];
    [SpinDetKind]      [BitOr]   [bitor]   [or];
)]
impl op_<&'_ det_> for &det_ {
    type Output = det_;

    fn op_fn_(self, rhs: &det_) -> Self::Output {
        SpinDeterminantAlgebra::alg_fn_(self, rhs)
    }
}

#[duplicate_item(
    det_               op_       op_fn_    alg_fn_;
    [SparseSpinDet]    [BitXor]  [bitxor]  [xor];
    [SparseSpinDet]    [BitAnd]  [bitand]  [and];
    [SparseSpinDet]    [BitOr]   [bitor]   [or];
    [BitmaskSpinDet]   [BitXor]  [bitxor]  [xor];
    [BitmaskSpinDet]   [BitAnd]  [bitand]  [and];
    [BitmaskSpinDet]   [BitOr]   [bitor]   [or];
    [SpinDetKind]      [BitXor]  [bitxor]  [xor];
    [SpinDetKind]      [BitAnd]  [bitand]  [and];
    [SpinDetKind]      [BitOr]   [bitor]   [or];
)]
impl op_<det_> for det_ {
    type Output = det_;

    fn op_fn_(self, rhs: det_) -> Self::Output {
        SpinDeterminantAlgebra::alg_fn_(&self, &rhs)
    }
}
