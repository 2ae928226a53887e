//! Arithmetic operators for [`GeneticProbability`].
//!
//! Every operator is available between two probabilities, between a
//! probability and an `f64` in either order, and in compound-assignment
//! form. Scalar operands never change the combo structure.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use super::GeneticProbability;

macro_rules! impl_genetic_op {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $sym:tt) => {
        impl $OpAssign<&GeneticProbability> for GeneticProbability {
            fn $op_assign(&mut self, rhs: &GeneticProbability) {
                self.combine_assign(rhs, |l, r| l $sym r);
            }
        }

        impl $OpAssign<GeneticProbability> for GeneticProbability {
            fn $op_assign(&mut self, rhs: GeneticProbability) {
                self.combine_assign(&rhs, |l, r| l $sym r);
            }
        }

        impl $OpAssign<f64> for GeneticProbability {
            fn $op_assign(&mut self, rhs: f64) {
                self.map_values(|v| v $sym rhs);
            }
        }

        impl $Op<&GeneticProbability> for &GeneticProbability {
            type Output = GeneticProbability;

            fn $op(self, rhs: &GeneticProbability) -> GeneticProbability {
                self.combine(rhs, |l, r| l $sym r)
            }
        }

        impl $Op<&GeneticProbability> for GeneticProbability {
            type Output = GeneticProbability;

            fn $op(mut self, rhs: &GeneticProbability) -> GeneticProbability {
                self.combine_assign(rhs, |l, r| l $sym r);
                self
            }
        }

        impl $Op<GeneticProbability> for GeneticProbability {
            type Output = GeneticProbability;

            fn $op(mut self, rhs: GeneticProbability) -> GeneticProbability {
                self.combine_assign(&rhs, |l, r| l $sym r);
                self
            }
        }

        impl $Op<GeneticProbability> for &GeneticProbability {
            type Output = GeneticProbability;

            fn $op(self, rhs: GeneticProbability) -> GeneticProbability {
                self.combine(&rhs, |l, r| l $sym r)
            }
        }

        impl $Op<f64> for GeneticProbability {
            type Output = GeneticProbability;

            fn $op(mut self, rhs: f64) -> GeneticProbability {
                self.map_values(|v| v $sym rhs);
                self
            }
        }

        impl $Op<f64> for &GeneticProbability {
            type Output = GeneticProbability;

            fn $op(self, rhs: f64) -> GeneticProbability {
                self.clone().$op(rhs)
            }
        }

        impl $Op<GeneticProbability> for f64 {
            type Output = GeneticProbability;

            fn $op(self, mut rhs: GeneticProbability) -> GeneticProbability {
                rhs.map_values(|v| self $sym v);
                rhs
            }
        }

        impl $Op<&GeneticProbability> for f64 {
            type Output = GeneticProbability;

            fn $op(self, rhs: &GeneticProbability) -> GeneticProbability {
                self.$op(rhs.clone())
            }
        }
    };
}

impl_genetic_op!(Add, add, AddAssign, add_assign, +);
impl_genetic_op!(Sub, sub, SubAssign, sub_assign, -);
impl_genetic_op!(Mul, mul, MulAssign, mul_assign, *);
impl_genetic_op!(Div, div, DivAssign, div_assign, /);
