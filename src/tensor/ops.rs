//! Elementwise arithmetic over tensors.
//!
//! Scalar operands apply one value uniformly across the buffer; tensor
//! operands must match the receiver's shape exactly (no broadcasting).
//! `mul`/`mul_scalar` are elementwise, never a matrix product. Every
//! operation returns a new tensor.

use std::ops::{Add, Div, Mul, Sub};

use crate::error::{TensorError, TensorResult};
use crate::scalar::Scalar;
use crate::tensor::core::Tensor;

impl Tensor {
    fn zip_scalar(&self, rhs: Scalar, op: impl Fn(Scalar, Scalar) -> Scalar) -> Tensor {
        let data = self.as_slice().iter().map(|&elem| op(elem, rhs)).collect();
        Tensor::from_parts(self.shape(), data)
    }

    fn try_zip_scalar(
        &self,
        rhs: Scalar,
        op: impl Fn(Scalar, Scalar) -> TensorResult<Scalar>,
    ) -> TensorResult<Tensor> {
        let data = self
            .as_slice()
            .iter()
            .map(|&elem| op(elem, rhs))
            .collect::<TensorResult<Vec<Scalar>>>()?;
        Ok(Tensor::from_parts(self.shape(), data))
    }

    fn check_same_shape(&self, other: &Tensor) -> TensorResult<()> {
        if self.shape() != other.shape() {
            tracing::debug!(lhs = %self.shape(), rhs = %other.shape(), "operand shape mismatch");
            return Err(TensorError::shape_mismatch(
                self.shape().to_string(),
                other.shape().to_string(),
            ));
        }
        Ok(())
    }

    fn zip_tensor(
        &self,
        other: &Tensor,
        op: impl Fn(Scalar, Scalar) -> TensorResult<Scalar>,
    ) -> TensorResult<Tensor> {
        self.check_same_shape(other)?;
        let data = self
            .as_slice()
            .iter()
            .zip(other.as_slice())
            .map(|(&a, &b)| op(a, b))
            .collect::<TensorResult<Vec<Scalar>>>()?;
        Ok(Tensor::from_parts(self.shape(), data))
    }

    /// Add a scalar to every element
    pub fn add_scalar(&self, rhs: impl Into<Scalar>) -> TensorResult<Tensor> {
        Ok(self.zip_scalar(rhs.into(), Scalar::add))
    }

    /// Subtract a scalar from every element
    pub fn sub_scalar(&self, rhs: impl Into<Scalar>) -> TensorResult<Tensor> {
        Ok(self.zip_scalar(rhs.into(), Scalar::sub))
    }

    /// Multiply every element by a scalar
    pub fn mul_scalar(&self, rhs: impl Into<Scalar>) -> TensorResult<Tensor> {
        Ok(self.zip_scalar(rhs.into(), Scalar::mul))
    }

    /// Divide every element by a scalar.
    ///
    /// Fails with `DivisionByZero` when an element-scalar pair promotes to the
    /// integer representation and the scalar is zero; float pairs follow IEEE.
    pub fn div_scalar(&self, rhs: impl Into<Scalar>) -> TensorResult<Tensor> {
        self.try_zip_scalar(rhs.into(), Scalar::div)
    }

    /// Elementwise addition of an equally-shaped tensor
    pub fn add(&self, other: &Tensor) -> TensorResult<Tensor> {
        self.zip_tensor(other, |a, b| Ok(a.add(b)))
    }

    /// Elementwise subtraction of an equally-shaped tensor
    pub fn sub(&self, other: &Tensor) -> TensorResult<Tensor> {
        self.zip_tensor(other, |a, b| Ok(a.sub(b)))
    }

    /// Elementwise (Hadamard) product with an equally-shaped tensor
    pub fn mul(&self, other: &Tensor) -> TensorResult<Tensor> {
        self.zip_tensor(other, |a, b| Ok(a.mul(b)))
    }

    /// Elementwise division by an equally-shaped tensor
    pub fn div(&self, other: &Tensor) -> TensorResult<Tensor> {
        self.zip_tensor(other, Scalar::div)
    }
}

// Operator sugar. Arithmetic is fallible, so each operator yields a
// TensorResult rather than panicking on bad shapes.

impl Add<Scalar> for &Tensor {
    type Output = TensorResult<Tensor>;

    fn add(self, rhs: Scalar) -> Self::Output {
        self.add_scalar(rhs)
    }
}

impl Sub<Scalar> for &Tensor {
    type Output = TensorResult<Tensor>;

    fn sub(self, rhs: Scalar) -> Self::Output {
        self.sub_scalar(rhs)
    }
}

impl Mul<Scalar> for &Tensor {
    type Output = TensorResult<Tensor>;

    fn mul(self, rhs: Scalar) -> Self::Output {
        self.mul_scalar(rhs)
    }
}

impl Div<Scalar> for &Tensor {
    type Output = TensorResult<Tensor>;

    fn div(self, rhs: Scalar) -> Self::Output {
        self.div_scalar(rhs)
    }
}

impl Add<&Tensor> for &Tensor {
    type Output = TensorResult<Tensor>;

    fn add(self, rhs: &Tensor) -> Self::Output {
        Tensor::add(self, rhs)
    }
}

impl Sub<&Tensor> for &Tensor {
    type Output = TensorResult<Tensor>;

    fn sub(self, rhs: &Tensor) -> Self::Output {
        Tensor::sub(self, rhs)
    }
}

impl Mul<&Tensor> for &Tensor {
    type Output = TensorResult<Tensor>;

    fn mul(self, rhs: &Tensor) -> Self::Output {
        Tensor::mul(self, rhs)
    }
}

impl Div<&Tensor> for &Tensor {
    type Output = TensorResult<Tensor>;

    fn div(self, rhs: &Tensor) -> Self::Output {
        Tensor::div(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use proptest::collection::vec;
    use proptest::prelude::*;

    use super::*;
    use crate::tensor::core::Shape;

    fn i32_tensor(values: &[i32], rows: usize, cols: usize) -> Tensor {
        let data = values.iter().copied().map(Scalar::I32).collect();
        Tensor::from_vec_shaped(data, rows, cols).unwrap()
    }

    fn f64_column(values: &[f64]) -> Tensor {
        Tensor::from_vec(values.iter().copied().map(Scalar::F64).collect()).unwrap()
    }

    fn approx_same(a: &Tensor, b: &Tensor, tolerance: f64) -> bool {
        a.shape() == b.shape()
            && a.as_slice()
                .iter()
                .zip(b.as_slice())
                .all(|(&x, &y)| x.approx_eq(y, tolerance))
    }

    #[test]
    fn test_fill_add_multiply_scenario() {
        let t = Tensor::full(5, 2, 3).unwrap();
        assert_eq!(t.shape(), Shape::new(2, 3));
        assert!(t.as_slice().iter().all(|&s| s == Scalar::I32(5)));

        let plus_one = t.add_scalar(1).unwrap();
        assert!(plus_one.as_slice().iter().all(|&s| s == Scalar::I32(6)));

        let doubled = t.mul_scalar(2).unwrap();
        assert!(doubled.as_slice().iter().all(|&s| s == Scalar::I32(10)));
        // the original is untouched
        assert!(t.as_slice().iter().all(|&s| s == Scalar::I32(5)));
    }

    #[test]
    fn test_nested_subtract_scenario() {
        let t = Tensor::from_nested(vec![
            vec![Scalar::I32(1), Scalar::I32(2)],
            vec![Scalar::I32(3), Scalar::I32(4)],
        ])
        .unwrap();
        let shifted = t.sub_scalar(1).unwrap();
        let expected = i32_tensor(&[0, 1, 2, 3], 2, 2);
        assert_eq!(shifted, expected);
    }

    #[test]
    fn test_scalar_op_promotes_mixed_elements() {
        let t = Tensor::from_vec(vec![Scalar::I32(1), Scalar::F64(2.5)]).unwrap();
        let shifted = t.add_scalar(1).unwrap();
        assert_eq!(shifted.get(0, 0), Some(&Scalar::I32(2)));
        assert_eq!(shifted.get(1, 0), Some(&Scalar::F64(3.5)));
    }

    #[test]
    fn test_tensor_add_positionwise() {
        let a = i32_tensor(&[1, 2, 3, 4], 2, 2);
        let b = i32_tensor(&[10, 20, 30, 40], 2, 2);
        assert_eq!(a.add(&b).unwrap(), i32_tensor(&[11, 22, 33, 44], 2, 2));
    }

    #[test]
    fn test_tensor_sub_mul_div() {
        let a = i32_tensor(&[10, 20, 30, 40], 2, 2);
        let b = i32_tensor(&[1, 2, 3, 4], 2, 2);
        assert_eq!(a.sub(&b).unwrap(), i32_tensor(&[9, 18, 27, 36], 2, 2));
        assert_eq!(a.mul(&b).unwrap(), i32_tensor(&[10, 40, 90, 160], 2, 2));
        assert_eq!(a.div(&b).unwrap(), i32_tensor(&[10, 10, 10, 10], 2, 2));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let a = Tensor::full(1, 2, 3).unwrap();
        let b = Tensor::full(1, 3, 2).unwrap();
        assert!(matches!(a.add(&b), Err(TensorError::ShapeMismatch(_))));
        assert!(matches!(a.div(&b), Err(TensorError::ShapeMismatch(_))));
    }

    #[test]
    fn test_integer_div_scalar_by_zero() {
        let t = Tensor::full(6, 2, 2).unwrap();
        assert_eq!(t.div_scalar(0), Err(TensorError::DivisionByZero));
    }

    #[test]
    fn test_float_div_scalar_by_zero_is_ieee() {
        let t = Tensor::full(1.0f64, 1, 2).unwrap();
        let result = t.div_scalar(0.0f64).unwrap();
        assert!(result
            .as_slice()
            .iter()
            .all(|s| s.to_f64().is_infinite()));
    }

    #[test]
    fn test_tensor_div_by_zero_element() {
        let a = i32_tensor(&[4, 6], 2, 1);
        let b = i32_tensor(&[2, 0], 2, 1);
        assert_eq!(a.div(&b), Err(TensorError::DivisionByZero));
    }

    #[test]
    fn test_operator_sugar() {
        let a = i32_tensor(&[1, 2], 1, 2);
        let b = i32_tensor(&[3, 4], 1, 2);
        assert_eq!((&a + &b).unwrap(), i32_tensor(&[4, 6], 1, 2));
        assert_eq!((&a - &b).unwrap(), i32_tensor(&[-2, -2], 1, 2));
        assert_eq!((&a * Scalar::I32(3)).unwrap(), i32_tensor(&[3, 6], 1, 2));
        assert_eq!((&b / Scalar::I32(2)).unwrap(), i32_tensor(&[1, 2], 1, 2));
    }

    proptest! {
        #[test]
        fn prop_full_shape_and_value(v in -1.0e6..1.0e6f64, m in 0usize..8, n in 0usize..8) {
            let t = Tensor::full(v, m, n).unwrap();
            prop_assert_eq!(t.shape(), Shape::new(m, n));
            prop_assert_eq!(t.numel(), m * n);
            prop_assert!(t.as_slice().iter().all(|&s| s == Scalar::F64(v)));
        }

        #[test]
        fn prop_from_vec_shaped_row_major(data in vec(-1.0e6..1.0e6f64, 12..=12)) {
            let t = Tensor::from_vec_shaped(
                data.iter().copied().map(Scalar::F64).collect(), 3, 4,
            ).unwrap();
            for (i, &v) in data.iter().enumerate() {
                prop_assert_eq!(t.get(i / 4, i % 4), Some(&Scalar::F64(v)));
            }
        }

        #[test]
        fn prop_add_zero_is_identity(data in vec(-1.0e6..1.0e6f64, 1..32)) {
            let t = f64_column(&data);
            prop_assert_eq!(t.add_scalar(0.0f64).unwrap(), t);
        }

        #[test]
        fn prop_add_sub_round_trip(
            data in vec(-1.0e6..1.0e6f64, 1..32),
            s in -1.0e6..1.0e6f64,
        ) {
            let t = f64_column(&data);
            let back = t.add_scalar(s).unwrap().sub_scalar(s).unwrap();
            prop_assert!(approx_same(&back, &t, 1e-6));
        }

        #[test]
        fn prop_mul_div_round_trip(
            data in vec(-1.0e3..1.0e3f64, 1..32),
            magnitude in 0.5..100.0f64,
            negate in proptest::bool::ANY,
        ) {
            let s = if negate { -magnitude } else { magnitude };
            let t = f64_column(&data);
            let back = t.mul_scalar(s).unwrap().div_scalar(s).unwrap();
            prop_assert!(approx_same(&back, &t, 1e-6));
        }

        #[test]
        fn prop_tensor_add_commutative(
            pairs in vec((-1.0e6..1.0e6f64, -1.0e6..1.0e6f64), 1..32),
        ) {
            let a = f64_column(&pairs.iter().map(|p| p.0).collect::<Vec<_>>());
            let b = f64_column(&pairs.iter().map(|p| p.1).collect::<Vec<_>>());
            prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
        }

        #[test]
        fn prop_int_scalar_ops_keep_shape(
            data in vec(-1000..1000i32, 1..48),
            s in -50..50i32,
        ) {
            let t = Tensor::from_vec(data.into_iter().map(Scalar::I32).collect()).unwrap();
            let shifted = t.add_scalar(s).unwrap();
            prop_assert_eq!(shifted.shape(), t.shape());
            let scaled = t.mul_scalar(s).unwrap();
            prop_assert_eq!(scaled.shape(), t.shape());
        }
    }
}
