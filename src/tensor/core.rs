//! Core tensor type: shape descriptor, storage, construction, queries

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TensorError, TensorResult};
use crate::scalar::Scalar;

/// Fixed rank-2 extent pair of a tensor.
///
/// Immutable after construction; a vector is an `(n, 1)` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of elements
    pub fn numel(&self) -> usize {
        self.rows * self.cols
    }

    fn checked_numel(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.rows, self.cols)
    }
}

/// A rank-2 tensor: a contiguous row-major element buffer plus its shape.
///
/// Plain value type with exclusive ownership of its buffer. The invariant
/// `data.len() == shape.numel()` holds on every construction path, and every
/// arithmetic operation returns a new tensor rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    shape: Shape,
    data: Vec<Scalar>,
}

impl Tensor {
    /// Create a `(rows, cols)` tensor with every element set to `value`.
    ///
    /// Zero extents are allowed and produce an empty tensor.
    pub fn full(value: impl Into<Scalar>, rows: usize, cols: usize) -> TensorResult<Self> {
        let shape = Shape::new(rows, cols);
        let numel = shape.checked_numel().ok_or_else(|| {
            tracing::debug!(%shape, "extent product overflows usize");
            TensorError::shape_mismatch("representable element count", shape.to_string())
        })?;
        Ok(Self {
            shape,
            data: vec![value.into(); numel],
        })
    }

    /// Create an `(n, 1)` column vector with every element set to `value`
    pub fn full_vector(value: impl Into<Scalar>, n: usize) -> TensorResult<Self> {
        Self::full(value, n, 1)
    }

    /// Create an `(n, 1)` column vector from a flat sequence
    pub fn from_vec(data: Vec<Scalar>) -> TensorResult<Self> {
        if data.is_empty() {
            tracing::debug!("from_vec called with an empty sequence");
            return Err(TensorError::empty_input("flat sequence"));
        }
        let shape = Shape::new(data.len(), 1);
        Ok(Self { shape, data })
    }

    /// Create a `(rows, cols)` tensor from a flat row-major sequence.
    ///
    /// The sequence length must equal `rows * cols` exactly.
    pub fn from_vec_shaped(data: Vec<Scalar>, rows: usize, cols: usize) -> TensorResult<Self> {
        if data.is_empty() {
            tracing::debug!("from_vec_shaped called with an empty sequence");
            return Err(TensorError::empty_input("flat sequence"));
        }
        let shape = Shape::new(rows, cols);
        let numel = shape.checked_numel().ok_or_else(|| {
            TensorError::shape_mismatch("representable element count", shape.to_string())
        })?;
        if data.len() != numel {
            tracing::debug!(%shape, len = data.len(), "flat sequence length mismatch");
            return Err(TensorError::shape_mismatch(
                format!("{} elements for shape {}", numel, shape),
                format!("{} elements", data.len()),
            ));
        }
        Ok(Self { shape, data })
    }

    /// Create a tensor from nested rows of a rectangular grid.
    ///
    /// Every row must have the same length as the first; ragged input fails
    /// with `ShapeMismatch`.
    pub fn from_nested(grid: Vec<Vec<Scalar>>) -> TensorResult<Self> {
        let rows = grid.len();
        let cols = grid.first().map(Vec::len).unwrap_or(0);
        if rows == 0 || cols == 0 {
            tracing::debug!("from_nested called with an empty grid");
            return Err(TensorError::empty_input("nested sequence"));
        }
        let mut data = Vec::with_capacity(rows * cols);
        for (i, row) in grid.into_iter().enumerate() {
            if row.len() != cols {
                tracing::debug!(row = i, expected = cols, got = row.len(), "ragged grid");
                return Err(TensorError::shape_mismatch(
                    format!("row {} of length {}", i, cols),
                    format!("length {}", row.len()),
                ));
            }
            data.extend(row);
        }
        Ok(Self {
            shape: Shape::new(rows, cols),
            data,
        })
    }

    /// Get the tensor shape
    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    /// Get the number of elements
    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major view of the element buffer
    pub fn as_slice(&self) -> &[Scalar] {
        &self.data
    }

    /// Element at `(row, col)`, or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&Scalar> {
        if row >= self.shape.rows() || col >= self.shape.cols() {
            return None;
        }
        self.data.get(row * self.shape.cols() + col)
    }

    /// Internal constructor for ops that already uphold the length invariant
    pub(crate) fn from_parts(shape: Shape, data: Vec<Scalar>) -> Self {
        debug_assert_eq!(shape.numel(), data.len());
        Self { shape, data }
    }
}
