//! Scalar values and their numeric representations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TensorError, TensorResult};

/// Numeric representations a [`Scalar`] can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    I32,
    F32,
    F64,
}

impl DType {
    /// Get the size in bytes of this representation
    pub const fn size(&self) -> usize {
        match self {
            DType::I32 => 4,
            DType::F32 => 4,
            DType::F64 => 8,
        }
    }

    /// Check if this is a floating point representation
    pub const fn is_float(&self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }

    /// Check if this is an integer representation
    pub const fn is_int(&self) -> bool {
        matches!(self, DType::I32)
    }

    /// Promote two representations to a common one for binary operations.
    ///
    /// Follows NumPy-like rules: floats win over integers, wider floats win
    /// over narrower ones. Total over every pair of representations.
    pub fn promote(lhs: DType, rhs: DType) -> DType {
        if lhs == rhs {
            return lhs;
        }

        // Promotion priority (higher = wins)
        let priority = |dt: DType| -> u8 {
            match dt {
                DType::F64 => 100,
                DType::F32 => 90,
                DType::I32 => 50,
            }
        };

        if priority(lhs) >= priority(rhs) {
            lhs
        } else {
            rhs
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::I32 => write!(f, "i32"),
            DType::F32 => write!(f, "f32"),
            DType::F64 => write!(f, "f64"),
        }
    }
}

/// A single numeric value carrying its own representation tag.
///
/// Tensor elements are `Scalar`s, so a tensor is not required to be
/// homogeneously typed. Binary arithmetic between two differently-tagged
/// scalars promotes both sides to the wider representation first (see
/// [`DType::promote`]); the result carries the promoted tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    I32(i32),
    F32(f32),
    F64(f64),
}

impl Scalar {
    /// The representation this value currently holds
    pub fn dtype(&self) -> DType {
        match self {
            Scalar::I32(_) => DType::I32,
            Scalar::F32(_) => DType::F32,
            Scalar::F64(_) => DType::F64,
        }
    }

    /// Convert to another representation.
    ///
    /// Widening is exact for every value in the spec's closed set; narrowing
    /// truncates toward zero (float to int) or rounds to nearest (f64 to f32).
    pub fn cast(self, dtype: DType) -> Scalar {
        if self.dtype() == dtype {
            return self;
        }
        match dtype {
            DType::I32 => Scalar::I32(self.to_f64() as i32),
            DType::F32 => Scalar::F32(self.to_f64() as f32),
            DType::F64 => Scalar::F64(self.to_f64()),
        }
    }

    /// Widen to f64 regardless of tag
    pub fn to_f64(self) -> f64 {
        match self {
            Scalar::I32(v) => v as f64,
            Scalar::F32(v) => v as f64,
            Scalar::F64(v) => v,
        }
    }

    /// Whether this value is exactly zero in its own representation
    pub fn is_zero(&self) -> bool {
        match self {
            Scalar::I32(v) => *v == 0,
            Scalar::F32(v) => *v == 0.0,
            Scalar::F64(v) => *v == 0.0,
        }
    }

    /// The additive identity in the given representation
    pub fn zero(dtype: DType) -> Scalar {
        match dtype {
            DType::I32 => Scalar::I32(0),
            DType::F32 => Scalar::F32(0.0),
            DType::F64 => Scalar::F64(0.0),
        }
    }

    fn promote_pair(self, rhs: Scalar) -> (Scalar, Scalar) {
        let dtype = DType::promote(self.dtype(), rhs.dtype());
        (self.cast(dtype), rhs.cast(dtype))
    }

    /// Addition under the promotion rule. Integer overflow wraps.
    pub fn add(self, rhs: Scalar) -> Scalar {
        match self.promote_pair(rhs) {
            (Scalar::I32(a), Scalar::I32(b)) => Scalar::I32(a.wrapping_add(b)),
            (Scalar::F32(a), Scalar::F32(b)) => Scalar::F32(a + b),
            (Scalar::F64(a), Scalar::F64(b)) => Scalar::F64(a + b),
            _ => unreachable!("promote_pair yields matching tags"),
        }
    }

    /// Subtraction under the promotion rule. Integer overflow wraps.
    pub fn sub(self, rhs: Scalar) -> Scalar {
        match self.promote_pair(rhs) {
            (Scalar::I32(a), Scalar::I32(b)) => Scalar::I32(a.wrapping_sub(b)),
            (Scalar::F32(a), Scalar::F32(b)) => Scalar::F32(a - b),
            (Scalar::F64(a), Scalar::F64(b)) => Scalar::F64(a - b),
            _ => unreachable!("promote_pair yields matching tags"),
        }
    }

    /// Multiplication under the promotion rule. Integer overflow wraps.
    pub fn mul(self, rhs: Scalar) -> Scalar {
        match self.promote_pair(rhs) {
            (Scalar::I32(a), Scalar::I32(b)) => Scalar::I32(a.wrapping_mul(b)),
            (Scalar::F32(a), Scalar::F32(b)) => Scalar::F32(a * b),
            (Scalar::F64(a), Scalar::F64(b)) => Scalar::F64(a * b),
            _ => unreachable!("promote_pair yields matching tags"),
        }
    }

    /// Division under the promotion rule.
    ///
    /// Fails with [`TensorError::DivisionByZero`] only when the promoted
    /// representation is integral and the divisor is zero; float division by
    /// zero follows IEEE 754 and produces infinity or NaN.
    pub fn div(self, rhs: Scalar) -> TensorResult<Scalar> {
        match self.promote_pair(rhs) {
            (Scalar::I32(a), Scalar::I32(b)) => {
                if b == 0 {
                    return Err(TensorError::DivisionByZero);
                }
                Ok(Scalar::I32(a.wrapping_div(b)))
            }
            (Scalar::F32(a), Scalar::F32(b)) => Ok(Scalar::F32(a / b)),
            (Scalar::F64(a), Scalar::F64(b)) => Ok(Scalar::F64(a / b)),
            _ => unreachable!("promote_pair yields matching tags"),
        }
    }

    /// Compare two scalars as f64 within an absolute tolerance
    pub fn approx_eq(self, rhs: Scalar, tolerance: f64) -> bool {
        (self.to_f64() - rhs.to_f64()).abs() <= tolerance
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::I32(v) => write!(f, "{}", v),
            Scalar::F32(v) => write!(f, "{}", v),
            Scalar::F64(v) => write!(f, "{}", v),
        }
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::I32(v)
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Scalar::F32(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::F64(v)
    }
}
