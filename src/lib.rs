//! Ingot - a minimal fixed-rank dense tensor type
//!
//! Features:
//! - Rank-2 tensors stored contiguously in row-major order
//! - Construction from fill values, flat sequences, and nested grids
//! - Elementwise arithmetic against a scalar or an equally-shaped tensor
//! - Tagged scalar values (i32 / f32 / f64) with widening promotion
//!
//! Tensors are plain immutable values: every operation returns a new tensor,
//! so sharing references across threads is safe. There is no broadcasting, no
//! matrix product, and no gradient tracking.

mod error;
mod scalar;
mod tensor;

pub use error::{TensorError, TensorResult};
pub use scalar::{DType, Scalar};
pub use tensor::{Shape, Tensor};

/// Install the default tracing subscriber for library diagnostics.
///
/// Optional; embedding applications that configure their own subscriber
/// should skip this. Calling it more than once is harmless.
pub fn init() {
    let _ = tracing_subscriber::fmt::try_init();
    tracing::debug!(version = version(), "ingot initialized");
}

/// Get the current crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
