//! Tensor core: storage-and-shape model plus elementwise arithmetic

pub mod core;
pub mod ops;

// Re-export main types for convenience
pub use self::core::{Shape, Tensor};
