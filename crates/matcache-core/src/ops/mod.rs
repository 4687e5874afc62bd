//! Linear-algebra operations

pub mod inverse;
pub mod matmul;

// Re-export commonly used operations
pub use inverse::*;
pub use matmul::*;
