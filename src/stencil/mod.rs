//! Windowed kernels: structuring elements, reductions, separable
//! composition and named operators.

mod kernel;
mod oriented;
pub mod standard_stencils;
mod template;
mod window;

pub use kernel::*;
pub use oriented::*;
pub use template::*;
pub use window::*;
