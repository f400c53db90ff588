pub use num_traits::{Num, One, Zero};

/// Numeric element types the arithmetic kernels accept.
pub trait NumTrait: Num + Copy + Send + Sync {}

impl<T: Num + Copy + Send + Sync> NumTrait for T {}

mod error;
mod grid;
pub mod indexing;
mod position;
mod region;

pub use error::*;
pub use grid::*;
pub use position::*;
pub use region::*;

/// Signed integer type of coordinates and lengths.
pub type Index = i64;

/// `n` as a value of `T`, built by repeated addition so that it is exact
/// for every numeric type able to represent it.
pub fn count_as<T: NumTrait>(n: usize) -> T {
    (0..n).fold(T::zero(), |acc, _| acc + T::one())
}
