//! Reads at continuous coordinates.
//!
//! Every sample goes through `Sample::try_sample`, so an interpolator over an
//! extrapolator answers anywhere, while one over a bare raster fails with
//! `OutOfBounds` as soon as a weighted sample leaves the domain. Samples with
//! a null weight are never read.

mod cubic;
mod kind;
mod linear;
mod nearest;

pub use cubic::*;
pub use kind::*;
pub use linear::*;
pub use nearest::*;

use crate::extrapolation::*;
use crate::util::*;

/// Sub-pixel evaluation scheme.
pub trait Interpolation<T, const N: usize>: Sync {
    type Output;

    fn interpolate<S: Sample<N, Value = T>>(
        &self,
        source: &S,
        position: &Vector<N>,
    ) -> Result<Self::Output>;
}

/// Largest coordinate magnitude accepted by the interpolators. Beyond it,
/// `f64` has no fractional part and tap offsets could overflow `Index`.
pub const COORDINATE_LIMIT: f64 = (1u64 << 52) as f64;

/// Integral part and fractional remainder of each coordinate.
///
/// Non-finite coordinates and coordinates beyond `COORDINATE_LIMIT` fail with
/// `OutOfBounds` against `domain`.
pub fn split_coords<const N: usize>(
    position: &Vector<N>,
    domain: &Region<N>,
) -> Result<(Position<N>, Vector<N>)> {
    let floor = position.map(|x| x.floor());
    let integral = floor.map(|x| x as Index);
    if floor.iter().any(|x| !x.is_finite() || x.abs() > COORDINATE_LIMIT) {
        return Err(RasterError::out_of_bounds(&integral, domain));
    }
    Ok((integral, position - floor))
}

/// A source decorated with an interpolation scheme.
#[derive(Debug, Clone, Copy)]
pub struct Interpolator<'a, S, M> {
    source: &'a S,
    method: M,
}

impl<'a, S, M> Interpolator<'a, S, M> {
    pub fn new(source: &'a S, method: M) -> Self {
        Interpolator { source, method }
    }

    pub fn source(&self) -> &'a S {
        self.source
    }

    pub fn method(&self) -> &M {
        &self.method
    }
}

impl<S, M> Interpolator<'_, S, M> {
    /// Value at an integral position, without interpolation.
    pub fn at<const N: usize>(&self, position: &Position<N>) -> Result<S::Value>
    where
        S: Sample<N>,
    {
        self.source.try_sample(position)
    }

    pub fn interpolate<const N: usize>(&self, position: &Vector<N>) -> Result<M::Output>
    where
        S: Sample<N>,
        M: Interpolation<S::Value, N>,
    {
        self.method.interpolate(self.source, position)
    }
}
