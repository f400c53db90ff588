//! Extrapolation turns a bounded raster into a source readable at any
//! position. Reads inside the domain go to the raster; reads outside are
//! answered by the boundary policy in O(1).

mod constant;
mod kind;
mod nearest;
mod patch;
mod periodic;
mod reflect;

pub use constant::*;
pub use kind::*;
pub use nearest::*;
pub use patch::*;
pub use periodic::*;
pub use reflect::*;

use crate::raster::*;
use crate::util::*;

/// Raster-like source consumed by filters and interpolators.
pub trait Sample<const N: usize>: Sync {
    type Value: Copy + Send + Sync;

    /// Region where values are stored.
    fn sample_domain(&self) -> Region<N>;

    /// Value at a position, `None` when the source cannot provide one.
    fn sample(&self, position: &Position<N>) -> Option<Self::Value>;

    /// Stored values in the linear order of `sample_domain()`, if contiguous.
    fn contiguous(&self) -> Option<&[Self::Value]> {
        None
    }

    /// Bounds-checked read, failing with `OutOfBounds`.
    fn try_sample(&self, position: &Position<N>) -> Result<Self::Value> {
        self.sample(position)
            .ok_or_else(|| RasterError::out_of_bounds(position, &self.sample_domain()))
    }

    /// View a region of the source without copying.
    fn patch(&self, region: Region<N>) -> Patch<'_, Self, N>
    where
        Self: Sized,
    {
        Patch::new(self, region)
    }
}

impl<const N: usize, R: RasterRead<N>> Sample<N> for R {
    type Value = R::Value;

    fn sample_domain(&self) -> Region<N> {
        self.domain()
    }

    fn sample(&self, position: &Position<N>) -> Option<R::Value> {
        self.get(position).copied()
    }

    fn contiguous(&self) -> Option<&[R::Value]> {
        Some(self.data())
    }
}

/// Boundary policy: the value of a non-empty raster outside of its domain.
pub trait Extrapolation<T>: Sync + Clone {
    fn extrapolate<const N: usize, R: RasterRead<N, Value = T>>(
        &self,
        raster: &R,
        position: &Position<N>,
    ) -> Option<T>;
}

/// A raster decorated with a boundary policy.
#[derive(Debug, Clone, Copy)]
pub struct Extrapolator<'a, R, M> {
    raster: &'a R,
    method: M,
}

impl<'a, R, M> Extrapolator<'a, R, M> {
    pub fn new(raster: &'a R, method: M) -> Self {
        Extrapolator { raster, method }
    }

    /// The decorated raster, for reads which are known to be in-domain.
    pub fn raster(&self) -> &'a R {
        self.raster
    }

    pub fn method(&self) -> &M {
        &self.method
    }
}

impl<R, M> Extrapolator<'_, R, M> {
    /// Value at any position. Only the policies which need a stored value
    /// fail, and only for empty rasters.
    pub fn at<const N: usize>(&self, position: &Position<N>) -> Result<R::Value>
    where
        R: RasterRead<N>,
        M: Extrapolation<R::Value>,
    {
        self.try_sample(position)
    }

    /// Materialize any region, in or out of the domain.
    pub fn copy<const N: usize>(&self, region: &Region<N>) -> Result<Raster<R::Value, N>>
    where
        R: RasterRead<N>,
        M: Extrapolation<R::Value>,
    {
        self.patch(*region).to_raster()
    }
}

impl<const N: usize, R, M> Sample<N> for Extrapolator<'_, R, M>
where
    R: RasterRead<N>,
    M: Extrapolation<R::Value>,
{
    type Value = R::Value;

    fn sample_domain(&self) -> Region<N> {
        self.raster.domain()
    }

    #[inline]
    fn sample(&self, position: &Position<N>) -> Option<R::Value> {
        match self.raster.get(position) {
            Some(v) => Some(*v),
            None => self.method.extrapolate(self.raster, position),
        }
    }

    fn contiguous(&self) -> Option<&[R::Value]> {
        Some(self.raster.data())
    }
}
