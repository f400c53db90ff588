//! Rasters are N-dimensional arrays of values indexed by positions.
//! Every storage variant exposes the same read (and, where allowed, write)
//! capabilities; the variants only differ in who owns the memory.

mod aligned;
mod chunk;
pub mod debug_io;
mod owned;
pub mod random;
mod slice;

pub use aligned::*;
pub use chunk::*;
pub use owned::*;
pub use slice::*;

use crate::util::indexing::*;
use crate::util::*;
use rayon::prelude::*;

/// Fail with `InvalidShape` for negative lengths.
pub fn check_shape<const N: usize>(shape: &Position<N>) -> Result<()> {
    if shape.iter().any(|s| *s < 0) {
        return Err(RasterError::InvalidShape {
            shape: shape.to_vec(),
        });
    }
    Ok(())
}

/// Fail with `SizeMismatch` when a container cannot back a shape exactly.
pub fn check_size<const N: usize>(shape: &Position<N>, len: usize) -> Result<()> {
    check_shape(shape)?;
    let expected = shape_size(shape);
    if expected != len {
        return Err(RasterError::SizeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

pub trait RasterRead<const N: usize>: Sync {
    type Value: Copy + Send + Sync;

    fn shape(&self) -> Position<N>;

    /// Contiguous values, first axis fastest.
    fn data(&self) -> &[Self::Value];

    /// Region `[0, shape - 1]`.
    fn domain(&self) -> Region<N> {
        Region::from_shape(Position::zeros(), self.shape())
    }

    fn size(&self) -> usize {
        self.data().len()
    }

    fn length(&self, axis: usize) -> Index {
        self.shape()[axis]
    }

    fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    /// Linear offset of an in-domain position.
    #[track_caller]
    fn linear(&self, position: &Position<N>) -> usize {
        debug_assert!(
            self.domain().contains(position),
            "{} does not contain {:?}",
            self.domain(),
            position
        );
        coord_to_linear(position, &self.shape())
    }

    /// Position of a linear offset.
    fn unlinear(&self, index: usize) -> Position<N> {
        debug_assert!(index < self.size());
        linear_to_coord(index, &self.shape())
    }

    /// Map negative coordinates to indices counted from the end, so that
    /// `-1` designates the last index along its axis.
    fn resolve(&self, position: &Position<N>) -> Result<Position<N>> {
        let shape = self.shape();
        let mut resolved = *position;
        for d in 0..N {
            let c = position[d];
            if c < -shape[d] || c >= shape[d] {
                return Err(RasterError::out_of_bounds(position, &self.domain()));
            }
            if c < 0 {
                resolved[d] += shape[d];
            }
        }
        Ok(resolved)
    }

    /// Value at a position, `None` outside of the domain.
    fn get(&self, position: &Position<N>) -> Option<&Self::Value> {
        if !self.domain().contains(position) {
            return None;
        }
        Some(&self.data()[self.linear(position)])
    }

    /// Bounds-checked access with backward indexing.
    fn at(&self, position: &Position<N>) -> Result<&Self::Value> {
        let resolved = self.resolve(position)?;
        Ok(&self.data()[self.linear(&resolved)])
    }

    fn at_linear(&self, index: usize) -> Option<&Self::Value> {
        self.data().get(index)
    }

    /// Deep copy into an owning raster.
    fn to_raster(&self) -> Raster<Self::Value, N> {
        Raster::from_parts(self.shape(), self.data().to_vec())
    }

    /// Copy the values of a contained region.
    fn crop(&self, region: &Region<N>) -> Result<Raster<Self::Value, N>> {
        if !self.domain().contains_region(region) {
            return Err(RasterError::out_of_bounds(region.back(), &self.domain()));
        }
        let data = region
            .iter()
            .map(|p| self.data()[self.linear(&p)])
            .collect();
        Ok(Raster::from_parts(region.shape(), data))
    }

    /// Elementwise equality, failing when shapes differ.
    fn try_eq<R>(&self, other: &R) -> Result<bool>
    where
        R: RasterRead<N, Value = Self::Value>,
        Self::Value: PartialEq,
    {
        if self.shape() != other.shape() {
            return Err(RasterError::shape_mismatch(&self.shape(), &other.shape()));
        }
        Ok(self.data() == other.data())
    }
}

pub trait RasterWrite<const N: usize>: RasterRead<N> {
    fn data_mut(&mut self) -> &mut [Self::Value];

    fn get_mut(&mut self, position: &Position<N>) -> Option<&mut Self::Value> {
        if !self.domain().contains(position) {
            return None;
        }
        let index = self.linear(position);
        Some(&mut self.data_mut()[index])
    }

    /// Bounds-checked mutable access with backward indexing.
    fn at_mut(&mut self, position: &Position<N>) -> Result<&mut Self::Value> {
        let resolved = self.resolve(position)?;
        let index = self.linear(&resolved);
        Ok(&mut self.data_mut()[index])
    }

    fn fill(&mut self, value: Self::Value) {
        self.data_mut().fill(value);
    }

    /// Transform every value in place.
    fn apply<F: Fn(Self::Value) -> Self::Value>(&mut self, f: F) {
        for v in self.data_mut() {
            *v = f(*v);
        }
    }

    /// Set every value from its position.
    fn generate<F: FnMut(Position<N>) -> Self::Value>(&mut self, mut f: F) {
        let shape = self.shape();
        for (i, v) in self.data_mut().iter_mut().enumerate() {
            *v = f(linear_to_coord(i, &shape));
        }
    }

    /// Set every value from the values at the same offset in other rasters.
    fn generate_from<R, F>(&mut self, inputs: &[&R], f: F) -> Result<()>
    where
        R: RasterRead<N>,
        F: Fn(&[R::Value]) -> Self::Value,
    {
        let shape = self.shape();
        for input in inputs {
            if input.shape() != shape {
                return Err(RasterError::shape_mismatch(&shape, &input.shape()));
            }
        }
        let mut args = Vec::with_capacity(inputs.len());
        for (i, v) in self.data_mut().iter_mut().enumerate() {
            args.clear();
            args.extend(inputs.iter().map(|r| r.data()[i]));
            *v = f(&args);
        }
        Ok(())
    }

    /// Binary variant of `generate_from` for heterogeneous inputs.
    fn zip_generate<A, B, F>(&mut self, a: &A, b: &B, f: F) -> Result<()>
    where
        A: RasterRead<N>,
        B: RasterRead<N>,
        F: Fn(A::Value, B::Value) -> Self::Value,
    {
        let shape = self.shape();
        if a.shape() != shape {
            return Err(RasterError::shape_mismatch(&shape, &a.shape()));
        }
        if b.shape() != shape {
            return Err(RasterError::shape_mismatch(&shape, &b.shape()));
        }
        for ((v, x), y) in self.data_mut().iter_mut().zip(a.data()).zip(b.data()) {
            *v = f(*x, *y);
        }
        Ok(())
    }

    /// Arithmetic progression `first, first + step, ...` in linear order.
    fn range(&mut self, first: Self::Value, step: Self::Value)
    where
        Self::Value: NumTrait,
    {
        let mut value = first;
        for v in self.data_mut() {
            *v = value;
            value = value + step;
        }
    }

    /// Evenly spaced values from `first` to `last`, both included.
    fn linspace(&mut self, first: Self::Value, last: Self::Value)
    where
        Self::Value: num::Float,
    {
        let size = self.size();
        if size <= 1 {
            self.fill(first);
            return;
        }
        let denominator: Self::Value = count_as(size - 1);
        let step = (last - first) / denominator;
        let mut index: Self::Value = Zero::zero();
        for v in self.data_mut() {
            *v = first + step * index;
            index = index + One::one();
        }
    }

    /// Chunked parallel write access.
    fn par_modify_access(
        &mut self,
        chunk_size: usize,
    ) -> impl ParallelIterator<Item = RasterChunk<'_, Self::Value, N>> {
        let domain = self.domain();
        self.data_mut()
            .par_chunks_mut(chunk_size)
            .enumerate()
            .map(move |(i, data_chunk): (usize, &mut [Self::Value])| {
                let offset = i * chunk_size;
                RasterChunk::new(offset, domain, data_chunk)
            })
    }

    /// Parallel variant of `generate`.
    fn par_generate<F>(&mut self, f: F, chunk_size: usize)
    where
        F: Fn(Position<N>) -> Self::Value + Send + Sync,
    {
        self.par_modify_access(chunk_size)
            .for_each(|mut c: RasterChunk<'_, Self::Value, N>| {
                c.coord_iter_mut().for_each(|(position, value_mut)| {
                    *value_mut = f(position);
                })
            });
    }
}
