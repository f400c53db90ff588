use super::*;
use crate::util::indexing::*;
use crate::util::*;

/// Raster which owns its contiguous storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T, const N: usize> {
    shape: Position<N>,
    data: Vec<T>,
}

impl<T: Copy + Send + Sync, const N: usize> Raster<T, N> {
    /// Raster of default values.
    pub fn new(shape: Position<N>) -> Result<Self>
    where
        T: Default,
    {
        Self::filled(shape, T::default())
    }

    pub fn filled(shape: Position<N>, value: T) -> Result<Self> {
        check_shape(&shape)?;
        Ok(Raster {
            shape,
            data: vec![value; shape_size(&shape)],
        })
    }

    /// Take ownership of a container, which is neither copied nor moved in
    /// memory.
    pub fn from_vec(shape: Position<N>, data: Vec<T>) -> Result<Self> {
        check_size(&shape, data.len())?;
        Ok(Raster { shape, data })
    }

    /// Copy values into fresh storage.
    pub fn from_slice(shape: Position<N>, data: &[T]) -> Result<Self> {
        check_size(&shape, data.len())?;
        Ok(Raster {
            shape,
            data: data.to_vec(),
        })
    }

    /// Collect exactly `shape_size(shape)` values.
    pub fn from_iter_exact<I: IntoIterator<Item = T>>(
        shape: Position<N>,
        values: I,
    ) -> Result<Self> {
        Self::from_vec(shape, values.into_iter().collect())
    }

    /// Unchecked construction for sizes already known to match.
    pub(crate) fn from_parts(shape: Position<N>, data: Vec<T>) -> Self {
        debug_assert_eq!(shape_size(&shape), data.len());
        Raster { shape, data }
    }

    /// Release the storage.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn as_view(&self) -> RasterView<'_, T, N> {
        RasterView::from_parts(self.shape, &self.data)
    }

    pub fn as_view_mut(&mut self) -> RasterViewMut<'_, T, N> {
        RasterViewMut::from_parts(self.shape, &mut self.data)
    }

    /// Convert every value.
    pub fn map<U: Copy + Send + Sync, F: Fn(T) -> U>(&self, f: F) -> Raster<U, N> {
        Raster::from_parts(self.shape, self.data.iter().map(|v| f(*v)).collect())
    }
}

impl<T: Copy + Send + Sync, const N: usize> RasterRead<N> for Raster<T, N> {
    type Value = T;

    fn shape(&self) -> Position<N> {
        self.shape
    }

    fn data(&self) -> &[T] {
        &self.data
    }
}

impl<T: Copy + Send + Sync, const N: usize> RasterWrite<N> for Raster<T, N> {
    fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Copy + Send + Sync, const N: usize> Raster<T, N> {
    /// Linear offset of a position, panicking outside of the domain.
    #[track_caller]
    fn checked_linear(&self, position: &Position<N>) -> usize {
        let domain = self.domain();
        assert!(
            domain.contains(position),
            "{} does not contain {:?}",
            domain,
            position.as_slice()
        );
        self.linear(position)
    }
}

impl<T: Copy + Send + Sync, const N: usize> std::ops::Index<Position<N>> for Raster<T, N> {
    type Output = T;

    #[track_caller]
    fn index(&self, position: Position<N>) -> &T {
        &self.data[self.checked_linear(&position)]
    }
}

impl<T: Copy + Send + Sync, const N: usize> std::ops::IndexMut<Position<N>> for Raster<T, N> {
    #[track_caller]
    fn index_mut(&mut self, position: Position<N>) -> &mut T {
        let index = self.checked_linear(&position);
        &mut self.data[index]
    }
}

impl<T, const N: usize> std::ops::Index<usize> for Raster<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T, const N: usize> std::ops::IndexMut<usize> for Raster<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}
