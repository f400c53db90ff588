use crate::util::*;

/// Contiguous slice of a raster's storage handed to one parallel task.
pub struct RasterChunk<'a, T, const N: usize> {
    offset: usize,
    domain: Region<N>,
    data: &'a mut [T],
}

impl<'a, T, const N: usize> RasterChunk<'a, T, N> {
    pub fn new(offset: usize, domain: Region<N>, data: &'a mut [T]) -> Self {
        RasterChunk {
            offset,
            domain,
            data,
        }
    }

    /// Linear offset of the first value in the raster.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn coord_iter_mut(&mut self) -> impl Iterator<Item = (Position<N>, &mut T)> {
        let offset = self.offset;
        let domain = self.domain;
        self.data
            .iter_mut()
            .enumerate()
            .map(move |(i, v): (usize, &mut T)| (domain.linear_to_coord(offset + i), v))
    }
}
