use super::*;

/// Out-of-domain positions wrap around: every coordinate is taken modulo
/// the length, whatever the distance to the domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Periodic;

pub fn periodic_coord<const N: usize>(
    position: &Position<N>,
    shape: &Position<N>,
) -> Position<N> {
    position.zip_map(shape, |c, s| c.rem_euclid(s))
}

impl<T: Copy> Extrapolation<T> for Periodic {
    #[inline]
    fn extrapolate<const N: usize, R: RasterRead<N, Value = T>>(
        &self,
        raster: &R,
        position: &Position<N>,
    ) -> Option<T> {
        if raster.is_empty() {
            return None;
        }
        raster.get(&periodic_coord(position, &raster.shape())).copied()
    }
}
