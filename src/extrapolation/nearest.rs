use super::*;

/// Out-of-domain positions read the closest stored value: every coordinate
/// is clamped to `[0, length - 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nearest;

pub fn nearest_coord<const N: usize>(
    position: &Position<N>,
    shape: &Position<N>,
) -> Position<N> {
    position.zip_map(shape, |c, s| c.clamp(0, s - 1))
}

impl<T: Copy> Extrapolation<T> for Nearest {
    #[inline]
    fn extrapolate<const N: usize, R: RasterRead<N, Value = T>>(
        &self,
        raster: &R,
        position: &Position<N>,
    ) -> Option<T> {
        if raster.is_empty() {
            return None;
        }
        raster.get(&nearest_coord(position, &raster.shape())).copied()
    }
}
