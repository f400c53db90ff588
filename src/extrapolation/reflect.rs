use super::*;

/// Out-of-domain positions are mirrored across the edges, without repeating
/// the edge value: `-1 -> 1`, `length -> length - 2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reflect;

pub fn reflect_index(c: Index, length: Index) -> Index {
    if length == 1 {
        return 0;
    }
    let period = 2 * (length - 1);
    let i = c.rem_euclid(period);
    if i < length {
        i
    } else {
        period - i
    }
}

pub fn reflect_coord<const N: usize>(
    position: &Position<N>,
    shape: &Position<N>,
) -> Position<N> {
    position.zip_map(shape, reflect_index)
}

impl<T: Copy> Extrapolation<T> for Reflect {
    #[inline]
    fn extrapolate<const N: usize, R: RasterRead<N, Value = T>>(
        &self,
        raster: &R,
        position: &Position<N>,
    ) -> Option<T> {
        if raster.is_empty() {
            return None;
        }
        raster.get(&reflect_coord(position, &raster.shape())).copied()
    }
}
