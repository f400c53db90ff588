use super::*;

/// Value of the closest integral position. Halfway coordinates round up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NearestNeighbor;

pub fn nearest_position<const N: usize>(
    position: &Vector<N>,
    domain: &Region<N>,
) -> Result<Position<N>> {
    split_coords(&position.add_scalar(0.5), domain).map(|(nearest, _)| nearest)
}

impl<T, const N: usize> Interpolation<T, N> for NearestNeighbor {
    type Output = T;

    #[inline]
    fn interpolate<S: Sample<N, Value = T>>(&self, source: &S, position: &Vector<N>) -> Result<T> {
        source.try_sample(&nearest_position(position, &source.sample_domain())?)
    }
}
