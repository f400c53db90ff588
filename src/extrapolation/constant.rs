use super::*;

/// Every out-of-domain position reads a fixed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant<T>(pub T);

impl<T: Copy + Sync> Extrapolation<T> for Constant<T> {
    #[inline]
    fn extrapolate<const N: usize, R: RasterRead<N, Value = T>>(
        &self,
        _raster: &R,
        _position: &Position<N>,
    ) -> Option<T> {
        Some(self.0)
    }
}
