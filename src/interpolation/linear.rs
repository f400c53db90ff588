use super::*;
use num_traits::AsPrimitive;

/// Multilinear interpolation over the `2^N` surrounding positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Linear;

impl<T: AsPrimitive<f64>, const N: usize> Interpolation<T, N> for Linear {
    type Output = f64;

    fn interpolate<S: Sample<N, Value = T>>(
        &self,
        source: &S,
        position: &Vector<N>,
    ) -> Result<f64> {
        let (floor, frac) = split_coords(position, &source.sample_domain())?;
        let mut out = 0.0;
        'corners: for corner in 0..(1usize << N) {
            let mut weight = 1.0;
            let mut p = floor;
            for i in 0..N {
                if corner & (1 << i) == 0 {
                    weight *= 1.0 - frac[i];
                } else {
                    weight *= frac[i];
                }
                if weight == 0.0 {
                    continue 'corners;
                }
                if corner & (1 << i) != 0 {
                    p[i] += 1;
                }
            }
            out += weight * source.try_sample(&p)?.as_();
        }
        Ok(out)
    }
}
