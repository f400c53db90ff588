use super::*;
use num_traits::AsPrimitive;

/// Keys cubic convolution over the `4^N` surrounding positions, taps at
/// offsets `-1..=2` from the floor along each axis.
///
/// The default parameter `a = -0.5` gives the Catmull-Rom spline, which
/// reproduces polynomials up to degree 2. Integral coordinates read the
/// stored value exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    a: f64,
}

impl Default for Cubic {
    fn default() -> Self {
        Cubic { a: -0.5 }
    }
}

impl Cubic {
    pub fn with_parameter(a: f64) -> Self {
        Cubic { a }
    }

    pub fn parameter(&self) -> f64 {
        self.a
    }

    /// Weight of a sample at distance `x`.
    pub fn weight(&self, x: f64) -> f64 {
        let a = self.a;
        let x = x.abs();
        if x <= 1.0 {
            ((a + 2.0) * x - (a + 3.0)) * x * x + 1.0
        } else if x < 2.0 {
            ((a * x - 5.0 * a) * x + 8.0 * a) * x - 4.0 * a
        } else {
            0.0
        }
    }
}

impl<T: AsPrimitive<f64>, const N: usize> Interpolation<T, N> for Cubic {
    type Output = f64;

    fn interpolate<S: Sample<N, Value = T>>(
        &self,
        source: &S,
        position: &Vector<N>,
    ) -> Result<f64> {
        let (floor, frac) = split_coords(position, &source.sample_domain())?;
        let axis_weights: [[f64; 4]; N] = std::array::from_fn(|i| {
            std::array::from_fn(|k| self.weight(frac[i] + 1.0 - k as f64))
        });
        let mut out = 0.0;
        'taps: for tap in 0..4usize.pow(N as u32) {
            let mut weight = 1.0;
            let mut p = floor;
            let mut digits = tap;
            for i in 0..N {
                let k = digits % 4;
                digits /= 4;
                weight *= axis_weights[i][k];
                if weight == 0.0 {
                    continue 'taps;
                }
                p[i] += k as Index - 1;
            }
            out += weight * source.try_sample(&p)?.as_();
        }
        Ok(out)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::raster::*;
    use float_cmp::assert_approx_eq;
    use nalgebra::vector;

    #[test]
    fn weight_test() {
        let cubic = Cubic::default();
        assert_approx_eq!(f64, cubic.weight(0.0), 1.0);
        assert_approx_eq!(f64, cubic.weight(1.0), 0.0);
        assert_approx_eq!(f64, cubic.weight(-2.0), 0.0);
        assert_approx_eq!(f64, cubic.weight(0.5), 0.5625);
        assert_approx_eq!(f64, cubic.weight(1.5), -0.0625);
    }

    #[test]
    fn range_test() {
        let mut raster = Raster::<i32, 3>::new(vector![4, 4, 4]).unwrap();
        raster.range(1, 1);
        let interp = Interpolator::new(&raster, Cubic::default());
        let eps = 1e-9;
        let at = |x: f64, y: f64, z: f64| interp.interpolate(&vector![x, y, z]).unwrap();
        assert_approx_eq!(f64, at(0.0, 0.0, 0.0), 1.0, epsilon = eps);
        assert_approx_eq!(f64, at(3.0, 3.0, 3.0), 64.0, epsilon = eps);
        assert_approx_eq!(f64, at(1.0, 1.0, 1.0), 22.0, epsilon = eps);
        assert_approx_eq!(f64, at(1.5, 1.5, 1.5), 32.5, epsilon = eps);
    }

    #[test]
    fn support_test() {
        let mut raster = Raster::<f64, 1>::new(vector![4]).unwrap();
        raster.range(0.0, 1.0);
        let interp = Interpolator::new(&raster, Cubic::default());
        assert!(interp.interpolate(&vector![0.5]).is_err());
        let extra = Extrapolator::new(&raster, Nearest);
        let interp = Interpolator::new(&extra, Cubic::with_parameter(-0.75));
        assert_approx_eq!(f64, interp.interpolate(&vector![2.0]).unwrap(), 2.0, epsilon = 1e-12);
        assert!(interp.interpolate(&vector![0.5]).is_ok());
    }
}
