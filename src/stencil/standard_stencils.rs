use crate::stencil::*;
use crate::util::*;

fn neg<T: NumTrait>(value: T) -> T {
    T::zero() - value
}

/// Central difference `{-sign, 0, sign}` along an axis.
pub fn derivation<T: NumTrait, const N: usize>(
    axis: usize,
    sign: T,
) -> Result<OrientedKernel<T, N>> {
    OrientedKernel::centered(axis, vec![neg(sign), T::zero(), sign])
}

fn gradient<T: NumTrait + Default, const N: usize>(
    derivation_axis: usize,
    averaging_axes: &[usize],
    sign: T,
    averaging: [T; 3],
) -> Result<SeparableFilter<T, N>> {
    let mut stages = vec![derivation(derivation_axis, sign)?];
    for axis in averaging_axes {
        stages.push(OrientedKernel::centered(*axis, averaging.to_vec())?);
    }
    Ok(SeparableFilter::new(stages))
}

/// Derivation along one axis, averaging `{1, 1, 1}` along the others.
pub fn prewitt_gradient<T: NumTrait + Default, const N: usize>(
    derivation_axis: usize,
    averaging_axes: &[usize],
    sign: T,
) -> Result<SeparableFilter<T, N>> {
    let one = T::one();
    gradient(derivation_axis, averaging_axes, sign, [one, one, one])
}

/// Derivation along one axis, averaging `{1, 2, 1}` along the others.
pub fn sobel_gradient<T: NumTrait + Default, const N: usize>(
    derivation_axis: usize,
    averaging_axes: &[usize],
    sign: T,
) -> Result<SeparableFilter<T, N>> {
    let one = T::one();
    gradient(derivation_axis, averaging_axes, sign, [one, count_as(2), one])
}

/// Derivation along one axis, averaging `{3, 10, 3}` along the others.
pub fn scharr_gradient<T: NumTrait + Default, const N: usize>(
    derivation_axis: usize,
    averaging_axes: &[usize],
    sign: T,
) -> Result<SeparableFilter<T, N>> {
    let three = count_as(3);
    gradient(derivation_axis, averaging_axes, sign, [three, count_as(10), three])
}

/// Sum of the second differences along every axis, on the `2N + 1` point
/// cross.
pub fn laplacian_4<T: NumTrait, const N: usize>(sign: T) -> Result<Correlation<T, N>> {
    let mut offsets = vec![Position::zeros()];
    let mut weights = vec![neg(count_as::<T>(2 * N) * sign)];
    for axis in 0..N {
        let unit = axis_unit::<N>(axis);
        offsets.push(-unit);
        offsets.push(unit);
        weights.push(sign);
        weights.push(sign);
    }
    Correlation::new(Window::from_offsets(offsets)?, weights)
}

/// Laplacian over the full `3^N` box.
pub fn laplacian_8<T: NumTrait, const N: usize>(sign: T) -> Result<Correlation<T, N>> {
    let window = Window::from_center(1)?;
    let size = window.len();
    let mut weights = vec![sign; size];
    weights[size / 2] = neg(count_as::<T>(size - 1) * sign);
    Correlation::new(window, weights)
}

pub fn box_mean<T: NumTrait, const N: usize>(radius: Index) -> Result<MeanFilter<T, N>> {
    Ok(MeanFilter::new(Window::from_center(radius)?))
}

/// 2D Laplacian with the fixed table
///
/// ```text
/// -1/6  -2/3  -1/6
/// -2/3  10/3  -2/3
/// -1/6  -2/3  -1/6
/// ```
pub fn laplacian_matrix<T: num::Float + Send + Sync>(sign: T) -> Result<Correlation<T, 2>> {
    let sixth = sign / count_as(6);
    let weights = [-1, -4, -1, -4, 20, -4, -1, -4, -1]
        .iter()
        .map(|w: &i32| {
            let magnitude = count_as::<T>(w.unsigned_abs() as usize) * sixth;
            if *w < 0 {
                -magnitude
            } else {
                magnitude
            }
        })
        .collect();
    Correlation::new(Window::from_center(1)?, weights)
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::extrapolation::*;
    use crate::par_stencil::*;
    use crate::raster::*;
    use float_cmp::assert_approx_eq;
    use nalgebra::vector;

    fn ones_3d() -> Raster<i32, 3> {
        Raster::filled(vector![3, 3, 3], 1).unwrap()
    }

    #[test]
    fn sobel_test() {
        let raster = ones_3d();
        let input = Extrapolator::new(&raster, Constant(0));
        {
            let filter = sobel_gradient::<i32, 3>(0, &[1], 1).unwrap();
            let out = filter.apply(&input).unwrap();
            for plane in out.data().chunks(9) {
                assert_eq!(plane, &[3, 0, -3, 4, 0, -4, 3, 0, -3]);
            }
        }
        {
            let filter = sobel_gradient::<i32, 3>(1, &[0], -1).unwrap();
            let out = filter.apply(&input).unwrap();
            for plane in out.data().chunks(9) {
                assert_eq!(plane, &[-3, -4, -3, 0, 0, 0, 3, 4, 3]);
            }
        }
    }

    #[test]
    fn composed_sobel_test() {
        let filter = sobel_gradient::<i32, 2>(0, &[1], 1).unwrap();
        let composed = filter.compose().unwrap();
        assert_eq!(composed.weights(), &[-1, 0, 1, -2, 0, 2, -1, 0, 1]);
        let convolution = composed.flipped().to_raster();
        assert_eq!(convolution.data(), &[1, 0, -1, 2, 0, -2, 1, 0, -1]);
    }

    #[test]
    fn prewitt_scharr_test() {
        let prewitt = prewitt_gradient::<i32, 2>(1, &[0], 1).unwrap();
        let prewitt = prewitt.compose().unwrap();
        assert_eq!(prewitt.weights(), &[-1, -1, -1, 0, 0, 0, 1, 1, 1]);
        let scharr = scharr_gradient::<i32, 2>(1, &[0], 1).unwrap();
        let scharr = scharr.compose().unwrap();
        assert_eq!(scharr.weights(), &[-3, -10, -3, 0, 0, 0, 3, 10, 3]);
    }

    #[test]
    fn laplacian_test() {
        {
            let kernel = laplacian_4::<i32, 3>(1).unwrap();
            assert_eq!(kernel.window().len(), 7);
            assert_eq!(kernel.weights().iter().sum::<i32>(), 0);
            assert_eq!(kernel.weights()[0], -6);
            assert!(!kernel.window().is_dense());
        }
        {
            let kernel = laplacian_8::<i32, 2>(-1).unwrap();
            assert_eq!(kernel.weights(), &[-1, -1, -1, -1, 8, -1, -1, -1, -1]);
        }
        {
            let raster = Raster::<i32, 2>::filled(vector![5, 4], 7).unwrap();
            let kernel = laplacian_4(1).unwrap();
            let out = apply(&kernel, &Extrapolator::new(&raster, Nearest)).unwrap();
            assert!(out.data().iter().all(|v| *v == 0));
        }
    }

    #[test]
    fn laplacian_matrix_test() {
        let kernel = laplacian_matrix(1.0f64).unwrap();
        let expected = [
            -1. / 6.,
            -2. / 3.,
            -1. / 6.,
            -2. / 3.,
            10. / 3.,
            -2. / 3.,
            -1. / 6.,
            -2. / 3.,
            -1. / 6.,
        ];
        for (w, e) in kernel.weights().iter().zip(expected) {
            assert_approx_eq!(f64, *w, e, epsilon = 1e-12);
        }
        let negated = laplacian_matrix(-1.0f64).unwrap();
        assert_approx_eq!(f64, negated.weights()[4], -10. / 3., epsilon = 1e-12);
    }

    #[test]
    fn box_mean_test() {
        let raster = Raster::<f64, 2>::filled(vector![4, 4], 2.5).unwrap();
        let kernel = box_mean(1).unwrap();
        let out = apply(&kernel, &Extrapolator::new(&raster, Periodic)).unwrap();
        for v in out.data() {
            assert_approx_eq!(f64, *v, 2.5, epsilon = 1e-12);
        }
    }
}
