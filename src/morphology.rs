//! Morphology over box or arbitrary structuring elements, and contrast-driven
//! growth of binary masks.

use crate::extrapolation::*;
use crate::par_stencil::*;
use crate::raster::*;
use crate::stencil::*;
use crate::util::*;

/// Maximum over the box of given radius around each position.
pub fn dilate<const N: usize, S>(input: &S, radius: Index) -> Result<Raster<S::Value, N>>
where
    S: Sample<N>,
    S::Value: PartialOrd + Default,
{
    dilate_with(input, Window::from_center(radius)?)
}

/// Maximum over any structuring element, e.g. `Window::ball::<2>(radius)`.
pub fn dilate_with<const N: usize, S>(input: &S, window: Window<N>) -> Result<Raster<S::Value, N>>
where
    S: Sample<N>,
    S::Value: PartialOrd + Default,
{
    apply(&Dilation::new(window), input)
}

/// Minimum over the box of given radius around each position.
pub fn erode<const N: usize, S>(input: &S, radius: Index) -> Result<Raster<S::Value, N>>
where
    S: Sample<N>,
    S::Value: PartialOrd + Default,
{
    erode_with(input, Window::from_center(radius)?)
}

pub fn erode_with<const N: usize, S>(input: &S, window: Window<N>) -> Result<Raster<S::Value, N>>
where
    S: Sample<N>,
    S::Value: PartialOrd + Default,
{
    apply(&Erosion::new(window), input)
}

/// Erosion followed by dilation, both under the input's boundary policy.
pub fn open<const N: usize, R, M>(
    input: &Extrapolator<'_, R, M>,
    radius: Index,
) -> Result<Raster<R::Value, N>>
where
    R: RasterRead<N>,
    R::Value: PartialOrd + Default,
    M: Extrapolation<R::Value>,
{
    let eroded = erode(input, radius)?;
    dilate(&Extrapolator::new(&eroded, input.method().clone()), radius)
}

/// Dilation followed by erosion, both under the input's boundary policy.
pub fn close<const N: usize, R, M>(
    input: &Extrapolator<'_, R, M>,
    radius: Index,
) -> Result<Raster<R::Value, N>>
where
    R: RasterRead<N>,
    R::Value: PartialOrd + Default,
    M: Extrapolation<R::Value>,
{
    let dilated = dilate(input, radius)?;
    erode(&Extrapolator::new(&dilated, input.method().clone()), radius)
}

/// Smallest relative contrast `(image[n] - image[p]) / image[n]` between a
/// position and its flagged direct neighbors, `T::max_value()` if none is
/// flagged.
///
/// The contrast is negative where the position is brighter than its
/// neighbors. Neighbors outside of the mask domain are ignored.
pub fn min_contrast<const N: usize, I, K, T>(
    image: &I,
    mask: &K,
    position: &Position<N>,
) -> Result<T>
where
    I: RasterRead<N, Value = T>,
    K: RasterRead<N, Value = bool>,
    T: num::Float + Send + Sync,
{
    let center = *image.at(position)?;
    let mut out = T::max_value();
    for axis in 0..N {
        let unit = axis_unit::<N>(axis);
        for neighbor in [position - unit, position + unit] {
            if mask.get(&neighbor).copied().unwrap_or(false) {
                let value = *image.at(&neighbor)?;
                let contrast = (value - center) / value;
                if contrast < out {
                    out = contrast;
                }
            }
        }
    }
    Ok(out)
}

/// Extend a mask by one layer: unflagged positions next to a flagged one
/// (box neighborhood) are flagged when their minimum contrast is below the
/// threshold.
///
/// Positions on the border of the domain are left unchanged. Candidates are
/// visited in linear order and see the flags set before them. Returns the
/// number of newly flagged positions.
pub fn grow<const N: usize, I, T>(
    image: &I,
    mask: &mut Raster<bool, N>,
    threshold: T,
) -> Result<usize>
where
    I: RasterRead<N, Value = T>,
    T: num::Float + Send + Sync,
{
    profiling::scope!("morphology::grow");
    if image.shape() != mask.shape() {
        return Err(RasterError::shape_mismatch(&mask.shape(), &image.shape()));
    }
    let dilated = dilate(&Extrapolator::new(&*mask, Constant(false)), 1)?;
    let inner = mask.domain().shrink_by(&Region::from_center(1));
    let mut count = 0;
    for p in inner.iter() {
        if dilated[p] && !mask[p] && min_contrast(image, &*mask, &p)? < threshold {
            mask[p] = true;
            count += 1;
        }
    }
    tracing::debug!(count, "grew mask");
    Ok(count)
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use nalgebra::vector;

    #[test]
    fn box_morphology_test() {
        let raster = Raster::<i32, 2>::filled(vector![4, 3], 1).unwrap();
        let extra = Extrapolator::new(&raster, Constant(0));
        let dilated = dilate(&extra, 1).unwrap();
        assert!(dilated.data().iter().all(|v| *v == 1));
        let eroded = erode(&extra, 1).unwrap();
        assert_eq!(eroded.data(), &[0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn open_close_test() {
        let mut raster = Raster::<i32, 1>::new(vector![7]).unwrap();
        raster.data_mut().copy_from_slice(&[0, 5, 0, 0, 3, 3, 3]);
        let extra = Extrapolator::new(&raster, Nearest);
        assert_eq!(open(&extra, 1).unwrap().data(), &[0, 0, 0, 0, 3, 3, 3]);
        raster.data_mut().copy_from_slice(&[2, 2, 0, 2, 2, 0, 0]);
        let extra = Extrapolator::new(&raster, Nearest);
        assert_eq!(close(&extra, 1).unwrap().data(), &[2, 2, 2, 2, 2, 0, 0]);
    }

    #[test]
    fn min_contrast_test() {
        let mut image = Raster::<f64, 2>::filled(vector![3, 3], 2.0).unwrap();
        image[vector![1, 1]] = 3.0;
        image[vector![2, 1]] = 4.0;
        let mut mask = Raster::<bool, 2>::filled(vector![3, 3], false).unwrap();
        let p = vector![1, 1];
        assert_eq!(min_contrast(&image, &mask, &p).unwrap(), f64::MAX);
        mask[vector![1, 0]] = true;
        assert_approx_eq!(f64, min_contrast(&image, &mask, &p).unwrap(), -0.5);
        mask[vector![2, 1]] = true;
        assert_approx_eq!(f64, min_contrast(&image, &mask, &p).unwrap(), -0.5);
        mask[vector![1, 0]] = false;
        assert_approx_eq!(f64, min_contrast(&image, &mask, &p).unwrap(), 0.25);
    }

    #[test]
    fn grow_test() {
        let mut image = Raster::<f64, 2>::filled(vector![5, 5], 1.0).unwrap();
        image[vector![2, 2]] = 10.0;
        image[vector![3, 2]] = 8.0;
        let mut mask = Raster::<bool, 2>::filled(vector![5, 5], false).unwrap();
        mask[vector![2, 2]] = true;
        let count = grow(&image, &mut mask, 0.5).unwrap();
        assert_eq!(count, 1);
        let flagged: Vec<_> = mask.domain().iter().filter(|p| mask[*p]).collect();
        assert_eq!(flagged, vec![vector![2, 2], vector![3, 2]]);

        let wrong = Raster::<f64, 2>::filled(vector![4, 5], 1.0).unwrap();
        assert!(grow(&wrong, &mut mask, 0.5).is_err());
    }
}
