use crate::raster::*;
use crate::stencil::*;
use crate::util::*;
use std::cmp::Ordering;

/// Reduction of the neighborhood of a position into one output value.
///
/// Neighbors are handed over in window offset order. Kernels may reorder
/// the slice, which is scratch space owned by the caller.
pub trait Kernel<T, const N: usize>: Sync {
    type Output: Copy + Default + Send + Sync;

    fn window(&self) -> &Window<N>;

    /// `neighbors` has one value per window offset, hence is never empty.
    fn reduce(&self, neighbors: &mut [T]) -> Self::Output;
}

fn partial_order<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Weighted sum of the neighbors, `sum_k w_k * n_k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlation<T, const N: usize> {
    window: Window<N>,
    weights: Vec<T>,
}

impl<T: NumTrait, const N: usize> Correlation<T, N> {
    pub fn new(window: Window<N>, weights: Vec<T>) -> Result<Self> {
        if window.len() != weights.len() {
            return Err(RasterError::SizeMismatch {
                expected: window.len(),
                actual: weights.len(),
            });
        }
        Ok(Correlation { window, weights })
    }

    /// Weights read from a raster, whose center `(shape - 1) / 2` is the
    /// origin.
    pub fn from_raster<R: RasterRead<N, Value = T>>(values: &R) -> Result<Self> {
        let shape = values.shape();
        let origin = (shape - Position::ones()) / 2;
        let window = Window::from_region(Region::from_shape(-origin, shape))?;
        Self::new(window, values.data().to_vec())
    }

    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Correlation by this kernel's flip, i.e. convolution by this kernel.
    pub fn flipped(&self) -> Self {
        Correlation {
            window: self.window.flipped(),
            weights: self.weights.clone(),
        }
    }

    /// Weights laid out over the bounding region of the window, zero where
    /// the window has no offset.
    pub fn to_raster(&self) -> Raster<T, N> {
        let bounding = *self.window.bounding();
        let mut data = vec![T::zero(); bounding.size()];
        for (o, w) in self.window.offsets().iter().zip(self.weights.iter()) {
            let i = bounding.coord_to_linear(o);
            data[i] = data[i] + *w;
        }
        Raster::from_parts(bounding.shape(), data)
    }
}

impl<T: NumTrait + Default, const N: usize> Kernel<T, N> for Correlation<T, N> {
    type Output = T;

    fn window(&self) -> &Window<N> {
        &self.window
    }

    #[inline]
    fn reduce(&self, neighbors: &mut [T]) -> T {
        self.weights
            .iter()
            .zip(neighbors.iter())
            .fold(T::zero(), |acc, (w, n)| acc + *w * *n)
    }
}

/// Arithmetic mean of the neighbors.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanFilter<T, const N: usize> {
    window: Window<N>,
    count: T,
}

impl<T: NumTrait, const N: usize> MeanFilter<T, N> {
    pub fn new(window: Window<N>) -> Self {
        let count = count_as(window.len());
        MeanFilter { window, count }
    }
}

impl<T: NumTrait + Default, const N: usize> Kernel<T, N> for MeanFilter<T, N> {
    type Output = T;

    fn window(&self) -> &Window<N> {
        &self.window
    }

    #[inline]
    fn reduce(&self, neighbors: &mut [T]) -> T {
        neighbors.iter().fold(T::zero(), |acc, n| acc + *n) / self.count
    }
}

/// Median of the neighbors. For even neighborhoods, the mean of the two
/// central values, truncated for integral types.
#[derive(Debug, Clone, PartialEq)]
pub struct MedianFilter<const N: usize> {
    window: Window<N>,
}

impl<const N: usize> MedianFilter<N> {
    pub fn new(window: Window<N>) -> Self {
        MedianFilter { window }
    }
}

impl<T, const N: usize> Kernel<T, N> for MedianFilter<N>
where
    T: NumTrait + PartialOrd + Default,
{
    type Output = T;

    fn window(&self) -> &Window<N> {
        &self.window
    }

    fn reduce(&self, neighbors: &mut [T]) -> T {
        let half = neighbors.len() / 2;
        let even = half * 2 == neighbors.len();
        let (lower, upper, _) = neighbors.select_nth_unstable_by(half, partial_order);
        let upper = *upper;
        if even {
            let below = lower
                .iter()
                .copied()
                .fold(lower[0], |acc, v| if v > acc { v } else { acc });
            (below + upper) / (T::one() + T::one())
        } else {
            upper
        }
    }
}

/// Minimum of the neighbors.
#[derive(Debug, Clone, PartialEq)]
pub struct Erosion<const N: usize> {
    window: Window<N>,
}

impl<const N: usize> Erosion<N> {
    pub fn new(window: Window<N>) -> Self {
        Erosion { window }
    }
}

impl<T, const N: usize> Kernel<T, N> for Erosion<N>
where
    T: PartialOrd + Copy + Default + Send + Sync,
{
    type Output = T;

    fn window(&self) -> &Window<N> {
        &self.window
    }

    #[inline]
    fn reduce(&self, neighbors: &mut [T]) -> T {
        neighbors
            .iter()
            .copied()
            .fold(neighbors[0], |acc, v| if v < acc { v } else { acc })
    }
}

/// Maximum of the neighbors.
#[derive(Debug, Clone, PartialEq)]
pub struct Dilation<const N: usize> {
    window: Window<N>,
}

impl<const N: usize> Dilation<N> {
    pub fn new(window: Window<N>) -> Self {
        Dilation { window }
    }
}

impl<T, const N: usize> Kernel<T, N> for Dilation<N>
where
    T: PartialOrd + Copy + Default + Send + Sync,
{
    type Output = T;

    fn window(&self) -> &Window<N> {
        &self.window
    }

    #[inline]
    fn reduce(&self, neighbors: &mut [T]) -> T {
        neighbors
            .iter()
            .copied()
            .fold(neighbors[0], |acc, v| if v > acc { v } else { acc })
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use nalgebra::vector;

    fn line(len: Index) -> Window<1> {
        Window::from_region(Region::from_shape(vector![0], vector![len])).unwrap()
    }

    #[test]
    fn correlation_test() {
        let k = Correlation::new(line(3), vec![1, 2, 3]).unwrap();
        assert_eq!(k.reduce(&mut [4, 5, 6]), 4 + 10 + 18);
        assert!(Correlation::new(line(3), vec![1, 2]).is_err());
    }

    #[test]
    fn from_raster_test() {
        let mut values = Raster::<i32, 2>::new(vector![3, 3]).unwrap();
        values.range(0, 1);
        let k = Correlation::from_raster(&values).unwrap();
        assert_eq!(*k.window().bounding(), Region::from_center(1));
        assert_eq!(k.to_raster(), values);

        let f = k.flipped();
        assert_eq!(*f.window().bounding(), Region::from_center(1));
        let flipped = f.to_raster();
        assert_eq!(flipped.data(), &[8, 7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn mean_test() {
        let k = MeanFilter::<f64, 1>::new(line(4));
        assert_approx_eq!(f64, k.reduce(&mut [1.0, 2.0, 3.0, 6.0]), 3.0);
        let k = MeanFilter::<i32, 1>::new(line(3));
        assert_eq!(k.reduce(&mut [1, 2, 4]), 2);
    }

    #[test]
    fn median_test() {
        {
            let k = MedianFilter::new(line(5));
            assert_eq!(k.reduce(&mut [9, 1, 7, 3, 5]), 5);
        }

        {
            let k = MedianFilter::new(line(4));
            assert_approx_eq!(f64, k.reduce(&mut [4.0, 1.0, 3.0, 2.0]), 2.5);
            assert_eq!(k.reduce(&mut [4, 1, 3, 2]), 2);
        }
    }

    #[test]
    fn min_max_test() {
        let erosion = Erosion::new(line(4));
        let dilation = Dilation::new(line(4));
        assert_eq!(erosion.reduce(&mut [3, -1, 7, 2]), -1);
        assert_eq!(dilation.reduce(&mut [3, -1, 7, 2]), 7);
        assert!(!erosion.reduce(&mut [true, false, true, true]));
        assert!(dilation.reduce(&mut [false, false, true, false]));
    }
}
