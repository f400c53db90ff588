//! Kernels comparing each neighborhood against a template, e.g. a PSF.
//! Template statistics are computed once, at construction.

use crate::raster::*;
use crate::stencil::*;
use crate::util::*;
use num::Float;

fn template_window<const N: usize, R: RasterRead<N>>(template: &R) -> Result<Window<N>> {
    let shape = template.shape();
    let origin = (shape - Position::ones()) / 2;
    Window::from_region(Region::from_shape(-origin, shape))
}

/// Minimum ratio between neighbors and template, normalized by the RMS of
/// the ratios: `min_k q_k * sqrt(K / sum_k q_k^2)` with `q_k = n_k / t_k`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotientFilter<T, const N: usize> {
    window: Window<N>,
    template: Vec<T>,
    count: T,
}

impl<T: Float + Send + Sync, const N: usize> QuotientFilter<T, N> {
    pub fn new(window: Window<N>, template: Vec<T>) -> Result<Self> {
        if window.len() != template.len() {
            return Err(RasterError::SizeMismatch {
                expected: window.len(),
                actual: template.len(),
            });
        }
        let count = count_as(template.len());
        Ok(QuotientFilter {
            window,
            template,
            count,
        })
    }

    /// Template centered at `(shape - 1) / 2`.
    pub fn from_raster<R: RasterRead<N, Value = T>>(template: &R) -> Result<Self> {
        Self::new(template_window(template)?, template.data().to_vec())
    }
}

impl<T: Float + Default + Send + Sync, const N: usize> Kernel<T, N> for QuotientFilter<T, N> {
    type Output = T;

    fn window(&self) -> &Window<N> {
        &self.window
    }

    fn reduce(&self, neighbors: &mut [T]) -> T {
        let mut out = T::max_value();
        let mut norm2 = T::zero();
        for (n, t) in neighbors.iter().zip(self.template.iter()) {
            let q = *n / *t;
            norm2 = norm2 + q * q;
            out = out.min(q);
        }
        out * (self.count / norm2).sqrt()
    }
}

/// Pearson correlation coefficient between neighbors and template.
/// Constant neighborhoods yield NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct PearsonCorrelation<T, const N: usize> {
    window: Window<N>,
    centered: Vec<T>,
    sum2: T,
    count: T,
}

impl<T: Float + Send + Sync, const N: usize> PearsonCorrelation<T, N> {
    pub fn new(window: Window<N>, template: Vec<T>) -> Result<Self> {
        if window.len() != template.len() {
            return Err(RasterError::SizeMismatch {
                expected: window.len(),
                actual: template.len(),
            });
        }
        let count: T = count_as(template.len());
        let mean = template.iter().fold(T::zero(), |acc, t| acc + *t) / count;
        let centered: Vec<T> = template.iter().map(|t| *t - mean).collect();
        let sum2 = centered.iter().fold(T::zero(), |acc, c| acc + *c * *c);
        Ok(PearsonCorrelation {
            window,
            centered,
            sum2,
            count,
        })
    }

    /// Template centered at `(shape - 1) / 2`.
    pub fn from_raster<R: RasterRead<N, Value = T>>(template: &R) -> Result<Self> {
        Self::new(template_window(template)?, template.data().to_vec())
    }
}

impl<T: Float + Default + Send + Sync, const N: usize> Kernel<T, N> for PearsonCorrelation<T, N> {
    type Output = T;

    fn window(&self) -> &Window<N> {
        &self.window
    }

    fn reduce(&self, neighbors: &mut [T]) -> T {
        let mean = neighbors.iter().fold(T::zero(), |acc, n| acc + *n) / self.count;
        let mut sum2 = T::zero();
        let mut inner = T::zero();
        for (n, t) in neighbors.iter().zip(self.centered.iter()) {
            let c = *n - mean;
            sum2 = sum2 + c * c;
            inner = inner + *t * c;
        }
        inner / (self.sum2 * sum2).sqrt()
    }
}
