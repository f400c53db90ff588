//! One-dimensional kernels along an axis of an N-dimensional raster, and
//! their composition into separable filters.

use crate::extrapolation::*;
use crate::par_stencil::*;
use crate::raster::*;
use crate::stencil::*;
use crate::util::*;

/// Correlation by a line of weights along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedKernel<T, const N: usize> {
    axis: usize,
    origin: usize,
    kernel: Correlation<T, N>,
}

impl<T: NumTrait, const N: usize> OrientedKernel<T, N> {
    /// `values[origin]` is the weight of the current position.
    pub fn new(axis: usize, values: Vec<T>, origin: usize) -> Result<Self> {
        if axis >= N {
            return Err(RasterError::DimensionMismatch {
                expected: N,
                actual: axis + 1,
            });
        }
        if origin >= values.len() {
            return Err(RasterError::SizeMismatch {
                expected: origin + 1,
                actual: values.len(),
            });
        }
        let mut front = Position::zeros();
        front[axis] = -(origin as Index);
        let mut shape = Position::ones();
        shape[axis] = values.len() as Index;
        let window = Window::from_region(Region::from_shape(front, shape))?;
        Ok(OrientedKernel {
            axis,
            origin,
            kernel: Correlation::new(window, values)?,
        })
    }

    /// Kernel whose origin is the middle value, `(len - 1) / 2`.
    pub fn centered(axis: usize, values: Vec<T>) -> Result<Self> {
        let origin = values.len().saturating_sub(1) / 2;
        Self::new(axis, values, origin)
    }

    pub fn axis(&self) -> usize {
        self.axis
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn values(&self) -> &[T] {
        self.kernel.weights()
    }

    /// The same kernel as a dense N-dimensional correlation.
    pub fn to_correlation(&self) -> Correlation<T, N> {
        self.kernel.clone()
    }
}

impl<T: NumTrait + Default, const N: usize> Kernel<T, N> for OrientedKernel<T, N> {
    type Output = T;

    fn window(&self) -> &Window<N> {
        self.kernel.window()
    }

    #[inline]
    fn reduce(&self, neighbors: &mut [T]) -> T {
        self.kernel.reduce(neighbors)
    }
}

/// Sequence of oriented kernels applied one after the other.
///
/// The input is extrapolated once over its domain grown by `window()`, then
/// every stage shrinks the intermediate result by its own extent. Applying
/// the sequence is therefore equivalent to correlating with `compose()`,
/// whatever the boundary policy and the order of the stages.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparableFilter<T, const N: usize> {
    stages: Vec<OrientedKernel<T, N>>,
}

impl<T: NumTrait + Default, const N: usize> SeparableFilter<T, N> {
    pub fn new(stages: Vec<OrientedKernel<T, N>>) -> Self {
        SeparableFilter { stages }
    }

    pub fn stages(&self) -> &[OrientedKernel<T, N>] {
        &self.stages
    }

    /// Bounding region of the composed window.
    pub fn window(&self) -> Region<N> {
        self.stages
            .iter()
            .fold(Region::default(), |acc, s| acc.grow_by(s.window().bounding()))
    }

    /// Run every stage over the extrapolated input. The output covers the
    /// domain of the input raster.
    pub fn apply<R, M>(&self, input: &Extrapolator<'_, R, M>) -> Result<Raster<T, N>>
    where
        R: RasterRead<N, Value = T>,
        M: Extrapolation<T>,
    {
        self.apply_with(input, &FilterParameters::default())
    }

    pub fn apply_with<R, M>(
        &self,
        input: &Extrapolator<'_, R, M>,
        params: &FilterParameters,
    ) -> Result<Raster<T, N>>
    where
        R: RasterRead<N, Value = T>,
        M: Extrapolation<T>,
    {
        let domain = input.raster().domain();
        if self.stages.is_empty() || domain.is_empty() {
            return Ok(input.raster().to_raster());
        }
        let padded = domain.grow_by(&self.window());
        tracing::debug!(
            stages = self.stages.len(),
            padded = %padded,
            "applying separable filter"
        );
        let mut current = input.copy(&padded)?;
        for stage in self.stages.iter() {
            let (_, next) = apply_inner(stage, &current, params)?;
            current = next;
        }
        debug_assert_eq!(current.shape(), domain.shape());
        Ok(current)
    }

    /// Dense correlation equivalent to the whole sequence: the weights are
    /// the polynomial product of the stages.
    pub fn compose(&self) -> Result<Correlation<T, N>> {
        let mut region = Region::default();
        let mut weights = vec![T::one()];
        for stage in self.stages.iter() {
            let stage_window = stage.window();
            let next_region = region.grow_by(stage_window.bounding());
            let mut next = vec![T::zero(); next_region.size()];
            for (o1, w1) in region.iter().zip(weights.iter()) {
                for (o2, w2) in stage_window.offsets().iter().zip(stage.values()) {
                    let i = next_region.coord_to_linear(&(o1 + o2));
                    next[i] = next[i] + *w1 * *w2;
                }
            }
            region = next_region;
            weights = next;
        }
        Correlation::new(Window::from_region(region)?, weights)
    }
}

impl<T: Clone, const N: usize> std::ops::Mul for OrientedKernel<T, N> {
    type Output = SeparableFilter<T, N>;

    fn mul(self, rhs: OrientedKernel<T, N>) -> SeparableFilter<T, N> {
        SeparableFilter {
            stages: vec![self, rhs],
        }
    }
}

impl<T: Clone, const N: usize> std::ops::Mul<OrientedKernel<T, N>> for SeparableFilter<T, N> {
    type Output = SeparableFilter<T, N>;

    fn mul(mut self, rhs: OrientedKernel<T, N>) -> SeparableFilter<T, N> {
        self.stages.push(rhs);
        self
    }
}

impl<T: Clone, const N: usize> std::ops::Mul<SeparableFilter<T, N>> for OrientedKernel<T, N> {
    type Output = SeparableFilter<T, N>;

    fn mul(self, mut rhs: SeparableFilter<T, N>) -> SeparableFilter<T, N> {
        rhs.stages.insert(0, self);
        rhs
    }
}

impl<T: Clone, const N: usize> std::ops::Mul for SeparableFilter<T, N> {
    type Output = SeparableFilter<T, N>;

    fn mul(mut self, rhs: SeparableFilter<T, N>) -> SeparableFilter<T, N> {
        self.stages.extend(rhs.stages);
        self
    }
}
