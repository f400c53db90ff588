use super::*;
use clap::ValueEnum;
use num_traits::AsPrimitive;

/// Interpolation scheme selectable at runtime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum InterpolationKind {
    NearestNeighbor,
    #[default]
    Linear,
    /// Catmull-Rom cubic convolution.
    Cubic,
}

impl InterpolationKind {
    pub fn to_method(&self) -> AnyInterpolation {
        match self {
            InterpolationKind::NearestNeighbor => {
                AnyInterpolation::NearestNeighbor(NearestNeighbor)
            }
            InterpolationKind::Linear => AnyInterpolation::Linear(Linear),
            InterpolationKind::Cubic => AnyInterpolation::Cubic(Cubic::default()),
        }
    }
}

/// Any scheme, evaluated in `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnyInterpolation {
    NearestNeighbor(NearestNeighbor),
    Linear(Linear),
    Cubic(Cubic),
}

impl<T: AsPrimitive<f64>, const N: usize> Interpolation<T, N> for AnyInterpolation {
    type Output = f64;

    fn interpolate<S: Sample<N, Value = T>>(
        &self,
        source: &S,
        position: &Vector<N>,
    ) -> Result<f64> {
        match self {
            AnyInterpolation::NearestNeighbor(m) => Ok(m.interpolate(source, position)?.as_()),
            AnyInterpolation::Linear(m) => m.interpolate(source, position),
            AnyInterpolation::Cubic(m) => m.interpolate(source, position),
        }
    }
}
