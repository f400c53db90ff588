use super::*;
use clap::ValueEnum;

/// Boundary policy selectable at runtime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum ExtrapolationKind {
    /// Constant fill value.
    #[default]
    Constant,
    Nearest,
    Periodic,
    Reflect,
}

impl ExtrapolationKind {
    /// `fill` is only used by the constant policy.
    pub fn to_method<T>(&self, fill: T) -> AnyExtrapolation<T> {
        match self {
            ExtrapolationKind::Constant => AnyExtrapolation::Constant(Constant(fill)),
            ExtrapolationKind::Nearest => AnyExtrapolation::Nearest(Nearest),
            ExtrapolationKind::Periodic => AnyExtrapolation::Periodic(Periodic),
            ExtrapolationKind::Reflect => AnyExtrapolation::Reflect(Reflect),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnyExtrapolation<T> {
    Constant(Constant<T>),
    Nearest(Nearest),
    Periodic(Periodic),
    Reflect(Reflect),
}

impl<T: Copy + Sync> Extrapolation<T> for AnyExtrapolation<T> {
    #[inline]
    fn extrapolate<const N: usize, R: RasterRead<N, Value = T>>(
        &self,
        raster: &R,
        position: &Position<N>,
    ) -> Option<T> {
        match self {
            AnyExtrapolation::Constant(m) => m.extrapolate(raster, position),
            AnyExtrapolation::Nearest(m) => m.extrapolate(raster, position),
            AnyExtrapolation::Periodic(m) => m.extrapolate(raster, position),
            AnyExtrapolation::Reflect(m) => m.extrapolate(raster, position),
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn runtime_selection_test() {
        let mut raster = Raster::<i32, 1>::new(vector![3]).unwrap();
        raster.range(1, 1);
        let expected = [
            (ExtrapolationKind::Constant, -9),
            (ExtrapolationKind::Nearest, 1),
            (ExtrapolationKind::Periodic, 3),
            (ExtrapolationKind::Reflect, 2),
        ];
        for (kind, e) in expected {
            let extra = Extrapolator::new(&raster, kind.to_method(-9));
            assert_eq!(extra.at(&vector![-1]).unwrap(), e, "{kind:?}");
        }
    }

    #[test]
    fn parse_test() {
        let kind = ExtrapolationKind::from_str("periodic", true).unwrap();
        assert_eq!(kind, ExtrapolationKind::Periodic);
    }
}
