use crate::util::*;

/// Integral position (or shape, or offset) of fixed arity.
pub type Position<const N: usize> = nalgebra::SVector<Index, N>;

/// Continuous coordinates, used by interpolation.
pub type Vector<const N: usize> = nalgebra::SVector<f64, N>;

/// Integral position whose arity is only known at runtime.
pub type DynPosition = nalgebra::DVector<Index>;

pub trait PositionExt<const N: usize>: Sized {
    /// All coordinates set to 1.
    fn ones() -> Self;

    /// All coordinates set to -1, used as the "last index" marker.
    fn max_sentinel() -> Self;

    fn is_max_sentinel(&self) -> bool;

    /// Keep the first `M` coordinates.
    fn truncated<const M: usize>(&self) -> Result<Position<M>>;

    /// Copy into a higher arity, taking trailing coordinates from `padding`.
    fn padded<const M: usize>(&self, padding: &Position<M>) -> Result<Position<M>>;

    fn to_dyn(&self) -> DynPosition;

    fn to_vec(&self) -> Vec<Index>;
}

impl<const N: usize> PositionExt<N> for Position<N> {
    fn ones() -> Self {
        Position::repeat(1)
    }

    fn max_sentinel() -> Self {
        Position::repeat(-1)
    }

    fn is_max_sentinel(&self) -> bool {
        self.iter().all(|c| *c == -1)
    }

    fn truncated<const M: usize>(&self) -> Result<Position<M>> {
        if M > N {
            return Err(RasterError::DimensionMismatch {
                expected: N,
                actual: M,
            });
        }
        Ok(Position::from_fn(|i, _| self[i]))
    }

    fn padded<const M: usize>(&self, padding: &Position<M>) -> Result<Position<M>> {
        if M < N {
            return Err(RasterError::DimensionMismatch {
                expected: N,
                actual: M,
            });
        }
        Ok(Position::from_fn(|i, _| if i < N { self[i] } else { padding[i] }))
    }

    fn to_dyn(&self) -> DynPosition {
        DynPosition::from_column_slice(self.as_slice())
    }

    fn to_vec(&self) -> Vec<Index> {
        self.as_slice().to_vec()
    }
}

/// Checked conversion of a runtime-length position to a fixed arity.
pub fn to_fixed<const N: usize>(position: &DynPosition) -> Result<Position<N>> {
    if position.len() != N {
        return Err(RasterError::DimensionMismatch {
            expected: N,
            actual: position.len(),
        });
    }
    Ok(Position::from_column_slice(position.as_slice()))
}

/// Unit vector along `axis`.
pub fn axis_unit<const N: usize>(axis: usize) -> Position<N> {
    debug_assert!(axis < N);
    Position::from_fn(|i, _| if i == axis { 1 } else { 0 })
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use nalgebra::{dvector, vector};

    #[test]
    fn sentinel_test() {
        let m = Position::<3>::max_sentinel();
        assert_eq!(m, vector![-1, -1, -1]);
        assert!(m.is_max_sentinel());
        assert!(!Position::<3>::ones().is_max_sentinel());
        assert_eq!(Position::<2>::ones(), vector![1, 1]);
    }

    #[test]
    fn truncate_pad_test() {
        {
            let p: Position<4> = vector![1, 2, 3, 4];
            let s: Position<2> = p.truncated().unwrap();
            assert_eq!(s, vector![1, 2]);
            assert!(p.truncated::<5>().is_err());
        }

        {
            let p: Position<2> = vector![1, 2];
            let e: Position<4> = p.padded(&vector![9, 9, 7, 8]).unwrap();
            assert_eq!(e, vector![1, 2, 7, 8]);
            assert!(p.padded::<1>(&vector![0]).is_err());
        }
    }

    #[test]
    fn dyn_conversion_test() {
        {
            let d = dvector![3, 4, 5];
            let p: Position<3> = to_fixed(&d).unwrap();
            assert_eq!(p, vector![3, 4, 5]);
            assert_eq!(p.to_dyn(), d);
        }

        {
            let d = dvector![3, 4];
            match to_fixed::<3>(&d) {
                Err(RasterError::DimensionMismatch { expected, actual }) => {
                    assert_eq!(expected, 3);
                    assert_eq!(actual, 2);
                }
                _ => panic!("expected a dimension mismatch"),
            }
        }
    }

    #[test]
    fn axis_unit_test() {
        assert_eq!(axis_unit::<3>(1), vector![0, 1, 0]);
    }
}
