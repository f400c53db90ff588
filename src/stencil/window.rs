use crate::util::*;

/// Structuring element: the relative offsets read around each position.
///
/// A window built from a region is dense and lists its offsets in region
/// order; an explicit list keeps the caller's order.
#[derive(Debug, Clone, PartialEq)]
pub struct Window<const N: usize> {
    offsets: Vec<Position<N>>,
    bounding: Region<N>,
    dense: bool,
}

impl<const N: usize> Window<N> {
    pub fn from_region(region: Region<N>) -> Result<Self> {
        if region.is_empty() {
            return Err(RasterError::EmptyWindow);
        }
        Ok(Window {
            offsets: region.iter().collect(),
            bounding: region,
            dense: true,
        })
    }

    /// Hypercube `[-radius, radius]^N`.
    pub fn from_center(radius: Index) -> Result<Self> {
        Self::from_region(Region::from_center(radius))
    }

    pub fn from_offsets(offsets: Vec<Position<N>>) -> Result<Self> {
        let first = *offsets.first().ok_or(RasterError::EmptyWindow)?;
        let mut front = first;
        let mut back = first;
        for o in offsets.iter() {
            front = front.zip_map(o, |a, b| a.min(b));
            back = back.zip_map(o, |a, b| a.max(b));
        }
        let bounding = Region::new(front, back);
        let dense = bounding.size() == offsets.len()
            && offsets.iter().zip(bounding.iter()).all(|(a, b)| *a == b);
        Ok(Window {
            offsets,
            bounding,
            dense,
        })
    }

    /// Offsets `o` of the L`P` ball, `sum_i |o_i|^P <= radius^P`, where
    /// `|x|^0` counts nonzero coordinates. `P = 0` gives the axis cross,
    /// `P = 1` the diamond and `P = 2` the Euclidean ball.
    pub fn ball<const P: u32>(radius: f64) -> Result<Self> {
        let limit = radius.powi(P as i32);
        let offsets: Vec<Position<N>> = Region::<N>::from_center(radius.floor() as Index)
            .iter()
            .filter(|o| o.iter().map(|&x| abs_pow::<P>(x)).sum::<f64>() <= limit)
            .collect();
        Self::from_offsets(offsets)
    }

    pub fn offsets(&self) -> &[Position<N>] {
        &self.offsets
    }

    /// Smallest region containing every offset.
    pub fn bounding(&self) -> &Region<N> {
        &self.bounding
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Whether the offsets are exactly the bounding region, in order.
    pub fn is_dense(&self) -> bool {
        self.dense
    }

    /// Mirror every offset, as needed to turn a correlation into a
    /// convolution.
    pub fn flipped(&self) -> Self {
        let offsets: Vec<_> = self.offsets.iter().map(|o| -o).collect();
        Window {
            bounding: Region::new(-self.bounding.back(), -self.bounding.front()),
            dense: false,
            offsets,
        }
    }
}

fn abs_pow<const P: u32>(x: Index) -> f64 {
    match P {
        0 => (x != 0) as u8 as f64,
        _ => (x.abs() as f64).powi(P as i32),
    }
}

impl<const N: usize> TryFrom<Region<N>> for Window<N> {
    type Error = RasterError;

    fn try_from(region: Region<N>) -> Result<Self> {
        Window::from_region(region)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn dense_test() {
        let w = Window::<2>::from_center(1).unwrap();
        assert_eq!(w.len(), 9);
        assert!(w.is_dense());
        assert_eq!(w.offsets()[0], vector![-1, -1]);
        assert_eq!(w.offsets()[1], vector![0, -1]);
        assert_eq!(*w.bounding(), Region::from_center(1));
    }

    #[test]
    fn sparse_test() {
        let w = Window::from_offsets(vec![
            vector![0, 0],
            vector![-1, 0],
            vector![1, 0],
            vector![0, -2],
        ])
        .unwrap();
        assert!(!w.is_dense());
        assert_eq!(*w.bounding(), Region::new(vector![-1, -2], vector![1, 0]));
        assert!(Window::<2>::from_offsets(Vec::new()).is_err());
        assert!(Window::from_region(Region::new(vector![1], vector![0])).is_err());
    }

    #[test]
    fn flipped_test() {
        let w = Window::from_region(Region::new(vector![-1, 0], vector![2, 0])).unwrap();
        let f = w.flipped();
        assert_eq!(*f.bounding(), Region::new(vector![-2, 0], vector![1, 0]));
        assert_eq!(f.offsets()[0], vector![1, 0]);
        assert_eq!(f.offsets()[3], vector![-2, 0]);
    }

    #[test]
    fn ball_test() {
        let diamond = Window::<2>::ball::<1>(1.0).unwrap();
        assert_eq!(
            diamond.offsets(),
            &[
                vector![0, -1],
                vector![-1, 0],
                vector![0, 0],
                vector![1, 0],
                vector![0, 1]
            ]
        );
        assert!(!diamond.is_dense());
        assert_eq!(*diamond.bounding(), Region::from_center(1));

        assert_eq!(Window::<2>::ball::<1>(2.0).unwrap().len(), 13);
        assert_eq!(Window::<2>::ball::<2>(1.5).unwrap().len(), 9);
        assert!(Window::<2>::ball::<2>(1.5).unwrap().is_dense());
        assert_eq!(Window::<2>::ball::<2>(2.0).unwrap().len(), 13);
        assert_eq!(Window::<3>::ball::<2>(1.0).unwrap().len(), 7);
        assert_eq!(Window::<2>::ball::<0>(2.0).unwrap().len(), 9);
        assert_eq!(Window::<3>::ball::<2>(0.5).unwrap().offsets(), &[vector![0, 0, 0]]);
        assert!(Window::<2>::ball::<2>(-1.0).is_err());
    }
}
