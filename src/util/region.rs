use crate::util::indexing::*;
use crate::util::*;

/// Axis-aligned box of integral positions, inclusive of both corners.
///
/// A region whose back is lower than its front along some axis is empty.
/// The region is responsible for the mapping between positions and linear
/// offsets of the rasters and kernels defined over it.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq)]
pub struct Region<const N: usize> {
    front: Position<N>,
    back: Position<N>,
}

impl<const N: usize> std::fmt::Display for Region<N> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "{:?}..={:?}",
            self.front.as_slice(),
            self.back.as_slice()
        )
    }
}

impl<const N: usize> Region<N> {
    /// Create a region from its corners.
    pub fn new(front: Position<N>, back: Position<N>) -> Self {
        Region { front, back }
    }

    /// Create a region from its front position and shape.
    pub fn from_shape(front: Position<N>, shape: Position<N>) -> Self {
        Region {
            front,
            back: front + shape - Position::ones(),
        }
    }

    /// Hypercube `[-radius, radius]` along every axis.
    pub fn from_center(radius: Index) -> Self {
        Region {
            front: Position::repeat(-radius),
            back: Position::repeat(radius),
        }
    }

    /// Create a region from runtime-length corners.
    pub fn from_dyn(front: &DynPosition, back: &DynPosition) -> Result<Self> {
        Ok(Region {
            front: to_fixed(front)?,
            back: to_fixed(back)?,
        })
    }

    pub fn front(&self) -> &Position<N> {
        &self.front
    }

    pub fn back(&self) -> &Position<N> {
        &self.back
    }

    /// Number of positions along each axis, `back - front + 1`.
    pub fn shape(&self) -> Position<N> {
        (self.back - self.front).add_scalar(1)
    }

    pub fn length(&self, axis: usize) -> Index {
        self.back[axis] - self.front[axis] + 1
    }

    /// Number of contained positions.
    #[inline]
    pub fn size(&self) -> usize {
        shape_size(&self.shape())
    }

    pub fn is_empty(&self) -> bool {
        (0..N).any(|d| self.back[d] < self.front[d])
    }

    pub fn contains(&self, position: &Position<N>) -> bool {
        for d in 0..N {
            if position[d] < self.front[d] || position[d] > self.back[d] {
                return false;
            }
        }
        true
    }

    /// Check whether another region is contained in the instance.
    /// Empty regions are contained in any region.
    pub fn contains_region(&self, other: &Self) -> bool {
        if other.is_empty() {
            return true;
        }
        for d in 0..N {
            if other.front[d] < self.front[d] || other.back[d] > self.back[d] {
                return false;
            }
        }
        true
    }

    /// Linear offset of a contained position.
    pub fn coord_to_linear(&self, position: &Position<N>) -> usize {
        coord_to_linear(&(position - self.front), &self.shape())
    }

    /// Position of a given linear offset.
    pub fn linear_to_coord(&self, index: usize) -> Position<N> {
        linear_to_coord(index, &self.shape()) + self.front
    }

    /// Iterate over the contained positions, first axis fastest.
    pub fn iter(&self) -> RegionIter<N> {
        RegionIter {
            region: *self,
            shape: self.shape(),
            next: 0,
            end: self.size(),
        }
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Region {
            front: self.front.zip_map(&other.front, |a, b| a.max(b)),
            back: self.back.zip_map(&other.back, |a, b| a.min(b)),
        }
    }

    /// Minkowski sum with a window: positions reached by `p + o` for any
    /// position `p` of the instance and offset `o` of the window.
    pub fn grow_by(&self, window: &Self) -> Self {
        Region {
            front: self.front + window.front,
            back: self.back + window.back,
        }
    }

    /// Positions `p` such that `p + o` is in the instance for every offset
    /// `o` of the window.
    pub fn shrink_by(&self, window: &Self) -> Self {
        Region {
            front: self.front - window.front,
            back: self.back - window.back,
        }
    }

    /// Disjoint boxes covering the positions of the instance not in `other`.
    pub fn difference(&self, other: &Self) -> Vec<Self> {
        let center = self.intersection(other);
        if self.is_empty() {
            return Vec::new();
        }
        if center.is_empty() {
            return vec![*self];
        }
        let mut result = Vec::with_capacity(2 * N);
        let mut remaining = *self;
        for d in 0..N {
            if remaining.front[d] < center.front[d] {
                let mut lower = remaining;
                lower.back[d] = center.front[d] - 1;
                result.push(lower);
            }
            if remaining.back[d] > center.back[d] {
                let mut upper = remaining;
                upper.front[d] = center.back[d] + 1;
                result.push(upper);
            }
            remaining.front[d] = center.front[d];
            remaining.back[d] = center.back[d];
        }
        result
    }

    /// Disjoint boxes which, together with the instance, cover its growth by
    /// a window.
    pub fn surround(&self, window: &Self) -> Vec<Self> {
        self.grow_by(window).difference(self)
    }

    /// Flatten along an axis: the back is set to the front.
    pub fn project(&mut self, axis: usize) -> &mut Self {
        self.back[axis] = self.front[axis];
        self
    }

    /// Keep the first `M` axes.
    pub fn slice<const M: usize>(&self) -> Result<Region<M>> {
        Ok(Region {
            front: self.front.truncated()?,
            back: self.back.truncated()?,
        })
    }

    /// Lift to a higher arity, taking trailing axes from `padding`.
    pub fn extend<const M: usize>(&self, padding: &Region<M>) -> Result<Region<M>> {
        Ok(Region {
            front: self.front.padded(&padding.front)?,
            back: self.back.padded(&padding.back)?,
        })
    }
}

impl<const N: usize> Default for Region<N> {
    /// The region containing only the origin.
    fn default() -> Self {
        Region::new(Position::zeros(), Position::zeros())
    }
}

/// Restartable iterator over the positions of a region.
#[derive(Debug, Clone)]
pub struct RegionIter<const N: usize> {
    region: Region<N>,
    shape: Position<N>,
    next: usize,
    end: usize,
}

impl<const N: usize> Iterator for RegionIter<N> {
    type Item = Position<N>;

    fn next(&mut self) -> Option<Position<N>> {
        if self.next >= self.end {
            return None;
        }
        let result = linear_to_coord(self.next, &self.shape) + self.region.front;
        self.next += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl<const N: usize> ExactSizeIterator for RegionIter<N> {}

impl<const N: usize> IntoIterator for &Region<N> {
    type Item = Position<N>;
    type IntoIter = RegionIter<N>;

    fn into_iter(self) -> RegionIter<N> {
        self.iter()
    }
}

impl<const N: usize> IntoIterator for Region<N> {
    type Item = Position<N>;
    type IntoIter = RegionIter<N>;

    fn into_iter(self) -> RegionIter<N> {
        self.iter()
    }
}

impl<const N: usize> std::ops::Add<Position<N>> for Region<N> {
    type Output = Region<N>;

    fn add(self, vector: Position<N>) -> Region<N> {
        Region::new(self.front + vector, self.back + vector)
    }
}

impl<const N: usize> std::ops::Sub<Position<N>> for Region<N> {
    type Output = Region<N>;

    fn sub(self, vector: Position<N>) -> Region<N> {
        Region::new(self.front - vector, self.back - vector)
    }
}

impl<const N: usize> std::ops::AddAssign<Position<N>> for Region<N> {
    fn add_assign(&mut self, vector: Position<N>) {
        self.front += vector;
        self.back += vector;
    }
}

impl<const N: usize> std::ops::SubAssign<Position<N>> for Region<N> {
    fn sub_assign(&mut self, vector: Position<N>) {
        self.front -= vector;
        self.back -= vector;
    }
}

impl<const N: usize> std::ops::BitAnd for Region<N> {
    type Output = Region<N>;

    fn bitand(self, other: Region<N>) -> Region<N> {
        self.intersection(&other)
    }
}

impl<const N: usize> std::ops::Sub<&Region<N>> for &Region<N> {
    type Output = Vec<Region<N>>;

    fn sub(self, other: &Region<N>) -> Vec<Region<N>> {
        self.difference(other)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use nalgebra::{dvector, vector};
    use std::collections::HashSet;

    #[test]
    fn shape_size_test() {
        {
            let r = Region::new(vector![0], vector![5]);
            assert_eq!(r.shape(), vector![6]);
            assert_eq!(r.size(), 6);
        }

        {
            let r = Region::new(vector![1, 1, 1], vector![6, 8, 10]);
            assert_eq!(r.shape(), vector![6, 8, 10]);
            assert_eq!(r.size(), 6 * 8 * 10);
        }

        {
            let r = Region::new(vector![3, 0], vector![2, 5]);
            assert!(r.is_empty());
            assert_eq!(r.size(), 0);
            assert_eq!(r.iter().count(), 0);
        }
    }

    #[test]
    fn from_shape_test() {
        let front = vector![1, 2, 3];
        let back = vector![3, 5, 7];
        let shape = vector![3, 4, 5];
        let a = Region::new(front, back);
        let b = Region::from_shape(front, shape);
        assert_eq!(a, b);
        assert_eq!(a.shape(), shape);
    }

    #[test]
    fn from_dyn_test() {
        let r: Region<2> =
            Region::from_dyn(&dvector![0, 1], &dvector![4, 5]).unwrap();
        assert_eq!(r, Region::new(vector![0, 1], vector![4, 5]));
        assert!(Region::<3>::from_dyn(&dvector![0, 1], &dvector![4, 5]).is_err());
    }

    #[test]
    fn translation_test() {
        let front = vector![1, 2, 3];
        let shape = vector![3, 4, 5];
        let mut r = Region::from_shape(front, shape);
        r += shape - Position::ones();
        assert_eq!(*r.front(), front + shape - Position::ones());
        assert_eq!(r.shape(), shape);
        r -= shape - Position::ones();
        assert_eq!(*r.front(), front);
        assert_eq!((r + vector![1, 1, 1]) - vector![1, 1, 1], r);
    }

    #[test]
    fn iteration_order_test() {
        let r = Region::new(vector![1, 2], vector![2, 3]);
        let positions: Vec<_> = r.iter().collect();
        assert_eq!(
            positions,
            vec![vector![1, 2], vector![2, 2], vector![1, 3], vector![2, 3]]
        );
        let again: Vec<_> = (&r).into_iter().collect();
        assert_eq!(positions, again);
        assert_eq!(r.iter().len(), r.size());
    }

    #[test]
    fn linear_test() {
        let r = Region::new(vector![2, 5], vector![8, 9]);
        for (i, p) in r.iter().enumerate() {
            assert_eq!(r.coord_to_linear(&p), i);
            assert_eq!(r.linear_to_coord(i), p);
        }
        assert_eq!(r.linear_to_coord(0), vector![2, 5]);
    }

    #[test]
    fn contains_test() {
        let r = Region::new(vector![0, 0], vector![9, 9]);
        assert!(r.contains(&vector![0, 9]));
        assert!(!r.contains(&vector![-1, 0]));
        assert!(!r.contains(&vector![0, 10]));
        assert!(r.contains_region(&r));
        assert!(r.contains_region(&Region::new(vector![2, 3], vector![4, 4])));
        assert!(!r.contains_region(&Region::new(vector![2, 3], vector![10, 4])));
    }

    #[test]
    fn intersection_test() {
        let a = Region::new(vector![0, 0], vector![9, 9]);
        let b = Region::new(vector![5, -3], vector![12, 4]);
        assert_eq!(a & b, Region::new(vector![5, 0], vector![9, 4]));
        let c = Region::new(vector![20, 20], vector![30, 30]);
        assert!((a & c).is_empty());
    }

    #[test]
    fn grow_shrink_test() {
        let domain = Region::from_shape(vector![0, 0], vector![4, 3]);
        let window = Region::from_center(1);
        let inner = domain.shrink_by(&window);
        assert_eq!(inner, Region::new(vector![1, 1], vector![2, 1]));
        assert_eq!(inner.grow_by(&window), domain);

        let asymmetric = Region::new(vector![-1, 0], vector![2, 0]);
        let inner = domain.shrink_by(&asymmetric);
        assert_eq!(inner, Region::new(vector![1, 0], vector![1, 2]));
        for p in inner.iter() {
            for o in asymmetric.iter() {
                assert!(domain.contains(&(p + o)));
            }
        }
    }

    // Check that the boxes plus the removed part cover the region exactly
    // by checking every position appears once.
    fn test_difference<const N: usize>(region: &Region<N>, other: &Region<N>) {
        let mut position_set = HashSet::new();
        let pieces = region - other;
        for piece in pieces.iter() {
            for p in piece.iter() {
                assert!(region.contains(&p));
                assert!(!other.contains(&p));
                assert!(!position_set.contains(&p));
                position_set.insert(p);
            }
        }
        for p in region.iter() {
            assert_eq!(position_set.contains(&p), !other.contains(&p));
        }
    }

    #[test]
    fn difference_test() {
        {
            let outer = Region::new(vector![0], vector![9]);
            let center = Region::new(vector![4], vector![6]);
            test_difference(&outer, &center);
            assert_eq!(outer.difference(&center).len(), 2);
        }

        {
            let outer = Region::new(vector![2, 5, 40], vector![20, 19, 60]);
            let center = Region::new(vector![6, 10, 47], vector![14, 13, 53]);
            test_difference(&outer, &center);
        }

        {
            let a = Region::new(vector![0, 0], vector![9, 9]);
            let b = Region::new(vector![5, -3], vector![12, 4]);
            test_difference(&a, &b);
        }

        {
            let a = Region::new(vector![0, 0], vector![3, 3]);
            let b = Region::new(vector![10, 10], vector![12, 12]);
            assert_eq!(a.difference(&b), vec![a]);
            assert!(a.difference(&a).is_empty());
        }
    }

    #[test]
    fn surround_test() {
        let region = Region::new(vector![1, 2, 3], vector![3, 5, 7]);
        let margin = Region::new(vector![-1, -2, -3], vector![3, 2, 1]);
        let mut position_set: HashSet<_> = region.iter().collect();
        for piece in region.surround(&margin) {
            for p in piece.iter() {
                assert!(position_set.insert(p));
            }
        }
        let grown = region.grow_by(&margin);
        assert_eq!(position_set.len(), grown.size());
        for p in grown.iter() {
            assert!(position_set.contains(&p));
        }
    }

    #[test]
    fn project_slice_extend_test() {
        let mut r = Region::new(vector![1, 2, 3], vector![4, 5, 6]);
        r.project(1);
        assert_eq!(r.shape(), vector![4, 1, 4]);

        let s: Region<2> = r.slice().unwrap();
        assert_eq!(s, Region::new(vector![1, 2], vector![4, 2]));

        let line = Region::new(vector![-1], vector![1]);
        let lifted: Region<3> = line.extend(&Region::default()).unwrap();
        assert_eq!(lifted, Region::new(vector![-1, 0, 0], vector![1, 0, 0]));
    }
}
