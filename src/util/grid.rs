use crate::util::indexing::*;
use crate::util::*;

/// Regular lattice of positions inside a region.
///
/// The back corner is always a lattice node: construction pulls it back to
/// the last node reachable from the front.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq)]
pub struct Grid<const N: usize> {
    region: Region<N>,
    step: Position<N>,
}

impl<const N: usize> std::fmt::Display for Grid<N> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        write!(f, "{} step {:?}", self.region, self.step.as_slice())
    }
}

impl<const N: usize> Grid<N> {
    pub fn new(region: Region<N>, step: Position<N>) -> Result<Self> {
        if step.iter().any(|s| *s <= 0) {
            return Err(RasterError::InvalidStep {
                step: step.to_vec(),
            });
        }
        Ok(Self::snapped(region, step))
    }

    /// Create a grid from a front position, the number of nodes along each
    /// axis and the steps.
    pub fn from_shape(
        front: Position<N>,
        shape: Position<N>,
        step: Position<N>,
    ) -> Result<Self> {
        Self::new(Region::from_shape(front, shape.component_mul(&step)), step)
    }

    pub fn from_dyn(
        front: &DynPosition,
        back: &DynPosition,
        step: &DynPosition,
    ) -> Result<Self> {
        Self::new(Region::from_dyn(front, back)?, to_fixed(step)?)
    }

    fn snapped(region: Region<N>, step: Position<N>) -> Self {
        let mut back = *region.back();
        for d in 0..N {
            let length = region.length(d);
            if length > 0 {
                back[d] -= (length - 1) % step[d];
            }
        }
        Grid {
            region: Region::new(*region.front(), back),
            step,
        }
    }

    /// Bounding region, whose corners are both nodes.
    pub fn region(&self) -> &Region<N> {
        &self.region
    }

    pub fn front(&self) -> &Position<N> {
        self.region.front()
    }

    pub fn back(&self) -> &Position<N> {
        self.region.back()
    }

    pub fn step(&self) -> &Position<N> {
        &self.step
    }

    /// Number of nodes along an axis.
    pub fn length(&self, axis: usize) -> Index {
        let length = self.region.length(axis);
        if length <= 0 {
            return 0;
        }
        (length - 1) / self.step[axis] + 1
    }

    /// Number of nodes along each axis.
    pub fn shape(&self) -> Position<N> {
        Position::from_fn(|d, _| self.length(d))
    }

    pub fn size(&self) -> usize {
        shape_size(&self.shape())
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    /// Check whether a position is a node.
    pub fn contains(&self, position: &Position<N>) -> bool {
        if !self.region.contains(position) {
            return false;
        }
        (0..N).all(|d| (position[d] - self.front()[d]) % self.step[d] == 0)
    }

    /// Node of a given linear offset, first axis fastest.
    pub fn linear_to_coord(&self, index: usize) -> Position<N> {
        linear_to_coord(index, &self.shape()).component_mul(&self.step)
            + self.front()
    }

    pub fn iter(&self) -> GridIter<N> {
        GridIter {
            grid: *self,
            shape: self.shape(),
            next: 0,
            end: self.size(),
        }
    }

    /// Restrict to the nodes inside `bounds`.
    pub fn clamp(&self, bounds: &Region<N>) -> Self {
        let mut front = *self.front();
        let mut back = *self.back();
        for d in 0..N {
            let lower = bounds.front()[d].max(front[d]);
            front[d] = lower + (self.front()[d] - lower).rem_euclid(self.step[d]);
            back[d] = back[d].min(bounds.back()[d]);
        }
        Self::snapped(Region::new(front, back), self.step)
    }

    /// Nodes of the instance which are not nodes of `other`.
    pub fn difference(&self, other: &Self) -> Vec<Position<N>> {
        self.iter().filter(|p| !other.contains(p)).collect()
    }

    /// Flatten along an axis: the back is set to the front.
    pub fn project(&mut self, axis: usize) -> &mut Self {
        self.region.project(axis);
        self
    }
}

#[derive(Debug, Clone)]
pub struct GridIter<const N: usize> {
    grid: Grid<N>,
    shape: Position<N>,
    next: usize,
    end: usize,
}

impl<const N: usize> Iterator for GridIter<N> {
    type Item = Position<N>;

    fn next(&mut self) -> Option<Position<N>> {
        if self.next >= self.end {
            return None;
        }
        let result = linear_to_coord(self.next, &self.shape)
            .component_mul(&self.grid.step)
            + self.grid.front();
        self.next += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl<const N: usize> ExactSizeIterator for GridIter<N> {}

impl<const N: usize> IntoIterator for &Grid<N> {
    type Item = Position<N>;
    type IntoIter = GridIter<N>;

    fn into_iter(self) -> GridIter<N> {
        self.iter()
    }
}

impl<const N: usize> std::ops::Add<Position<N>> for Grid<N> {
    type Output = Grid<N>;

    fn add(self, vector: Position<N>) -> Grid<N> {
        Grid {
            region: self.region + vector,
            step: self.step,
        }
    }
}

impl<const N: usize> std::ops::Sub<Position<N>> for Grid<N> {
    type Output = Grid<N>;

    fn sub(self, vector: Position<N>) -> Grid<N> {
        Grid {
            region: self.region - vector,
            step: self.step,
        }
    }
}

impl<const N: usize> std::ops::BitAnd<&Region<N>> for Grid<N> {
    type Output = Grid<N>;

    fn bitand(self, bounds: &Region<N>) -> Grid<N> {
        self.clamp(bounds)
    }
}

impl<const N: usize> std::ops::Sub<&Grid<N>> for &Grid<N> {
    type Output = Vec<Position<N>>;

    fn sub(self, other: &Grid<N>) -> Vec<Position<N>> {
        self.difference(other)
    }
}
