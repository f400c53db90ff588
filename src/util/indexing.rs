//! Mapping between positions and linear offsets.
//! The first axis varies fastest: `stride(i) = shape[0] * ... * shape[i - 1]`.

use crate::util::*;

/// Number of elements of a shape, zero when any length is non-positive.
pub fn shape_size<const N: usize>(shape: &Position<N>) -> usize {
    let mut accumulator = 1;
    for d in shape {
        if *d <= 0 {
            return 0;
        }
        accumulator *= *d as usize;
    }
    accumulator
}

pub fn strides<const N: usize>(shape: &Position<N>) -> Position<N> {
    let mut result = Position::zeros();
    let mut accumulator = 1;
    for d in 0..N {
        result[d] = accumulator;
        accumulator *= shape[d];
    }
    result
}

pub fn coord_to_linear<const N: usize>(
    coord: &Position<N>,
    shape: &Position<N>,
) -> usize {
    let mut accumulator = 0;
    for d in (0..N).rev() {
        debug_assert!(coord[d] >= 0 && coord[d] < shape[d]);
        accumulator = accumulator * shape[d] as usize + coord[d] as usize;
    }
    accumulator
}

pub fn linear_to_coord<const N: usize>(
    linear_index: usize,
    shape: &Position<N>,
) -> Position<N> {
    let mut result = Position::zeros();
    let mut index_accumulator = linear_index;
    for d in 0..N {
        let length = shape[d] as usize;
        result[d] = (index_accumulator % length) as Index;
        index_accumulator /= length;
    }
    result
}

/// Signed linear offsets of a set of relative positions, for a given shape.
/// `coord_to_linear(p + o) == coord_to_linear(p) + offset(o)` whenever both
/// positions are inside the shape.
pub fn offsets_to_linear<const N: usize>(
    offsets: &[Position<N>],
    shape: &Position<N>,
) -> Vec<isize> {
    let stride = strides(shape);
    offsets
        .iter()
        .map(|o| o.dot(&stride) as isize)
        .collect()
}
