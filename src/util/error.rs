use crate::util::{Index, Position, Region};

/// Errors raised by the raster core.
///
/// Positions and shapes are carried as plain vectors so the error type does
/// not depend on the dimension parameter.
#[derive(thiserror::Error, Debug)]
pub enum RasterError {
    #[error("dimension mismatch: expected {expected} coordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<Index>,
        actual: Vec<Index>,
    },

    #[error("size mismatch: shape requires {expected} elements, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("invalid shape {shape:?}: lengths must be non-negative")]
    InvalidShape { shape: Vec<Index> },

    #[error("invalid grid step {step:?}: steps must be positive")]
    InvalidStep { step: Vec<Index> },

    #[error("structuring element has no offset")]
    EmptyWindow,

    #[error("position {position:?} is outside of domain {front:?}..={back:?}")]
    OutOfBounds {
        position: Vec<Index>,
        front: Vec<Index>,
        back: Vec<Index>,
    },

    #[error("address {address:#x} is not aligned to {alignment} bytes")]
    AlignmentUnmet { address: usize, alignment: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl RasterError {
    pub fn out_of_bounds<const N: usize>(
        position: &Position<N>,
        domain: &Region<N>,
    ) -> Self {
        RasterError::OutOfBounds {
            position: position.as_slice().to_vec(),
            front: domain.front().as_slice().to_vec(),
            back: domain.back().as_slice().to_vec(),
        }
    }

    pub fn shape_mismatch<const N: usize>(
        expected: &Position<N>,
        actual: &Position<N>,
    ) -> Self {
        RasterError::ShapeMismatch {
            expected: expected.as_slice().to_vec(),
            actual: actual.as_slice().to_vec(),
        }
    }
}

pub type Result<T, E = RasterError> = std::result::Result<T, E>;
