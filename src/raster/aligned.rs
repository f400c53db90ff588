use super::*;
use crate::util::indexing::*;
use crate::util::*;

/// Default byte alignment of owned aligned storage.
pub const SIMD_ALIGNMENT: usize = 32;

/// What to do when memory does not meet a requested alignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AlignmentPolicy {
    /// Fail with `AlignmentUnmet`.
    #[default]
    Strict,
    /// Accept the memory and report it as unaligned.
    Tolerant,
}

/// Largest power of two dividing an address.
pub fn address_alignment<T>(ptr: *const T) -> usize {
    let address = ptr as usize;
    if address == 0 {
        return usize::MAX;
    }
    1 << address.trailing_zeros()
}

fn check_alignment_value(alignment: usize) -> Result<()> {
    if !alignment.is_power_of_two() {
        return Err(RasterError::AlignmentUnmet {
            address: 0,
            alignment,
        });
    }
    Ok(())
}

/// Heap storage whose first element sits at a requested byte alignment.
///
/// The backing vector is over-allocated and never grows, so the aligned
/// window stays put when the buffer is moved.
#[derive(Debug)]
pub struct AlignedBuffer<T> {
    storage: Vec<T>,
    offset: usize,
    len: usize,
    alignment_req: usize,
    aligned: bool,
}

impl<T: Copy + Default> AlignedBuffer<T> {
    /// Allocate `len` default values. An alignment of 0 selects
    /// `SIMD_ALIGNMENT`.
    pub fn allocate(len: usize, alignment: usize, policy: AlignmentPolicy) -> Result<Self> {
        let alignment_req = if alignment == 0 {
            SIMD_ALIGNMENT
        } else {
            alignment
        };
        check_alignment_value(alignment_req)?;
        let element_size = std::mem::size_of::<T>().max(1);
        let padding = alignment_req.div_ceil(element_size);
        let storage = vec![T::default(); len + padding];
        let offset = storage.as_ptr().align_offset(alignment_req);
        if offset != usize::MAX && offset <= padding {
            return Ok(AlignedBuffer {
                storage,
                offset,
                len,
                alignment_req,
                aligned: true,
            });
        }
        match policy {
            AlignmentPolicy::Strict => Err(RasterError::AlignmentUnmet {
                address: storage.as_ptr() as usize,
                alignment: alignment_req,
            }),
            AlignmentPolicy::Tolerant => {
                tracing::warn!(
                    alignment = alignment_req,
                    "cannot align storage, falling back to unaligned memory"
                );
                Ok(AlignedBuffer {
                    storage,
                    offset: 0,
                    len,
                    alignment_req,
                    aligned: false,
                })
            }
        }
    }
}

impl<T> AlignedBuffer<T> {
    pub fn as_slice(&self) -> &[T] {
        &self.storage[self.offset..self.offset + self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.storage[self.offset..self.offset + self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Requested alignment in bytes.
    pub fn alignment_req(&self) -> usize {
        self.alignment_req
    }

    /// Whether the requested alignment is honored.
    pub fn is_aligned(&self) -> bool {
        self.aligned
    }

    /// Actual alignment of the first element.
    pub fn alignment(&self) -> usize {
        address_alignment(self.as_slice().as_ptr())
    }
}

/// Raster owning aligned storage.
#[derive(Debug)]
pub struct AlignedRaster<T, const N: usize> {
    shape: Position<N>,
    buffer: AlignedBuffer<T>,
}

impl<T: Copy + Default + Send + Sync, const N: usize> AlignedRaster<T, N> {
    pub fn new(shape: Position<N>, alignment: usize, policy: AlignmentPolicy) -> Result<Self> {
        check_shape(&shape)?;
        let buffer = AlignedBuffer::allocate(shape_size(&shape), alignment, policy)?;
        Ok(AlignedRaster { shape, buffer })
    }

    /// Copy values into fresh aligned storage.
    pub fn from_slice(
        shape: Position<N>,
        data: &[T],
        alignment: usize,
        policy: AlignmentPolicy,
    ) -> Result<Self> {
        check_size(&shape, data.len())?;
        let mut result = Self::new(shape, alignment, policy)?;
        result.data_mut().copy_from_slice(data);
        Ok(result)
    }

    /// Owned storage always owns its alignment guarantee.
    pub fn owns(&self) -> bool {
        true
    }

    pub fn alignment_req(&self) -> usize {
        self.buffer.alignment_req()
    }

    pub fn is_aligned(&self) -> bool {
        self.buffer.is_aligned()
    }

    pub fn alignment(&self) -> usize {
        self.buffer.alignment()
    }
}

impl<T: Copy + Send + Sync, const N: usize> RasterRead<N> for AlignedRaster<T, N> {
    type Value = T;

    fn shape(&self) -> Position<N> {
        self.shape
    }

    fn data(&self) -> &[T] {
        self.buffer.as_slice()
    }
}

impl<T: Copy + Send + Sync, const N: usize> RasterWrite<N> for AlignedRaster<T, N> {
    fn data_mut(&mut self) -> &mut [T] {
        self.buffer.as_mut_slice()
    }
}

/// Read-only raster over external memory with a declared alignment.
#[derive(Debug, Clone, Copy)]
pub struct AlignedView<'a, T, const N: usize> {
    shape: Position<N>,
    data: &'a [T],
    alignment_req: usize,
}

impl<'a, T: Copy + Send + Sync, const N: usize> AlignedView<'a, T, N> {
    /// An alignment of 0 means no requirement.
    pub fn new(
        shape: Position<N>,
        data: &'a [T],
        alignment: usize,
        policy: AlignmentPolicy,
    ) -> Result<Self> {
        check_size(&shape, data.len())?;
        let alignment_req = alignment.max(1);
        check_alignment_value(alignment_req)?;
        let address = data.as_ptr() as usize;
        if address % alignment_req != 0 {
            match policy {
                AlignmentPolicy::Strict => {
                    return Err(RasterError::AlignmentUnmet {
                        address,
                        alignment: alignment_req,
                    })
                }
                AlignmentPolicy::Tolerant => {
                    tracing::warn!(
                        address,
                        alignment = alignment_req,
                        "accepting unaligned external memory"
                    );
                }
            }
        }
        Ok(AlignedView {
            shape,
            data,
            alignment_req,
        })
    }

    /// Views never own the memory nor its alignment guarantee.
    pub fn owns(&self) -> bool {
        false
    }

    pub fn alignment_req(&self) -> usize {
        self.alignment_req
    }

    pub fn is_aligned(&self) -> bool {
        (self.data.as_ptr() as usize) % self.alignment_req == 0
    }

    pub fn alignment(&self) -> usize {
        address_alignment(self.data.as_ptr())
    }
}

impl<T: Copy + Send + Sync, const N: usize> RasterRead<N> for AlignedView<'_, T, N> {
    type Value = T;

    fn shape(&self) -> Position<N> {
        self.shape
    }

    fn data(&self) -> &[T] {
        self.data
    }
}
