//! Parallel application of kernels over rasters and extrapolated rasters.
//!
//! Each output value is written once, by the task owning its chunk of the
//! output storage. Positions whose whole window lies in the input domain
//! read the input through precomputed linear offsets; the other positions
//! read through `Sample::sample`, so the boundary policy is only consulted
//! at the border.

use crate::extrapolation::*;
use crate::raster::*;
use crate::stencil::*;
use crate::util::indexing::*;
use crate::util::*;
use rayon::prelude::*;

/// Filter application is configurable.
/// These are all the parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParameters {
    /// Number of output values per parallel task.
    pub chunk_size: usize,
}

impl std::default::Default for FilterParameters {
    fn default() -> Self {
        FilterParameters { chunk_size: 1000 }
    }
}

/// Apply a kernel at every position of the input domain.
///
/// A bare raster input fails with `OutOfBounds` as soon as a window reaches
/// outside of the domain; wrap it in an `Extrapolator` to define border
/// values.
pub fn apply<const N: usize, S, K>(kernel: &K, input: &S) -> Result<Raster<K::Output, N>>
where
    S: Sample<N>,
    K: Kernel<S::Value, N>,
{
    apply_with(kernel, input, &FilterParameters::default())
}

pub fn apply_with<const N: usize, S, K>(
    kernel: &K,
    input: &S,
    params: &FilterParameters,
) -> Result<Raster<K::Output, N>>
where
    S: Sample<N>,
    K: Kernel<S::Value, N>,
{
    let domain = input.sample_domain();
    let mut output = Raster::new(domain.shape())?;
    evaluate(
        kernel,
        input,
        |i| domain.linear_to_coord(i),
        output.data_mut(),
        params,
    )?;
    Ok(output)
}

/// Apply a kernel only where its window fits in the input domain.
/// The output covers `domain.shrink_by(window)`, which may be empty.
pub fn apply_inner<const N: usize, S, K>(
    kernel: &K,
    input: &S,
    params: &FilterParameters,
) -> Result<(Region<N>, Raster<K::Output, N>)>
where
    S: Sample<N>,
    K: Kernel<S::Value, N>,
{
    let inner = input
        .sample_domain()
        .shrink_by(kernel.window().bounding());
    let shape = inner.shape().map(|s| s.max(0));
    let mut output = Raster::new(shape)?;
    evaluate(
        kernel,
        input,
        |i| inner.linear_to_coord(i),
        output.data_mut(),
        params,
    )?;
    Ok((inner, output))
}

/// Apply a kernel at the nodes of a grid. The output has the shape of the
/// grid.
pub fn apply_on_grid<const N: usize, S, K>(
    kernel: &K,
    input: &S,
    grid: &Grid<N>,
    params: &FilterParameters,
) -> Result<Raster<K::Output, N>>
where
    S: Sample<N>,
    K: Kernel<S::Value, N>,
{
    let mut output = Raster::new(grid.shape())?;
    evaluate(
        kernel,
        input,
        |i| grid.linear_to_coord(i),
        output.data_mut(),
        params,
    )?;
    Ok(output)
}

fn evaluate<const N: usize, S, K, F>(
    kernel: &K,
    input: &S,
    position_of: F,
    output: &mut [K::Output],
    params: &FilterParameters,
) -> Result<()>
where
    S: Sample<N>,
    K: Kernel<S::Value, N>,
    F: Fn(usize) -> Position<N> + Sync,
{
    let domain = input.sample_domain();
    let window = kernel.window();
    let inner = domain.shrink_by(window.bounding());
    let contiguous = input.contiguous();
    let linear_offsets = offsets_to_linear(window.offsets(), &domain.shape());
    let chunk_size = params.chunk_size.max(1);
    tracing::debug!(
        domain = %domain,
        window = %window.bounding(),
        neighbors = window.len(),
        outputs = output.len(),
        chunk_size,
        "applying kernel"
    );

    output
        .par_chunks_mut(chunk_size)
        .enumerate()
        .try_for_each(|(c, output_chunk): (usize, &mut [K::Output])| {
            profiling::scope!("kernel: chunk");
            let mut neighbors = Vec::with_capacity(window.len());
            let offset = c * chunk_size;
            for (i, value_mut) in output_chunk.iter_mut().enumerate() {
                let position = position_of(offset + i);
                neighbors.clear();
                match contiguous {
                    Some(data) if inner.contains(&position) => {
                        let center = domain.coord_to_linear(&position) as isize;
                        neighbors.extend(
                            linear_offsets
                                .iter()
                                .map(|o| data[(center + o) as usize]),
                        );
                    }
                    _ => {
                        for o in window.offsets() {
                            neighbors.push(input.try_sample(&(position + o))?);
                        }
                    }
                }
                *value_mut = kernel.reduce(&mut neighbors);
            }
            Ok::<(), RasterError>(())
        })
}
