use crate::raster::*;
use crate::util::*;
use rand::distributions::uniform::SampleUniform;
use rand::prelude::*;
use rayon::prelude::*;

/// Fill with values drawn uniformly from `[low, high)`.
pub fn rand_fill<const N: usize, R>(
    raster: &mut R,
    low: R::Value,
    high: R::Value,
    chunk_size: usize,
) where
    R: RasterWrite<N>,
    R::Value: SampleUniform + PartialOrd,
{
    raster
        .par_modify_access(chunk_size)
        .for_each(|mut c: RasterChunk<'_, R::Value, N>| {
            let mut rng = rand::thread_rng();
            c.coord_iter_mut().for_each(|(_, value_mut)| {
                *value_mut = rng.gen_range(low..high);
            })
        });
}

/// Generator of the chunk starting at `offset`. Seed and offset occupy
/// distinct bytes of the generator seed, so no two pairs share a stream.
fn chunk_rng(seed: u64, offset: usize) -> StdRng {
    let mut bytes = <StdRng as SeedableRng>::Seed::default();
    bytes[..8].copy_from_slice(&seed.to_le_bytes());
    bytes[8..16].copy_from_slice(&(offset as u64).to_le_bytes());
    StdRng::from_seed(bytes)
}

/// Reproducible variant of `rand_fill`: each chunk draws from its own
/// generator derived from `seed` and the chunk offset, so the result only
/// depends on `seed` and `chunk_size`.
pub fn seeded_fill<const N: usize, R>(
    raster: &mut R,
    low: R::Value,
    high: R::Value,
    seed: u64,
    chunk_size: usize,
) where
    R: RasterWrite<N>,
    R::Value: SampleUniform + PartialOrd,
{
    raster
        .par_modify_access(chunk_size)
        .for_each(|mut c: RasterChunk<'_, R::Value, N>| {
            let mut rng = chunk_rng(seed, c.offset());
            c.coord_iter_mut().for_each(|(_, value_mut)| {
                *value_mut = rng.gen_range(low..high);
            })
        });
}
