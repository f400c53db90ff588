pub mod extrapolation;
pub mod interpolation;
pub mod morphology;
pub mod par_stencil;
#[cfg(feature = "profile-with-puffin")]
pub mod profiler;
pub mod raster;
pub mod stencil;
pub mod util;
