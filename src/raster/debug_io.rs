//! Diagnostic output of 2D rasters. Nothing in the processing core writes
//! through these sinks; they are for inspecting intermediate results.

use crate::raster::*;
use crate::util::*;
use std::io::prelude::*;

pub trait RasterSink {
    fn write<R>(&mut self, name: &str, raster: &R) -> Result<()>
    where
        R: RasterRead<2>,
        R::Value: Into<f64>;
}

/// Writes the domain on a header line, then one line per row.
pub struct TextSink<W: Write> {
    output: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(output: W) -> Self {
        TextSink { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl TextSink<std::io::BufWriter<std::fs::File>> {
    pub fn create<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(TextSink::new(std::io::BufWriter::new(file)))
    }
}

impl<W: Write> RasterSink for TextSink<W> {
    fn write<R>(&mut self, name: &str, raster: &R) -> Result<()>
    where
        R: RasterRead<2>,
        R::Value: Into<f64>,
    {
        let domain = raster.domain();
        writeln!(self.output, "{name}: {domain}")?;
        for y in 0..raster.length(1) {
            write!(self.output, "*{y}: ")?;
            for x in 0..raster.length(0) {
                let r: f64 = raster.data()[raster.linear(&Position::<2>::new(x, y))].into();
                write!(self.output, "{r:.05}, ")?;
            }
            writeln!(self.output)?;
        }
        self.output.flush()?;
        Ok(())
    }
}

/// Writes one PNG per raster, `<directory>/<name>.png`, mapping the value
/// range to the TURBO color map.
pub struct PngSink {
    directory: std::path::PathBuf,
}

impl PngSink {
    pub fn new<P: Into<std::path::PathBuf>>(directory: P) -> Self {
        PngSink {
            directory: directory.into(),
        }
    }
}

impl RasterSink for PngSink {
    fn write<R>(&mut self, name: &str, raster: &R) -> Result<()>
    where
        R: RasterRead<2>,
        R::Value: Into<f64>,
    {
        let shape = raster.shape();
        let values: Vec<f64> = raster.data().iter().map(|v| (*v).into()).collect();
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        let span = if max > min { max - min } else { 1.0 };
        let gradient = colorous::TURBO;
        let mut img = image::RgbImage::new(shape[0] as u32, shape[1] as u32);
        for (l, v) in values.iter().enumerate() {
            let position = raster.unlinear(l);
            let c = gradient.eval_continuous((v - min) / span);
            img.put_pixel(
                position[0] as u32,
                position[1] as u32,
                image::Rgb(c.as_array()),
            );
        }
        img.save(self.directory.join(format!("{name}.png")))?;
        Ok(())
    }
}
