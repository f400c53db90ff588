use super::*;

/// A region of a source, viewed without copying.
///
/// Positions are those of the parent. Reads inside the region and reads
/// around it, as done by filters near the border of the patch, both go to
/// the parent, so a patch of an extrapolator never fails while a patch of a
/// bare raster fails where the raster does.
#[derive(Debug, Clone, Copy)]
pub struct Patch<'a, S, const N: usize> {
    parent: &'a S,
    region: Region<N>,
}

impl<'a, S: Sample<N>, const N: usize> Patch<'a, S, N> {
    pub fn new(parent: &'a S, region: Region<N>) -> Self {
        Patch { parent, region }
    }

    pub fn parent(&self) -> &'a S {
        self.parent
    }

    pub fn region(&self) -> &Region<N> {
        &self.region
    }

    pub fn size(&self) -> usize {
        self.region.size()
    }

    /// Move the viewed region, keeping its shape.
    pub fn translate(&mut self, vector: &Position<N>) -> &mut Self {
        self.region += *vector;
        self
    }

    /// Values of the region, in region order.
    pub fn iter(&self) -> impl Iterator<Item = Result<S::Value>> + '_ {
        self.region.iter().map(|p| self.parent.try_sample(&p))
    }

    /// Copy the values into a raster of the region's shape.
    pub fn to_raster(&self) -> Result<Raster<S::Value, N>> {
        let data = self.iter().collect::<Result<Vec<_>>>()?;
        Raster::from_vec(self.region.shape(), data)
    }
}

impl<S: Sample<N>, const N: usize> Sample<N> for Patch<'_, S, N> {
    type Value = S::Value;

    fn sample_domain(&self) -> Region<N> {
        self.region
    }

    #[inline]
    fn sample(&self, position: &Position<N>) -> Option<S::Value> {
        self.parent.sample(position)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::par_stencil::*;
    use crate::stencil::*;
    use nalgebra::vector;

    #[test]
    fn view_test() {
        let mut raster = Raster::<i32, 2>::new(vector![4, 3]).unwrap();
        raster.range(0, 1);
        let mut patch = Patch::new(&raster, Region::new(vector![1, 1], vector![2, 2]));
        assert_eq!(patch.size(), 4);
        assert_eq!(patch.to_raster().unwrap().data(), &[5, 6, 9, 10]);
        patch.translate(&vector![1, -1]);
        let values: Vec<i32> = patch.iter().map(|v| v.unwrap()).collect();
        assert_eq!(values, vec![2, 3, 6, 7]);
        patch.translate(&vector![1, 0]);
        assert!(patch.to_raster().is_err());
    }

    #[test]
    fn filter_patch_test() {
        let mut raster = Raster::<i32, 2>::new(vector![5, 4]).unwrap();
        raster.range(0, 1);
        let extra = Extrapolator::new(&raster, Nearest);
        let window = Window::from_center(1).unwrap();
        let kernel = Correlation::new(window, vec![1; 9]).unwrap();
        let full = apply(&kernel, &extra).unwrap();

        let region = Region::new(vector![0, 1], vector![2, 3]);
        let partial = apply(&kernel, &Patch::new(&extra, region)).unwrap();
        assert_eq!(partial.shape(), vector![3, 3]);
        assert_eq!(partial, full.crop(&region).unwrap());

        // The window reads the raster around the patch
        let inner = Region::new(vector![1, 1], vector![3, 2]);
        let bare = apply(&kernel, &Patch::new(&raster, inner)).unwrap();
        assert_eq!(bare, full.crop(&inner).unwrap());
    }
}
