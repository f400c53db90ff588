use super::*;
use crate::util::*;

/// Read-only raster over storage owned by someone else.
#[derive(Debug, Clone, Copy)]
pub struct RasterView<'a, T, const N: usize> {
    shape: Position<N>,
    data: &'a [T],
}

impl<'a, T: Copy + Send + Sync, const N: usize> RasterView<'a, T, N> {
    pub fn new(shape: Position<N>, data: &'a [T]) -> Result<Self> {
        check_size(&shape, data.len())?;
        Ok(RasterView { shape, data })
    }

    pub(crate) fn from_parts(shape: Position<N>, data: &'a [T]) -> Self {
        RasterView { shape, data }
    }
}

impl<T: Copy + Send + Sync, const N: usize> RasterRead<N> for RasterView<'_, T, N> {
    type Value = T;

    fn shape(&self) -> Position<N> {
        self.shape
    }

    fn data(&self) -> &[T] {
        self.data
    }
}

/// Writable raster over storage owned by someone else.
#[derive(Debug)]
pub struct RasterViewMut<'a, T, const N: usize> {
    shape: Position<N>,
    data: &'a mut [T],
}

impl<'a, T: Copy + Send + Sync, const N: usize> RasterViewMut<'a, T, N> {
    pub fn new(shape: Position<N>, data: &'a mut [T]) -> Result<Self> {
        check_size(&shape, data.len())?;
        Ok(RasterViewMut { shape, data })
    }

    pub(crate) fn from_parts(shape: Position<N>, data: &'a mut [T]) -> Self {
        RasterViewMut { shape, data }
    }

    /// Point the view at other storage of the same shape, returning the
    /// previous storage.
    pub fn rebind(&mut self, data: &'a mut [T]) -> Result<&'a mut [T]> {
        check_size(&self.shape, data.len())?;
        Ok(std::mem::replace(&mut self.data, data))
    }
}

impl<T: Copy + Send + Sync, const N: usize> RasterRead<N> for RasterViewMut<'_, T, N> {
    type Value = T;

    fn shape(&self) -> Position<N> {
        self.shape
    }

    fn data(&self) -> &[T] {
        &*self.data
    }
}

impl<T: Copy + Send + Sync, const N: usize> RasterWrite<N> for RasterViewMut<'_, T, N> {
    fn data_mut(&mut self) -> &mut [T] {
        self.data
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn view_test() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let view = RasterView::new(vector![2, 3], &data).unwrap();
        assert_eq!(view.data().as_ptr(), data.as_ptr());
        assert_eq!(*view.at(&vector![1, 2]).unwrap(), 6.0);
        assert!(RasterView::new(vector![2, 2], &data).is_err());
    }

    #[test]
    fn view_mut_test() {
        let mut data = vec![0; 6];
        {
            let mut view = RasterViewMut::new(vector![3, 2], &mut data).unwrap();
            view.range(0, 2);
        }
        assert_eq!(data, vec![0, 2, 4, 6, 8, 10]);
    }

    #[test]
    fn rebind_test() {
        let mut first = vec![0; 4];
        let mut second = vec![0; 4];
        let mut third = vec![0; 5];
        let mut view = RasterViewMut::new(vector![2, 2], &mut first).unwrap();
        view.fill(1);
        let previous = view.rebind(&mut second).unwrap();
        assert_eq!(previous, &[1, 1, 1, 1]);
        view.fill(2);
        assert!(view.rebind(&mut third).is_err());
        assert_eq!(second, vec![2, 2, 2, 2]);
    }

    #[test]
    fn owned_as_view_test() {
        let mut raster = Raster::<i32, 2>::new(vector![2, 2]).unwrap();
        raster.as_view_mut().fill(3);
        assert_eq!(raster.as_view().data(), &[3, 3, 3, 3]);
        assert_eq!(raster.as_view().to_raster(), raster);
    }
}
