use num::{Float, NumCast, ToPrimitive};
use std::fmt::{Debug, Display};

/// Primitive types the dataset can be handed over in. Internally, every calculation
/// is done in [`f64`], so input data is widened on construction.
pub trait Primitive: Float + NumCast + ToPrimitive + Copy + Default + Display + Debug + Sync + Send + 'static {}
impl Primitive for f32 {}
impl Primitive for f64 {}


/// Row-major access to a flat buffer of `n` vectors with `dims` dimensions each.
pub(crate) trait RowMajor<T> {
    fn nth(&self, idx: usize, dims: usize) -> &[T];
    fn nth_mut(&mut self, idx: usize, dims: usize) -> &mut [T];
    fn set_nth_from_iter(&mut self, idx: usize, dims: usize, src: impl Iterator<Item = T>) {
        self.nth_mut(idx, dims).iter_mut()
            .zip(src)
            .for_each(|(c, s)| *c = s);
    }
}
impl<T> RowMajor<T> for Vec<T> {
    #[inline(always)]
    fn nth(&self, idx: usize, dims: usize) -> &[T] { &self[idx * dims..(idx + 1) * dims] }
    #[inline(always)]
    fn nth_mut(&mut self, idx: usize, dims: usize) -> &mut [T] { &mut self[idx * dims..(idx + 1) * dims] }
}
