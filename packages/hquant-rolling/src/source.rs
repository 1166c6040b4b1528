use crate::error::SourceError;
use std::rc::Rc;
use std::sync::Arc;

/// Indexed value source consumed by the rolling aggregators.
///
/// Indices are absolute (0 = first bar of the series). Callable repeatedly and
/// in any order. [`crate::indicator::FastSma`] assumes repeated reads of an index
/// return the same value; [`crate::indicator::RollingSum`] tolerates the value at
/// its current index changing between calls.
pub trait ValueSource<N> {
    type Error;

    fn value_at(&self, index: usize) -> Result<N, Self::Error>;
}

impl<N: Copy> ValueSource<N> for [N] {
    type Error = SourceError;

    #[inline]
    fn value_at(&self, index: usize) -> Result<N, SourceError> {
        self.get(index).copied().ok_or(SourceError::OutOfRange {
            index,
            len: self.len(),
        })
    }
}

impl<N: Copy> ValueSource<N> for Vec<N> {
    type Error = SourceError;

    #[inline]
    fn value_at(&self, index: usize) -> Result<N, SourceError> {
        self.as_slice().value_at(index)
    }
}

impl<N, S: ValueSource<N> + ?Sized> ValueSource<N> for &S {
    type Error = S::Error;

    #[inline]
    fn value_at(&self, index: usize) -> Result<N, Self::Error> {
        (**self).value_at(index)
    }
}

impl<N, S: ValueSource<N> + ?Sized> ValueSource<N> for Rc<S> {
    type Error = S::Error;

    #[inline]
    fn value_at(&self, index: usize) -> Result<N, Self::Error> {
        (**self).value_at(index)
    }
}

impl<N, S: ValueSource<N> + ?Sized> ValueSource<N> for Arc<S> {
    type Error = S::Error;

    #[inline]
    fn value_at(&self, index: usize) -> Result<N, Self::Error> {
        (**self).value_at(index)
    }
}

/// Adapts a closure `Fn(usize) -> Result<N, E>` into a [`ValueSource`].
#[derive(Clone, Copy)]
pub struct FnSource<F>(pub F);

impl<F> core::fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnSource").finish_non_exhaustive()
    }
}

impl<N, E, F> ValueSource<N> for FnSource<F>
where
    F: Fn(usize) -> Result<N, E>,
{
    type Error = E;

    #[inline]
    fn value_at(&self, index: usize) -> Result<N, E> {
        (self.0)(index)
    }
}
