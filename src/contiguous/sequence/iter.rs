use std::iter::FusedIterator;
use std::slice;

use super::Sequence;
use crate::allocator::RegionAllocator;
use crate::element::ElementModel;

/// A borrowed iterator over views of the elements of a [`Sequence`]. See [`Sequence::iter`].
pub struct Iter<'a, M: ElementModel> {
    pub(crate) model: &'a M,
    pub(crate) inner: slice::Iter<'a, M::Stored>,
}

impl<'a, M: ElementModel> Iterator for Iter<'a, M> {
    type Item = &'a M::View;

    fn next(&mut self) -> Option<Self::Item> {
        let model = self.model;
        self.inner.next().map(|stored| model.view(stored))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<M: ElementModel> DoubleEndedIterator for Iter<'_, M> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let model = self.model;
        self.inner.next_back().map(|stored| model.view(stored))
    }
}

impl<M: ElementModel> ExactSizeIterator for Iter<'_, M> {}

impl<M: ElementModel> FusedIterator for Iter<'_, M> {}

impl<M: ElementModel> Clone for Iter<'_, M> {
    fn clone(&self) -> Self {
        Iter {
            model: self.model,
            inner: self.inner.clone(),
        }
    }
}

impl<'a, M: ElementModel, A: RegionAllocator> IntoIterator for &'a Sequence<M, A> {
    type Item = &'a M::View;

    type IntoIter = Iter<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
